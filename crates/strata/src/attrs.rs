//! Attribute records for graphs, vertices and edges.
//!
//! Every record is split into a `layout` part (inputs to the layout engine) and a `render` part
//! (styling consumed by the serializers). All records deserialize from partial JSON: missing
//! fields take their defaults.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RankDir {
    /// Top to bottom.
    #[default]
    TB,
    /// Bottom to top.
    BT,
    /// Left to right.
    LR,
    /// Right to left.
    RL,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Plaintext,
    #[default]
    Rectangle,
    Square,
    Circle,
    Ellipse,
    Triangle,
    Diamond,
    Underline,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VertexStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    Bold,
}

/// Interpolation between consecutive path points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Curve {
    Straight,
    #[default]
    #[serde(alias = "simple_quadratic")]
    Quadratic,
}

/// Which ends of an edge carry arrowheads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dir {
    #[default]
    Forward,
    Back,
    Both,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrowHead {
    #[default]
    Normal,
    Empty,
    Dot,
    None,
}

/// Preferred side of an edge label relative to its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LabelPos {
    L,
    R,
    #[default]
    C,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphLayout {
    pub rank_dir: RankDir,
    pub rank_sep: f64,
    pub node_sep: f64,
    pub edge_sep: f64,
    pub margin_x: f64,
    pub margin_y: f64,
}

impl Default for GraphLayout {
    fn default() -> Self {
        Self {
            rank_dir: RankDir::TB,
            rank_sep: 50.0,
            node_sep: 50.0,
            edge_sep: 20.0,
            margin_x: 8.0,
            margin_y: 8.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphRender {
    pub bg_color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphAttrs {
    pub layout: GraphLayout,
    pub render: GraphRender,
}

/// Padding between a vertex's label and its outline, per side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub x: f64,
    pub y: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self { x: 12.0, y: 8.0 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VertexLayout {
    /// Explicit outline width; measured when absent.
    pub shape_w: Option<f64>,
    /// Explicit outline height; measured when absent.
    pub shape_h: Option<f64>,
    pub margins: Margins,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VertexRender {
    pub id: Option<String>,
    pub label: Option<String>,
    pub shape: Shape,
    pub color: Option<String>,
    pub fill_color: Option<String>,
    pub pen_width: f64,
    pub font_size: f64,
    pub font_color: Option<String>,
    pub style: VertexStyle,
    pub tooltip: Option<String>,
}

impl Default for VertexRender {
    fn default() -> Self {
        Self {
            id: None,
            label: None,
            shape: Shape::Rectangle,
            color: None,
            fill_color: None,
            pen_width: 1.0,
            font_size: 14.0,
            font_color: None,
            style: VertexStyle::Solid,
            tooltip: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VertexAttrs {
    pub layout: VertexLayout,
    pub render: VertexRender,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeLayout {
    /// Explicit label box width; measured from the label when absent.
    pub shape_w: Option<f64>,
    /// Explicit label box height; measured from the label when absent.
    pub shape_h: Option<f64>,
    pub label_pos: LabelPos,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeRender {
    pub id: Option<String>,
    pub label: Option<String>,
    /// Decoration of the label box: `None`, `Rectangle` or `Underline`.
    pub shape: Shape,
    pub color: Option<String>,
    pub fill_color: Option<String>,
    pub font_color: Option<String>,
    pub font_size: f64,
    pub pen_width: f64,
    pub curve: Curve,
    pub dir: Dir,
    pub arrow_head: ArrowHead,
    pub arrow_tail: ArrowHead,
    pub style: EdgeStyle,
    pub tooltip: Option<String>,
}

impl Default for EdgeRender {
    fn default() -> Self {
        Self {
            id: None,
            label: None,
            shape: Shape::None,
            color: None,
            fill_color: None,
            font_color: None,
            font_size: 14.0,
            pen_width: 1.0,
            curve: Curve::Quadratic,
            dir: Dir::Forward,
            arrow_head: ArrowHead::Normal,
            arrow_tail: ArrowHead::Normal,
            style: EdgeStyle::Solid,
            tooltip: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeAttrs {
    pub layout: EdgeLayout,
    pub render: EdgeRender,
}

/// Deep-merges `patch` into `base`: objects merge key by key, everything else replaces.
pub(crate) fn merge_json(base: &mut Value, patch: &Value) {
    match (base, patch) {
        (Value::Object(base), Value::Object(patch)) => {
            for (k, v) in patch {
                match base.get_mut(k) {
                    Some(slot) => merge_json(slot, v),
                    None => {
                        base.insert(k.clone(), v.clone());
                    }
                }
            }
        }
        (base, patch) => *base = patch.clone(),
    }
}

/// Applies a partial JSON object to a record, returning the merged record.
pub(crate) fn merged<T>(record: &T, patch: &Value) -> crate::Result<T>
where
    T: Serialize + serde::de::DeserializeOwned,
{
    let mut value = serde_json::to_value(record)?;
    merge_json(&mut value, patch);
    Ok(serde_json::from_value(value)?)
}

impl GraphAttrs {
    /// Returns a copy with the fields present in `patch` overridden.
    ///
    /// Unknown keys are rejected.
    pub fn merged_with(&self, patch: &Value) -> crate::Result<Self> {
        merged(self, patch)
    }
}

impl VertexAttrs {
    pub fn with_label(label: impl Into<String>) -> Self {
        let mut attrs = Self::default();
        attrs.render.label = Some(label.into());
        attrs
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        let mut attrs = Self::default();
        attrs.render.id = Some(id.into());
        attrs
    }
}

impl EdgeAttrs {
    pub fn with_label(label: impl Into<String>) -> Self {
        let mut attrs = Self::default();
        attrs.render.label = Some(label.into());
        attrs
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        let mut attrs = Self::default();
        attrs.render.id = Some(id.into());
        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn partial_json_fills_defaults() {
        let attrs: VertexAttrs =
            serde_json::from_value(json!({ "render": { "label": "x", "shape": "diamond" } }))
                .unwrap();
        assert_eq!(attrs.render.label.as_deref(), Some("x"));
        assert_eq!(attrs.render.shape, Shape::Diamond);
        assert_eq!(attrs.render.font_size, 14.0);
    }

    #[test]
    fn graph_attrs_reject_unknown_keys() {
        let err = serde_json::from_value::<GraphAttrs>(json!({ "layout": { "rank_gap": 3 } }));
        assert!(err.is_err());
    }

    #[test]
    fn merged_with_keeps_untouched_fields() {
        let mut base = GraphAttrs::default();
        base.layout.rank_dir = RankDir::LR;
        let merged = base
            .merged_with(&json!({ "layout": { "node_sep": 10.0 } }))
            .unwrap();
        assert_eq!(merged.layout.rank_dir, RankDir::LR);
        assert_eq!(merged.layout.node_sep, 10.0);
        assert_eq!(merged.layout.rank_sep, 50.0);
    }
}
