//! SVG output for positioned graphs.

mod path;
mod util;

use crate::attrs::{ArrowHead, Dir, EdgeStyle, Shape, VertexStyle};
use crate::color::{Paint, parse_color};
use crate::positioned::{PositionedEdge, PositionedGraph, PositionedVertex};
use crate::sizing::{DeterministicSizer, text_lines};
use indexmap::IndexMap;
use path::{edge_path_data, line_centers, line_into, open_shape_into};
use std::fmt;
use std::fmt::Write as _;
use util::{attr_into, escape_xml_into, fmt, num_attr_into};

const DEFAULT_STROKE: &str = "black";
const DEFAULT_LABEL_FILL: &str = "white";
const FONT_FAMILY: &str = "sans-serif";

/// An SVG rendering of a [`PositionedGraph`]; written out through [`fmt::Display`].
#[derive(Debug, Clone, Copy)]
pub struct Svg<'a> {
    graph: &'a PositionedGraph,
    sized: bool,
}

impl PositionedGraph {
    pub fn to_svg(&self) -> Svg<'_> {
        Svg {
            graph: self,
            sized: false,
        }
    }
}

impl Svg<'_> {
    /// Adds explicit `width`/`height` attributes matching the drawing; otherwise the document
    /// only carries a `viewBox` and scales to its container.
    pub fn with_width_and_height(mut self) -> Self {
        self.sized = true;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        render_into(&mut out, self.graph, self.sized);
        out
    }
}

impl fmt::Display for Svg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Arrow markers, one per (head, color) pair actually used.
#[derive(Default)]
struct Markers {
    ids: IndexMap<(ArrowHead, String), String>,
}

impl Markers {
    fn id_for(&mut self, head: ArrowHead, color: &str) -> Option<String> {
        if head == ArrowHead::None {
            return None;
        }
        let next = self.ids.len();
        let id = self
            .ids
            .entry((head, color.to_string()))
            .or_insert_with(|| format!("arrow-{next}"));
        Some(id.clone())
    }

    fn render_into(&self, out: &mut String) {
        if self.ids.is_empty() {
            return;
        }
        out.push_str("<defs>");
        for ((head, color), id) in &self.ids {
            out.push_str("<marker");
            attr_into(out, "id", id);
            out.push_str(
                r#" viewBox="0 0 10 10" refX="10" refY="5" markerWidth="10" markerHeight="10" markerUnits="userSpaceOnUse" orient="auto-start-reverse">"#,
            );
            let paint = resolve(Some(color), DEFAULT_STROKE);
            match head {
                ArrowHead::Normal => {
                    out.push_str(r#"<path d="M0,0L10,5L0,10z""#);
                    paint_into(out, "fill", &paint);
                    out.push_str("/>");
                }
                ArrowHead::Empty => {
                    out.push_str(r#"<path d="M0,0L10,5L0,10z" fill="white""#);
                    paint_into(out, "stroke", &paint);
                    out.push_str("/>");
                }
                ArrowHead::Dot => {
                    out.push_str(r#"<circle cx="5" cy="5" r="4""#);
                    paint_into(out, "fill", &paint);
                    out.push_str("/>");
                }
                ArrowHead::None => {}
            }
            out.push_str("</marker>");
        }
        out.push_str("</defs>");
    }
}

fn render_into(out: &mut String, g: &PositionedGraph, sized: bool) {
    let (w, h) = (g.width(), g.height());
    out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg""#);
    if sized {
        num_attr_into(out, "width", w);
        num_attr_into(out, "height", h);
    }
    let _ = write!(out, r#" viewBox="0 0 {} {}">"#, fmt(w), fmt(h));

    let mut markers = Markers::default();
    let mut body = String::new();

    if let Some(bg) = g.bg_color().and_then(parse_color) {
        body.push_str(r#"<rect class="background" x="0" y="0""#);
        num_attr_into(&mut body, "width", w);
        num_attr_into(&mut body, "height", h);
        paint_into(&mut body, "fill", &bg);
        body.push_str("/>");
    }

    body.push_str(r#"<g class="edges">"#);
    for e in g.edges() {
        edge_into(&mut body, e, &mut markers);
    }
    body.push_str("</g>");

    body.push_str(r#"<g class="vertices">"#);
    for v in g.vertices() {
        vertex_into(&mut body, v);
    }
    body.push_str("</g>");

    markers.render_into(out);
    out.push_str(&body);
    out.push_str("</svg>");
}

fn edge_into(out: &mut String, e: &PositionedEdge, markers: &mut Markers) {
    let r = &e.render;
    let stroke = resolve(r.color.as_deref(), DEFAULT_STROKE);

    out.push_str(r#"<g class="edge""#);
    attr_into(out, "id", &format!("edge-{}", e.id));
    out.push('>');
    title_into(out, r.tooltip.as_deref());

    out.push_str("<path");
    attr_into(out, "d", &edge_path_data(&e.points, r.curve));
    out.push_str(r#" fill="none""#);
    paint_into(out, "stroke", &stroke);
    let pen = if r.style == EdgeStyle::Bold {
        r.pen_width * 2.0
    } else {
        r.pen_width
    };
    num_attr_into(out, "stroke-width", pen);
    match r.style {
        EdgeStyle::Dashed => out.push_str(r#" stroke-dasharray="5,2""#),
        EdgeStyle::Dotted => out.push_str(r#" stroke-dasharray="1,5""#),
        EdgeStyle::Solid | EdgeStyle::Bold => {}
    }
    let (start, end) = match r.dir {
        Dir::Forward => (None, Some(r.arrow_head)),
        Dir::Back => (Some(r.arrow_tail), None),
        Dir::Both => (Some(r.arrow_tail), Some(r.arrow_head)),
        Dir::None => (None, None),
    };
    if let Some(id) = start.and_then(|head| markers.id_for(head, &stroke.color)) {
        attr_into(out, "marker-start", &format!("url(#{id})"));
    }
    if let Some(id) = end.and_then(|head| markers.id_for(head, &stroke.color)) {
        attr_into(out, "marker-end", &format!("url(#{id})"));
    }
    out.push_str("/>");

    let l = e.label;
    if l.width > 0.0 && l.height > 0.0 {
        let (left, top) = (l.x - l.width / 2.0, l.y - l.height / 2.0);
        match r.shape {
            Shape::Rectangle | Shape::Square => {
                out.push_str(r#"<rect class="edge-label""#);
                num_attr_into(out, "x", left);
                num_attr_into(out, "y", top);
                num_attr_into(out, "width", l.width);
                num_attr_into(out, "height", l.height);
                paint_into(
                    out,
                    "fill",
                    &resolve(r.fill_color.as_deref(), DEFAULT_LABEL_FILL),
                );
                paint_into(out, "stroke", &stroke);
                out.push_str("/>");
            }
            Shape::Underline => {
                line_into(out, left, top + l.height, left + l.width, top + l.height);
                paint_into(out, "stroke", &stroke);
                out.push_str("/>");
            }
            _ => {}
        }
    }
    if let Some(label) = r.label.as_deref().filter(|s| !s.is_empty()) {
        let color = resolve(r.font_color.as_deref(), DEFAULT_STROKE);
        text_into(out, label, l.x, l.y, r.font_size, &color);
    }
    out.push_str("</g>");
}

fn vertex_into(out: &mut String, v: &PositionedVertex) {
    let r = &v.render;
    out.push_str(r#"<g class="vertex""#);
    attr_into(out, "id", &format!("vertex-{}", v.id));
    out.push('>');
    title_into(out, r.tooltip.as_deref());

    if open_shape_into(out, r.shape, v.x, v.y, v.width, v.height) {
        let stroke = resolve(r.color.as_deref(), DEFAULT_STROKE);
        match r.fill_color.as_deref().and_then(parse_color) {
            Some(fill) => paint_into(out, "fill", &fill),
            None => out.push_str(r#" fill="none""#),
        }
        paint_into(out, "stroke", &stroke);
        let pen = if r.style == VertexStyle::Bold {
            r.pen_width * 2.0
        } else {
            r.pen_width
        };
        num_attr_into(out, "stroke-width", pen);
        match r.style {
            VertexStyle::Dashed => out.push_str(r#" stroke-dasharray="5,2""#),
            VertexStyle::Dotted => out.push_str(r#" stroke-dasharray="1,5""#),
            VertexStyle::Solid | VertexStyle::Bold => {}
        }
        out.push_str("/>");
    }

    let label = r.label.as_deref().unwrap_or(&v.id);
    if !label.is_empty() {
        let color = resolve(r.font_color.as_deref(), DEFAULT_STROKE);
        text_into(out, label, v.x, v.y, r.font_size, &color);
    }
    out.push_str("</g>");
}

fn text_into(out: &mut String, text: &str, cx: f64, cy: f64, font_size: f64, color: &Paint) {
    let lines = text_lines(text);
    let line_height = font_size * DeterministicSizer::default().line_height_factor;
    for (line, y) in lines.iter().zip(line_centers(cy, lines.len(), line_height)) {
        out.push_str(r#"<text text-anchor="middle" dominant-baseline="central""#);
        num_attr_into(out, "x", cx);
        num_attr_into(out, "y", y);
        num_attr_into(out, "font-size", font_size);
        attr_into(out, "font-family", FONT_FAMILY);
        paint_into(out, "fill", color);
        out.push('>');
        escape_xml_into(out, line);
        out.push_str("</text>");
    }
}

fn title_into(out: &mut String, tooltip: Option<&str>) {
    if let Some(tip) = tooltip.filter(|t| !t.is_empty()) {
        out.push_str("<title>");
        escape_xml_into(out, tip);
        out.push_str("</title>");
    }
}

fn resolve(color: Option<&str>, fallback: &str) -> Paint {
    color.and_then(parse_color).unwrap_or_else(|| Paint {
        color: fallback.to_string(),
        opacity: None,
    })
}

/// Appends `name="color"` plus `name-opacity` when the color carries alpha.
fn paint_into(out: &mut String, name: &str, paint: &Paint) {
    attr_into(out, name, &paint.color);
    if let Some(opacity) = paint.opacity {
        num_attr_into(out, &format!("{name}-opacity"), opacity);
    }
}
