//! A DOT-language front end.
//!
//! [`DotParser`] reads the common subset of Graphviz DOT into a generic [`DotGraph`] (string
//! attributes, subgraphs flattened); [`DotGraph::to_directed`] maps that onto a
//! [`DirectedGraph`] and its closed attribute schema. Attributes without a counterpart in the
//! schema are logged and skipped.

mod lexer;
mod parser;

use crate::attrs::{
    ArrowHead, Dir, EdgeAttrs, EdgeStyle, GraphAttrs, LabelPos, RankDir, Shape, VertexAttrs,
    VertexStyle,
};
use crate::error::{Error, Result};
use crate::graph::DirectedGraph;
use indexmap::IndexMap;

/// Attribute list in source order; later assignments win.
pub type DotAttrs = IndexMap<String, String>;

/// Graphviz measures sizes in inches.
const POINTS_PER_INCH: f64 = 72.0;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DotGraph {
    pub strict: bool,
    pub directed: bool,
    pub id: Option<String>,
    /// Top-level graph attributes.
    pub attrs: DotAttrs,
    /// Nodes in order of first mention, with their resolved attributes.
    pub nodes: IndexMap<String, DotAttrs>,
    pub edges: Vec<DotEdge>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DotEdge {
    pub source: String,
    pub target: String,
    pub attrs: DotAttrs,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DotParser;

impl DotParser {
    pub fn parse(input: &str) -> Result<DotGraph> {
        parser::Parser::new(input)?.parse()
    }
}

impl DotGraph {
    /// Builds a directed graph store; fails with [`Error::TypeMismatch`] for `graph { }` input.
    pub fn to_directed(&self) -> Result<DirectedGraph> {
        if !self.directed {
            return Err(Error::TypeMismatch {
                expected: "directed",
                found: "undirected",
            });
        }

        let mut g = DirectedGraph::new(graph_attrs(&self.attrs));
        for (name, attrs) in &self.nodes {
            g.new_vertex(vertex_attrs(name, attrs))?;
        }
        for e in &self.edges {
            let (Some(source), Some(target)) = (g.find_vertex(&e.source), g.find_vertex(&e.target))
            else {
                continue;
            };
            g.new_edge(source, target, edge_attrs(&e.attrs))?;
        }
        Ok(g)
    }
}

impl DirectedGraph {
    /// Parses DOT source straight into a graph store.
    pub fn from_dot(input: &str) -> Result<Self> {
        DotParser::parse(input)?.to_directed()
    }
}

fn ignored(element: &'static str, key: &str, value: &str) {
    tracing::warn!(element, attribute = key, value, "DOT attribute ignored");
}

fn number(element: &'static str, key: &str, value: &str) -> Option<f64> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            ignored(element, key, value);
            None
        }
    }
}

fn graph_attrs(attrs: &DotAttrs) -> GraphAttrs {
    let mut out = GraphAttrs::default();
    for (key, value) in attrs {
        match key.as_str() {
            "rankdir" => match value.to_ascii_uppercase().as_str() {
                "TB" => out.layout.rank_dir = RankDir::TB,
                "BT" => out.layout.rank_dir = RankDir::BT,
                "LR" => out.layout.rank_dir = RankDir::LR,
                "RL" => out.layout.rank_dir = RankDir::RL,
                _ => ignored("graph", key, value),
            },
            "ranksep" => {
                // Graphviz allows a trailing "equally".
                let head = value.split_whitespace().next().unwrap_or_default();
                if let Some(v) = number("graph", key, head) {
                    out.layout.rank_sep = v * POINTS_PER_INCH;
                }
            }
            "nodesep" => {
                if let Some(v) = number("graph", key, value) {
                    out.layout.node_sep = v * POINTS_PER_INCH;
                }
            }
            "bgcolor" => out.render.bg_color = Some(value.clone()),
            _ => ignored("graph", key, value),
        }
    }
    out
}

fn styles(value: &str) -> impl Iterator<Item = String> + '_ {
    value
        .split(',')
        .map(|s| s.trim().to_ascii_lowercase())
        .filter(|s| !s.is_empty())
}

fn vertex_attrs(name: &str, attrs: &DotAttrs) -> VertexAttrs {
    let mut out = VertexAttrs::with_id(name);
    let r = &mut out.render;
    let mut filled = false;
    for (key, value) in attrs {
        match key.as_str() {
            "label" => r.label = Some(value.replace("\\N", name)),
            "shape" => match value.to_ascii_lowercase().as_str() {
                "box" | "rect" | "rectangle" => r.shape = Shape::Rectangle,
                "square" => r.shape = Shape::Square,
                "circle" | "doublecircle" | "point" => r.shape = Shape::Circle,
                "ellipse" | "oval" => r.shape = Shape::Ellipse,
                "diamond" => r.shape = Shape::Diamond,
                "triangle" => r.shape = Shape::Triangle,
                "plaintext" | "plain" => r.shape = Shape::Plaintext,
                "underline" => r.shape = Shape::Underline,
                "none" => r.shape = Shape::None,
                _ => ignored("vertex", key, value),
            },
            "color" => r.color = Some(value.clone()),
            "fillcolor" => r.fill_color = Some(value.clone()),
            "fontcolor" => r.font_color = Some(value.clone()),
            "tooltip" => r.tooltip = Some(value.clone()),
            "fontsize" => {
                if let Some(v) = number("vertex", key, value) {
                    r.font_size = v;
                }
            }
            "penwidth" => {
                if let Some(v) = number("vertex", key, value) {
                    r.pen_width = v;
                }
            }
            "style" => {
                for style in styles(value) {
                    match style.as_str() {
                        "solid" => r.style = VertexStyle::Solid,
                        "dashed" => r.style = VertexStyle::Dashed,
                        "dotted" => r.style = VertexStyle::Dotted,
                        "bold" => r.style = VertexStyle::Bold,
                        "filled" => filled = true,
                        _ => ignored("vertex", key, &style),
                    }
                }
            }
            "width" => {
                if let Some(v) = number("vertex", key, value) {
                    out.layout.shape_w = Some(v * POINTS_PER_INCH);
                }
            }
            "height" => {
                if let Some(v) = number("vertex", key, value) {
                    out.layout.shape_h = Some(v * POINTS_PER_INCH);
                }
            }
            _ => ignored("vertex", key, value),
        }
    }
    let r = &mut out.render;
    if filled && r.fill_color.is_none() {
        r.fill_color = Some(r.color.clone().unwrap_or_else(|| "lightgrey".to_string()));
    }
    out
}

fn arrow_head(key: &str, value: &str) -> ArrowHead {
    match value.to_ascii_lowercase().as_str() {
        "normal" => ArrowHead::Normal,
        "empty" | "onormal" => ArrowHead::Empty,
        "dot" => ArrowHead::Dot,
        "none" => ArrowHead::None,
        _ => {
            ignored("edge", key, value);
            ArrowHead::Normal
        }
    }
}

fn edge_attrs(attrs: &DotAttrs) -> EdgeAttrs {
    let mut out = EdgeAttrs::default();
    let r = &mut out.render;
    for (key, value) in attrs {
        match key.as_str() {
            "id" => r.id = Some(value.clone()),
            "label" => r.label = Some(value.clone()),
            "color" => r.color = Some(value.clone()),
            "fillcolor" => r.fill_color = Some(value.clone()),
            "fontcolor" => r.font_color = Some(value.clone()),
            "tooltip" => r.tooltip = Some(value.clone()),
            "fontsize" => {
                if let Some(v) = number("edge", key, value) {
                    r.font_size = v;
                }
            }
            "penwidth" => {
                if let Some(v) = number("edge", key, value) {
                    r.pen_width = v;
                }
            }
            "style" => {
                for style in styles(value) {
                    match style.as_str() {
                        "solid" => r.style = EdgeStyle::Solid,
                        "dashed" => r.style = EdgeStyle::Dashed,
                        "dotted" => r.style = EdgeStyle::Dotted,
                        "bold" => r.style = EdgeStyle::Bold,
                        _ => ignored("edge", key, &style),
                    }
                }
            }
            "dir" => match value.to_ascii_lowercase().as_str() {
                "forward" => r.dir = Dir::Forward,
                "back" => r.dir = Dir::Back,
                "both" => r.dir = Dir::Both,
                "none" => r.dir = Dir::None,
                _ => ignored("edge", key, value),
            },
            "arrowhead" => r.arrow_head = arrow_head(key, value),
            "arrowtail" => r.arrow_tail = arrow_head(key, value),
            "labelpos" => match value.to_ascii_lowercase().as_str() {
                "l" => out.layout.label_pos = LabelPos::L,
                "r" => out.layout.label_pos = LabelPos::R,
                "c" => out.layout.label_pos = LabelPos::C,
                _ => ignored("edge", key, value),
            },
            _ => ignored("edge", key, value),
        }
    }
    out
}
