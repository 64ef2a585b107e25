#![forbid(unsafe_code)]

//! `strata` lays out directed graphs in layers and renders them as SVG or JSON.
//!
//! Build a [`DirectedGraph`] (directly, or from DOT source with [`DirectedGraph::from_dot`]),
//! call [`DirectedGraph::layout`] to get a [`PositionedGraph`], then serialize it with
//! [`PositionedGraph::to_svg`] or [`PositionedGraph::to_json`]. [`diff`] color-codes two
//! versions of a graph before they are laid out.
//!
//! ```
//! use strata::{DirectedGraph, EdgeAttrs, VertexAttrs};
//!
//! let mut g = DirectedGraph::default();
//! let a = g.new_vertex(VertexAttrs::with_label("A")).unwrap();
//! let b = g.new_vertex(VertexAttrs::with_label("B")).unwrap();
//! g.new_edge(a, b, EdgeAttrs::default()).unwrap();
//!
//! let positioned = g.layout();
//! assert!(positioned.vertices()[1].y > positioned.vertices()[0].y);
//! let svg = positioned.to_svg().with_width_and_height().to_string();
//! assert!(svg.starts_with("<svg"));
//! ```

pub mod attrs;
pub mod color;
pub mod diff;
pub mod dot;
mod error;
mod graph;
mod json;
mod layout;
mod positioned;
pub mod sizing;
pub mod svg;

pub use attrs::{
    ArrowHead, Curve, Dir, EdgeAttrs, EdgeLayout, EdgeRender, EdgeStyle, GraphAttrs, GraphLayout,
    GraphRender, LabelPos, Margins, RankDir, Shape, VertexAttrs, VertexLayout, VertexRender,
    VertexStyle,
};
pub use diff::{Classification, DiffReport, EdgeIdentity, classify, diff};
pub use dot::{DotGraph, DotParser};
pub use error::{ElementKind, Error, Result};
pub use graph::{DirectedGraph, EdgeHandle, EdgeOptions, VertexHandle, VertexOptions};
pub use json::GraphJson;
pub use positioned::{
    Bounds, Point, PositionedEdge, PositionedGraph, PositionedLabel, PositionedVertex,
};
pub use sizing::{DeterministicSizer, Size, SizeProvider};
pub use svg::Svg;
