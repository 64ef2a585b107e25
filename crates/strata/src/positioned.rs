//! The result of layout: an immutable, fully geometric snapshot of a graph.

use crate::attrs::{EdgeRender, RankDir, VertexRender};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        let mut it = points.into_iter();
        let (x0, y0) = it.next()?;
        let mut b = Self {
            min_x: x0,
            min_y: y0,
            max_x: x0,
            max_y: y0,
        };
        for (x, y) in it {
            b.min_x = b.min_x.min(x);
            b.min_y = b.min_y.min(y);
            b.max_x = b.max_x.max(x);
            b.max_y = b.max_y.max(y);
        }
        Some(b)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedVertex {
    pub id: String,
    /// Center of the outline.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Layer index, counting only layers that hold vertices (0 = first rank).
    pub rank: usize,
    pub render: VertexRender,
}

impl PositionedVertex {
    pub fn left(&self) -> f64 {
        self.x - self.width / 2.0
    }

    pub fn top(&self) -> f64 {
        self.y - self.height / 2.0
    }
}

/// Label anchor of an edge: the center of its label box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionedLabel {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    /// Path from the source outline to the target outline; at least two points.
    pub points: Vec<Point>,
    pub label: PositionedLabel,
    /// The edge was reversed to break a cycle during ranking; `points` still run from source
    /// to target.
    pub feedback: bool,
    pub render: EdgeRender,
}

/// A laid-out graph. Built once by [`crate::DirectedGraph::layout`]; read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedGraph {
    width: f64,
    height: f64,
    /// Union of every vertex outline, edge point and label box, before margins.
    bounds: Bounds,
    rank_dir: RankDir,
    bg_color: Option<String>,
    vertices: Vec<PositionedVertex>,
    edges: Vec<PositionedEdge>,
}

impl PositionedGraph {
    pub(crate) fn new(
        width: f64,
        height: f64,
        bounds: Bounds,
        rank_dir: RankDir,
        bg_color: Option<String>,
        vertices: Vec<PositionedVertex>,
        edges: Vec<PositionedEdge>,
    ) -> Self {
        Self {
            width,
            height,
            bounds,
            rank_dir,
            bg_color,
            vertices,
            edges,
        }
    }

    pub(crate) fn empty(rank_dir: RankDir, bg_color: Option<String>) -> Self {
        Self::new(
            0.0,
            0.0,
            Bounds {
                min_x: 0.0,
                min_y: 0.0,
                max_x: 0.0,
                max_y: 0.0,
            },
            rank_dir,
            bg_color,
            Vec::new(),
            Vec::new(),
        )
    }

    /// Drawing width including margins.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Drawing height including margins.
    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn rank_dir(&self) -> RankDir {
        self.rank_dir
    }

    pub fn bg_color(&self) -> Option<&str> {
        self.bg_color.as_deref()
    }

    /// Vertices in insertion order.
    pub fn vertices(&self) -> &[PositionedVertex] {
        &self.vertices
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> &[PositionedEdge] {
        &self.edges
    }

    pub fn vertex(&self, id: &str) -> Option<&PositionedVertex> {
        self.vertices.iter().find(|v| v.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&PositionedEdge> {
        self.edges.iter().find(|e| e.id == id)
    }
}
