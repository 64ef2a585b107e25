//! Label types carried on layout graph nodes and edges, plus geometry primitives.
//!
//! Input fields (sizes, separations, `minlen`, `weight`, `labelpos`) are set by the caller;
//! output fields (`x`, `y`, `rank`, `order`, `points`, `width`/`height` on the graph) are filled
//! in by [`crate::layout`].

use crate::graphlib::EdgeKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankDir {
    #[default]
    TB,
    BT,
    LR,
    RL,
}

impl RankDir {
    /// True when ranks advance along the x axis.
    pub fn is_horizontal(self) -> bool {
        matches!(self, RankDir::LR | RankDir::RL)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelPos {
    L,
    R,
    #[default]
    C,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone)]
pub struct GraphLabel {
    pub rankdir: RankDir,
    pub nodesep: f64,
    pub ranksep: f64,
    pub edgesep: f64,
    pub marginx: f64,
    pub marginy: f64,
    /// Order-axis extent of the synthetic vertices inserted along long edges.
    pub dummy_size: f64,

    /// Set when any edge carries a label box; edges then span two ranks per unit of `minlen`
    /// so the label can sit on the middle rank.
    pub label_ranks: bool,
    pub dummy_chains: Vec<String>,

    pub width: f64,
    pub height: f64,
}

impl Default for GraphLabel {
    fn default() -> Self {
        Self {
            rankdir: RankDir::TB,
            nodesep: 50.0,
            ranksep: 50.0,
            edgesep: 20.0,
            marginx: 0.0,
            marginy: 0.0,
            dummy_size: 0.0,
            label_ranks: false,
            dummy_chains: Vec::new(),
            width: 0.0,
            height: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dummy {
    /// Routing point of a rank-spanning edge.
    Edge,
    /// Routing point that also reserves room for the edge's label box.
    EdgeLabel,
    /// Placeholder that reserves room for a self-loop beside its vertex.
    SelfEdge,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeLabel {
    pub width: f64,
    pub height: f64,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub rank: Option<i32>,
    pub order: Option<usize>,

    pub dummy: Option<Dummy>,
    pub labelpos: Option<LabelPos>,
    pub edge_label: Option<EdgeLabel>,
    pub edge_obj: Option<EdgeKey>,
    pub self_edges: Vec<SelfEdge>,
}

impl NodeLabel {
    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn is_dummy(&self) -> bool {
        self.dummy.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeLabel {
    pub width: f64,
    pub height: f64,
    pub labelpos: LabelPos,
    pub labeloffset: f64,
    pub label_rank: Option<i32>,
    pub minlen: usize,
    pub weight: f64,

    /// The edge is currently stored against its original direction.
    pub reversed: bool,
    pub forward_name: Option<String>,
    /// The edge was picked for the feedback arc set; survives `acyclic::undo`.
    pub feedback: bool,
    /// Self-loop whose label anchor was placed beside the loop and needs no L/R fixup.
    pub self_loop: bool,

    pub x: Option<f64>,
    pub y: Option<f64>,
    pub points: Vec<Point>,
}

impl EdgeLabel {
    pub fn has_label_box(&self) -> bool {
        self.width > 0.0 || self.height > 0.0
    }
}

impl Default for EdgeLabel {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            labelpos: LabelPos::C,
            labeloffset: 10.0,
            label_rank: None,
            minlen: 1,
            weight: 1.0,
            reversed: false,
            forward_name: None,
            feedback: false,
            self_loop: false,
            x: None,
            y: None,
            points: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelfEdge {
    pub edge_obj: EdgeKey,
    pub label: EdgeLabel,
}
