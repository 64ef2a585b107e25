//! Internal storage entries and adjacency cache for [`Graph`](super::Graph).

use super::EdgeKey;

#[derive(Debug, Clone)]
pub(in crate::graph) struct NodeEntry<N> {
    pub(in crate::graph) id: String,
    pub(in crate::graph) label: N,
}

#[derive(Debug, Clone)]
pub(in crate::graph) struct EdgeEntry<E> {
    pub(in crate::graph) key: EdgeKey,
    pub(in crate::graph) label: E,
}

/// Per-node lists of edge indices, rebuilt lazily after any structural change.
///
/// Layout passes query successors/predecessors far more often than they mutate the graph, so
/// scanning every edge per query would dominate runtime on large inputs.
#[derive(Debug, Clone)]
pub(in crate::graph) struct AdjCache {
    pub(in crate::graph) generation: u64,
    pub(in crate::graph) out: Vec<Vec<usize>>,
    pub(in crate::graph) in_: Vec<Vec<usize>>,
}
