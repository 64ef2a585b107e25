//! Graph container used by `strata-layout`.
//!
//! Nodes and edges keep their insertion order. Every traversal the layout pipeline performs
//! walks nodes/edges in that order, which is what makes the layered layout deterministic for
//! identical input.

#![forbid(unsafe_code)]

mod graph;

pub use graph::{EdgeKey, Graph, GraphOptions};

pub mod alg {
    pub use crate::graph::alg::{CycleError, find_cycles, topsort};
}
