//! Layered graph layout.
//!
//! The pipeline follows the classic Sugiyama structure:
//!
//! 1. [`acyclic`] reverses a feedback arc set so the graph becomes a DAG,
//! 2. [`rank`] assigns longest-path layers,
//! 3. [`normalize`] splits rank-spanning edges into chains of synthetic vertices,
//! 4. [`order`] reduces crossings with barycenter sweeps,
//! 5. [`position`] turns rank/order into coordinates,
//! 6. [`route`] attaches edge endpoints to vertex boundaries and places label anchors.
//!
//! [`layout`] runs all passes over a [`graphlib::Graph`] whose labels are [`NodeLabel`],
//! [`EdgeLabel`] and [`GraphLabel`].

#![forbid(unsafe_code)]

pub use strata_graphlib as graphlib;

pub mod acyclic;
pub mod check;
pub mod coordinate_system;
mod error;
mod model;
pub mod normalize;
pub mod order;
mod pipeline;
pub mod position;
pub mod rank;
pub mod route;
pub mod self_edges;
pub mod util;

pub use error::{LayoutError, Result};
pub use model::{Dummy, EdgeLabel, GraphLabel, LabelPos, NodeLabel, Point, RankDir, SelfEdge};
pub use pipeline::layout;

/// Upper bound on barycenter sweeps during crossing reduction.
pub const MAX_SWEEPS: usize = 24;
/// Crossing reduction stops after this many sweeps without a better layering.
pub const SWEEPS_WITHOUT_IMPROVEMENT: usize = 4;
/// Number of neighbor-centroid relaxation passes in coordinate assignment.
pub const RELAX_PASSES: usize = 8;

pub type LayoutGraph = graphlib::Graph<NodeLabel, EdgeLabel, GraphLabel>;
