//! In-rank ordering / crossing reduction.
//!
//! The initial order comes from a depth-first walk in insertion order ([`init_order`]). It is
//! then improved by alternating barycenter sweeps ([`barycenter`]): downward sweeps key each
//! vertex by the mean position of its predecessors, upward sweeps by its successors. The
//! layering with the lowest [`cross_count`] wins.

mod barycenter;
pub use barycenter::{BarycenterEntry, Relationship, barycenter, sort_layer};

mod cross_count;
pub use cross_count::cross_count;

mod init_order;
pub use init_order::init_order;

mod ordering;
pub use ordering::order;
