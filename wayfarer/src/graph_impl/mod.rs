//! Graph data structures.
//!
//! Road graphs the searches run on. Both store [`EdgeRecord`]s with per-direction access and
//! speed, plus pillar points for the edge geometry:
//! - [`DynamicGraph`] keeps incident edge ids per node and can grow. Used to build graphs and in tests.
//! - [`CompactGraph`] packs the same data into flat arrays, built once from a [`DynamicGraph`].

mod dynamic_graph;
mod compact_graph;
mod common;

pub use dynamic_graph::*;
pub use compact_graph::*;
pub use common::*;
