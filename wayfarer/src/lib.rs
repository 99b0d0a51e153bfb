//! Generic algorithms for finding the best routes in road networks.
//!
//! A query combines a graph, a [`Weighting`](weighting::Weighting) which prices every edge and
//! a [`TraversalMode`](traversal::TraversalMode). The searches in [`algorithm`] settle entries
//! of a shortest path tree until the best path is known and return a [`PathOutcome`](path::PathOutcome).

pub mod algorithm;
pub mod config;
pub mod error;
pub mod graph;
pub mod graph_impl;
pub mod path;
pub mod search_space;
pub mod spatial;
pub mod spt;
pub mod traversal;
pub mod weighting;

#[cfg(test)]
mod test_utils;

pub use algorithm::{RoutingAlgorithm, RoutingAlgorithmFactory};
pub use config::AlgorithmOptions;
pub use error::{Result, RoutingError};
pub use path::{Path, PathOutcome};
pub use traversal::TraversalMode;
