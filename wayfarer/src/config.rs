use crate::traversal::TraversalMode;
use serde::{Deserialize, Serialize};

/// Options for building a routing algorithm, see
/// [`RoutingAlgorithmFactory`](crate::algorithm::RoutingAlgorithmFactory).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlgorithmOptions {
  /// One of `dijkstra`, `dijkstrabi`, `dijkstranativebi`, `astar`, `astarbi`,
  /// `dijkstraonetomany`. Anything else selects `astar`.
  pub algorithm: String,
  /// Use the faster plane projection instead of the haversine formula for the beeline estimate
  pub approximation: bool,
  pub edge_based: bool,
  pub max_visited_nodes: usize,
  /// Subtracted from the termination check of the bidirectional searches
  pub approximator_offset: f64,
  /// Factor applied to the beeline estimate
  pub epsilon: f64,
}

impl Default for AlgorithmOptions {
  fn default() -> Self {
    AlgorithmOptions {
      algorithm: "astarbi".to_string(),
      approximation: false,
      edge_based: false,
      max_visited_nodes: usize::MAX,
      approximator_offset: 0.0,
      epsilon: 1.0,
    }
  }
}

impl AlgorithmOptions {
  pub fn traversal_mode(&self) -> TraversalMode {
    TraversalMode::from_edge_based(self.edge_based)
  }
}
