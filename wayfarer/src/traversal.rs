use crate::graph::{EdgeRef, NodeId};
use serde::{Deserialize, Serialize};

/// Identity of a search state: what a frontier keeps at most one best entry for
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TraversalKey(pub u64);

/// Defines what a search state is.
///
/// `NodeBased` keeps one state per node. The edge-based modes keep one state per directed
/// edge, so that the cost of a turn can depend on the edge a junction was approached from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalMode {
  NodeBased,
  EdgeBased,
  EdgeBasedWithUTurns,
}

impl Default for TraversalMode {
  fn default() -> Self {
    TraversalMode::NodeBased
  }
}

impl TraversalMode {
  pub fn from_edge_based(edge_based: bool) -> Self {
    if edge_based {
      TraversalMode::EdgeBased
    } else {
      TraversalMode::NodeBased
    }
  }

  pub fn is_edge_based(self) -> bool {
    self != TraversalMode::NodeBased
  }

  pub fn has_u_turn_support(self) -> bool {
    self == TraversalMode::EdgeBasedWithUTurns
  }

  /// Key of the state reached by traversing `edge` from `edge.base`.
  ///
  /// For the edge-based modes the direction bit is relative to the stored edge, so the forward
  /// search traveling `u -> v` and the backward search exploring the same edge from `v` end up
  /// with the same key.
  pub fn key(self, edge: &EdgeRef, reverse: bool) -> TraversalKey {
    match self {
      TraversalMode::NodeBased => TraversalKey(edge.adj as u64),
      _ => TraversalKey(((edge.edge as u64) << 1) | (edge.against_storage ^ reverse) as u64),
    }
  }

  /// Key of a root at `node`. Edge-based roots are not reached through an edge and have no key.
  pub fn root_key(self, node: NodeId) -> Option<TraversalKey> {
    match self {
      TraversalMode::NodeBased => Some(TraversalKey(node as u64)),
      _ => None,
    }
  }
}
