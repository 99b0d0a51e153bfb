//! Errors raised by weightings and searches.
//!
//! Not finding a path is not an error, see [`PathOutcome`](crate::path::PathOutcome).

use crate::graph::{EdgeId, NodeId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoutingError {
  #[error("{algorithm} has already been used for a query, create a new instance")]
  AlreadyRun { algorithm: String },

  #[error("restricting the start/target edges is only possible for edge-based traversal")]
  EdgeRestrictionRequiresEdgeBased,

  #[error("{algorithm} does not support restricting the start/target edges")]
  EdgeRestrictionUnsupported { algorithm: String },

  #[error("a time-dependent routing algorithm requires a time-dependent weighting, got {weighting}")]
  NotTimeDependent { weighting: String },

  #[error("invalid speed {speed} stored in edge {edge}")]
  InvalidSpeed { edge: EdgeId, speed: f64 },

  #[error("speed cannot be 0 for unblocked edge {edge}, use access flags to mark it blocked")]
  ZeroSpeed { edge: EdgeId },

  #[error("calculating time should not read speed of edge {edge} ({base} - {adj}) in a blocked direction, reverse: {reverse}")]
  BlockedDirection {
    edge: EdgeId,
    base: NodeId,
    adj: NodeId,
    reverse: bool,
  },

  #[error("forward and backward search met with different incoming edges {forward:?} and {backward:?}")]
  MeetingEdgeMismatch {
    forward: Option<EdgeId>,
    backward: Option<EdgeId>,
  },

  #[error("priority queue of the {0} search is unexpectedly empty")]
  EmptyQueue(&'static str),

  #[error("node {node} does not exist, the graph has {nodes} nodes")]
  NodeOutOfBounds { node: NodeId, nodes: usize },
}

pub type Result<T, E = RoutingError> = std::result::Result<T, E>;
