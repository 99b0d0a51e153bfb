use crate::graph::{EdgeId, EdgeRef, NodeId};

/// Index of an entry in the arena of a frontier
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub u32);

impl EntryId {
  pub fn index(self) -> usize {
    self.0 as usize
  }
}

/// Node of a shortest path tree, records how `adj_node` was reached.
///
/// `edge` is the view the edge was explored with, so its `adj` equals `adj_node`. For a
/// backward search that is the opposite of the travel direction.
#[derive(Clone, Debug, PartialEq)]
pub struct SptEntry {
  pub edge: Option<EdgeRef>,
  pub adj_node: NodeId,
  /// Priority in the queue, includes the estimate of A*
  pub weight: f64,
  pub weight_of_visited_path: f64,
  /// Absolute time in millis, only maintained by the time-dependent search
  pub time: i64,
  pub parent: Option<EntryId>,
}

impl SptEntry {
  pub fn root(node: NodeId, weight: f64) -> Self {
    SptEntry {
      edge: None,
      adj_node: node,
      weight,
      weight_of_visited_path: 0.0,
      time: 0,
      parent: None,
    }
  }

  pub fn new(edge: EdgeRef, weight: f64, weight_of_visited_path: f64, parent: EntryId) -> Self {
    SptEntry {
      adj_node: edge.adj,
      edge: Some(edge),
      weight,
      weight_of_visited_path,
      time: 0,
      parent: Some(parent),
    }
  }

  pub fn with_time(mut self, time: i64) -> Self {
    self.time = time;
    self
  }

  pub fn incoming_edge(&self) -> Option<EdgeId> {
    self.edge.map(|e| e.edge)
  }

  pub fn is_root(&self) -> bool {
    self.parent.is_none()
  }
}
