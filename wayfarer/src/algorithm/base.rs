use crate::error::{Result, RoutingError};
use crate::graph::{AllEdges, EdgeFilter, EdgeId, EdgeRef, GraphBase, NodeId};
use crate::traversal::TraversalMode;

/// Query lifecycle shared by all algorithms: the single use guard, the visited nodes limit,
/// the traversal mode and the edge filter.
pub struct SearchBase {
  mode: TraversalMode,
  max_visited_nodes: usize,
  filter: Box<dyn EdgeFilter>,
  already_run: bool,
}

impl SearchBase {
  pub fn new(mode: TraversalMode) -> Self {
    SearchBase {
      mode,
      max_visited_nodes: usize::MAX,
      filter: Box::new(AllEdges),
      already_run: false,
    }
  }

  pub fn mode(&self) -> TraversalMode {
    self.mode
  }

  /// Marks the instance as used, fails if it was used before
  pub fn check_already_run(&mut self, algorithm: &str) -> Result<()> {
    if self.already_run {
      return Err(RoutingError::AlreadyRun {
        algorithm: algorithm.to_string(),
      });
    }
    self.already_run = true;
    Ok(())
  }

  pub fn check_nodes<G: GraphBase>(&self, graph: &G, nodes: &[NodeId]) -> Result<()> {
    let count = graph.number_of_nodes();
    match nodes.iter().find(|&&node| node as usize >= count) {
      Some(&node) => Err(RoutingError::NodeOutOfBounds { node, nodes: count }),
      None => Ok(()),
    }
  }

  pub fn set_max_visited_nodes(&mut self, max_visited_nodes: usize) {
    self.max_visited_nodes = max_visited_nodes;
  }

  pub fn is_max_visited_nodes_exceeded(&self, visited_nodes: usize) -> bool {
    self.max_visited_nodes < visited_nodes
  }

  pub fn set_edge_filter(&mut self, filter: Box<dyn EdgeFilter>) {
    self.filter = filter;
  }

  /// An edge is explored unless it is the one the search just came from (u-turn support
  /// aside) or the filter rejects it.
  pub fn accept(&self, edge: &EdgeRef, prev: Option<EdgeId>) -> bool {
    if !self.mode.has_u_turn_support() && prev == Some(edge.edge) {
      return false;
    }
    self.filter.accept_after(edge, prev)
  }
}
