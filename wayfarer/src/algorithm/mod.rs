//! Route finding algorithms.
//!
//! Every algorithm instance answers a single query, create a new one for the next query. The
//! graph is only read, so independent instances may share it between threads.

mod astar;
mod base;
mod bidirectional;
mod factory;
mod one_to_many;
mod td_dijkstra;

pub use astar::*;
pub use base::*;
pub use bidirectional::*;
pub use factory::*;
pub use one_to_many::*;
pub use td_dijkstra::*;

use crate::error::{Result, RoutingError};
use crate::graph::{EdgeFilter, EdgeId, NodeId};
use crate::path::PathOutcome;

pub const DIJKSTRA: &str = "dijkstra";
pub const DIJKSTRA_BI: &str = "dijkstrabi";
pub const DIJKSTRA_NATIVE_BI: &str = "dijkstranativebi";
pub const ASTAR: &str = "astar";
pub const ASTAR_BI: &str = "astarbi";
pub const DIJKSTRA_ONE_TO_MANY: &str = "dijkstraonetomany";
pub const TD_DIJKSTRA: &str = "td_dijkstra";

pub trait RoutingAlgorithm {
  /// Calculates the best path between two nodes
  fn calc_path(&mut self, from: NodeId, to: NodeId) -> Result<PathOutcome>;

  /// Like [`calc_path`](Self::calc_path), but the path has to start with `from_out_edge` and
  /// end with `to_in_edge` when they are given.
  fn calc_path_between_edges(
    &mut self,
    from: NodeId,
    to: NodeId,
    from_out_edge: Option<EdgeId>,
    to_in_edge: Option<EdgeId>,
  ) -> Result<PathOutcome> {
    if from_out_edge.is_none() && to_in_edge.is_none() {
      return self.calc_path(from, to);
    }
    Err(RoutingError::EdgeRestrictionUnsupported {
      algorithm: self.name(),
    })
  }

  /// Limits the search, a query which visits more nodes reports `VisitLimitReached`
  fn set_max_visited_nodes(&mut self, max_visited_nodes: usize);

  /// Excludes edges from the search
  fn set_edge_filter(&mut self, filter: Box<dyn EdgeFilter>);

  fn visited_nodes(&self) -> usize;

  fn name(&self) -> String;
}

impl<R: RoutingAlgorithm + ?Sized> RoutingAlgorithm for Box<R> {
  fn calc_path(&mut self, from: NodeId, to: NodeId) -> Result<PathOutcome> {
    (**self).calc_path(from, to)
  }

  fn calc_path_between_edges(
    &mut self,
    from: NodeId,
    to: NodeId,
    from_out_edge: Option<EdgeId>,
    to_in_edge: Option<EdgeId>,
  ) -> Result<PathOutcome> {
    (**self).calc_path_between_edges(from, to, from_out_edge, to_in_edge)
  }

  fn set_max_visited_nodes(&mut self, max_visited_nodes: usize) {
    (**self).set_max_visited_nodes(max_visited_nodes)
  }

  fn set_edge_filter(&mut self, filter: Box<dyn EdgeFilter>) {
    (**self).set_edge_filter(filter)
  }

  fn visited_nodes(&self) -> usize {
    (**self).visited_nodes()
  }

  fn name(&self) -> String {
    (**self).name()
  }
}
