use super::{RoutingAlgorithm, SearchBase, ASTAR, DIJKSTRA};
use crate::error::Result;
use crate::graph::*;
use crate::path::{forward_edges, Path, PathOutcome};
use crate::search_space::SearchSpace;
use crate::spt::{EntryId, SptEntry};
use crate::traversal::TraversalMode;
use crate::weighting::{WeightApproximator, Weighting, ZeroApproximator};
use log::debug;

/// Unidirectional best first search. With the [`ZeroApproximator`] it is Dijkstra's algorithm.
pub struct AStar<G, W, A = ZeroApproximator> {
  graph: G,
  weighting: W,
  approximator: A,
  base: SearchBase,
  space: SearchSpace,
  visited_nodes: usize,
  name: &'static str,
}

pub type Dijkstra<G, W> = AStar<G, W, ZeroApproximator>;

impl<G: RoutingGraph, W: Weighting> AStar<G, W, ZeroApproximator> {
  pub fn dijkstra(graph: G, weighting: W, mode: TraversalMode) -> Self {
    AStar {
      graph,
      weighting,
      approximator: ZeroApproximator,
      base: SearchBase::new(mode),
      space: SearchSpace::new(),
      visited_nodes: 0,
      name: DIJKSTRA,
    }
  }
}

impl<G: RoutingGraph, W: Weighting, A: WeightApproximator> AStar<G, W, A> {
  pub fn new(graph: G, weighting: W, mode: TraversalMode, approximator: A) -> Self {
    AStar {
      graph,
      weighting,
      approximator,
      base: SearchBase::new(mode),
      space: SearchSpace::new(),
      visited_nodes: 0,
      name: ASTAR,
    }
  }

  fn run(&mut self, from: NodeId, to: NodeId) -> Result<PathOutcome> {
    self.approximator.set_to(to);
    let root = SptEntry::root(from, self.approximator.approximate(from));
    self.space.add_root(root, self.base.mode().root_key(from));

    loop {
      let current = match self.space.pop() {
        Some(current) => current,
        None => return Ok(PathOutcome::Unreachable),
      };
      self.visited_nodes += 1;
      if self.base.is_max_visited_nodes_exceeded(self.visited_nodes) {
        return Ok(PathOutcome::VisitLimitReached);
      }

      let entry = self.space.entry(current).clone();
      if entry.adj_node == to {
        let edges = forward_edges(&self.space, current);
        let path = Path::from_edges(from, edges, entry.weight_of_visited_path, &self.weighting)?;
        return Ok(PathOutcome::Found(path));
      }
      self.explore(current, &entry)?;
    }
  }

  fn explore(&mut self, current: EntryId, entry: &SptEntry) -> Result<()> {
    let prev = entry.incoming_edge();
    for edge in out_edges(self.graph, entry.adj_node) {
      if !self.base.accept(&edge, prev) {
        continue;
      }
      let weight = self.weighting.calc_weight(&edge, false, prev)?;
      if weight.is_infinite() {
        continue;
      }
      let visited = entry.weight_of_visited_path + weight;
      let estimate = self.approximator.approximate(edge.adj);
      let key = self.base.mode().key(&edge, false);
      self
        .space
        .relax(key, SptEntry::new(edge, visited + estimate, visited, current));
    }
    Ok(())
  }
}

impl<G: RoutingGraph, W: Weighting, A: WeightApproximator> RoutingAlgorithm for AStar<G, W, A> {
  fn calc_path(&mut self, from: NodeId, to: NodeId) -> Result<PathOutcome> {
    self.base.check_already_run(self.name)?;
    self.base.check_nodes(&self.graph, &[from, to])?;
    let outcome = self.run(from, to)?;
    debug!(
      "{}({}) {} -> {}: {}, visited {} nodes",
      self.name,
      self.approximator.name(),
      from,
      to,
      outcome.label(),
      self.visited_nodes
    );
    Ok(outcome)
  }

  fn set_max_visited_nodes(&mut self, max_visited_nodes: usize) {
    self.base.set_max_visited_nodes(max_visited_nodes);
  }

  fn set_edge_filter(&mut self, filter: Box<dyn EdgeFilter>) {
    self.base.set_edge_filter(filter);
  }

  fn visited_nodes(&self) -> usize {
    self.visited_nodes
  }

  fn name(&self) -> String {
    self.name.to_string()
  }
}
