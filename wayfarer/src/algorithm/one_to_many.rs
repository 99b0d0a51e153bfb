use super::{RoutingAlgorithm, SearchBase, DIJKSTRA_ONE_TO_MANY};
use crate::error::{Result, RoutingError};
use crate::graph::*;
use crate::path::{forward_edges, Path, PathOutcome};
use crate::search_space::SearchSpace;
use crate::spt::{EntryId, SptEntry};
use crate::traversal::TraversalMode;
use crate::weighting::Weighting;
use hashbrown::{HashMap, HashSet};
use log::debug;

/// Dijkstra from one source which settles until all of the given targets are reached
pub struct DijkstraOneToMany<G, W> {
  graph: G,
  weighting: W,
  base: SearchBase,
  space: SearchSpace,
  visited_nodes: usize,
}

impl<G: RoutingGraph, W: Weighting> DijkstraOneToMany<G, W> {
  pub fn new(graph: G, weighting: W, mode: TraversalMode) -> Self {
    DijkstraOneToMany {
      graph,
      weighting,
      base: SearchBase::new(mode),
      space: SearchSpace::new(),
      visited_nodes: 0,
    }
  }

  /// Best paths from `from` to each of `targets`, in the order of `targets`
  pub fn calc_paths(&mut self, from: NodeId, targets: &[NodeId]) -> Result<Vec<PathOutcome>> {
    self.base.check_already_run(DIJKSTRA_ONE_TO_MANY)?;
    self.base.check_nodes(&self.graph, &[from])?;
    self.base.check_nodes(&self.graph, targets)?;

    let (settled, limit_reached) = self.run(from, targets)?;
    let mut outcomes = Vec::with_capacity(targets.len());
    for target in targets {
      let outcome = match settled.get(target) {
        Some(&goal) => {
          let entry = self.space.entry(goal);
          let edges = forward_edges(&self.space, goal);
          PathOutcome::Found(Path::from_edges(from, edges, entry.weight_of_visited_path, &self.weighting)?)
        }
        None if limit_reached => PathOutcome::VisitLimitReached,
        None => PathOutcome::Unreachable,
      };
      outcomes.push(outcome);
    }
    debug!(
      "{} {} -> {} targets: {} found, visited {} nodes",
      DIJKSTRA_ONE_TO_MANY,
      from,
      targets.len(),
      outcomes.iter().filter(|o| o.is_found()).count(),
      self.visited_nodes
    );
    Ok(outcomes)
  }

  /// Returns the goal entry of every reached target and whether the search hit the limit
  fn run(&mut self, from: NodeId, targets: &[NodeId]) -> Result<(HashMap<NodeId, EntryId>, bool)> {
    let mut remaining: HashSet<NodeId> = targets.iter().cloned().collect();
    let mut settled = HashMap::new();
    self.space.add_root(SptEntry::root(from, 0.0), self.base.mode().root_key(from));

    while !remaining.is_empty() {
      let current = match self.space.pop() {
        Some(current) => current,
        None => break,
      };
      self.visited_nodes += 1;
      if self.base.is_max_visited_nodes_exceeded(self.visited_nodes) {
        return Ok((settled, true));
      }

      let entry = self.space.entry(current).clone();
      if remaining.remove(&entry.adj_node) {
        settled.insert(entry.adj_node, current);
        if remaining.is_empty() {
          break;
        }
      }
      self.explore(current, &entry)?;
    }
    Ok((settled, false))
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
      let key = self.base.mode().key(&edge, false);
      self.space.relax(key, SptEntry::new(edge, visited, visited, current));
    }
    Ok(())
  }
}

impl<G: RoutingGraph, W: Weighting> RoutingAlgorithm for DijkstraOneToMany<G, W> {
  fn calc_path(&mut self, from: NodeId, to: NodeId) -> Result<PathOutcome> {
    self
      .calc_paths(from, &[to])?
      .pop()
      .ok_or(RoutingError::EmptyQueue("one to many"))
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
    DIJKSTRA_ONE_TO_MANY.to_string()
  }
}
