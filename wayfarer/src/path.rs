//! Paths extracted from shortest path trees.

use crate::error::Result;
use crate::graph::{EdgeRef, IntoGeometry, NodeId};
use crate::search_space::{BestWeightMap, SearchSpace};
use crate::spatial::Position;
use crate::spt::EntryId;
use crate::weighting::Weighting;

/// A route through the graph. Edges are oriented in travel direction: the `adj` node of an
/// edge is the `base` node of the next one.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
  pub edges: Vec<EdgeRef>,
  pub nodes: Vec<NodeId>,
  pub weight: f64,
  /// Travel time in millis
  pub time: u64,
  /// Length in meters
  pub distance: f64,
}

impl Path {
  /// Path which starts and ends at `node` without moving
  pub fn trivial(node: NodeId) -> Self {
    Path {
      edges: Vec::new(),
      nodes: vec![node],
      weight: 0.0,
      time: 0,
      distance: 0.0,
    }
  }

  /// Builds a path and sums the travel time of its edges, including the turns between them
  pub fn from_edges<W: Weighting + ?Sized>(
    start: NodeId,
    edges: Vec<EdgeRef>,
    weight: f64,
    weighting: &W,
  ) -> Result<Self> {
    let mut time = 0;
    let mut prev = None;
    for edge in &edges {
      time += weighting.calc_millis(edge, false, prev)?;
      prev = Some(edge.edge);
    }
    Ok(Path::with_time(start, edges, weight, time))
  }

  /// Builds a path with an already known travel time
  pub fn with_time(start: NodeId, edges: Vec<EdgeRef>, weight: f64, time: u64) -> Self {
    let mut nodes = Vec::with_capacity(edges.len() + 1);
    nodes.push(edges.first().map_or(start, |e| e.base));
    nodes.extend(edges.iter().map(|e| e.adj));
    let distance = edges.iter().map(|e| e.distance).sum();
    Path {
      edges,
      nodes,
      weight,
      time,
      distance,
    }
  }

  pub fn from_node(&self) -> NodeId {
    self.nodes[0]
  }

  pub fn to_node(&self) -> NodeId {
    self.nodes[self.nodes.len() - 1]
  }

  pub fn is_empty(&self) -> bool {
    self.edges.is_empty()
  }

  pub fn len(&self) -> usize {
    self.edges.len()
  }

  /// Points of all edges in travel order, without repeating the shared tower nodes
  pub fn geometry<G: IntoGeometry + Copy>(&self, graph: G) -> Vec<Position> {
    let mut points: Vec<Position> = Vec::new();
    for edge in &self.edges {
      for point in graph.geometry(edge) {
        if points.last() != Some(&point) {
          points.push(point);
        }
      }
    }
    points
  }
}

/// Result of a path query. Not finding a path is an expected outcome, not an error.
#[derive(Clone, Debug, PartialEq)]
pub enum PathOutcome {
  Found(Path),
  /// The searches ran out of entries before they reached the target
  Unreachable,
  /// The search stopped because it exceeded the maximum number of visited nodes
  VisitLimitReached,
}

impl PathOutcome {
  pub fn is_found(&self) -> bool {
    matches!(self, PathOutcome::Found(_))
  }

  pub fn path(&self) -> Option<&Path> {
    match self {
      PathOutcome::Found(path) => Some(path),
      _ => None,
    }
  }

  pub fn into_path(self) -> Option<Path> {
    match self {
      PathOutcome::Found(path) => Some(path),
      _ => None,
    }
  }

  pub fn weight(&self) -> Option<f64> {
    self.path().map(|p| p.weight)
  }

  pub fn label(&self) -> &'static str {
    match self {
      PathOutcome::Found(_) => "found",
      PathOutcome::Unreachable => "unreachable",
      PathOutcome::VisitLimitReached => "visit_limit_reached",
    }
  }
}

/// Edges of the chain ending at `id` in travel order, for a forward search
pub(crate) fn forward_edges<M: BestWeightMap>(space: &SearchSpace<M>, id: EntryId) -> Vec<EdgeRef> {
  let mut edges: Vec<EdgeRef> = space.unwind(id).iter().filter_map(|i| space.entry(*i).edge).collect();
  edges.reverse();
  edges
}

/// Edges of the chain ending at `id` in travel order, for a backward search
pub(crate) fn backward_edges<M: BestWeightMap>(space: &SearchSpace<M>, id: EntryId) -> Vec<EdgeRef> {
  space
    .unwind(id)
    .iter()
    .filter_map(|i| space.entry(*i).edge)
    .map(|e| e.reversed())
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::spt::SptEntry;
  use crate::traversal::TraversalKey;
  use crate::weighting::FastestWeighting;

  fn edge(id: u32, base: NodeId, adj: NodeId) -> EdgeRef {
    let mut edge = EdgeRef::new(id, base, adj, 100.0);
    edge.speed = [36.0, 36.0];
    edge
  }

  #[test]
  fn test_forward_and_backward_chains() {
    // Forward 0 -> 1 -> 2
    let mut forward: SearchSpace = SearchSpace::new();
    let root = forward.add_root(SptEntry::root(0, 0.0), None);
    let a = forward.insert(TraversalKey(1), SptEntry::new(edge(0, 0, 1), 1.0, 1.0, root));
    let b = forward.insert(TraversalKey(2), SptEntry::new(edge(1, 1, 2), 2.0, 2.0, a));

    // Backward from 4, explored 4 <- 3 <- 2
    let mut backward: SearchSpace = SearchSpace::new();
    let root = backward.add_root(SptEntry::root(4, 0.0), None);
    let c = backward.insert(TraversalKey(3), SptEntry::new(edge(3, 3, 4).reversed(), 1.0, 1.0, root));
    let d = backward.insert(TraversalKey(2), SptEntry::new(edge(2, 2, 3).reversed(), 2.0, 2.0, c));

    let mut edges = forward_edges(&forward, b);
    edges.extend(backward_edges(&backward, d));
    let path = Path::from_edges(0, edges, 4.0, &FastestWeighting::new(36.0)).unwrap();

    assert_eq!(path.nodes, vec![0, 1, 2, 3, 4]);
    assert_eq!(path.edges.iter().map(|e| e.edge).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    assert_eq!(path.time, 40_000);
    assert_eq!(path.distance, 400.0);
    assert_eq!((path.from_node(), path.to_node()), (0, 4));
  }

  #[test]
  fn test_trivial_path() {
    let path = Path::trivial(3);
    assert!(path.is_empty());
    assert_eq!(path.nodes, vec![3]);
    assert_eq!(PathOutcome::Found(path).weight(), Some(0.0));
    assert_eq!(PathOutcome::Unreachable.path(), None);
    assert_eq!(PathOutcome::VisitLimitReached.label(), "visit_limit_reached");
  }
}
