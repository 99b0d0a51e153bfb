use super::{RoutingAlgorithm, SearchBase, ASTAR_BI, DIJKSTRA_BI, DIJKSTRA_NATIVE_BI};
use crate::error::{Result, RoutingError};
use crate::graph::*;
use crate::path::{backward_edges, forward_edges, Path, PathOutcome};
use crate::search_space::{BestWeightMap, DenseMap, HashBestMap, SearchSpace};
use crate::spt::{EntryId, SptEntry};
use crate::traversal::TraversalMode;
use crate::weighting::{ConsistentApproximator, WeightApproximator, Weighting, ZeroApproximator};
use log::{debug, trace};

/// Hooks for searches which prune the bidirectional search, e.g. on a node hierarchy.
/// `reverse` is true for entries of the backward search.
pub trait StoppingPolicy {
  /// The entry is settled but its edges are not explored
  fn skip(&mut self, _entry: &SptEntry, _reverse: bool) -> bool {
    false
  }

  /// The search in the entry's direction stops
  fn stop(&mut self, _entry: &SptEntry, _reverse: bool) -> bool {
    false
  }
}

/// Explores every entry
#[derive(Copy, Clone, Debug, Default)]
pub struct NeverStop;

impl StoppingPolicy for NeverStop {}

struct Frontier<M> {
  space: SearchSpace<M>,
  // Weight of the entry popped last
  current_weight: f64,
  visited: usize,
  finished: bool,
}

impl<M: BestWeightMap> Frontier<M> {
  fn new() -> Self {
    Frontier {
      space: SearchSpace::new(),
      current_weight: 0.0,
      visited: 0,
      finished: false,
    }
  }
}

/// Best complete path found so far, `weight` is μ
struct Meeting {
  weight: f64,
  from: Option<EntryId>,
  to: Option<EntryId>,
}

/// Runs a forward search from the source and a backward search from the target until the
/// searches can no longer improve the best path where they met.
pub struct BidirectionalSearch<G, W, A = ZeroApproximator, P = NeverStop, M = HashBestMap> {
  graph: G,
  weighting: W,
  approximator: ConsistentApproximator<A>,
  policy: P,
  base: SearchBase,
  from: Frontier<M>,
  to: Frontier<M>,
  meeting: Meeting,
  approximator_offset: f64,
  name: &'static str,
}

impl<G: RoutingGraph, W: Weighting> BidirectionalSearch<G, W> {
  pub fn dijkstra(graph: G, weighting: W, mode: TraversalMode) -> Self {
    BidirectionalSearch::new(graph, weighting, mode, ZeroApproximator, NeverStop, DIJKSTRA_BI)
  }
}

impl<G: RoutingGraph, W: Weighting> BidirectionalSearch<G, W, ZeroApproximator, NeverStop, DenseMap> {
  /// Bidirectional Dijkstra which keeps the best entries in vectors indexed by traversal key
  pub fn native_dijkstra(graph: G, weighting: W, mode: TraversalMode) -> Self {
    BidirectionalSearch::new(graph, weighting, mode, ZeroApproximator, NeverStop, DIJKSTRA_NATIVE_BI)
  }
}

impl<G: RoutingGraph, W: Weighting, A: WeightApproximator + Clone> BidirectionalSearch<G, W, A> {
  pub fn astar(graph: G, weighting: W, mode: TraversalMode, approximator: A) -> Self {
    BidirectionalSearch::new(graph, weighting, mode, approximator, NeverStop, ASTAR_BI)
  }
}

impl<G, W, A, P, M> BidirectionalSearch<G, W, A, P, M>
where
  G: RoutingGraph,
  W: Weighting,
  A: WeightApproximator + Clone,
  P: StoppingPolicy,
  M: BestWeightMap,
{
  pub fn new(graph: G, weighting: W, mode: TraversalMode, approximator: A, policy: P, name: &'static str) -> Self {
    BidirectionalSearch {
      graph,
      weighting,
      approximator: ConsistentApproximator::new(approximator),
      policy,
      base: SearchBase::new(mode),
      from: Frontier::new(),
      to: Frontier::new(),
      meeting: Meeting {
        weight: f64::INFINITY,
        from: None,
        to: None,
      },
      approximator_offset: 0.0,
      name,
    }
  }

  /// Tolerance of the termination check for estimates which are not consistent
  pub fn set_approximator_offset(&mut self, offset: f64) -> &mut Self {
    self.approximator_offset = offset;
    self
  }

  fn run(
    &mut self,
    from: NodeId,
    to: NodeId,
    from_out_edge: Option<EdgeId>,
    to_in_edge: Option<EdgeId>,
  ) -> Result<PathOutcome> {
    if (from_out_edge.is_some() || to_in_edge.is_some()) && !self.base.mode().is_edge_based() {
      return Err(RoutingError::EdgeRestrictionRequiresEdgeBased);
    }
    self.base.check_already_run(self.name)?;
    self.base.check_nodes(&self.graph, &[from, to])?;

    self.init(from, to, from_out_edge, to_in_edge)?;
    while !self.finished() && !self.is_max_visited_nodes_exceeded() {
      if !self.from.finished {
        self.from.finished = !self.fill_edges(false, None)?;
      }
      if !self.to.finished {
        self.to.finished = !self.fill_edges(true, None)?;
      }
    }
    self.extract_path(from)
  }

  fn init(&mut self, from: NodeId, to: NodeId, from_out_edge: Option<EdgeId>, to_in_edge: Option<EdgeId>) -> Result<()> {
    let mode = self.base.mode();
    self.approximator.set_from(from);
    self.approximator.set_to(to);

    let from_root = SptEntry::root(from, self.approximator.approximate(from, false));
    self.from.current_weight = from_root.weight;
    let from_root = self.from.space.add_root(from_root, mode.root_key(from));

    let to_root = SptEntry::root(to, self.approximator.approximate(to, true));
    self.to.current_weight = to_root.weight;
    let to_root = self.to.space.add_root(to_root, mode.root_key(to));

    if from == to && from_out_edge.is_none() && to_in_edge.is_none() {
      self.meeting = Meeting {
        weight: 0.0,
        from: Some(from_root),
        to: Some(to_root),
      };
      self.from.finished = true;
      self.to.finished = true;
      return Ok(());
    }

    self.from.finished = !self.fill_edges(false, from_out_edge)?;
    self.to.finished = !self.fill_edges(true, to_in_edge)?;
    Ok(())
  }

  fn finished(&self) -> bool {
    if self.from.finished || self.to.finished {
      return true;
    }
    self.from.current_weight + self.to.current_weight - self.approximator_offset >= self.meeting.weight
  }

  fn is_max_visited_nodes_exceeded(&self) -> bool {
    self.base.is_max_visited_nodes_exceeded(self.from.visited + self.to.visited)
  }

  /// Settles the next entry of one direction and explores its edges. `pinned` only allows
  /// edges whose original edge at the explored node is the given one.
  ///
  /// Returns false when this direction is done.
  fn fill_edges(&mut self, reverse: bool, pinned: Option<EdgeId>) -> Result<bool> {
    let mode = self.base.mode();
    let (own, other) = if reverse {
      (&mut self.to, &self.from)
    } else {
      (&mut self.from, &self.to)
    };
    if own.space.is_empty() {
      return Ok(false);
    }
    let current = own
      .space
      .pop()
      .ok_or(RoutingError::EmptyQueue(if reverse { "backward" } else { "forward" }))?;
    let entry = own.space.entry(current).clone();
    own.current_weight = entry.weight;
    own.visited += 1;
    if self.policy.skip(&entry, reverse) {
      return Ok(true);
    }
    if self.policy.stop(&entry, reverse) {
      return Ok(false);
    }

    let prev = entry.incoming_edge();
    for edge in self.graph.edges(entry.adj_node, Direction::from_reverse(reverse)) {
      if !self.base.accept(&edge, prev) || pinned.map_or(false, |p| edge.orig_first != p) {
        continue;
      }
      let weight = self.weighting.calc_weight(&edge, reverse, prev)?;
      if weight.is_infinite() {
        continue;
      }
      let visited = entry.weight_of_visited_path + weight;
      let estimate = self.approximator.approximate(edge.adj, reverse);
      let key = mode.key(&edge, reverse);
      let id = match own.space.relax(key, SptEntry::new(edge, visited + estimate, visited, current)) {
        Some(id) => id,
        None => continue,
      };

      let other_id = match other.space.best(key) {
        Some(other_id) => other_id,
        None => continue,
      };
      let own_entry = own.space.entry(id);
      let other_entry = other.space.entry(other_id);
      let mut candidate = own_entry.weight_of_visited_path + other_entry.weight_of_visited_path;
      let mut own_id = id;
      if mode.is_edge_based() {
        if own_entry.incoming_edge() != other_entry.incoming_edge() {
          return Err(RoutingError::MeetingEdgeMismatch {
            forward: if reverse { other_entry.incoming_edge() } else { own_entry.incoming_edge() },
            backward: if reverse { own_entry.incoming_edge() } else { other_entry.incoming_edge() },
          });
        }
        // Both sides traversed the edge, keep it on the other side only
        own_id = own_entry.parent.unwrap_or(id);
        candidate -= self.weighting.calc_weight(&edge, reverse, None)?;
      }

      if candidate < self.meeting.weight {
        trace!("{}: μ {} -> {} at {:?}", self.name, self.meeting.weight, candidate, key);
        self.meeting = if reverse {
          Meeting {
            weight: candidate,
            from: Some(other_id),
            to: Some(own_id),
          }
        } else {
          Meeting {
            weight: candidate,
            from: Some(own_id),
            to: Some(other_id),
          }
        };
      }
    }
    Ok(true)
  }

  fn extract_path(&self, from: NodeId) -> Result<PathOutcome> {
    if !self.finished() {
      if self.is_max_visited_nodes_exceeded() {
        return Ok(PathOutcome::VisitLimitReached);
      }
      return Ok(PathOutcome::Unreachable);
    }
    match (self.meeting.from, self.meeting.to) {
      (Some(from_id), Some(to_id)) if self.meeting.weight.is_finite() => {
        let mut edges = forward_edges(&self.from.space, from_id);
        edges.extend(backward_edges(&self.to.space, to_id));
        let path = Path::from_edges(from, edges, self.meeting.weight, &self.weighting)?;
        Ok(PathOutcome::Found(path))
      }
      _ => Ok(PathOutcome::Unreachable),
    }
  }
}

impl<G, W, A, P, M> RoutingAlgorithm for BidirectionalSearch<G, W, A, P, M>
where
  G: RoutingGraph,
  W: Weighting,
  A: WeightApproximator + Clone,
  P: StoppingPolicy,
  M: BestWeightMap,
{
  fn calc_path(&mut self, from: NodeId, to: NodeId) -> Result<PathOutcome> {
    self.calc_path_between_edges(from, to, None, None)
  }

  fn calc_path_between_edges(
    &mut self,
    from: NodeId,
    to: NodeId,
    from_out_edge: Option<EdgeId>,
    to_in_edge: Option<EdgeId>,
  ) -> Result<PathOutcome> {
    let outcome = self.run(from, to, from_out_edge, to_in_edge)?;
    debug!(
      "{}({}) {} -> {}: {}, visited {} + {} nodes",
      self.name,
      self.approximator.name(),
      from,
      to,
      outcome.label(),
      self.from.visited,
      self.to.visited
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
    self.from.visited + self.to.visited
  }

  fn name(&self) -> String {
    self.name.to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::algorithm::Dijkstra;
  use crate::graph_impl::DynamicGraph;
  use crate::test_utils::*;
  use crate::weighting::{BeelineApproximator, FastestWeighting, ShortestWeighting, TurnCostTable, TurnWeighting};

  #[test]
  fn test_line_graph() {
    let graph = line_graph(5);
    let mut search = BidirectionalSearch::dijkstra(&graph, ShortestWeighting::new(), TraversalMode::NodeBased);
    let path = search.calc_path(0, 4).unwrap().into_path().unwrap();

    assert_eq!(path.weight, 4.0);
    assert_eq!(edge_pairs(&path), vec![(0, 1), (1, 2), (2, 3), (3, 4)]);
    assert_eq!(path.time, 400);
  }

  #[test]
  fn test_prefers_cheaper_detour() {
    let graph = line_with_shortcut();
    for mode in [TraversalMode::NodeBased, TraversalMode::EdgeBased].iter() {
      let mut search = BidirectionalSearch::native_dijkstra(&graph, ShortestWeighting::new(), *mode);
      let path = search.calc_path(0, 4).unwrap().into_path().unwrap();
      assert_eq!(path.weight, 4.0);
      assert_eq!(path.nodes, vec![0, 1, 2, 3, 4]);
    }
  }

  #[test]
  fn test_same_source_and_target() {
    let graph = line_graph(3);
    for mode in [TraversalMode::NodeBased, TraversalMode::EdgeBased].iter() {
      let mut search = BidirectionalSearch::dijkstra(&graph, ShortestWeighting::new(), *mode);
      let path = search.calc_path(2, 2).unwrap().into_path().unwrap();
      assert_eq!(path.weight, 0.0);
      assert!(path.is_empty());
      assert_eq!(search.visited_nodes(), 0);
    }
  }

  #[test]
  fn test_single_edge() {
    let graph = line_graph(2);
    for mode in [TraversalMode::NodeBased, TraversalMode::EdgeBased].iter() {
      let mut search = BidirectionalSearch::dijkstra(&graph, ShortestWeighting::new(), *mode);
      let path = search.calc_path(0, 1).unwrap().into_path().unwrap();
      assert_eq!(path.weight, 1.0);
      assert_eq!(edge_pairs(&path), vec![(0, 1)]);
    }
  }

  #[test]
  fn test_unreachable() {
    let mut graph = DynamicGraph::with_nodes(4);
    graph.add_edge(0, 1, 1.0, SPEED, false);
    graph.add_edge(3, 2, 1.0, SPEED, true);

    let mut search = BidirectionalSearch::dijkstra(&graph, ShortestWeighting::new(), TraversalMode::NodeBased);
    assert_eq!(search.calc_path(0, 3).unwrap(), PathOutcome::Unreachable);
    let mut search = BidirectionalSearch::dijkstra(&graph, ShortestWeighting::new(), TraversalMode::NodeBased);
    assert_eq!(search.calc_path(2, 3).unwrap(), PathOutcome::Unreachable);
  }

  // 0 - 1 - 2
  //     |   |
  //     3 - 4
  fn square_with_tail() -> DynamicGraph {
    let mut graph = DynamicGraph::with_nodes(5);
    graph.add_edge(0, 1, 1.0, SPEED, false); // 0
    graph.add_edge(1, 2, 1.0, SPEED, false); // 1
    graph.add_edge(1, 3, 1.0, SPEED, false); // 2
    graph.add_edge(2, 4, 1.0, SPEED, false); // 3
    graph.add_edge(3, 4, 2.0, SPEED, false); // 4
    graph
  }

  #[test]
  fn test_turn_restriction() {
    let graph = square_with_tail();
    let mut turns = TurnCostTable::new();
    // Arriving over 0 -> 1 it is not allowed to continue towards 2
    turns.restrict(0, 1, 1);
    let weighting = TurnWeighting::new(ShortestWeighting::new(), turns);

    let mut node_based = Dijkstra::dijkstra(&graph, ShortestWeighting::new(), TraversalMode::NodeBased);
    assert_eq!(node_based.calc_path(0, 4).unwrap().weight(), Some(3.0));

    let mut search = BidirectionalSearch::dijkstra(&graph, &weighting, TraversalMode::EdgeBased);
    let path = search.calc_path(0, 4).unwrap().into_path().unwrap();
    assert_eq!(path.weight, 4.0);
    assert_eq!(path.nodes, vec![0, 1, 3, 4]);

    // The only way to 2 is the restricted turn or the detour over 4
    let mut search = BidirectionalSearch::dijkstra(&graph, &weighting, TraversalMode::EdgeBased);
    let path = search.calc_path(0, 2).unwrap().into_path().unwrap();
    assert_eq!(path.nodes, vec![0, 1, 3, 4, 2]);
    assert_eq!(path.weight, 5.0);
  }

  #[test]
  fn test_turn_restriction_without_alternative() {
    let graph = line_graph(3);
    let mut turns = TurnCostTable::new();
    turns.restrict(0, 1, 1);
    let weighting = TurnWeighting::new(ShortestWeighting::new(), turns);

    let mut search = BidirectionalSearch::dijkstra(&graph, &weighting, TraversalMode::EdgeBased);
    assert_eq!(search.calc_path(0, 2).unwrap(), PathOutcome::Unreachable);
  }

  #[test]
  fn test_pinned_edges() {
    let graph = square_with_tail();
    let mut search = BidirectionalSearch::dijkstra(&graph, ShortestWeighting::new(), TraversalMode::EdgeBased);
    let path = search
      .calc_path_between_edges(1, 4, Some(2), None)
      .unwrap()
      .into_path()
      .unwrap();
    assert_eq!(path.nodes, vec![1, 3, 4]);
    assert_eq!(path.weight, 3.0);

    let mut search = BidirectionalSearch::dijkstra(&graph, ShortestWeighting::new(), TraversalMode::EdgeBased);
    let path = search
      .calc_path_between_edges(1, 4, None, Some(4))
      .unwrap()
      .into_path()
      .unwrap();
    assert_eq!(path.nodes, vec![1, 3, 4]);
  }

  #[test]
  fn test_pinned_edges_require_edge_based() {
    let graph = square_with_tail();
    let mut search = BidirectionalSearch::dijkstra(&graph, ShortestWeighting::new(), TraversalMode::NodeBased);
    assert_eq!(
      search.calc_path_between_edges(1, 4, Some(2), None),
      Err(RoutingError::EdgeRestrictionRequiresEdgeBased)
    );
  }

  #[test]
  fn test_visited_nodes_limit() {
    let graph = line_graph(9);
    let mut search = BidirectionalSearch::dijkstra(&graph, ShortestWeighting::new(), TraversalMode::NodeBased);
    search.set_max_visited_nodes(3);
    assert_eq!(search.calc_path(0, 8).unwrap(), PathOutcome::VisitLimitReached);
  }

  #[test]
  fn test_variants_agree_on_grid() {
    let graph = grid_graph(8, 6, 11);
    let weighting = FastestWeighting::new(90.0);
    for (from, to) in [(0, 47), (7, 40), (20, 27), (47, 3), (5, 5)].iter() {
      let mut dijkstra = Dijkstra::dijkstra(&graph, &weighting, TraversalMode::NodeBased);
      let expected = dijkstra.calc_path(*from, *to).unwrap().weight();

      let mut bi = BidirectionalSearch::dijkstra(&graph, &weighting, TraversalMode::NodeBased);
      assert_weight_eq(expected, bi.calc_path(*from, *to).unwrap().weight());

      let mut edge_based = BidirectionalSearch::native_dijkstra(&graph, &weighting, TraversalMode::EdgeBased);
      assert_weight_eq(expected, edge_based.calc_path(*from, *to).unwrap().weight());

      let beeline = BeelineApproximator::new(&graph, &weighting);
      let mut astar = BidirectionalSearch::astar(&graph, &weighting, TraversalMode::NodeBased, beeline);
      assert_weight_eq(expected, astar.calc_path(*from, *to).unwrap().weight());
    }
  }

  struct StopBackward;

  impl StoppingPolicy for StopBackward {
    fn stop(&mut self, _entry: &SptEntry, reverse: bool) -> bool {
      reverse
    }
  }

  #[test]
  fn test_stopping_policy() {
    let graph = line_graph(6);
    let mut search: BidirectionalSearch<_, _, _, _, HashBestMap> = BidirectionalSearch::new(
      &graph,
      ShortestWeighting::new(),
      TraversalMode::NodeBased,
      ZeroApproximator,
      StopBackward,
      "stopping",
    );
    // The backward search stops before it can meet the forward search
    assert_eq!(search.calc_path(0, 5).unwrap(), PathOutcome::Unreachable);
  }
}
