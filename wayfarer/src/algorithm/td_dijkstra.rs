use super::{SearchBase, TD_DIJKSTRA};
use crate::error::{Result, RoutingError};
use crate::graph::*;
use crate::path::{backward_edges, forward_edges, Path, PathOutcome};
use crate::search_space::SearchSpace;
use crate::spt::{EntryId, SptEntry};
use crate::traversal::TraversalMode;
use crate::weighting::Weighting;
use log::debug;

/// Dijkstra over a time-dependent weighting. The weight and duration of every edge are
/// evaluated at the time the search reaches it.
///
/// By default the query time is the departure at the source. After [`reverse`](Self::reverse)
/// it is the arrival at the target, the search then starts at the target and walks the edges
/// backwards in time.
pub struct TdDijkstra<G, W> {
  graph: G,
  weighting: W,
  base: SearchBase,
  space: SearchSpace,
  visited_nodes: usize,
  reverse: bool,
}

impl<G: RoutingGraph, W: Weighting> TdDijkstra<G, W> {
  pub fn new(graph: G, weighting: W, mode: TraversalMode) -> Result<Self> {
    if !weighting.is_time_dependent() {
      return Err(RoutingError::NotTimeDependent {
        weighting: weighting.description(),
      });
    }
    Ok(TdDijkstra {
      graph,
      weighting,
      base: SearchBase::new(mode),
      space: SearchSpace::new(),
      visited_nodes: 0,
      reverse: false,
    })
  }

  /// Switches between departure and arrival time queries
  pub fn reverse(&mut self) -> &mut Self {
    self.reverse = !self.reverse;
    self
  }

  pub fn is_reverse(&self) -> bool {
    self.reverse
  }

  /// Best path from `from` to `to` departing (or arriving, if reversed) at `at` millis
  pub fn calc_path(&mut self, from: NodeId, to: NodeId, at: i64) -> Result<PathOutcome> {
    self.base.check_already_run(TD_DIJKSTRA)?;
    self.base.check_nodes(&self.graph, &[from, to])?;
    let outcome = self.run(from, to, at)?;
    debug!(
      "{} {} -> {} {} {}: {}, visited {} nodes",
      TD_DIJKSTRA,
      from,
      to,
      if self.reverse { "arriving" } else { "departing" },
      at,
      outcome.label(),
      self.visited_nodes
    );
    Ok(outcome)
  }

  fn run(&mut self, from: NodeId, to: NodeId, at: i64) -> Result<PathOutcome> {
    let (source, target) = if self.reverse { (to, from) } else { (from, to) };
    let root = SptEntry::root(source, 0.0).with_time(at);
    let root = self.space.add_root(root, self.base.mode().root_key(source));

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
      if entry.adj_node == target {
        return Ok(PathOutcome::Found(self.extract_path(from, root, current)));
      }
      self.explore(current, &entry)?;
    }
  }

  fn explore(&mut self, current: EntryId, entry: &SptEntry) -> Result<()> {
    let prev = entry.incoming_edge();
    let direction = Direction::from_reverse(self.reverse);
    for edge in self.graph.edges(entry.adj_node, direction) {
      if !self.base.accept(&edge, prev) {
        continue;
      }
      let weight = self.weighting.calc_weight_at(&edge, self.reverse, prev, entry.time)?;
      if weight.is_infinite() {
        continue;
      }
      let visited = entry.weight_of_visited_path + weight;
      let key = self.base.mode().key(&edge, self.reverse);
      if let Some(best) = self.space.best_entry(key) {
        if visited >= best.weight_of_visited_path {
          continue;
        }
      }
      let millis = self.weighting.calc_millis_at(&edge, self.reverse, prev, entry.time)? as i64;
      let time = if self.reverse { entry.time - millis } else { entry.time + millis };
      self
        .space
        .relax(key, SptEntry::new(edge, visited, visited, current).with_time(time));
    }
    Ok(())
  }

  fn extract_path(&self, from: NodeId, root: EntryId, goal: EntryId) -> Path {
    let edges = if self.reverse {
      backward_edges(&self.space, goal)
    } else {
      forward_edges(&self.space, goal)
    };
    let goal = self.space.entry(goal);
    let time = (goal.time - self.space.entry(root).time).unsigned_abs();
    Path::with_time(from, edges, goal.weight_of_visited_path, time)
  }

  pub fn set_max_visited_nodes(&mut self, max_visited_nodes: usize) {
    self.base.set_max_visited_nodes(max_visited_nodes);
  }

  pub fn set_edge_filter(&mut self, filter: Box<dyn EdgeFilter>) {
    self.base.set_edge_filter(filter);
  }

  pub fn visited_nodes(&self) -> usize {
    self.visited_nodes
  }

  pub fn name(&self) -> String {
    TD_DIJKSTRA.to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::*;
  use crate::weighting::{FastestWeighting, HourlySpeeds, TimeDependentAccessWeighting};

  const HOUR: i64 = 3_600_000;

  fn always_open() -> impl Fn(&EdgeRef, i64) -> bool {
    |_: &EdgeRef, _: i64| true
  }

  #[test]
  fn test_requires_time_dependent_weighting() {
    let graph = line_graph(3);
    let result = TdDijkstra::new(&graph, FastestWeighting::new(36.0), TraversalMode::NodeBased);
    assert!(matches!(result, Err(RoutingError::NotTimeDependent { .. })));
  }

  #[test]
  fn test_forward_and_reverse_agree() {
    let graph = grid_graph(5, 5, 7);
    let weighting = TimeDependentAccessWeighting::new(FastestWeighting::new(90.0), always_open());
    let departure = 8 * HOUR;

    for (from, to) in [(0, 24), (3, 20), (12, 12)].iter() {
      let mut forward = TdDijkstra::new(&graph, &weighting, TraversalMode::NodeBased).unwrap();
      let forward = forward.calc_path(*from, *to, departure).unwrap();

      let arrival = departure + forward.path().map_or(0, |p| p.time as i64);
      let mut backward = TdDijkstra::new(&graph, &weighting, TraversalMode::NodeBased).unwrap();
      backward.reverse();
      let backward = backward.calc_path(*from, *to, arrival).unwrap();

      assert_weight_eq(forward.weight(), backward.weight());
      if let (Some(f), Some(b)) = (forward.path(), backward.path()) {
        assert_eq!(f.from_node(), b.from_node());
        assert_eq!(f.to_node(), b.to_node());
      }
    }
  }

  #[test]
  fn test_time_is_tracked() {
    let graph = line_graph(4);
    let weighting = TimeDependentAccessWeighting::new(FastestWeighting::new(36.0), always_open());

    let mut forward = TdDijkstra::new(&graph, &weighting, TraversalMode::NodeBased).unwrap();
    let path = forward.calc_path(0, 3, HOUR).unwrap().into_path().unwrap();
    assert_eq!(path.time, 300);
    assert_eq!(path.nodes, vec![0, 1, 2, 3]);

    let mut backward = TdDijkstra::new(&graph, &weighting, TraversalMode::NodeBased).unwrap();
    backward.reverse();
    let path = backward.calc_path(0, 3, HOUR).unwrap().into_path().unwrap();
    assert_eq!(path.time, 300);
    assert_eq!(path.nodes, vec![0, 1, 2, 3]);
    assert_eq!(edge_pairs(&path), vec![(0, 1), (1, 2), (2, 3)]);
  }

  #[test]
  fn test_closed_edge_forces_detour() {
    let graph = line_with_shortcut();
    // The line is closed before 9:00, only the shortcut 0 -> 4 stays open
    let closed_before_nine = |e: &EdgeRef, at: i64| e.edge == 4 || at >= 9 * HOUR;
    let weighting = TimeDependentAccessWeighting::new(FastestWeighting::new(36.0), closed_before_nine);

    let mut early = TdDijkstra::new(&graph, &weighting, TraversalMode::NodeBased).unwrap();
    let path = early.calc_path(0, 4, 8 * HOUR).unwrap().into_path().unwrap();
    assert_eq!(path.nodes, vec![0, 4]);

    let mut late = TdDijkstra::new(&graph, &weighting, TraversalMode::NodeBased).unwrap();
    let path = late.calc_path(0, 4, 10 * HOUR).unwrap().into_path().unwrap();
    assert_eq!(path.nodes, vec![0, 1, 2, 3, 4]);
  }

  #[test]
  fn test_hourly_speeds() {
    let graph = line_with_shortcut();
    let mut speeds = HourlySpeeds::new();
    // The line is jammed at 8:00
    for edge in 0..4 {
      let mut factors = [1.0; 24];
      factors[8] = 0.1;
      speeds.set_profile(edge, factors);
    }
    let weighting = FastestWeighting::with_speeds(speeds, 36.0);
    assert!(weighting.is_time_dependent());

    let mut rush_hour = TdDijkstra::new(&graph, &weighting, TraversalMode::NodeBased).unwrap();
    let path = rush_hour.calc_path(0, 4, 8 * HOUR).unwrap().into_path().unwrap();
    assert_eq!(path.nodes, vec![0, 4]);

    let mut night = TdDijkstra::new(&graph, &weighting, TraversalMode::NodeBased).unwrap();
    let path = night.calc_path(0, 4, 2 * HOUR).unwrap().into_path().unwrap();
    assert_eq!(path.nodes, vec![0, 1, 2, 3, 4]);
  }
}
