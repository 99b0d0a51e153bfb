use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wayfarer::algorithm::*;
use wayfarer::graph::{in_edges, out_edges, GraphBase, NodeId};
use wayfarer::graph_impl::{CompactGraph, DynamicGraph};
use wayfarer::spatial::Position;
use wayfarer::weighting::{
  FastestWeighting, ShortestWeighting, TurnCostProvider, TurnCostTable, TurnWeighting, Weighting,
};
use wayfarer::{PathOutcome, TraversalMode};

const ALGORITHMS: [&str; 5] = [DIJKSTRA_BI, DIJKSTRA_NATIVE_BI, ASTAR, ASTAR_BI, DIJKSTRA_ONE_TO_MANY];

/// Random road-like graph: a jittered grid where some streets are oneway or missing
fn random_graph(size: usize, seed: u64) -> DynamicGraph {
  let mut rng = StdRng::seed_from_u64(seed);
  let mut graph = DynamicGraph::new();
  for y in 0..size {
    for x in 0..size {
      graph.add_node(Position {
        x: 11.5 + 0.003 * x as f64 + rng.gen_range(0.0..0.0005),
        y: 48.1 + 0.002 * y as f64 + rng.gen_range(0.0..0.0005),
      });
    }
  }
  let id = |x: usize, y: usize| (y * size + x) as NodeId;
  for y in 0..size {
    for x in 0..size {
      for &(nx, ny) in &[(x + 1, y), (x, y + 1)] {
        if nx >= size || ny >= size || rng.gen_bool(0.1) {
          continue;
        }
        // Lengths are at least the beeline of the jittered positions
        let distance = rng.gen_range(400.0..600.0);
        let speed = rng.gen_range(2..13) as f64 * 10.0;
        graph.add_edge(id(x, y), id(nx, ny), distance, speed, rng.gen_bool(0.15));
      }
    }
  }
  graph
}

fn queries(graph: &CompactGraph, count: usize, seed: u64) -> Vec<(NodeId, NodeId)> {
  let mut rng = StdRng::seed_from_u64(seed);
  let nodes = graph.number_of_nodes() as NodeId;
  (0..count)
    .map(|_| (rng.gen_range(0..nodes), rng.gen_range(0..nodes)))
    .collect()
}

fn same_weight(a: Option<f64>, b: Option<f64>) -> bool {
  match (a, b) {
    (Some(a), Some(b)) => (a - b).abs() < 1e-6,
    (a, b) => a == b,
  }
}

#[test]
fn test_algorithms_agree_with_dijkstra() {
  let graph = CompactGraph::from(&random_graph(12, 1));
  let weighting = FastestWeighting::new(120.0);
  for (from, to) in queries(&graph, 40, 2) {
    let mut dijkstra = Dijkstra::dijkstra(&graph, &weighting, TraversalMode::NodeBased);
    let expected = dijkstra.calc_path(from, to).unwrap();
    for name in ALGORITHMS.iter() {
      let factory = RoutingAlgorithmFactory::new(name, false, false);
      let actual = factory.create_algo(&graph, &weighting).calc_path(from, to).unwrap();
      assert!(
        same_weight(expected.weight(), actual.weight()),
        "{} {} -> {}: {:?} vs {:?}",
        name,
        from,
        to,
        expected.weight(),
        actual.weight()
      );
      if let Some(path) = actual.path() {
        assert_eq!(path.from_node(), from);
        assert_eq!(path.to_node(), to);
      }
    }
  }
}

#[test]
fn test_edge_based_matches_node_based_without_turn_costs() {
  let graph = CompactGraph::from(&random_graph(10, 3));
  let weighting = TurnWeighting::new(ShortestWeighting::new(), TurnCostTable::new().with_u_turn_cost(0.0));
  for (from, to) in queries(&graph, 25, 4) {
    let mut node_based = Dijkstra::dijkstra(&graph, &weighting, TraversalMode::NodeBased);
    let expected = node_based.calc_path(from, to).unwrap().weight();
    for mode in &[TraversalMode::EdgeBased, TraversalMode::EdgeBasedWithUTurns] {
      let mut edge_based = BidirectionalSearch::dijkstra(&graph, &weighting, *mode);
      assert!(same_weight(expected, edge_based.calc_path(from, to).unwrap().weight()));
    }
  }
}

/// Random costs for the turns at every node, some of them forbidden
fn random_turn_costs(graph: &CompactGraph, seed: u64) -> TurnCostTable {
  let mut rng = StdRng::seed_from_u64(seed);
  let mut table = TurnCostTable::new();
  for node in 0..graph.number_of_nodes() as NodeId {
    for incoming in in_edges(graph, node) {
      for outgoing in out_edges(graph, node) {
        if incoming.edge == outgoing.edge {
          continue;
        }
        if rng.gen_bool(0.15) {
          table.restrict(incoming.edge, node, outgoing.edge);
        } else if rng.gen_bool(0.5) {
          table.set_cost(incoming.edge, node, outgoing.edge, rng.gen_range(0.0..40.0));
        }
      }
    }
  }
  table
}

#[test]
fn test_turn_costs_agree_with_dijkstra() {
  for seed in 0..4 {
    let graph = CompactGraph::from(&random_graph(9, 20 + seed));
    let turn_costs = random_turn_costs(&graph, 30 + seed);
    let weighting = TurnWeighting::new(FastestWeighting::new(120.0), &turn_costs);
    for (from, to) in queries(&graph, 30, 40 + seed) {
      let mut dijkstra = Dijkstra::dijkstra(&graph, &weighting, TraversalMode::EdgeBased);
      let expected = dijkstra.calc_path(from, to).unwrap();
      for name in &[DIJKSTRA_BI, DIJKSTRA_NATIVE_BI, ASTAR, ASTAR_BI] {
        let factory = RoutingAlgorithmFactory::new(name, false, true);
        let actual = factory.create_algo(&graph, &weighting).calc_path(from, to).unwrap();
        assert!(
          same_weight(expected.weight(), actual.weight()),
          "seed {} {} {} -> {}: {:?} vs {:?}",
          seed,
          name,
          from,
          to,
          expected.weight(),
          actual.weight()
        );
      }
    }
  }
}

#[test]
fn test_bidirectional_path_weight_includes_turns() {
  let graph = CompactGraph::from(&random_graph(9, 50));
  let turn_costs = random_turn_costs(&graph, 51);
  let weighting = TurnWeighting::new(FastestWeighting::new(120.0), &turn_costs);
  let mut found = 0;
  for (from, to) in queries(&graph, 40, 52) {
    for name in &[DIJKSTRA_BI, DIJKSTRA_NATIVE_BI, ASTAR_BI] {
      let factory = RoutingAlgorithmFactory::new(name, false, true);
      let outcome = factory.create_algo(&graph, &weighting).calc_path(from, to).unwrap();
      let path = match outcome.path() {
        Some(path) => path,
        None => continue,
      };
      let mut prev = None;
      let mut sum = 0.0;
      for edge in &path.edges {
        sum += weighting.calc_weight(edge, false, prev).unwrap();
        prev = Some(edge.edge);
      }
      assert!(same_weight(Some(sum), Some(path.weight)), "{} {} -> {}", name, from, to);
      for pair in path.edges.windows(2) {
        assert_eq!(pair[0].adj, pair[1].base);
        assert!(turn_costs.turn_cost(pair[0].edge, pair[0].adj, pair[1].edge).is_finite());
      }
      found += 1;
    }
  }
  assert!(found > 0);
}

#[test]
fn test_repeatable_queries() {
  let graph = CompactGraph::from(&random_graph(10, 5));
  let weighting = FastestWeighting::new(120.0);
  for (from, to) in queries(&graph, 10, 6) {
    let run = || {
      let mut algo = RoutingAlgorithmFactory::default().create_algo(&graph, &weighting);
      let outcome = algo.calc_path(from, to).unwrap();
      (outcome, algo.visited_nodes())
    };
    assert_eq!(run(), run());
  }
}

#[test]
fn test_visited_nodes_limit_is_monotone() {
  let graph = CompactGraph::from(&random_graph(10, 7));
  let weighting = FastestWeighting::new(120.0);
  let (from, to) = (0, 99);
  let mut unlimited = Dijkstra::dijkstra(&graph, &weighting, TraversalMode::NodeBased);
  let expected = unlimited.calc_path(from, to).unwrap();
  let needed = unlimited.visited_nodes();

  let mut found_before = false;
  for cap in 0..needed + 2 {
    let mut limited = Dijkstra::dijkstra(&graph, &weighting, TraversalMode::NodeBased);
    limited.set_max_visited_nodes(cap);
    let outcome = limited.calc_path(from, to).unwrap();
    assert!(limited.visited_nodes() <= cap + 1);
    match outcome {
      PathOutcome::VisitLimitReached => assert!(!found_before, "cap {} lost a found path", cap),
      _ => {
        found_before = true;
        assert_eq!(outcome, expected);
      }
    }
  }
  assert!(found_before);
}

#[test]
fn test_concurrent_queries_share_the_graph() {
  let graph = CompactGraph::from(&random_graph(12, 9));
  let weighting = FastestWeighting::new(120.0);
  let queries = queries(&graph, 32, 10);

  let sequential: Vec<_> = queries
    .iter()
    .map(|&(from, to)| {
      let mut algo = RoutingAlgorithmFactory::default().create_algo(&graph, &weighting);
      algo.calc_path(from, to).unwrap()
    })
    .collect();

  let parallel: Vec<_> = std::thread::scope(|scope| {
    let handles: Vec<_> = queries
      .chunks(8)
      .map(|chunk| {
        let (graph, weighting) = (&graph, &weighting);
        scope.spawn(move || {
          chunk
            .iter()
            .map(|&(from, to)| {
              let mut algo = RoutingAlgorithmFactory::default().create_algo(graph, weighting);
              algo.calc_path(from, to).unwrap()
            })
            .collect::<Vec<_>>()
        })
      })
      .collect();
    handles.into_iter().flat_map(|h| h.join().unwrap()).collect()
  });

  assert_eq!(sequential, parallel);
}
