use crate::graph::{NodeAccess, NodeId};
use crate::graph_impl::DynamicGraph;
use crate::path::Path;
use crate::spatial::{haversine_distance, Position};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Speed of the edges built by the helpers, 1 meter takes 100 millis
pub const SPEED: f64 = 36.0;

/// Two-way path 0 - 1 - ... - (n-1) with edges of length 1
pub fn line_graph(n: usize) -> DynamicGraph {
  let mut graph = DynamicGraph::with_nodes(n);
  for i in 1..n as NodeId {
    graph.add_edge(i - 1, i, 1.0, SPEED, false);
  }
  graph
}

/// The 5 node line graph plus a direct edge 0 -> 4 of length 10
pub fn line_with_shortcut() -> DynamicGraph {
  let mut graph = line_graph(5);
  graph.add_edge(0, 4, 10.0, SPEED, true);
  graph
}

/// Grid of `width * height` nodes around Berlin. Nodes are numbered row by row. Edge lengths
/// are the beeline distance stretched by a random factor, speeds are random as well.
pub fn grid_graph(width: usize, height: usize, seed: u64) -> DynamicGraph {
  let mut rng = StdRng::seed_from_u64(seed);
  let mut graph = DynamicGraph::new();
  for y in 0..height {
    for x in 0..width {
      graph.add_node(Position {
        x: 13.4 + 0.002 * x as f64,
        y: 52.5 + 0.001 * y as f64,
      });
    }
  }

  let id = |x: usize, y: usize| (y * width + x) as NodeId;
  for y in 0..height {
    for x in 0..width {
      let mut neighbors = Vec::new();
      if x + 1 < width {
        neighbors.push(id(x + 1, y));
      }
      if y + 1 < height {
        neighbors.push(id(x, y + 1));
      }
      for adj in neighbors {
        let base = id(x, y);
        let beeline = haversine_distance(&graph.position(base), &graph.position(adj));
        let distance = (beeline * rng.gen_range(1.0..1.5)).ceil();
        let speed = rng.gen_range(3..10) as f64 * 10.0;
        let oneway = rng.gen_bool(0.2);
        if oneway && rng.gen_bool(0.5) {
          graph.add_edge(adj, base, distance, speed, true);
        } else {
          graph.add_edge(base, adj, distance, speed, oneway);
        }
      }
    }
  }
  graph
}

pub fn edge_pairs(path: &Path) -> Vec<(NodeId, NodeId)> {
  path.edges.iter().map(|e| (e.base, e.adj)).collect()
}

pub fn assert_weight_eq(expected: Option<f64>, actual: Option<f64>) {
  match (expected, actual) {
    (Some(e), Some(a)) => assert!((e - a).abs() < 1e-6, "expected {}, got {}", e, a),
    (e, a) => assert_eq!(e, a),
  }
}
