use super::*;
use crate::config::AlgorithmOptions;
use crate::graph::{NodeAccess, RoutingGraph};
use crate::spatial::DistanceCalc;
use crate::traversal::TraversalMode;
use crate::weighting::{BeelineApproximator, Weighting};

/// Builds routing algorithms by name. Every created algorithm answers a single query.
#[derive(Clone, Debug, PartialEq)]
pub struct RoutingAlgorithmFactory {
  algorithm: String,
  approximation: bool,
  edge_based: bool,
  max_visited_nodes: usize,
  approximator_offset: f64,
  epsilon: f64,
}

impl RoutingAlgorithmFactory {
  pub fn new(algorithm: &str, approximation: bool, edge_based: bool) -> Self {
    RoutingAlgorithmFactory {
      algorithm: algorithm.to_lowercase(),
      approximation,
      edge_based,
      max_visited_nodes: usize::MAX,
      approximator_offset: 0.0,
      epsilon: 1.0,
    }
  }

  pub fn from_options(options: &AlgorithmOptions) -> Self {
    RoutingAlgorithmFactory {
      max_visited_nodes: options.max_visited_nodes,
      approximator_offset: options.approximator_offset,
      epsilon: options.epsilon,
      ..RoutingAlgorithmFactory::new(&options.algorithm, options.approximation, options.edge_based)
    }
  }

  pub fn with_max_visited_nodes(mut self, max_visited_nodes: usize) -> Self {
    self.max_visited_nodes = max_visited_nodes;
    self
  }

  pub fn algorithm(&self) -> &str {
    &self.algorithm
  }

  pub fn traversal_mode(&self) -> TraversalMode {
    TraversalMode::from_edge_based(self.edge_based)
  }

  /// Distance used by the beeline estimate. `approximation` only affects `astarbi`, plain A*
  /// always uses the great circle distance.
  pub fn distance_calc(&self) -> DistanceCalc {
    if self.approximation && self.algorithm == ASTAR_BI {
      DistanceCalc::Plane
    } else {
      DistanceCalc::Earth
    }
  }

  pub fn create_algo<'a, G, W>(&self, graph: G, weighting: W) -> Box<dyn RoutingAlgorithm + 'a>
  where
    G: RoutingGraph + NodeAccess + 'a,
    W: Weighting + 'a,
  {
    let mode = self.traversal_mode();
    let mut algo: Box<dyn RoutingAlgorithm + 'a> = match self.algorithm.as_str() {
      DIJKSTRA_BI => {
        let mut bi = BidirectionalSearch::dijkstra(graph, weighting, mode);
        bi.set_approximator_offset(self.approximator_offset);
        Box::new(bi)
      }
      DIJKSTRA_NATIVE_BI => {
        let mut bi = BidirectionalSearch::native_dijkstra(graph, weighting, mode);
        bi.set_approximator_offset(self.approximator_offset);
        Box::new(bi)
      }
      DIJKSTRA => Box::new(AStar::dijkstra(graph, weighting, mode)),
      ASTAR_BI => {
        let beeline = self.beeline(graph, &weighting);
        let mut bi = BidirectionalSearch::astar(graph, weighting, mode, beeline);
        bi.set_approximator_offset(self.approximator_offset);
        Box::new(bi)
      }
      DIJKSTRA_ONE_TO_MANY => Box::new(DijkstraOneToMany::new(graph, weighting, mode)),
      _ => {
        let beeline = self.beeline(graph, &weighting);
        Box::new(AStar::new(graph, weighting, mode, beeline))
      }
    };
    algo.set_max_visited_nodes(self.max_visited_nodes);
    algo
  }

  fn beeline<G: NodeAccess + Copy, W: Weighting>(&self, graph: G, weighting: &W) -> BeelineApproximator<G> {
    BeelineApproximator::new(graph, weighting)
      .with_distance_calc(self.distance_calc())
      .with_epsilon(self.epsilon)
  }
}

impl Default for RoutingAlgorithmFactory {
  fn default() -> Self {
    RoutingAlgorithmFactory::from_options(&AlgorithmOptions::default())
  }
}
