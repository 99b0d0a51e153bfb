use super::Weighting;
use crate::graph::{NodeAccess, NodeId};
use crate::spatial::{DistanceCalc, Position};

/// Estimates the remaining weight from a node to the target. A* is only exact when the
/// estimate never overshoots.
pub trait WeightApproximator {
  fn set_to(&mut self, to: NodeId);
  fn approximate(&self, node: NodeId) -> f64;
  fn name(&self) -> &'static str;
}

/// No estimate, turns A* into Dijkstra
#[derive(Copy, Clone, Debug, Default)]
pub struct ZeroApproximator;

impl WeightApproximator for ZeroApproximator {
  fn set_to(&mut self, _to: NodeId) {}

  fn approximate(&self, _node: NodeId) -> f64 {
    0.0
  }

  fn name(&self) -> &'static str {
    "zero"
  }
}

/// Straight line distance to the target times the smallest weight per meter
#[derive(Copy, Clone, Debug)]
pub struct BeelineApproximator<G> {
  graph: G,
  calc: DistanceCalc,
  weight_per_meter: f64,
  epsilon: f64,
  to: Position,
}

impl<G: NodeAccess + Copy> BeelineApproximator<G> {
  pub fn new<W: Weighting + ?Sized>(graph: G, weighting: &W) -> Self {
    BeelineApproximator {
      graph,
      calc: DistanceCalc::Earth,
      weight_per_meter: weighting.min_weight(1.0),
      epsilon: 1.0,
      to: Position { x: 0.0, y: 0.0 },
    }
  }

  pub fn with_distance_calc(mut self, calc: DistanceCalc) -> Self {
    self.calc = calc;
    self
  }

  /// Values above 1 speed up the search but the estimate is no longer a lower bound
  pub fn with_epsilon(mut self, epsilon: f64) -> Self {
    self.epsilon = epsilon;
    self
  }
}

impl<G: NodeAccess + Copy> WeightApproximator for BeelineApproximator<G> {
  fn set_to(&mut self, to: NodeId) {
    self.to = self.graph.position(to);
  }

  fn approximate(&self, node: NodeId) -> f64 {
    let distance = self.calc.distance(&self.graph.position(node), &self.to);
    distance * self.weight_per_meter * self.epsilon
  }

  fn name(&self) -> &'static str {
    "beeline"
  }
}

/// Pair of estimates for bidirectional A*, balanced so that the forward and backward
/// potentials of a node sum to zero. This keeps both searches consistent.
#[derive(Clone, Debug)]
pub struct ConsistentApproximator<A> {
  to_target: A,
  to_source: A,
}

impl<A: WeightApproximator + Clone> ConsistentApproximator<A> {
  pub fn new(approximator: A) -> Self {
    ConsistentApproximator {
      to_target: approximator.clone(),
      to_source: approximator,
    }
  }

  pub fn set_from(&mut self, from: NodeId) {
    self.to_source.set_to(from);
  }

  pub fn set_to(&mut self, to: NodeId) {
    self.to_target.set_to(to);
  }

  pub fn approximate(&self, node: NodeId, reverse: bool) -> f64 {
    let to_target = self.to_target.approximate(node);
    let to_source = self.to_source.approximate(node);
    if reverse {
      (to_source - to_target) * 0.5
    } else {
      (to_target - to_source) * 0.5
    }
  }

  pub fn name(&self) -> &'static str {
    self.to_target.name()
  }
}
