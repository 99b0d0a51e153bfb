use super::Weighting;
use crate::error::Result;
use crate::graph::{EdgeId, EdgeRef, NodeId};
use hashbrown::HashMap;

/// Cost in seconds of turning from `from_edge` into `to_edge` at node `via`.
/// Infinity forbids the turn.
pub trait TurnCostProvider {
  fn turn_cost(&self, from_edge: EdgeId, via: NodeId, to_edge: EdgeId) -> f64;
}

impl<'a, T: TurnCostProvider + ?Sized> TurnCostProvider for &'a T {
  fn turn_cost(&self, from_edge: EdgeId, via: NodeId, to_edge: EdgeId) -> f64 {
    (**self).turn_cost(from_edge, via, to_edge)
  }
}

/// Turn costs and restrictions stored in a hash map. Unlisted turns are free, u-turns are
/// forbidden unless a u-turn cost is set.
#[derive(Clone, Debug)]
pub struct TurnCostTable {
  costs: HashMap<(EdgeId, NodeId, EdgeId), f64>,
  u_turn_cost: f64,
}

impl Default for TurnCostTable {
  fn default() -> Self {
    TurnCostTable {
      costs: HashMap::new(),
      u_turn_cost: f64::INFINITY,
    }
  }
}

impl TurnCostTable {
  pub fn new() -> Self {
    Default::default()
  }

  pub fn with_u_turn_cost(mut self, cost: f64) -> Self {
    self.u_turn_cost = cost;
    self
  }

  pub fn restrict(&mut self, from_edge: EdgeId, via: NodeId, to_edge: EdgeId) -> &mut Self {
    self.set_cost(from_edge, via, to_edge, f64::INFINITY)
  }

  pub fn set_cost(&mut self, from_edge: EdgeId, via: NodeId, to_edge: EdgeId, cost: f64) -> &mut Self {
    self.costs.insert((from_edge, via, to_edge), cost);
    self
  }

  pub fn len(&self) -> usize {
    self.costs.len()
  }

  pub fn is_empty(&self) -> bool {
    self.costs.is_empty()
  }
}

impl TurnCostProvider for TurnCostTable {
  fn turn_cost(&self, from_edge: EdgeId, via: NodeId, to_edge: EdgeId) -> f64 {
    if from_edge == to_edge {
      return self.u_turn_cost;
    }
    self.costs.get(&(from_edge, via, to_edge)).cloned().unwrap_or(0.0)
  }
}

/// Adds turn costs to the wrapped weighting. Only meaningful for edge-based traversal, since
/// it needs the previous edge.
#[derive(Clone, Debug)]
pub struct TurnWeighting<W, T> {
  inner: W,
  turn_costs: T,
}

impl<W: Weighting, T: TurnCostProvider> TurnWeighting<W, T> {
  pub fn new(inner: W, turn_costs: T) -> Self {
    TurnWeighting { inner, turn_costs }
  }

  /// Turn between `edge` and the edge traveled before it, or after it for `reverse`
  pub fn turn_weight(&self, edge: &EdgeRef, reverse: bool, prev_or_next: Option<EdgeId>) -> f64 {
    match prev_or_next {
      None => 0.0,
      Some(other) if reverse => self.turn_costs.turn_cost(edge.orig_first, edge.base, other),
      Some(other) => self.turn_costs.turn_cost(other, edge.base, edge.orig_first),
    }
  }

  fn turn_millis(&self, edge: &EdgeRef, reverse: bool, prev_or_next: Option<EdgeId>) -> u64 {
    let cost = self.turn_weight(edge, reverse, prev_or_next);
    if cost.is_finite() {
      (cost * 1000.0) as u64
    } else {
      0
    }
  }
}

impl<W: Weighting, T: TurnCostProvider> Weighting for TurnWeighting<W, T> {
  fn calc_weight(&self, edge: &EdgeRef, reverse: bool, prev_or_next: Option<EdgeId>) -> Result<f64> {
    let weight = self.inner.calc_weight(edge, reverse, prev_or_next)?;
    Ok(weight + self.turn_weight(edge, reverse, prev_or_next))
  }

  fn calc_weight_at(&self, edge: &EdgeRef, reverse: bool, prev_or_next: Option<EdgeId>, at: i64) -> Result<f64> {
    let weight = self.inner.calc_weight_at(edge, reverse, prev_or_next, at)?;
    Ok(weight + self.turn_weight(edge, reverse, prev_or_next))
  }

  fn calc_millis(&self, edge: &EdgeRef, reverse: bool, prev_or_next: Option<EdgeId>) -> Result<u64> {
    let millis = self.inner.calc_millis(edge, reverse, prev_or_next)?;
    Ok(millis + self.turn_millis(edge, reverse, prev_or_next))
  }

  fn calc_millis_at(&self, edge: &EdgeRef, reverse: bool, prev_or_next: Option<EdgeId>, at: i64) -> Result<u64> {
    let millis = self.inner.calc_millis_at(edge, reverse, prev_or_next, at)?;
    Ok(millis + self.turn_millis(edge, reverse, prev_or_next))
  }

  fn min_weight(&self, distance: f64) -> f64 {
    self.inner.min_weight(distance)
  }

  fn name(&self) -> String {
    self.inner.name()
  }

  fn description(&self) -> String {
    format!("turn|{}", self.inner.description())
  }

  fn is_time_dependent(&self) -> bool {
    self.inner.is_time_dependent()
  }
}
