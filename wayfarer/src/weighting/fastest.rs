use super::{checked_speed, read_reverse, travel_millis, EdgeSpeeds, SpeedCalculator, Weighting, SPEED_CONV};
use crate::error::Result;
use crate::graph::{EdgeId, EdgeRef};

/// Weight is the travel time in seconds
#[derive(Clone, Debug)]
pub struct FastestWeighting<S = EdgeSpeeds> {
  speeds: S,
  max_speed: f64,
}

impl FastestWeighting<EdgeSpeeds> {
  /// `max_speed` (km/h) must be an upper bound of every speed in the graph
  pub fn new(max_speed: f64) -> Self {
    FastestWeighting::with_speeds(EdgeSpeeds, max_speed)
  }
}

impl<S: SpeedCalculator> FastestWeighting<S> {
  pub fn with_speeds(speeds: S, max_speed: f64) -> Self {
    FastestWeighting { speeds, max_speed }
  }

  fn weight(&self, edge: &EdgeRef, reverse: bool, at: Option<i64>) -> Result<f64> {
    let reverse = read_reverse(edge, reverse);
    if !edge.access(reverse) {
      return Ok(f64::INFINITY);
    }
    let speed = checked_speed(edge, self.speeds.speed(edge, reverse, at))?;
    Ok(edge.distance * SPEED_CONV / speed)
  }

  fn millis(&self, edge: &EdgeRef, reverse: bool, at: Option<i64>) -> Result<u64> {
    let reverse = read_reverse(edge, reverse);
    travel_millis(edge, reverse, self.speeds.speed(edge, reverse, at))
  }
}

impl<S: SpeedCalculator> Weighting for FastestWeighting<S> {
  fn calc_weight(&self, edge: &EdgeRef, reverse: bool, _prev_or_next: Option<EdgeId>) -> Result<f64> {
    self.weight(edge, reverse, None)
  }

  fn calc_weight_at(&self, edge: &EdgeRef, reverse: bool, _prev_or_next: Option<EdgeId>, at: i64) -> Result<f64> {
    self.weight(edge, reverse, Some(at))
  }

  fn calc_millis(&self, edge: &EdgeRef, reverse: bool, _prev_or_next: Option<EdgeId>) -> Result<u64> {
    self.millis(edge, reverse, None)
  }

  fn calc_millis_at(&self, edge: &EdgeRef, reverse: bool, _prev_or_next: Option<EdgeId>, at: i64) -> Result<u64> {
    self.millis(edge, reverse, Some(at))
  }

  fn min_weight(&self, distance: f64) -> f64 {
    distance / self.max_speed * SPEED_CONV
  }

  fn name(&self) -> String {
    "fastest".to_string()
  }

  fn is_time_dependent(&self) -> bool {
    self.speeds.is_time_dependent()
  }
}

/// Weight is the distance in meters. Travel times still come from the speeds.
#[derive(Clone, Debug, Default)]
pub struct ShortestWeighting<S = EdgeSpeeds> {
  speeds: S,
}

impl ShortestWeighting<EdgeSpeeds> {
  pub fn new() -> Self {
    ShortestWeighting { speeds: EdgeSpeeds }
  }
}

impl<S: SpeedCalculator> ShortestWeighting<S> {
  pub fn with_speeds(speeds: S) -> Self {
    ShortestWeighting { speeds }
  }
}

impl<S: SpeedCalculator> Weighting for ShortestWeighting<S> {
  fn calc_weight(&self, edge: &EdgeRef, reverse: bool, _prev_or_next: Option<EdgeId>) -> Result<f64> {
    if edge.access(read_reverse(edge, reverse)) {
      Ok(edge.distance)
    } else {
      Ok(f64::INFINITY)
    }
  }

  fn calc_millis(&self, edge: &EdgeRef, reverse: bool, _prev_or_next: Option<EdgeId>) -> Result<u64> {
    let reverse = read_reverse(edge, reverse);
    travel_millis(edge, reverse, self.speeds.speed(edge, reverse, None))
  }

  fn calc_millis_at(&self, edge: &EdgeRef, reverse: bool, _prev_or_next: Option<EdgeId>, at: i64) -> Result<u64> {
    let reverse = read_reverse(edge, reverse);
    travel_millis(edge, reverse, self.speeds.speed(edge, reverse, Some(at)))
  }

  fn min_weight(&self, distance: f64) -> f64 {
    distance
  }

  fn name(&self) -> String {
    "shortest".to_string()
  }
}
