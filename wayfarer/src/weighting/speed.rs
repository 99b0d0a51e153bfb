use crate::graph::{EdgeId, EdgeRef};
use chrono::{DateTime, Timelike};
use hashbrown::HashMap;

/// Resolves the speed (km/h) used to travel an edge
pub trait SpeedCalculator {
  /// `at` is the time the edge is entered, if known
  fn speed(&self, edge: &EdgeRef, reverse: bool, at: Option<i64>) -> f64;

  fn is_time_dependent(&self) -> bool {
    false
  }
}

/// Reads the speeds stored with the edges
#[derive(Copy, Clone, Debug, Default)]
pub struct EdgeSpeeds;

impl SpeedCalculator for EdgeSpeeds {
  fn speed(&self, edge: &EdgeRef, reverse: bool, _at: Option<i64>) -> f64 {
    edge.speed(reverse)
  }
}

/// Scales the stored speeds of some edges by a factor which depends on the hour of the day (UTC).
///
/// Edges without a profile keep their stored speed.
#[derive(Clone, Debug, Default)]
pub struct HourlySpeeds {
  profiles: HashMap<EdgeId, [f64; 24]>,
}

impl HourlySpeeds {
  pub fn new() -> Self {
    Default::default()
  }

  pub fn set_profile(&mut self, edge: EdgeId, factors: [f64; 24]) -> &mut Self {
    self.profiles.insert(edge, factors);
    self
  }

  fn factor(&self, edge: EdgeId, at: i64) -> f64 {
    let profile = match self.profiles.get(&edge) {
      Some(profile) => profile,
      None => return 1.0,
    };
    DateTime::from_timestamp_millis(at)
      .map(|time| profile[time.hour() as usize])
      .unwrap_or(1.0)
  }
}

impl SpeedCalculator for HourlySpeeds {
  fn speed(&self, edge: &EdgeRef, reverse: bool, at: Option<i64>) -> f64 {
    let speed = edge.speed(reverse);
    match at {
      Some(at) => speed * self.factor(edge.edge, at),
      None => speed,
    }
  }

  fn is_time_dependent(&self) -> bool {
    true
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const HOUR: i64 = 3_600_000;

  #[test]
  fn test_hourly_profile() {
    let mut factors = [1.0; 24];
    factors[8] = 0.5;
    let mut speeds = HourlySpeeds::new();
    speeds.set_profile(1, factors);

    let mut edge = EdgeRef::new(1, 0, 1, 100.0);
    edge.speed = [60.0, 60.0];

    assert_eq!(speeds.speed(&edge, false, None), 60.0);
    assert_eq!(speeds.speed(&edge, false, Some(7 * HOUR)), 60.0);
    assert_eq!(speeds.speed(&edge, false, Some(8 * HOUR + 1)), 30.0);
    // Next day, same hour
    assert_eq!(speeds.speed(&edge, true, Some(32 * HOUR)), 30.0);

    edge.edge = 2;
    assert_eq!(speeds.speed(&edge, false, Some(8 * HOUR)), 60.0);
  }
}
