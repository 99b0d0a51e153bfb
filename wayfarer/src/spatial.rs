//! Geographic types.

use geo::haversine_distance::*;
use geo::Point;
use serde::{Deserialize, Serialize};

#[doc(hidden)]
pub use geo::Coordinate;

/// `x` is the longitude and `y` the latitude, in degrees
pub type Position = Coordinate<f64>;

const MEAN_EARTH_RADIUS: f64 = 6_371_008.8;

/// Great circle distance in meters
pub fn haversine_distance(from: &Position, to: &Position) -> f64 {
  Point::from(*from).haversine_distance(&Point::from(*to))
}

/// Distance in meters on an equirectangular projection around the mean latitude.
///
/// Cheaper than [`haversine_distance`] and accurate for the short distances used by A*.
pub fn plane_distance(from: &Position, to: &Position) -> f64 {
  let mean_lat = ((from.y + to.y) / 2.0).to_radians();
  let dx = (to.x - from.x).to_radians() * mean_lat.cos();
  let dy = (to.y - from.y).to_radians();
  MEAN_EARTH_RADIUS * (dx * dx + dy * dy).sqrt()
}

/// Distance calculation used for straight-line estimates
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceCalc {
  Earth,
  Plane,
}

impl DistanceCalc {
  pub fn distance(self, from: &Position, to: &Position) -> f64 {
    match self {
      DistanceCalc::Earth => haversine_distance(from, to),
      DistanceCalc::Plane => plane_distance(from, to),
    }
  }
}

impl Default for DistanceCalc {
  fn default() -> Self {
    DistanceCalc::Earth
  }
}
