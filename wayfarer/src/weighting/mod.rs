//! Edge weights and travel times.
//!
//! A [`Weighting`] maps the traversal of an edge to a cost (the weight minimized by the
//! searches) and, separately, to a duration. Weightings compose by decoration:
//! [`TurnWeighting`] adds turn costs and [`TimeDependentAccessWeighting`] closes edges at
//! given times.

mod approximator;
mod fastest;
mod speed;
mod td_access;
mod turn;

pub use approximator::*;
pub use fastest::*;
pub use speed::*;
pub use td_access::*;
pub use turn::*;

use crate::error::{Result, RoutingError};
use crate::graph::{EdgeId, EdgeRef};
use std::rc::Rc;
use std::sync::Arc;

/// Converts `meters / (km/h)` into seconds
pub const SPEED_CONV: f64 = 3.6;

/// Cost and time of traversing edges.
///
/// `reverse` selects the direction: `false` travels `edge.base -> edge.adj`, `true` travels
/// `edge.adj -> edge.base`. `prev_or_next` is the edge traveled right before (or, for
/// `reverse`, right after) `edge`, `None` at the start of a search. Times `at` are absolute
/// milliseconds since the Unix epoch.
///
/// An infinite weight marks a direction which cannot be traveled.
pub trait Weighting {
  fn calc_weight(&self, edge: &EdgeRef, reverse: bool, prev_or_next: Option<EdgeId>) -> Result<f64>;

  /// Weight when entering the edge at `at`. Weightings which are not time dependent ignore it.
  fn calc_weight_at(
    &self,
    edge: &EdgeRef,
    reverse: bool,
    prev_or_next: Option<EdgeId>,
    _at: i64,
  ) -> Result<f64> {
    self.calc_weight(edge, reverse, prev_or_next)
  }

  fn calc_millis(&self, edge: &EdgeRef, reverse: bool, prev_or_next: Option<EdgeId>) -> Result<u64>;

  fn calc_millis_at(
    &self,
    edge: &EdgeRef,
    reverse: bool,
    prev_or_next: Option<EdgeId>,
    _at: i64,
  ) -> Result<u64> {
    self.calc_millis(edge, reverse, prev_or_next)
  }

  /// Lower bound of the weight of any path of the given length in meters. Must be linear.
  fn min_weight(&self, distance: f64) -> f64;

  fn name(&self) -> String;

  /// Identity of the weighting including its decorations
  fn description(&self) -> String {
    self.name()
  }

  fn is_time_dependent(&self) -> bool {
    false
  }
}

macro_rules! impl_weighting_for_pointer {
  ($($ptr:ty),*) => {
    $(
      impl<W: Weighting + ?Sized> Weighting for $ptr {
        fn calc_weight(&self, edge: &EdgeRef, reverse: bool, prev_or_next: Option<EdgeId>) -> Result<f64> {
          (**self).calc_weight(edge, reverse, prev_or_next)
        }
        fn calc_weight_at(&self, edge: &EdgeRef, reverse: bool, prev_or_next: Option<EdgeId>, at: i64) -> Result<f64> {
          (**self).calc_weight_at(edge, reverse, prev_or_next, at)
        }
        fn calc_millis(&self, edge: &EdgeRef, reverse: bool, prev_or_next: Option<EdgeId>) -> Result<u64> {
          (**self).calc_millis(edge, reverse, prev_or_next)
        }
        fn calc_millis_at(&self, edge: &EdgeRef, reverse: bool, prev_or_next: Option<EdgeId>, at: i64) -> Result<u64> {
          (**self).calc_millis_at(edge, reverse, prev_or_next, at)
        }
        fn min_weight(&self, distance: f64) -> f64 {
          (**self).min_weight(distance)
        }
        fn name(&self) -> String {
          (**self).name()
        }
        fn description(&self) -> String {
          (**self).description()
        }
        fn is_time_dependent(&self) -> bool {
          (**self).is_time_dependent()
        }
      }
    )*
  };
}

impl_weighting_for_pointer!(&W, Box<W>, Rc<W>, Arc<W>);

/// Loop edges do not have a meaningful direction, they are always read forward
pub fn read_reverse(edge: &EdgeRef, reverse: bool) -> bool {
  reverse && !edge.is_loop()
}

/// Rejects speeds which cannot come from consistent access/speed data
pub fn checked_speed(edge: &EdgeRef, speed: f64) -> Result<f64> {
  if speed.is_infinite() || speed.is_nan() || speed < 0.0 {
    return Err(RoutingError::InvalidSpeed {
      edge: edge.edge,
      speed,
    });
  }
  if speed == 0.0 {
    return Err(RoutingError::ZeroSpeed { edge: edge.edge });
  }
  Ok(speed)
}

/// Milliseconds needed to travel the edge at `speed` km/h
pub fn travel_millis(edge: &EdgeRef, reverse: bool, speed: f64) -> Result<u64> {
  if !edge.access(reverse) {
    return Err(RoutingError::BlockedDirection {
      edge: edge.edge,
      base: edge.base,
      adj: edge.adj,
      reverse,
    });
  }
  let speed = checked_speed(edge, speed)?;
  Ok((edge.distance * 3600.0 / speed) as u64)
}
