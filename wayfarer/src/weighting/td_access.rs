use super::Weighting;
use crate::error::Result;
use crate::graph::{EdgeId, EdgeRef};
use chrono::{DateTime, Datelike, NaiveTime, Utc, Weekday};
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// Decides whether an edge may be entered at a given time (millis since the Unix epoch)
pub trait TimeDependentAccess {
  fn accept(&self, edge: &EdgeRef, at: i64) -> bool;
}

impl<F: Fn(&EdgeRef, i64) -> bool> TimeDependentAccess for F {
  fn accept(&self, edge: &EdgeRef, at: i64) -> bool {
    self(edge, at)
  }
}

/// Recurring interval of the week, evaluated in UTC.
///
/// `from > to` describes a window which spans midnight: the part after midnight belongs to
/// the day the window started on. An empty `days` list means every day.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
  #[serde(default)]
  pub days: Vec<Weekday>,
  pub from: NaiveTime,
  pub to: NaiveTime,
}

impl TimeWindow {
  pub fn new(from: NaiveTime, to: NaiveTime) -> Self {
    TimeWindow {
      days: Vec::new(),
      from,
      to,
    }
  }

  pub fn on(mut self, days: &[Weekday]) -> Self {
    self.days = days.to_vec();
    self
  }

  fn on_day(&self, day: Weekday) -> bool {
    self.days.is_empty() || self.days.contains(&day)
  }

  pub fn contains(&self, time: &DateTime<Utc>) -> bool {
    let day = time.weekday();
    let clock = time.time();
    if self.from <= self.to {
      self.on_day(day) && self.from <= clock && clock < self.to
    } else {
      (clock >= self.from && self.on_day(day)) || (clock < self.to && self.on_day(day.pred()))
    }
  }
}

/// Time-dependent access rule of a single edge
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccessCondition {
  /// Access outside of the windows. Inside any window the access is inverted.
  pub open_by_default: bool,
  pub windows: Vec<TimeWindow>,
}

impl AccessCondition {
  pub fn is_open(&self, at: i64) -> bool {
    let inside = match DateTime::from_timestamp_millis(at) {
      Some(time) => self.windows.iter().any(|w| w.contains(&time)),
      None => false,
    };
    self.open_by_default != inside
  }
}

/// Conditional access rules keyed by edge. Edges without a rule are always open.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ConditionalAccess {
  conditions: HashMap<EdgeId, AccessCondition>,
}

impl ConditionalAccess {
  pub fn new() -> Self {
    Default::default()
  }

  /// The edge can not be entered during the window
  pub fn close_during(&mut self, edge: EdgeId, window: TimeWindow) -> &mut Self {
    self.add(edge, true, window)
  }

  /// The edge can only be entered during the window
  pub fn open_only_during(&mut self, edge: EdgeId, window: TimeWindow) -> &mut Self {
    self.add(edge, false, window)
  }

  fn add(&mut self, edge: EdgeId, open_by_default: bool, window: TimeWindow) -> &mut Self {
    let condition = self.conditions.entry(edge).or_insert_with(|| AccessCondition {
      open_by_default,
      windows: Vec::new(),
    });
    condition.open_by_default = open_by_default;
    condition.windows.push(window);
    self
  }

  pub fn len(&self) -> usize {
    self.conditions.len()
  }

  pub fn is_empty(&self) -> bool {
    self.conditions.is_empty()
  }
}

impl TimeDependentAccess for ConditionalAccess {
  fn accept(&self, edge: &EdgeRef, at: i64) -> bool {
    self
      .conditions
      .get(&edge.edge)
      .map_or(true, |condition| condition.is_open(at))
  }
}

/// Blocks edges at times their access rule rejects them, otherwise delegates to the wrapped
/// weighting.
#[derive(Clone, Debug)]
pub struct TimeDependentAccessWeighting<W, A> {
  inner: W,
  access: A,
}

impl<W: Weighting, A: TimeDependentAccess> TimeDependentAccessWeighting<W, A> {
  pub fn new(inner: W, access: A) -> Self {
    TimeDependentAccessWeighting { inner, access }
  }

  pub fn inner(&self) -> &W {
    &self.inner
  }
}

impl<W: Weighting, A: TimeDependentAccess> Weighting for TimeDependentAccessWeighting<W, A> {
  fn calc_weight(&self, edge: &EdgeRef, reverse: bool, prev_or_next: Option<EdgeId>) -> Result<f64> {
    self.inner.calc_weight(edge, reverse, prev_or_next)
  }

  fn calc_weight_at(&self, edge: &EdgeRef, reverse: bool, prev_or_next: Option<EdgeId>, at: i64) -> Result<f64> {
    if self.access.accept(edge, at) {
      self.inner.calc_weight_at(edge, reverse, prev_or_next, at)
    } else {
      Ok(f64::INFINITY)
    }
  }

  fn calc_millis(&self, edge: &EdgeRef, reverse: bool, prev_or_next: Option<EdgeId>) -> Result<u64> {
    self.inner.calc_millis(edge, reverse, prev_or_next)
  }

  fn calc_millis_at(&self, edge: &EdgeRef, reverse: bool, prev_or_next: Option<EdgeId>, at: i64) -> Result<u64> {
    self.inner.calc_millis_at(edge, reverse, prev_or_next, at)
  }

  fn min_weight(&self, distance: f64) -> f64 {
    self.inner.min_weight(distance)
  }

  fn name(&self) -> String {
    self.inner.name()
  }

  fn description(&self) -> String {
    format!("td_access|{}", self.inner.description())
  }

  fn is_time_dependent(&self) -> bool {
    true
  }
}
