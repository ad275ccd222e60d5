//! Point-vs-interval occupancy and the collision rule between two events.
//!
//! An event whose end is absent or not after its start is a *point*: it
//! occupies a single instant. Anything else is a half-open interval
//! `[start, end)`, so back-to-back meetings never collide.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The calendar footprint of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Occupancy {
  Point(NaiveDateTime),
  Interval {
    start: NaiveDateTime,
    end:   NaiveDateTime,
  },
}

impl Occupancy {
  /// Classify a `(start, end)` pair. `end <= start` degrades to a point.
  pub fn new(start: NaiveDateTime, end: Option<NaiveDateTime>) -> Self {
    match end {
      Some(end) if end > start => Self::Interval { start, end },
      _ => Self::Point(start),
    }
  }

  pub fn start(&self) -> NaiveDateTime {
    match *self {
      Self::Point(at) => at,
      Self::Interval { start, .. } => start,
    }
  }

  /// `None` for a point.
  pub fn end(&self) -> Option<NaiveDateTime> {
    match *self {
      Self::Point(_) => None,
      Self::Interval { end, .. } => Some(end),
    }
  }

  pub fn is_point(&self) -> bool { matches!(self, Self::Point(_)) }

  /// Whether `self` (the candidate) collides with `existing`.
  ///
  /// | new \ existing | point | interval |
  /// |---|---|---|
  /// | point | equal instants | `existing.start <= new < existing.end` |
  /// | interval | `new.start <= existing < new.end` | overlap |
  pub fn collides_with(&self, existing: &Occupancy) -> bool {
    match (*self, *existing) {
      (Self::Point(new), Self::Point(old)) => new == old,
      (Self::Point(new), Self::Interval { start, end }) => start <= new && new < end,
      (Self::Interval { start, end }, Self::Point(old)) => start <= old && old < end,
      (
        Self::Interval { start: new_start, end: new_end },
        Self::Interval { start: old_start, end: old_end },
      ) => !(new_end <= old_start || old_end <= new_start),
    }
  }
}
