//! Weekday names, indices and their Persian labels.
//!
//! Indices follow the web platform's `Date.getDay()` numbering:
//! 0 is Sunday and 6 is Saturday. They are reported, never branched on.

use std::fmt;

use chrono::{
  DateTime,
  Datelike,
  Local,
  Utc,
  Weekday
};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::{
  debug,
  info
};

use crate::error::{
  LabelError,
  Result
};

pub const DEFAULT_TIMEZONE: &str =
  "Asia/Tehran";

/// Long-form English weekday name.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize
)]
pub enum WeekdayName {
  Saturday,
  Sunday,
  Monday,
  Tuesday,
  Wednesday,
  Thursday,
  Friday
}

impl WeekdayName {
  /// Table order, starting on Saturday.
  pub const ALL: [WeekdayName; 7] = [
    WeekdayName::Saturday,
    WeekdayName::Sunday,
    WeekdayName::Monday,
    WeekdayName::Tuesday,
    WeekdayName::Wednesday,
    WeekdayName::Thursday,
    WeekdayName::Friday
  ];

  #[must_use]
  pub fn as_str(self) -> &'static str {
    match self {
      | WeekdayName::Saturday => {
        "Saturday"
      }
      | WeekdayName::Sunday => "Sunday",
      | WeekdayName::Monday => "Monday",
      | WeekdayName::Tuesday => {
        "Tuesday"
      }
      | WeekdayName::Wednesday => {
        "Wednesday"
      }
      | WeekdayName::Thursday => {
        "Thursday"
      }
      | WeekdayName::Friday => "Friday"
    }
  }

  /// Exact, case-sensitive match on the English long name.
  #[must_use]
  pub fn parse(raw: &str) -> Option<Self> {
    Self::ALL
      .into_iter()
      .find(|name| name.as_str() == raw)
  }

  #[must_use]
  pub fn label(self) -> &'static str {
    label_for(self)
  }
}

impl From<Weekday> for WeekdayName {
  fn from(day: Weekday) -> Self {
    match day {
      | Weekday::Sat => {
        WeekdayName::Saturday
      }
      | Weekday::Sun => WeekdayName::Sunday,
      | Weekday::Mon => WeekdayName::Monday,
      | Weekday::Tue => {
        WeekdayName::Tuesday
      }
      | Weekday::Wed => {
        WeekdayName::Wednesday
      }
      | Weekday::Thu => {
        WeekdayName::Thursday
      }
      | Weekday::Fri => WeekdayName::Friday
    }
  }
}

impl From<WeekdayName> for Weekday {
  fn from(name: WeekdayName) -> Self {
    match name {
      | WeekdayName::Saturday => {
        Weekday::Sat
      }
      | WeekdayName::Sunday => Weekday::Sun,
      | WeekdayName::Monday => Weekday::Mon,
      | WeekdayName::Tuesday => {
        Weekday::Tue
      }
      | WeekdayName::Wednesday => {
        Weekday::Wed
      }
      | WeekdayName::Thursday => {
        Weekday::Thu
      }
      | WeekdayName::Friday => Weekday::Fri
    }
  }
}

impl fmt::Display for WeekdayName {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Persian display label for a weekday.
#[must_use]
pub fn label_for(
  name: WeekdayName
) -> &'static str {
  match name {
    | WeekdayName::Saturday => "شنبه",
    | WeekdayName::Sunday => "یک شنبه",
    | WeekdayName::Monday => "دو شنبه",
    | WeekdayName::Tuesday => "سه شنبه",
    | WeekdayName::Wednesday => {
      "چهار شنبه"
    }
    | WeekdayName::Thursday => {
      "پنج شنبه"
    }
    | WeekdayName::Friday => "جمعه"
  }
}

/// Label lookup keyed by a raw English name.
///
/// Anything other than the seven exact names yields `None`, and callers
/// emit nothing for it.
#[must_use]
pub fn label_for_name(
  raw: &str
) -> Option<&'static str> {
  let found = WeekdayName::parse(raw)
    .map(label_for);
  if found.is_none() {
    debug!(
      name = raw,
      "unmatched weekday name; no label"
    );
  }
  found
}

pub fn parse_timezone(
  raw: &str
) -> Result<Tz> {
  let trimmed = raw.trim();
  trimmed.parse::<Tz>().map_err(|_| {
    LabelError::InvalidTimeZone {
      zone: raw.to_string()
    }
  })
}

#[must_use]
pub fn weekday_index(
  instant: DateTime<Utc>,
  tz: &Tz
) -> u8 {
  let day = instant
    .with_timezone(tz)
    .weekday()
    .num_days_from_sunday();
  // num_days_from_sunday is always 0..=6
  day as u8
}

/// Resolves `zone` and reports the weekday index of `instant` there.
///
/// The index is written to the diagnostic channel and returned.
#[tracing::instrument(skip(instant))]
pub fn compute_weekday_index(
  zone: &str,
  instant: DateTime<Utc>
) -> Result<u8> {
  let tz = parse_timezone(zone)?;
  let index = weekday_index(instant, &tz);
  info!(
    zone = %tz,
    index,
    "computed weekday index"
  );
  Ok(index)
}

#[must_use]
pub fn weekday_name_in(
  instant: DateTime<Utc>,
  tz: &Tz
) -> WeekdayName {
  instant
    .with_timezone(tz)
    .weekday()
    .into()
}

/// Weekday name in the host's default time zone.
#[must_use]
pub fn compute_weekday_name(
  instant: DateTime<Utc>
) -> WeekdayName {
  instant
    .with_timezone(&Local)
    .weekday()
    .into()
}
