use chrono::{
  DateTime,
  Datelike,
  Local,
  TimeZone,
  Utc
};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::warn;

use crate::clock::Clock;
use crate::error::Result;
use crate::weekday::{
  self,
  WeekdayName
};

/// Everything derived from one labelling pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
  pub instant:  DateTime<Utc>,
  pub timezone: String,
  pub index:    u8,
  pub name:     WeekdayName,
  pub label:    &'static str
}

/// Derives weekday index, name and label from a single zone.
#[derive(Debug, Clone, Copy)]
pub struct WeekdayLabeler {
  tz: Tz
}

impl WeekdayLabeler {
  #[must_use]
  pub fn new(tz: Tz) -> Self {
    Self { tz }
  }

  pub fn for_zone(
    zone: &str
  ) -> Result<Self> {
    weekday::parse_timezone(zone)
      .map(Self::new)
  }

  #[must_use]
  pub fn timezone(&self) -> Tz {
    self.tz
  }

  #[must_use]
  pub fn observe(
    &self,
    instant: DateTime<Utc>
  ) -> Observation {
    let name = weekday::weekday_name_in(
      instant, &self.tz
    );
    Observation {
      instant,
      timezone: self.tz.name().to_string(),
      index: weekday::weekday_index(
        instant, &self.tz
      ),
      name,
      label: name.label()
    }
  }

  /// Reads `clock` once and labels that instant.
  ///
  /// The index goes through [`weekday::compute_weekday_index`], which
  /// reports it on the diagnostic channel.
  #[tracing::instrument(skip_all, fields(zone = %self.tz))]
  pub fn observe_now(
    &self,
    clock: &dyn Clock
  ) -> Result<Observation> {
    let instant = clock.now();
    let index =
      weekday::compute_weekday_index(
        self.tz.name(),
        instant
      )?;
    let obs = Observation {
      index,
      ..self.observe(instant)
    };
    if host_zone_disagrees(
      obs.instant,
      &self.tz
    ) {
      warn!(
        host = %weekday::compute_weekday_name(obs.instant),
        configured = %obs.name,
        "host default zone is on a different weekday"
      );
    }
    Ok(obs)
  }
}

impl Default for WeekdayLabeler {
  fn default() -> Self {
    Self::new(chrono_tz::Asia::Tehran)
  }
}

/// True when the host's default zone is on another weekday than `tz`.
#[must_use]
pub fn host_zone_disagrees(
  instant: DateTime<Utc>,
  tz: &Tz
) -> bool {
  host_zone_disagrees_in(
    instant, tz, &Local
  )
}

#[must_use]
pub fn host_zone_disagrees_in<H>(
  instant: DateTime<Utc>,
  tz: &Tz,
  host: &H
) -> bool
where
  H: TimeZone
{
  let host_name: WeekdayName = instant
    .with_timezone(host)
    .weekday()
    .into();
  host_name
    != weekday::weekday_name_in(instant, tz)
}
