//! Source of the current instant.

use chrono::{
  DateTime,
  Utc
};

pub trait Clock {
  fn now(&self) -> DateTime<Utc>;
}

/// Reads the host clock on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> {
    Utc::now()
  }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
  fn now(&self) -> DateTime<Utc> {
    self.0
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  #[test]
  fn fixed_clock_is_frozen() {
    let instant = Utc
      .with_ymd_and_hms(
        2024, 3, 16, 8, 0, 0
      )
      .single()
      .expect("valid instant");
    let clock = FixedClock(instant);
    assert_eq!(clock.now(), instant);
    assert_eq!(clock.now(), clock.now());
  }

  #[test]
  fn system_clock_moves_forward() {
    let clock = SystemClock;
    let first = clock.now();
    let second = clock.now();
    assert!(second >= first);
  }
}
