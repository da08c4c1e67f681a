//! Wall-clock abstraction.
//!
//! Status derivation stamps timestamps (`completed_at`, `start_date`,
//! `end_date`) and the filter/stats projections compare against the local
//! calendar date. Both readings go through the [`Clock`] trait so tests can
//! pin time to a known instant.

use chrono::{DateTime, Local, NaiveDate, Utc};

/// Source of the current time.
pub trait Clock {
    /// Current instant, UTC.
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar date in the local timezone.
    fn today(&self) -> NaiveDate;
}

/// Production clock reading the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Test double pinned to a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
    today: NaiveDate,
}

impl FixedClock {
    /// Create a fixed clock at the given instant; `today` is derived from
    /// the instant's UTC date.
    #[must_use]
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now,
            today: now.date_naive(),
        }
    }

    /// Override the local calendar date independently of the instant.
    #[must_use]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_clock_returns_pinned_instant() {
        let instant = Utc.with_ymd_and_hms(2024, 5, 15, 12, 30, 0).unwrap();
        let clock = FixedClock::at(instant);
        assert_eq!(clock.now(), instant);
        assert_eq!(clock.today(), instant.date_naive());
    }

    #[test]
    fn test_fixed_clock_with_today_override() {
        let instant = Utc.with_ymd_and_hms(2024, 5, 15, 23, 59, 0).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 5, 16).unwrap();
        let clock = FixedClock::at(instant).with_today(today);
        assert_eq!(clock.today(), today);
    }

    #[test]
    fn test_system_clock_is_monotonic_enough() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
