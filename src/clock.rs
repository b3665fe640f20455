use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use std::fmt::Debug;
use std::sync::Mutex;

/// Source of "now" for every timestamp the services stamp.
///
/// Production uses [`SystemClock`]; tests inject a [`ManualClock`] so that
/// joined/started/completed timestamps and the today/upcoming windows are
/// deterministic.
pub trait Clock: Send + Sync + Debug {
    /// Current local wall-clock time, second precision is all callers rely on.
    fn now(&self) -> NaiveDateTime;

    /// Current local calendar date.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Wall clock of the host, in the server's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Fixed clock that only moves when told to. Test-only in spirit, but lives
/// here so integration tests outside the crate can use it.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<NaiveDateTime>,
}

impl ManualClock {
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn set(&self, to: NaiveDateTime) {
        *self.now.lock().expect("clock lock poisoned") = to;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().expect("clock lock poisoned");
        *now = *now + by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().expect("clock lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 10)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn manual_clock_holds_and_advances() {
        let clock = ManualClock::new(at(9, 0, 0));
        assert_eq!(clock.now(), at(9, 0, 0));
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());

        clock.advance(Duration::minutes(30));
        assert_eq!(clock.now(), at(9, 30, 0));

        clock.set(at(23, 59, 59));
        assert_eq!(clock.now(), at(23, 59, 59));
    }
}
