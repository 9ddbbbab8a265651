//! Injectable time source.
//!
//! Mutations that stamp dates read time through `Clock` so callers can pin
//! timestamps. Any `Fn() -> DateTime<Utc>` closure is a clock.

use chrono::{DateTime, Utc};

/// Source of the current UTC time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time via `Utc::now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<F> Clock for F
where
    F: Fn() -> DateTime<Utc>,
{
    fn now(&self) -> DateTime<Utc> {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::Clock;
    use chrono::{TimeZone, Utc};
    use std::cell::Cell;

    #[test]
    fn closure_clock_returns_pinned_time() {
        let pinned = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let clock = move || pinned;
        assert_eq!(clock.now(), pinned);
        assert_eq!(clock.now(), pinned);
    }

    #[test]
    fn closure_clock_can_advance() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let tick = Cell::new(start);
        let clock = || {
            let now = tick.get();
            tick.set(now + chrono::Duration::days(1));
            now
        };
        assert_eq!(clock.now(), start);
        assert_eq!(clock.now(), start + chrono::Duration::days(1));
    }
}
