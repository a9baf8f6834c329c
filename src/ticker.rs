use chrono::{DateTime, Local};
use std::time::Duration;

/// Default poll interval of the UI loop in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

/// Get poll duration
pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

/// Source of the current time
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Turns wall-clock progress into whole-second ticks for one run of the countdown.
/// Only one run is armed at a time; a new run id replaces the old schedule.
#[derive(Debug, Clone, Default)]
pub struct Ticker {
    armed: Option<Armed>,
}

#[derive(Debug, Clone, Copy)]
struct Armed {
    run_id: u64,
    last_tick: DateTime<Local>,
}

impl Ticker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm for `run_id` when the countdown is active, disarm otherwise
    pub fn sync(&mut self, active: bool, run_id: u64, now: DateTime<Local>) {
        if !active {
            self.armed = None;
            return;
        }
        match self.armed {
            Some(armed) if armed.run_id == run_id => {}
            _ => {
                self.armed = Some(Armed {
                    run_id,
                    last_tick: now,
                })
            }
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Next tick instant that is due by `now`, if any. Call repeatedly to catch up.
    pub fn next_due(&mut self, now: DateTime<Local>) -> Option<DateTime<Local>> {
        let armed = self.armed.as_mut()?;
        let next = armed.last_tick + chrono::Duration::seconds(1);
        if next <= now {
            armed.last_tick = next;
            Some(next)
        } else {
            None
        }
    }
}

#[cfg(test)]
pub mod fake {
    use super::Clock;
    use chrono::{DateTime, Duration, Local};
    use std::cell::Cell;
    use std::rc::Rc;

    /// Manually advanced clock; clones share the same time
    #[derive(Debug, Clone)]
    pub struct FakeClock {
        now: Rc<Cell<DateTime<Local>>>,
    }

    impl FakeClock {
        pub fn new(start: DateTime<Local>) -> Self {
            Self {
                now: Rc::new(Cell::new(start)),
            }
        }

        pub fn advance(&self, by: Duration) {
            self.now.set(self.now.get() + by);
        }

        pub fn set(&self, to: DateTime<Local>) {
            self.now.set(to);
        }
    }

    impl Clock for FakeClock {
        fn now(&self) -> DateTime<Local> {
            self.now.get()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::FakeClock;
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_tick_duration() {
        assert_eq!(tick_duration(), Duration::from_millis(250));
    }

    #[test]
    fn test_ticks_once_per_second() {
        let clock = FakeClock::new(start());
        let mut ticker = Ticker::new();
        ticker.sync(true, 1, clock.now());

        clock.advance(chrono::Duration::milliseconds(750));
        assert_eq!(ticker.next_due(clock.now()), None);

        clock.advance(chrono::Duration::milliseconds(250));
        assert_eq!(
            ticker.next_due(clock.now()),
            Some(start() + chrono::Duration::seconds(1))
        );
        assert_eq!(ticker.next_due(clock.now()), None);
    }

    #[test]
    fn test_catches_up_after_stall() {
        let clock = FakeClock::new(start());
        let mut ticker = Ticker::new();
        ticker.sync(true, 1, clock.now());

        clock.advance(chrono::Duration::milliseconds(3500));
        let mut count = 0;
        while ticker.next_due(clock.now()).is_some() {
            count += 1;
        }
        assert_eq!(count, 3);
    }

    #[test]
    fn test_new_run_rearms_and_stop_disarms() {
        let clock = FakeClock::new(start());
        let mut ticker = Ticker::new();
        ticker.sync(true, 1, clock.now());
        clock.advance(chrono::Duration::milliseconds(900));

        // Same run keeps its schedule
        ticker.sync(true, 1, clock.now());
        clock.advance(chrono::Duration::milliseconds(100));
        assert!(ticker.next_due(clock.now()).is_some());

        // A new run starts a fresh second
        clock.advance(chrono::Duration::milliseconds(900));
        ticker.sync(true, 2, clock.now());
        clock.advance(chrono::Duration::milliseconds(100));
        assert_eq!(ticker.next_due(clock.now()), None);

        ticker.sync(false, 2, clock.now());
        assert!(!ticker.is_armed());
        clock.advance(chrono::Duration::seconds(5));
        assert_eq!(ticker.next_due(clock.now()), None);
    }
}
