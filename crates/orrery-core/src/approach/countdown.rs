//! Real-time countdown to a close-approach instant.
//!
//! Always measured against wall-clock millis, never simulated time. Each
//! countdown owns its own refresh timer; dropping it cancels the timer.

use std::fmt;

use crate::core::time::RefreshTimer;

pub const MILLIS_PER_DAY: f64 = 86_400_000.0;
pub const MILLIS_PER_HOUR: f64 = 3_600_000.0;
pub const MILLIS_PER_MINUTE: f64 = 60_000.0;
pub const MILLIS_PER_SECOND: f64 = 1_000.0;

/// Default refresh cadence in real seconds.
pub const DEFAULT_COUNTDOWN_INTERVAL_SECS: f64 = 1.0;

pub const PASSED_TEXT: &str = "PASSED";
pub const UNAVAILABLE_TEXT: &str = "--";

/// Whole days/hours/minutes/seconds left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeRemaining {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl TimeRemaining {
    /// Break a positive millisecond difference into whole units.
    pub fn from_millis(diff: f64) -> Self {
        let diff = diff.max(0.0);
        Self {
            days: (diff / MILLIS_PER_DAY).floor() as u64,
            hours: ((diff % MILLIS_PER_DAY) / MILLIS_PER_HOUR).floor() as u64,
            minutes: ((diff % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE).floor() as u64,
            seconds: ((diff % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND).floor() as u64,
        }
    }

    pub fn total_seconds(&self) -> u64 {
        self.days * 86_400 + self.hours * 3_600 + self.minutes * 60 + self.seconds
    }
}

impl fmt::Display for TimeRemaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}d {:02}h {:02}m {:02}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// What a countdown currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownReading {
    Remaining(TimeRemaining),
    /// The target instant has been reached. Terminal.
    Passed,
    /// The target timestamp is missing or not a finite number.
    Unavailable,
}

impl fmt::Display for CountdownReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountdownReading::Remaining(left) => fmt::Display::fmt(left, f),
            CountdownReading::Passed => f.write_str(PASSED_TEXT),
            CountdownReading::Unavailable => f.write_str(UNAVAILABLE_TEXT),
        }
    }
}

pub struct ApproachCountdown {
    target_millis: Option<f64>,
    reading: CountdownReading,
    timer: RefreshTimer,
}

impl ApproachCountdown {
    /// Start a countdown to `target_millis` and compute its first reading.
    pub fn new(target_millis: Option<f64>, now_millis: f64, interval_secs: f64) -> Self {
        let target_millis = target_millis.filter(|t| t.is_finite());
        let mut countdown = Self {
            target_millis,
            reading: CountdownReading::Unavailable,
            timer: RefreshTimer::new(interval_secs),
        };
        countdown.refresh(now_millis);
        countdown
    }

    /// Recompute the reading against `now_millis`. Once passed, stays passed.
    pub fn refresh(&mut self, now_millis: f64) -> CountdownReading {
        self.reading = match (self.reading, self.target_millis) {
            (CountdownReading::Passed, _) => CountdownReading::Passed,
            (_, None) => CountdownReading::Unavailable,
            (_, Some(_)) if !now_millis.is_finite() => CountdownReading::Unavailable,
            (_, Some(target)) => {
                let diff = target - now_millis;
                if diff <= 0.0 {
                    CountdownReading::Passed
                } else {
                    CountdownReading::Remaining(TimeRemaining::from_millis(diff))
                }
            }
        };
        self.reading
    }

    /// Feed real frame time. Refreshes when the interval elapses and
    /// returns whether it did.
    pub fn advance(&mut self, frame_dt_secs: f64, now_millis: f64) -> bool {
        if self.timer.accumulate(frame_dt_secs) == 0 {
            return false;
        }
        self.refresh(now_millis);
        true
    }

    pub fn reading(&self) -> CountdownReading {
        self.reading
    }

    pub fn target_millis(&self) -> Option<f64> {
        self.target_millis
    }

    pub fn is_passed(&self) -> bool {
        self.reading == CountdownReading::Passed
    }
}
