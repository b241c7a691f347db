//! Sources of real (wall-clock) time.
//!
//! The core never reads the system clock directly outside of
//! [`SystemClock`]; hosts inject whichever source fits their target
//! (`Date.now()` in the browser, a [`ManualClock`] in tests and replays).

use std::cell::Cell;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::julian::julian_date_from_unix_millis;

/// Provides the present moment as Unix milliseconds.
pub trait WallClock {
    /// Milliseconds since the Unix epoch (fractional allowed).
    fn now_millis(&self) -> f64;

    /// The present moment as a Julian Date.
    fn now_julian(&self) -> f64 {
        julian_date_from_unix_millis(self.now_millis())
    }
}

/// Wall clock backed by `std::time::SystemTime`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now_millis(&self) -> f64 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(since) => since.as_secs_f64() * 1000.0,
            // System clock set before 1970
            Err(err) => -err.duration().as_secs_f64() * 1000.0,
        }
    }
}

/// Wall clock that only moves when told to.
///
/// Clones share the same underlying time, so a test can hand one clone to
/// a [`Store`](crate::state::store::Store) and keep another to advance it.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    millis: Rc<Cell<f64>>,
}

impl ManualClock {
    /// Create a clock reading `unix_millis`.
    pub fn at(unix_millis: f64) -> Self {
        Self {
            millis: Rc::new(Cell::new(unix_millis)),
        }
    }

    /// Create a clock reading the given Julian Date.
    pub fn at_julian(jd: f64) -> Self {
        Self::at(crate::core::julian::unix_millis_from_julian_date(jd))
    }

    pub fn set_millis(&self, unix_millis: f64) {
        self.millis.set(unix_millis);
    }

    pub fn advance_millis(&self, delta: f64) {
        self.millis.set(self.millis.get() + delta);
    }

    pub fn advance_secs(&self, delta: f64) {
        self.advance_millis(delta * 1000.0);
    }
}

impl WallClock for ManualClock {
    fn now_millis(&self) -> f64 {
        self.millis.get()
    }
}
