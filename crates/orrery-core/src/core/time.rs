/// Fixed-interval refresh timer.
/// Turns variable real frame deltas into whole refresh intervals, so a
/// component can recompute on a steady cadence without owning a thread.
pub struct RefreshTimer {
    /// Interval between refreshes in real seconds.
    interval: f64,
    /// Accumulated real time since the last elapsed interval.
    accumulator: f64,
}

/// Upper bound on intervals reported for one frame (e.g. after a tab sleep).
const MAX_CATCH_UP: u32 = 10;

impl RefreshTimer {
    pub fn new(interval: f64) -> Self {
        Self {
            interval,
            accumulator: 0.0,
        }
    }

    /// Add real frame time. Returns the number of whole intervals that elapsed.
    pub fn accumulate(&mut self, frame_dt: f64) -> u32 {
        if frame_dt.is_nan() || frame_dt <= 0.0 || self.interval <= 0.0 {
            return 0;
        }
        self.accumulator += frame_dt;
        // Cap so a long stall does not replay a burst of refreshes
        self.accumulator = self.accumulator.min(self.interval * MAX_CATCH_UP as f64);
        let steps = (self.accumulator / self.interval) as u32;
        self.accumulator -= steps as f64 * self.interval;
        steps
    }

    /// Fraction of the current interval already elapsed (0.0 to 1.0).
    pub fn progress(&self) -> f64 {
        if self.interval > 0.0 {
            self.accumulator / self.interval
        } else {
            0.0
        }
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
