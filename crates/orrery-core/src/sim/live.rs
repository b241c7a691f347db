use serde::{Deserialize, Serialize};

/// Tolerance (Julian days) within which simulated time counts as "live".
/// 0.001 d is about 86 seconds. A display heuristic, not a correctness bound.
pub const DEFAULT_LIVE_EPSILON_DAYS: f64 = 0.001;

/// Decides whether simulated time matches real time closely enough to show
/// a "LIVE" badge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiveDetector {
    pub epsilon_days: f64,
}

impl Default for LiveDetector {
    fn default() -> Self {
        Self {
            epsilon_days: DEFAULT_LIVE_EPSILON_DAYS,
        }
    }
}

impl LiveDetector {
    pub fn new(epsilon_days: f64) -> Self {
        Self { epsilon_days }
    }

    pub fn is_live(&self, simulation_jd: f64, now_jd: f64) -> bool {
        (simulation_jd - now_jd).abs() < self.epsilon_days
    }
}
