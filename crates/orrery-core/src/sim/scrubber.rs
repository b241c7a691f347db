//! Slider <-> Julian Date mapping over a window centered on "now".

use serde::{Deserialize, Serialize};

use crate::core::julian::DAYS_PER_JULIAN_YEAR;

/// Slider positions run from 0 to this value.
pub const DEFAULT_SCRUBBER_RESOLUTION: f64 = 1000.0;
/// Half-width of the scrub window: five Julian years either side of now.
pub const DEFAULT_SCRUBBER_HALF_SPAN_DAYS: f64 = 5.0 * DAYS_PER_JULIAN_YEAR;

/// Bidirectional mapping between a bounded slider and an absolute JD window.
///
/// The window is `[now - half_span, now + half_span]` with `now` supplied at
/// every call, so it drifts with real time instead of being fixed at mount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrubberMapper {
    pub half_span_days: f64,
    pub resolution: f64,
}

impl Default for ScrubberMapper {
    fn default() -> Self {
        Self {
            half_span_days: DEFAULT_SCRUBBER_HALF_SPAN_DAYS,
            resolution: DEFAULT_SCRUBBER_RESOLUTION,
        }
    }
}

impl ScrubberMapper {
    pub fn new(half_span_days: f64, resolution: f64) -> Self {
        Self {
            half_span_days,
            resolution,
        }
    }

    /// `(min, max)` Julian Dates of the window around `now_jd`.
    pub fn window(&self, now_jd: f64) -> (f64, f64) {
        (now_jd - self.half_span_days, now_jd + self.half_span_days)
    }

    /// Slider position to Julian Date. Positions outside the slider are clamped.
    pub fn position_to_jd(&self, position: f64, now_jd: f64) -> f64 {
        let (min, max) = self.window(now_jd);
        let position = position.clamp(0.0, self.resolution);
        min + (position / self.resolution) * (max - min)
    }

    /// Julian Date to slider position, pinned to the slider ends when `jd`
    /// lies outside the window.
    pub fn jd_to_position(&self, jd: f64, now_jd: f64) -> f64 {
        let (min, max) = self.window(now_jd);
        let position = ((jd - min) / (max - min)) * self.resolution;
        if position.is_nan() {
            return self.resolution / 2.0;
        }
        position.clamp(0.0, self.resolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: f64 = 2_461_330.5;

    #[test]
    fn ends_and_center_map_to_window() {
        let m = ScrubberMapper::default();
        let (min, max) = m.window(NOW);
        assert_eq!(m.position_to_jd(0.0, NOW), min);
        assert!((m.position_to_jd(1000.0, NOW) - max).abs() < 1e-9);
        assert!((m.position_to_jd(500.0, NOW) - NOW).abs() < 1e-9);
        assert!((max - min - 10.0 * 365.25).abs() < 1e-9);
    }

    #[test]
    fn round_trip_recovers_position() {
        let m = ScrubberMapper::default();
        for p in 0..=1000 {
            let p = p as f64;
            let back = m.jd_to_position(m.position_to_jd(p, NOW), NOW);
            assert!((back - p).abs() < 1e-6, "p = {p}, back = {back}");
        }
    }

    #[test]
    fn outside_window_clamps_to_ends() {
        let m = ScrubberMapper::default();
        assert_eq!(m.jd_to_position(NOW - 100_000.0, NOW), 0.0);
        assert_eq!(m.jd_to_position(NOW + 100_000.0, NOW), 1000.0);
    }

    #[test]
    fn window_drifts_with_now() {
        let m = ScrubberMapper::default();
        let a = m.position_to_jd(250.0, NOW);
        let b = m.position_to_jd(250.0, NOW + 1.0);
        assert!((b - a - 1.0).abs() < 1e-9);
        // Same JD sits further left once now has moved on
        assert!(m.jd_to_position(NOW, NOW + 30.0) < m.jd_to_position(NOW, NOW));
    }

    #[test]
    fn out_of_range_position_is_clamped() {
        let m = ScrubberMapper::default();
        assert_eq!(m.position_to_jd(-5.0, NOW), m.position_to_jd(0.0, NOW));
        assert_eq!(m.position_to_jd(5000.0, NOW), m.position_to_jd(1000.0, NOW));
    }

    #[test]
    fn nan_time_sits_mid_slider() {
        let m = ScrubberMapper::default();
        assert_eq!(m.jd_to_position(f64::NAN, NOW), 500.0);
    }
}
