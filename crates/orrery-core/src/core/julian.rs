//! Julian Date conversions. Pure math, no state.
//!
//! Uses f64 throughout: a present-day JD is ~2.46e6, which leaves
//! sub-millisecond resolution in the fractional day.

use chrono::{DateTime, Utc};

use crate::core::wall_clock::{SystemClock, WallClock};

/// Julian Date of the Unix epoch (1970-01-01 00:00 UTC).
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;
pub const MILLIS_PER_DAY: f64 = 86_400_000.0;
pub const SECONDS_PER_DAY: f64 = 86_400.0;
pub const DAYS_PER_JULIAN_YEAR: f64 = 365.25;

/// Placeholder shown for values that cannot be rendered as a date.
pub const INVALID_DATE_TEXT: &str = "--";

/// Convert Unix milliseconds to a Julian Date.
#[inline]
pub fn julian_date_from_unix_millis(unix_millis: f64) -> f64 {
    unix_millis / MILLIS_PER_DAY + UNIX_EPOCH_JD
}

/// Convert a Julian Date back to Unix milliseconds.
#[inline]
pub fn unix_millis_from_julian_date(jd: f64) -> f64 {
    (jd - UNIX_EPOCH_JD) * MILLIS_PER_DAY
}

/// Julian Date of the present moment, read from the system clock.
pub fn current_julian_date() -> f64 {
    SystemClock.now_julian()
}

/// Human-readable UTC calendar date/time for a Julian Date.
///
/// Depends only on `jd`. Non-finite input renders as `"--"`; dates beyond
/// chrono's calendar range fall back to the raw JD.
pub fn format_julian_date(jd: f64) -> String {
    if !jd.is_finite() {
        return INVALID_DATE_TEXT.to_string();
    }
    let millis = unix_millis_from_julian_date(jd).round();
    match DateTime::<Utc>::from_timestamp_millis(millis as i64) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => format!("JD {jd:.5}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2000-01-01 12:00
    const J2000_JD: f64 = 2_451_545.0;

    #[test]
    fn unix_epoch_is_base_offset() {
        assert_eq!(julian_date_from_unix_millis(0.0), UNIX_EPOCH_JD);
    }

    #[test]
    fn one_day_of_millis_is_one_julian_day() {
        let jd = julian_date_from_unix_millis(MILLIS_PER_DAY);
        assert!((jd - (UNIX_EPOCH_JD + 1.0)).abs() < 1e-9);
    }

    #[test]
    fn millis_conversion_inverts() {
        let ms = 1_700_000_000_123.0;
        let back = unix_millis_from_julian_date(julian_date_from_unix_millis(ms));
        // JD resolution near 2.46e6 is ~40 microseconds
        assert!((back - ms).abs() < 0.1, "back = {back}");
    }

    #[test]
    fn current_date_is_after_2020() {
        // 2020-01-01 00:00 UTC = JD 2458849.5
        assert!(current_julian_date() > 2_458_849.5);
    }

    #[test]
    fn format_j2000() {
        assert_eq!(format_julian_date(J2000_JD), "2000-01-01 12:00:00 UTC");
    }

    #[test]
    fn format_unix_epoch() {
        assert_eq!(format_julian_date(UNIX_EPOCH_JD), "1970-01-01 00:00:00 UTC");
    }

    #[test]
    fn format_non_finite_is_placeholder() {
        assert_eq!(format_julian_date(f64::NAN), "--");
        assert_eq!(format_julian_date(f64::INFINITY), "--");
    }

    #[test]
    fn format_out_of_calendar_range_shows_raw_jd() {
        let text = format_julian_date(1.0e12);
        assert!(text.starts_with("JD "), "text = {text}");
    }
}
