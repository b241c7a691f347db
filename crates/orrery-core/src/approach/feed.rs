//! Close-approach data intake.
//!
//! The fetch itself belongs to the host. This module turns whatever the host
//! got (a payload or an error) into records for display, substituting the
//! bundled sample set with an advisory when the live data is unusable.

use log::{info, warn};

use crate::api::types::ApproachRecord;
use crate::error::{OrreryError, Result};

/// Where the displayed records came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedSource {
    Live,
    Fallback,
}

/// Records to display plus an optional non-fatal advisory for the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedOutcome {
    pub records: Vec<ApproachRecord>,
    pub advisory: Option<String>,
    pub source: FeedSource,
}

/// Parse a JSON array of approach records.
pub fn parse_approaches(json: &str) -> Result<Vec<ApproachRecord>> {
    Ok(serde_json::from_str(json)?)
}

pub struct ApproachFeed;

impl ApproachFeed {
    /// Resolve a fetch result into displayable records. Never fails: a fetch
    /// error or malformed payload yields the bundled sample set.
    pub fn resolve(fetched: std::result::Result<&str, OrreryError>) -> FeedOutcome {
        match fetched.and_then(parse_approaches) {
            Ok(records) => {
                info!("close-approach feed: {} live records", records.len());
                FeedOutcome {
                    records,
                    advisory: None,
                    source: FeedSource::Live,
                }
            }
            Err(err) => {
                warn!("close-approach feed failed, using sample data: {err}");
                Self::fallback(&err)
            }
        }
    }

    fn fallback(err: &OrreryError) -> FeedOutcome {
        FeedOutcome {
            records: fallback_approaches(),
            advisory: Some(format!(
                "Live close-approach data unavailable ({err}). Showing sample data."
            )),
            source: FeedSource::Fallback,
        }
    }
}

fn sample(
    id: &str,
    name: &str,
    epoch_millis: f64,
    miss_distance_km: f64,
    relative_velocity_kms: f64,
    hazardous: bool,
) -> ApproachRecord {
    ApproachRecord {
        id: id.to_string(),
        name: name.to_string(),
        epoch_millis: Some(epoch_millis),
        miss_distance_km: Some(miss_distance_km),
        relative_velocity_kms: Some(relative_velocity_kms),
        hazardous,
    }
}

/// Bundled sample set shown when the live feed is unavailable.
pub fn fallback_approaches() -> Vec<ApproachRecord> {
    vec![
        // 2027-05-19 11:23 UTC
        sample("2018-ch3", "(2018 CH3)", 1_810_725_780_000.0, 6_480_000.0, 8.9, false),
        // 2027-08-07 07:09 UTC
        sample("1999-an10", "137108 (1999 AN10)", 1_817_622_540_000.0, 388_960.0, 26.8, true),
        // 2028-06-26 16:40 UTC
        sample("2001-wn5", "153814 (2001 WN5)", 1_845_650_400_000.0, 248_700.0, 10.2, true),
        // 2028-10-26 06:44 UTC
        sample("1997-xf11", "35396 (1997 XF11)", 1_856_155_440_000.0, 930_000.0, 13.9, true),
        // 2029-04-13 21:46 UTC
        sample("apophis", "99942 Apophis", 1_870_811_160_000.0, 38_017.0, 7.42, true),
    ]
}
