use serde::{Deserialize, Serialize};

use crate::approach::countdown::DEFAULT_COUNTDOWN_INTERVAL_SECS;
use crate::error::{OrreryError, Result};
use crate::sim::clock::SpeedTable;
use crate::sim::live::DEFAULT_LIVE_EPSILON_DAYS;
use crate::sim::scrubber::ScrubberMapper;
use crate::state::visibility::VisibilityToggles;

/// Configuration for the orrery core, provided by the host.
/// Every field is optional in JSON and falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrreryConfig {
    /// Playback speeds in simulated seconds per real second (default: 1 sec/s .. 1 yr/s).
    pub speed_table: SpeedTable,
    /// Speed index on view entry, clamped into the table (default: 0, real time).
    pub default_speed_index: i64,
    /// Whether the clock runs on view entry (default: true).
    pub start_playing: bool,
    /// Tolerance for the "live" badge in Julian days (default: 0.001).
    pub live_epsilon_days: f64,
    /// Scrubber window and slider resolution (default: ±5 years over 0..1000).
    pub scrubber: ScrubberMapper,
    /// Countdown refresh cadence in real seconds (default: 1.0).
    pub countdown_interval_secs: f64,
    /// Initial layer visibility.
    pub visibility: VisibilityToggles,
}

impl Default for OrreryConfig {
    fn default() -> Self {
        Self {
            speed_table: SpeedTable::default(),
            default_speed_index: 0,
            start_playing: true,
            live_epsilon_days: DEFAULT_LIVE_EPSILON_DAYS,
            scrubber: ScrubberMapper::default(),
            countdown_interval_secs: DEFAULT_COUNTDOWN_INTERVAL_SECS,
            visibility: VisibilityToggles::default(),
        }
    }
}

impl OrreryConfig {
    /// Parse and validate a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the mappings meaningless.
    /// The speed table validates itself on construction.
    pub fn validate(&self) -> Result<()> {
        fn positive(name: &str, value: f64) -> Result<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(OrreryError::InvalidConfig(format!("{name} must be positive, got {value}")))
            }
        }
        positive("live_epsilon_days", self.live_epsilon_days)?;
        positive("scrubber.half_span_days", self.scrubber.half_span_days)?;
        positive("scrubber.resolution", self.scrubber.resolution)?;
        positive("countdown_interval_secs", self.countdown_interval_secs)?;
        Ok(())
    }
}
