//! Simulation clock: a Julian Date advanced by the host frame loop under a
//! speed table, a direction and a play/pause switch.

use serde::{Deserialize, Serialize};

use crate::core::julian::SECONDS_PER_DAY;
use crate::error::{OrreryError, Result};

/// One entry of the speed table.
///
/// `seconds_per_second` is simulated seconds advanced per real second;
/// it is the only unit the clock understands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedStep {
    pub label: String,
    pub seconds_per_second: f64,
}

impl SpeedStep {
    pub fn new(label: impl Into<String>, seconds_per_second: f64) -> Self {
        Self {
            label: label.into(),
            seconds_per_second,
        }
    }
}

/// Ordered, non-empty table of playback speeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SpeedStep>", into = "Vec<SpeedStep>")]
pub struct SpeedTable {
    steps: Vec<SpeedStep>,
}

impl SpeedTable {
    /// Build a table, rejecting an empty list or non-positive factors.
    pub fn new(steps: Vec<SpeedStep>) -> Result<Self> {
        if steps.is_empty() {
            return Err(OrreryError::InvalidSpeedTable("table is empty".into()));
        }
        if let Some(bad) = steps
            .iter()
            .find(|s| !s.seconds_per_second.is_finite() || s.seconds_per_second <= 0.0)
        {
            return Err(OrreryError::InvalidSpeedTable(format!(
                "step '{}' has factor {}",
                bad.label, bad.seconds_per_second
            )));
        }
        Ok(Self { steps })
    }

    /// Number of steps (always at least one).
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Clamp any requested index into `[0, len - 1]`.
    pub fn clamp_index(&self, index: i64) -> usize {
        index.clamp(0, self.steps.len() as i64 - 1) as usize
    }

    pub fn get(&self, index: usize) -> Option<&SpeedStep> {
        self.steps.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpeedStep> {
        self.steps.iter()
    }

    /// Simulated seconds per real second at `index` (clamped).
    pub fn factor(&self, index: usize) -> f64 {
        self.steps[self.clamp_index(index as i64)].seconds_per_second
    }

    pub fn label(&self, index: usize) -> &str {
        &self.steps[self.clamp_index(index as i64)].label
    }
}

impl Default for SpeedTable {
    fn default() -> Self {
        Self {
            steps: vec![
                SpeedStep::new("1 sec/s", rates::REALTIME),
                SpeedStep::new("1 min/s", rates::MINUTE_PER_SEC),
                SpeedStep::new("1 hr/s", rates::HOUR_PER_SEC),
                SpeedStep::new("1 day/s", rates::DAY_PER_SEC),
                SpeedStep::new("1 wk/s", rates::WEEK_PER_SEC),
                SpeedStep::new("1 mo/s", rates::MONTH_PER_SEC),
                SpeedStep::new("1 yr/s", rates::YEAR_PER_SEC),
            ],
        }
    }
}

impl TryFrom<Vec<SpeedStep>> for SpeedTable {
    type Error = OrreryError;

    fn try_from(steps: Vec<SpeedStep>) -> Result<Self> {
        Self::new(steps)
    }
}

impl From<SpeedTable> for Vec<SpeedStep> {
    fn from(table: SpeedTable) -> Self {
        table.steps
    }
}

/// Preset rates in simulated seconds per real second.
pub mod rates {
    pub const REALTIME: f64 = 1.0;
    pub const MINUTE_PER_SEC: f64 = 60.0;
    pub const HOUR_PER_SEC: f64 = 3_600.0;
    pub const DAY_PER_SEC: f64 = 86_400.0;
    pub const WEEK_PER_SEC: f64 = 7.0 * 86_400.0;
    /// 30-day month.
    pub const MONTH_PER_SEC: f64 = 30.0 * 86_400.0;
    /// Julian year.
    pub const YEAR_PER_SEC: f64 = 365.25 * 86_400.0;
}

/// Direction simulated time flows while playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeDirection {
    #[default]
    Forward,
    Reverse,
}

impl TimeDirection {
    /// `+1.0` forward, `-1.0` reverse.
    pub fn sign(self) -> f64 {
        match self {
            TimeDirection::Forward => 1.0,
            TimeDirection::Reverse => -1.0,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            TimeDirection::Forward => TimeDirection::Reverse,
            TimeDirection::Reverse => TimeDirection::Forward,
        }
    }
}

/// Simulated time, playback state and speed selection.
///
/// Holds no timer: the host calls [`tick`](Self::tick) once per frame with
/// the real elapsed seconds.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    /// Current simulation time (Julian Date). Unbounded.
    time: f64,
    playing: bool,
    speed_index: usize,
    direction: TimeDirection,
    table: SpeedTable,
}

impl SimulationClock {
    pub fn new(table: SpeedTable, start_jd: f64) -> Self {
        Self {
            time: start_jd,
            playing: true,
            speed_index: 0,
            direction: TimeDirection::Forward,
            table,
        }
    }

    /// Builder: initial speed index (clamped).
    pub fn with_speed_index(mut self, index: i64) -> Self {
        self.set_speed_index(index);
        self
    }

    /// Builder: initial play state.
    pub fn with_playing(mut self, playing: bool) -> Self {
        self.playing = playing;
        self
    }

    /// Advance by `delta_seconds` of real time. No-op while paused.
    /// Returns whether time moved.
    ///
    /// A negative or non-finite delta is a caller bug; hosts must guard it.
    pub fn tick(&mut self, delta_seconds: f64) -> bool {
        if !self.playing {
            return false;
        }
        debug_assert!(
            delta_seconds.is_finite() && delta_seconds >= 0.0,
            "tick delta must be a finite, non-negative number of seconds (got {delta_seconds})"
        );
        self.time += delta_seconds * self.speed_factor() * self.direction.sign() / SECONDS_PER_DAY;
        true
    }

    pub fn toggle_play(&mut self) {
        self.playing = !self.playing;
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    /// Store `clamp(index, 0, N-1)`. Never rejects.
    pub fn set_speed_index(&mut self, index: i64) {
        self.speed_index = self.table.clamp_index(index);
    }

    /// One step faster (saturates at the last entry).
    pub fn speed_up(&mut self) {
        self.set_speed_index(self.speed_index as i64 + 1);
    }

    /// One step slower (saturates at the first entry).
    pub fn speed_down(&mut self) {
        self.set_speed_index(self.speed_index as i64 - 1);
    }

    pub fn reverse_time(&mut self) {
        self.direction = self.direction.reversed();
    }

    /// Jump to the present moment and resume playback.
    pub fn jump_to_now(&mut self, now_jd: f64) {
        self.time = now_jd;
        self.playing = true;
    }

    /// Set the absolute time. Play state and direction are untouched.
    pub fn jump_to_date(&mut self, jd: f64) {
        self.time = jd;
    }

    /// Shift time by `days` (negative goes back).
    pub fn jump_by_days(&mut self, days: f64) {
        self.time += days;
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn speed_index(&self) -> usize {
        self.speed_index
    }

    pub fn direction(&self) -> TimeDirection {
        self.direction
    }

    /// Simulated seconds per real second at the current speed index.
    pub fn speed_factor(&self) -> f64 {
        self.table.factor(self.speed_index)
    }

    pub fn speed_label(&self) -> &str {
        self.table.label(self.speed_index)
    }

    pub fn speed_table(&self) -> &SpeedTable {
        &self.table
    }
}
