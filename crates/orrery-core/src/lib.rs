pub mod api;
pub mod approach;
pub mod bridge;
pub mod core;
pub mod error;
pub mod sim;
pub mod state;

// Re-export key types at crate root for convenience
pub use api::config::OrreryConfig;
pub use api::types::{ApproachRecord, BodyId};
pub use approach::board::CountdownBoard;
pub use approach::countdown::{ApproachCountdown, CountdownReading, TimeRemaining};
pub use approach::feed::{fallback_approaches, parse_approaches, ApproachFeed, FeedOutcome, FeedSource};
pub use bridge::protocol::FrameHeader;
pub use crate::core::julian::{
    current_julian_date, format_julian_date, julian_date_from_unix_millis,
    unix_millis_from_julian_date,
};
pub use crate::core::time::RefreshTimer;
pub use crate::core::wall_clock::{ManualClock, SystemClock, WallClock};
pub use error::{OrreryError, Result};
pub use sim::clock::{SimulationClock, SpeedStep, SpeedTable, TimeDirection};
pub use sim::live::{LiveDetector, DEFAULT_LIVE_EPSILON_DAYS};
pub use sim::scrubber::ScrubberMapper;
pub use state::command::{Command, StoreEvent};
pub use state::selection::{CameraTransition, SelectionFocusController};
pub use state::store::{OrreryState, Store, SubscriptionId};
pub use state::visibility::{DisplayLayer, VisibilityToggles};
