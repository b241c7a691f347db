// state/command.rs
//
// UI-issued commands and the notifications the store sends back.
// Commands arrive as JSON from the UI layer, e.g.
//   { "type": "select_body", "id": "earth" }
//   { "type": "set_speed_index", "index": 4 }

use serde::{Deserialize, Serialize};

use crate::api::types::BodyId;
use crate::error::Result;
use crate::sim::clock::TimeDirection;
use crate::state::visibility::DisplayLayer;

/// Every operation the UI can request of the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    TogglePlay,
    SetSpeedIndex { index: i64 },
    SpeedUp,
    SpeedDown,
    ReverseTime,
    JumpToNow,
    JumpToDate { jd: f64 },
    JumpByDays { days: f64 },
    /// Move the scrubber thumb to a slider position.
    Scrub { position: f64 },
    SelectBody {
        #[serde(default)]
        id: Option<BodyId>,
    },
    FocusBody {
        #[serde(default)]
        id: Option<BodyId>,
    },
    /// Sent by the renderer when its camera animation finishes.
    CameraTransitionDone,
    ToggleLayer { layer: DisplayLayer },
    SetLayer { layer: DisplayLayer, visible: bool },
    /// Re-initialize on view entry/exit.
    Reset,
}

impl Command {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Notification delivered synchronously to every subscriber after a mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    /// Simulated time advanced by a frame tick.
    Ticked { time: f64 },
    PlaybackChanged { playing: bool },
    SpeedChanged { index: usize },
    DirectionChanged { direction: TimeDirection },
    /// Simulated time was set discontinuously (jump, scrub).
    TimeJumped { time: f64 },
    SelectionChanged { selected: Option<BodyId> },
    /// Edge: the camera should start moving toward `target`.
    CameraTransitionStarted { target: Option<BodyId> },
    CameraTransitioningChanged { transitioning: bool },
    VisibilityChanged { layer: DisplayLayer, visible: bool },
    ApproachesLoaded { count: usize, advisory: Option<String> },
    /// Arbitrary edit through `Store::set`.
    Updated,
    Reset,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_select_body() {
        let cmd = Command::from_json(r#"{ "type": "select_body", "id": "earth" }"#).unwrap();
        assert_eq!(cmd, Command::SelectBody { id: Some(BodyId::from("earth")) });
    }

    #[test]
    fn parse_null_selection() {
        let cmd = Command::from_json(r#"{ "type": "select_body", "id": null }"#).unwrap();
        assert_eq!(cmd, Command::SelectBody { id: None });
        let cmd = Command::from_json(r#"{ "type": "focus_body" }"#).unwrap();
        assert_eq!(cmd, Command::FocusBody { id: None });
    }

    #[test]
    fn parse_layer_and_speed() {
        let cmd = Command::from_json(r#"{ "type": "toggle_layer", "layer": "asteroids" }"#).unwrap();
        assert_eq!(cmd, Command::ToggleLayer { layer: DisplayLayer::Asteroids });
        let cmd = Command::from_json(r#"{ "type": "set_speed_index", "index": -3 }"#).unwrap();
        assert_eq!(cmd, Command::SetSpeedIndex { index: -3 });
    }

    #[test]
    fn unknown_command_is_an_error() {
        assert!(Command::from_json(r#"{ "type": "warp_drive" }"#).is_err());
    }
}
