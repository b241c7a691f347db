//! Selection / camera-focus state machine.
//!
//! Selection drives the detail panel, focus drives the camera. Selecting a
//! body also focuses it; focusing never selects; clearing the selection
//! leaves the focus where it was.

use crate::api::types::BodyId;

/// Emitted once per focus change. The renderer starts its camera animation
/// on it and reports back through `set_camera_transitioning(false)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraTransition {
    pub target: Option<BodyId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionFocusController {
    selected: Option<BodyId>,
    focus: Option<BodyId>,
    camera_transitioning: bool,
}

impl SelectionFocusController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `id`. A non-null selection also retargets the camera, in the
    /// same update. A null selection clears only the selection.
    pub fn select_body(&mut self, id: Option<BodyId>) -> Option<CameraTransition> {
        match id {
            Some(id) => {
                self.selected = Some(id.clone());
                Some(self.retarget(Some(id)))
            }
            None => {
                self.selected = None;
                None
            }
        }
    }

    /// Retarget the camera without touching the selection.
    pub fn focus_body(&mut self, id: Option<BodyId>) -> CameraTransition {
        self.retarget(id)
    }

    /// Called by the renderer (with `false`) once its camera animation ends.
    /// Nothing resets the flag automatically.
    pub fn set_camera_transitioning(&mut self, transitioning: bool) {
        self.camera_transitioning = transitioning;
    }

    fn retarget(&mut self, target: Option<BodyId>) -> CameraTransition {
        self.focus = target.clone();
        self.camera_transitioning = true;
        CameraTransition { target }
    }

    pub fn selected(&self) -> Option<&BodyId> {
        self.selected.as_ref()
    }

    pub fn focus_target(&self) -> Option<&BodyId> {
        self.focus.as_ref()
    }

    pub fn is_camera_transitioning(&self) -> bool {
        self.camera_transitioning
    }
}
