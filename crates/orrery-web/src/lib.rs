//! Browser exports for the orrery core.
//!
//! The page calls `orrery_init()` once, `orrery_tick(dt)` every animation
//! frame, and the command functions from its controls. The renderer reads
//! the frame header through `get_frame_header_ptr()` (see
//! `orrery_core::bridge::protocol` for the layout).

pub mod runner;

pub use runner::{JsClock, OrreryRunner};

use std::cell::RefCell;

use orrery_core::{BodyId, Command, OrreryConfig};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<OrreryRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the runner, or log and return `None` before `orrery_init`.
fn with_runner<R>(f: impl FnOnce(&mut OrreryRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("orrery not initialized; call orrery_init() first");
                None
            }
        }
    })
}

/// Initialize from an optional JSON configuration. Returns false (and runs
/// with defaults) when the configuration is rejected.
#[wasm_bindgen]
pub fn orrery_init(config_json: Option<String>) -> bool {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let configured = match config_json.as_deref() {
        Some(json) => OrreryConfig::from_json(json).and_then(|config| OrreryRunner::new(config, JsClock)),
        None => Ok(OrreryRunner::with_default_config(JsClock)),
    };
    let (runner, accepted) = match configured {
        Ok(runner) => (runner, true),
        Err(err) => {
            log::warn!("invalid orrery config, using defaults: {err}");
            (OrreryRunner::with_default_config(JsClock), false)
        }
    };

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("orrery: initialized");
    accepted
}

#[wasm_bindgen]
pub fn orrery_tick(dt: f64) {
    with_runner(|r| r.tick(dt));
}

/// Apply a JSON command, e.g. `{"type":"select_body","id":"earth"}`.
#[wasm_bindgen]
pub fn orrery_command(json: &str) -> bool {
    with_runner(|r| r.dispatch_json(json)).unwrap_or(false)
}

#[wasm_bindgen]
pub fn orrery_toggle_play() {
    with_runner(|r| r.dispatch(Command::TogglePlay));
}

#[wasm_bindgen]
pub fn orrery_set_speed_index(index: i32) {
    with_runner(|r| r.dispatch(Command::SetSpeedIndex { index: index as i64 }));
}

#[wasm_bindgen]
pub fn orrery_reverse_time() {
    with_runner(|r| r.dispatch(Command::ReverseTime));
}

#[wasm_bindgen]
pub fn orrery_jump_to_now() {
    with_runner(|r| r.dispatch(Command::JumpToNow));
}

#[wasm_bindgen]
pub fn orrery_jump_to_date(jd: f64) {
    with_runner(|r| r.dispatch(Command::JumpToDate { jd }));
}

#[wasm_bindgen]
pub fn orrery_scrub(position: f64) {
    with_runner(|r| r.dispatch(Command::Scrub { position }));
}

#[wasm_bindgen]
pub fn orrery_select_body(id: Option<String>) {
    let id = id.map(BodyId::from);
    with_runner(|r| r.dispatch(Command::SelectBody { id }));
}

#[wasm_bindgen]
pub fn orrery_focus_body(id: Option<String>) {
    let id = id.map(BodyId::from);
    with_runner(|r| r.dispatch(Command::FocusBody { id }));
}

/// Called by the renderer once its camera animation has finished.
#[wasm_bindgen]
pub fn orrery_camera_transition_done() {
    with_runner(|r| r.dispatch(Command::CameraTransitionDone));
}

#[wasm_bindgen]
pub fn orrery_toggle_layer(name: &str) -> bool {
    with_runner(|r| r.toggle_layer_named(name)).unwrap_or(false)
}

/// Hand over the close-approach fetch result: the JSON body on success,
/// or the error text on failure.
#[wasm_bindgen]
pub fn orrery_load_approaches(payload: Option<String>, error: Option<String>) {
    with_runner(|r| r.load_feed(payload.as_deref(), error.as_deref()));
}

#[wasm_bindgen]
pub fn orrery_untrack_countdown(id: &str) -> bool {
    with_runner(|r| r.untrack_countdown(id)).unwrap_or(false)
}

#[wasm_bindgen]
pub fn orrery_reset() {
    with_runner(|r| r.dispatch(Command::Reset));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_frame_header_ptr() -> *const u8 {
    with_runner(|r| r.header_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_frame_header_bytes() -> u32 {
    orrery_core::FrameHeader::BYTES as u32
}

#[wasm_bindgen]
pub fn get_simulation_time() -> f64 {
    with_runner(|r| r.header().simulation_time).unwrap_or(f64::NAN)
}

#[wasm_bindgen]
pub fn get_scrubber_position() -> f64 {
    with_runner(|r| r.header().scrubber_position).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn get_formatted_time() -> String {
    with_runner(|r| r.formatted_time()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn get_speed_label() -> String {
    with_runner(|r| r.speed_label()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn get_selected_body() -> Option<String> {
    with_runner(|r| r.selected_body()).flatten()
}

#[wasm_bindgen]
pub fn get_focus_target() -> Option<String> {
    with_runner(|r| r.focus_target()).flatten()
}

#[wasm_bindgen]
pub fn get_advisory() -> Option<String> {
    with_runner(|r| r.advisory()).flatten()
}

#[wasm_bindgen]
pub fn get_countdown(id: &str) -> Option<String> {
    with_runner(|r| r.countdown_text(id)).flatten()
}
