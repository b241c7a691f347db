//! Reactive store over the whole orrery state.
//!
//! An explicit object rather than a global: hosts construct one per view
//! and hand it to whatever reads or mutates it. Every mutation applies
//! immediately and notifies all subscribers before returning.

use log::{debug, info};

use crate::api::config::OrreryConfig;
use crate::api::types::{ApproachRecord, BodyId};
use crate::approach::feed::FeedOutcome;
use crate::bridge::protocol::{
    FrameHeader, FLAG_CAMERA_TRANSITIONING, FLAG_HAS_FOCUS, FLAG_HAS_SELECTION, FLAG_LIVE,
    FLAG_PLAYING, LAYER_SHIFT, PROTOCOL_VERSION,
};
use crate::core::julian::format_julian_date;
use crate::core::wall_clock::{SystemClock, WallClock};
use crate::error::Result;
use crate::sim::clock::SimulationClock;
use crate::sim::live::LiveDetector;
use crate::sim::scrubber::ScrubberMapper;
use crate::state::command::{Command, StoreEvent};
use crate::state::selection::{CameraTransition, SelectionFocusController};
use crate::state::visibility::{DisplayLayer, VisibilityToggles};

/// Everything the UI and renderer read.
#[derive(Debug, Clone)]
pub struct OrreryState {
    pub clock: SimulationClock,
    pub selection: SelectionFocusController,
    pub visibility: VisibilityToggles,
    pub approaches: Vec<ApproachRecord>,
    /// Non-fatal message for the UI (e.g. feed fallback in use).
    pub advisory: Option<String>,
}

impl OrreryState {
    fn initial(config: &OrreryConfig, now_jd: f64) -> Self {
        Self {
            clock: SimulationClock::new(config.speed_table.clone(), now_jd)
                .with_speed_index(config.default_speed_index)
                .with_playing(config.start_playing),
            selection: SelectionFocusController::new(),
            visibility: config.visibility,
            approaches: Vec::new(),
            advisory: None,
        }
    }
}

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&OrreryState, &StoreEvent)>;

pub struct Store<C: WallClock = SystemClock> {
    state: OrreryState,
    config: OrreryConfig,
    wall: C,
    live: LiveDetector,
    subscribers: Vec<(SubscriptionId, Callback)>,
    next_subscription: u64,
}

impl<C: WallClock> Store<C> {
    /// Create a store whose clock starts at the wall clock's present moment.
    /// Rejects a configuration that fails [`OrreryConfig::validate`].
    pub fn new(config: OrreryConfig, wall: C) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config, wall))
    }

    /// Store with the default configuration, which is always valid.
    pub fn with_default_config(wall: C) -> Self {
        Self::from_valid_config(OrreryConfig::default(), wall)
    }

    fn from_valid_config(config: OrreryConfig, wall: C) -> Self {
        let state = OrreryState::initial(&config, wall.now_julian());
        Self {
            state,
            live: LiveDetector::new(config.live_epsilon_days),
            config,
            wall,
            subscribers: Vec::new(),
            next_subscription: 1,
        }
    }

    // ── Reactive surface ─────────────────────────────────────────────

    pub fn get(&self) -> &OrreryState {
        &self.state
    }

    /// Apply an arbitrary synchronous edit and notify with `Updated`.
    pub fn set(&mut self, edit: impl FnOnce(&mut OrreryState)) {
        edit(&mut self.state);
        self.notify(StoreEvent::Updated);
    }

    /// Register a callback run after every mutation.
    pub fn subscribe(&mut self, callback: impl FnMut(&OrreryState, &StoreEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn notify(&mut self, event: StoreEvent) {
        for (_, callback) in self.subscribers.iter_mut() {
            callback(&self.state, &event);
        }
    }

    fn notify_transition(&mut self, transition: CameraTransition) {
        debug!("camera transition toward {:?}", transition.target);
        self.notify(StoreEvent::CameraTransitionStarted {
            target: transition.target,
        });
    }

    // ── Simulation clock ─────────────────────────────────────────────

    /// Advance simulated time by a frame's real elapsed seconds.
    /// Paused ticks change nothing and notify nobody.
    pub fn tick(&mut self, delta_seconds: f64) {
        if self.state.clock.tick(delta_seconds) {
            let time = self.state.clock.time();
            self.notify(StoreEvent::Ticked { time });
        }
    }

    pub fn toggle_play(&mut self) {
        self.state.clock.toggle_play();
        let playing = self.state.clock.is_playing();
        self.notify(StoreEvent::PlaybackChanged { playing });
    }

    pub fn set_speed_index(&mut self, index: i64) {
        self.state.clock.set_speed_index(index);
        self.notify_speed();
    }

    pub fn speed_up(&mut self) {
        self.state.clock.speed_up();
        self.notify_speed();
    }

    pub fn speed_down(&mut self) {
        self.state.clock.speed_down();
        self.notify_speed();
    }

    fn notify_speed(&mut self) {
        let index = self.state.clock.speed_index();
        self.notify(StoreEvent::SpeedChanged { index });
    }

    pub fn reverse_time(&mut self) {
        self.state.clock.reverse_time();
        let direction = self.state.clock.direction();
        self.notify(StoreEvent::DirectionChanged { direction });
    }

    /// Jump to the wall clock's present moment and resume playback.
    pub fn jump_to_now(&mut self) {
        let was_playing = self.state.clock.is_playing();
        self.state.clock.jump_to_now(self.wall.now_julian());
        let time = self.state.clock.time();
        debug!("jump to now: JD {time:.5}");
        self.notify(StoreEvent::TimeJumped { time });
        if !was_playing {
            self.notify(StoreEvent::PlaybackChanged { playing: true });
        }
    }

    pub fn jump_to_date(&mut self, jd: f64) {
        self.state.clock.jump_to_date(jd);
        debug!("jump to JD {jd:.5}");
        self.notify(StoreEvent::TimeJumped { time: jd });
    }

    pub fn jump_by_days(&mut self, days: f64) {
        self.state.clock.jump_by_days(days);
        let time = self.state.clock.time();
        self.notify(StoreEvent::TimeJumped { time });
    }

    // ── Read-side views ──────────────────────────────────────────────

    pub fn now_millis(&self) -> f64 {
        self.wall.now_millis()
    }

    pub fn now_julian(&self) -> f64 {
        self.wall.now_julian()
    }

    /// Whether simulated time matches real time within the live epsilon.
    pub fn is_live(&self) -> bool {
        self.live.is_live(self.state.clock.time(), self.now_julian())
    }

    pub fn scrubber(&self) -> &ScrubberMapper {
        &self.config.scrubber
    }

    /// Slider position for the current simulated time, pinned to the ends
    /// when the time lies outside the window.
    pub fn scrubber_position(&self) -> f64 {
        self.config
            .scrubber
            .jd_to_position(self.state.clock.time(), self.now_julian())
    }

    /// Jump to the date under a slider position.
    pub fn scrub_to(&mut self, position: f64) {
        let jd = self.config.scrubber.position_to_jd(position, self.now_julian());
        self.jump_to_date(jd);
    }

    pub fn formatted_time(&self) -> String {
        format_julian_date(self.state.clock.time())
    }

    pub fn config(&self) -> &OrreryConfig {
        &self.config
    }

    // ── Selection / focus ────────────────────────────────────────────

    pub fn select_body(&mut self, id: Option<BodyId>) {
        let transition = self.state.selection.select_body(id);
        let selected = self.state.selection.selected().cloned();
        // Selection, focus and flag are already updated together; observers
        // see them as one state whichever event they react to.
        self.notify(StoreEvent::SelectionChanged { selected });
        if let Some(transition) = transition {
            self.notify_transition(transition);
        }
    }

    pub fn focus_body(&mut self, id: Option<BodyId>) {
        let transition = self.state.selection.focus_body(id);
        self.notify_transition(transition);
    }

    pub fn set_camera_transitioning(&mut self, transitioning: bool) {
        self.state.selection.set_camera_transitioning(transitioning);
        self.notify(StoreEvent::CameraTransitioningChanged { transitioning });
    }

    // ── Visibility ───────────────────────────────────────────────────

    pub fn toggle_layer(&mut self, layer: DisplayLayer) {
        let visible = self.state.visibility.toggle(layer);
        self.notify(StoreEvent::VisibilityChanged { layer, visible });
    }

    pub fn set_layer(&mut self, layer: DisplayLayer, visible: bool) {
        self.state.visibility.set(layer, visible);
        self.notify(StoreEvent::VisibilityChanged { layer, visible });
    }

    // ── Close approaches ─────────────────────────────────────────────

    pub fn load_approaches(&mut self, outcome: FeedOutcome) {
        let count = outcome.records.len();
        self.state.approaches = outcome.records;
        self.state.advisory = outcome.advisory;
        let advisory = self.state.advisory.clone();
        self.notify(StoreEvent::ApproachesLoaded { count, advisory });
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Re-initialize everything from configuration (view entry/exit).
    /// Subscribers are kept.
    pub fn reset(&mut self) {
        self.state = OrreryState::initial(&self.config, self.wall.now_julian());
        info!("orrery state reset");
        self.notify(StoreEvent::Reset);
    }

    /// Apply a UI command.
    pub fn dispatch(&mut self, command: Command) {
        debug!("dispatch {command:?}");
        match command {
            Command::TogglePlay => self.toggle_play(),
            Command::SetSpeedIndex { index } => self.set_speed_index(index),
            Command::SpeedUp => self.speed_up(),
            Command::SpeedDown => self.speed_down(),
            Command::ReverseTime => self.reverse_time(),
            Command::JumpToNow => self.jump_to_now(),
            Command::JumpToDate { jd } => self.jump_to_date(jd),
            Command::JumpByDays { days } => self.jump_by_days(days),
            Command::Scrub { position } => self.scrub_to(position),
            Command::SelectBody { id } => self.select_body(id),
            Command::FocusBody { id } => self.focus_body(id),
            Command::CameraTransitionDone => self.set_camera_transitioning(false),
            Command::ToggleLayer { layer } => self.toggle_layer(layer),
            Command::SetLayer { layer, visible } => self.set_layer(layer, visible),
            Command::Reset => self.reset(),
        }
    }

    // ── Renderer snapshot ────────────────────────────────────────────

    pub fn frame_header(&self) -> FrameHeader {
        let clock = &self.state.clock;
        let selection = &self.state.selection;
        let mut flags = self.state.visibility.bits() << LAYER_SHIFT;
        if clock.is_playing() {
            flags |= FLAG_PLAYING;
        }
        if self.is_live() {
            flags |= FLAG_LIVE;
        }
        if selection.is_camera_transitioning() {
            flags |= FLAG_CAMERA_TRANSITIONING;
        }
        if selection.selected().is_some() {
            flags |= FLAG_HAS_SELECTION;
        }
        if selection.focus_target().is_some() {
            flags |= FLAG_HAS_FOCUS;
        }
        FrameHeader {
            simulation_time: clock.time(),
            speed_factor: clock.speed_factor(),
            scrubber_position: self.scrubber_position(),
            speed_index: clock.speed_index() as u32,
            flags,
            direction: clock.direction().sign() as i32,
            protocol_version: PROTOCOL_VERSION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::approach::feed::ApproachFeed;
    use crate::core::julian::SECONDS_PER_DAY;
    use crate::core::wall_clock::ManualClock;
    use crate::error::OrreryError;
    use crate::sim::clock::TimeDirection;

    // 2026-10-17 00:00 UTC
    const NOW_MS: f64 = 1_792_195_200_000.0;

    fn store() -> (Store<ManualClock>, ManualClock) {
        let wall = ManualClock::at(NOW_MS);
        (Store::with_default_config(wall.clone()), wall)
    }

    fn record_events(store: &mut Store<ManualClock>) -> Rc<RefCell<Vec<StoreEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        store.subscribe(move |_, event| sink.borrow_mut().push(event.clone()));
        events
    }

    fn earth() -> Option<BodyId> {
        Some(BodyId::from("earth"))
    }

    #[test]
    fn starts_live_at_wall_clock_now() {
        let (store, wall) = store();
        assert_eq!(store.get().clock.time(), wall.now_julian());
        assert!(store.get().clock.is_playing());
        assert!(store.is_live());
    }

    #[test]
    fn realtime_playback_stays_live() {
        let (mut store, wall) = store();
        for _ in 0..600 {
            wall.advance_secs(0.1);
            store.tick(0.1);
        }
        assert!(store.is_live());
    }

    #[test]
    fn paused_tick_does_not_notify_or_move() {
        let (mut store, _) = store();
        store.toggle_play();
        let events = record_events(&mut store);
        let before = store.get().clock.time();
        store.tick(1.0);
        store.tick(0.0);
        assert_eq!(store.get().clock.time(), before);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn tick_notifies_with_new_time() {
        let (mut store, _) = store();
        store.set_speed_index(3);
        let events = record_events(&mut store);
        let start = store.get().clock.time();
        store.tick(0.5);
        assert_eq!(
            events.borrow().as_slice(),
            &[StoreEvent::Ticked { time: start + 0.5 * 86_400.0 / SECONDS_PER_DAY }]
        );
    }

    #[test]
    fn jump_to_now_is_live_and_playing() {
        let (mut store, wall) = store();
        store.jump_to_date(2_400_000.0);
        store.toggle_play();
        wall.advance_secs(3600.0);

        let events = record_events(&mut store);
        store.jump_to_now();
        assert!(store.get().clock.is_playing());
        assert!(store.is_live());
        assert_eq!(
            events.borrow().as_slice(),
            &[
                StoreEvent::TimeJumped { time: wall.now_julian() },
                StoreEvent::PlaybackChanged { playing: true },
            ]
        );
    }

    #[test]
    fn jump_to_far_date_is_not_live() {
        let (mut store, wall) = store();
        store.jump_to_date(wall.now_julian() + 0.5);
        assert!(!store.is_live());
        store.jump_to_date(wall.now_julian() - 365.0);
        assert!(!store.is_live());
    }

    #[test]
    fn select_body_is_observed_as_one_update() {
        let (mut store, _) = store();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        store.subscribe(move |state, _| {
            let s = &state.selection;
            sink.borrow_mut().push((
                s.selected().cloned(),
                s.focus_target().cloned(),
                s.is_camera_transitioning(),
            ));
        });

        store.select_body(earth());
        // Every observation already shows all three fields together
        for observed in seen.borrow().iter() {
            assert_eq!(observed, &(earth(), earth(), true));
        }
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn select_emits_camera_transition_edge() {
        let (mut store, _) = store();
        let events = record_events(&mut store);
        store.select_body(earth());
        store.select_body(None);
        assert_eq!(
            events.borrow().as_slice(),
            &[
                StoreEvent::SelectionChanged { selected: earth() },
                StoreEvent::CameraTransitionStarted { target: earth() },
                StoreEvent::SelectionChanged { selected: None },
            ]
        );
        assert_eq!(store.get().selection.focus_target(), earth().as_ref());
    }

    #[test]
    fn focus_is_independent_of_selection() {
        let (mut store, _) = store();
        store.select_body(earth());
        store.set_camera_transitioning(false);
        store.focus_body(Some(BodyId::from("apophis")));
        let s = &store.get().selection;
        assert_eq!(s.selected(), earth().as_ref());
        assert_eq!(s.focus_target().map(BodyId::as_str), Some("apophis"));
        assert!(s.is_camera_transitioning());
    }

    #[test]
    fn scrub_round_trip_through_store() {
        let (mut store, _) = store();
        store.scrub_to(250.0);
        assert!((store.scrubber_position() - 250.0).abs() < 1e-6);
        store.scrub_to(1000.0);
        assert!((store.scrubber_position() - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn scrubber_pins_without_touching_time() {
        let (mut store, wall) = store();
        let far = wall.now_julian() + 20.0 * 365.25;
        store.jump_to_date(far);
        assert_eq!(store.scrubber_position(), 1000.0);
        assert_eq!(store.get().clock.time(), far);
    }

    #[test]
    fn dispatch_routes_commands() {
        let (mut store, _) = store();
        let cmds = [
            r#"{ "type": "set_speed_index", "index": 99 }"#,
            r#"{ "type": "reverse_time" }"#,
            r#"{ "type": "toggle_play" }"#,
            r#"{ "type": "select_body", "id": "earth" }"#,
            r#"{ "type": "camera_transition_done" }"#,
            r#"{ "type": "toggle_layer", "layer": "grid" }"#,
        ];
        for json in cmds {
            store.dispatch(Command::from_json(json).unwrap());
        }
        let state = store.get();
        assert_eq!(state.clock.speed_index(), state.clock.speed_table().len() - 1);
        assert_eq!(state.clock.direction(), TimeDirection::Reverse);
        assert!(!state.clock.is_playing());
        assert_eq!(state.selection.selected(), earth().as_ref());
        assert!(!state.selection.is_camera_transitioning());
        assert!(state.visibility.grid);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let (mut store, _) = store();
        let count = Rc::new(RefCell::new(0));
        let sink = count.clone();
        let id = store.subscribe(move |_, _| *sink.borrow_mut() += 1);
        store.toggle_play();
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.toggle_play();
        assert_eq!(*count.borrow(), 1);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn set_applies_edit_and_notifies() {
        let (mut store, _) = store();
        let events = record_events(&mut store);
        store.set(|state| state.advisory = Some("hello".into()));
        assert_eq!(store.get().advisory.as_deref(), Some("hello"));
        assert_eq!(events.borrow().as_slice(), &[StoreEvent::Updated]);
    }

    #[test]
    fn feed_failure_surfaces_advisory() {
        let (mut store, _) = store();
        let events = record_events(&mut store);
        store.load_approaches(ApproachFeed::resolve(Err(OrreryError::FeedUnavailable(
            "timeout".into(),
        ))));
        assert_eq!(store.get().approaches.len(), 5);
        assert!(store.get().advisory.is_some());
        assert!(matches!(
            events.borrow().as_slice(),
            [StoreEvent::ApproachesLoaded { count: 5, advisory: Some(_) }]
        ));
    }

    #[test]
    fn reset_restores_configured_state() {
        let (mut store, wall) = store();
        store.select_body(earth());
        store.set_speed_index(5);
        store.toggle_layer(DisplayLayer::Orbits);
        wall.advance_secs(120.0);

        store.reset();
        let state = store.get();
        assert_eq!(state.selection.selected(), None);
        assert_eq!(state.selection.focus_target(), None);
        assert_eq!(state.clock.speed_index(), 0);
        assert!(state.visibility.orbits);
        assert_eq!(state.clock.time(), wall.now_julian());
    }

    #[test]
    fn frame_header_reflects_state() {
        let (mut store, _) = store();
        store.select_body(earth());
        store.reverse_time();
        let header = store.frame_header();
        assert!(header.has_flag(FLAG_PLAYING));
        assert!(header.has_flag(FLAG_LIVE));
        assert!(header.has_flag(FLAG_HAS_SELECTION));
        assert!(header.has_flag(FLAG_HAS_FOCUS));
        assert!(header.has_flag(FLAG_CAMERA_TRANSITIONING));
        assert_eq!(header.direction, -1);
        assert_eq!(header.layer_bits(), VisibilityToggles::default().bits());
        assert!((header.scrubber_position - 500.0).abs() < 1e-6);
        assert_eq!(header.protocol_version, PROTOCOL_VERSION);
    }

    #[test]
    fn new_rejects_invalid_config() {
        let wall = ManualClock::at(NOW_MS);
        let zero_epsilon = OrreryConfig {
            live_epsilon_days: 0.0,
            ..OrreryConfig::default()
        };
        assert!(matches!(
            Store::new(zero_epsilon, wall.clone()),
            Err(OrreryError::InvalidConfig(_))
        ));

        let mut flat_slider = OrreryConfig::default();
        flat_slider.scrubber.resolution = 0.0;
        assert!(Store::new(flat_slider, wall.clone()).is_err());

        let store = Store::new(OrreryConfig::default(), wall).unwrap();
        assert!(store.is_live());
    }
}
