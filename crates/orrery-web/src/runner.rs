use orrery_core::approach::countdown::DEFAULT_COUNTDOWN_INTERVAL_SECS;
use orrery_core::{
    ApproachFeed, BodyId, Command, CountdownBoard, CountdownReading, DisplayLayer, FrameHeader,
    OrreryConfig, OrreryError, Result, Store, WallClock,
};

/// Wall clock backed by JavaScript `Date.now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsClock;

impl WallClock for JsClock {
    fn now_millis(&self) -> f64 {
        js_sys::Date::now()
    }
}

/// Wires the store and the countdown board to the browser frame loop.
///
/// The page keeps one runner in a `thread_local!` and calls the exported
/// free functions, because wasm-bindgen cannot export generic structs.
pub struct OrreryRunner<C: WallClock = JsClock> {
    store: Store<C>,
    board: CountdownBoard,
    /// Snapshot rebuilt after every frame and command, read through a pointer.
    header: FrameHeader,
}

impl<C: WallClock> OrreryRunner<C> {
    pub fn new(config: OrreryConfig, wall: C) -> Result<Self> {
        let board = CountdownBoard::new(config.countdown_interval_secs);
        let store = Store::new(config, wall)?;
        Ok(Self::from_parts(store, board))
    }

    pub fn with_default_config(wall: C) -> Self {
        let board = CountdownBoard::new(DEFAULT_COUNTDOWN_INTERVAL_SECS);
        Self::from_parts(Store::with_default_config(wall), board)
    }

    fn from_parts(store: Store<C>, board: CountdownBoard) -> Self {
        let header = store.frame_header();
        Self {
            store,
            board,
            header,
        }
    }

    /// Run one frame: advance simulated time and the countdowns by the
    /// real elapsed seconds.
    pub fn tick(&mut self, dt: f64) {
        if !dt.is_finite() || dt < 0.0 {
            log::warn!("ignoring frame with invalid dt {dt}");
            return;
        }
        self.store.tick(dt);
        let now = self.store.now_millis();
        self.board.advance(dt, now);
        self.refresh_header();
    }

    fn refresh_header(&mut self) {
        self.header = self.store.frame_header();
    }

    pub fn dispatch(&mut self, command: Command) {
        let resets = matches!(command, Command::Reset);
        self.store.dispatch(command);
        if resets {
            // The approaches went with the reset; so do their countdowns
            self.board.clear();
        }
        self.refresh_header();
    }

    /// Parse and apply a JSON command. Malformed commands are logged and dropped.
    pub fn dispatch_json(&mut self, json: &str) -> bool {
        match Command::from_json(json) {
            Ok(command) => {
                self.dispatch(command);
                true
            }
            Err(err) => {
                log::warn!("rejected command {json}: {err}");
                false
            }
        }
    }

    pub fn toggle_layer_named(&mut self, name: &str) -> bool {
        match name.parse::<DisplayLayer>() {
            Ok(layer) => {
                self.dispatch(Command::ToggleLayer { layer });
                true
            }
            Err(err) => {
                log::warn!("{err}");
                false
            }
        }
    }

    /// Accept the host's fetch result: a payload, or the fetch error text.
    pub fn load_feed(&mut self, payload: Option<&str>, error: Option<&str>) {
        let fetched = match (payload, error) {
            (Some(json), None) => Ok(json),
            (_, Some(message)) => Err(OrreryError::FeedUnavailable(message.to_string())),
            (None, None) => Err(OrreryError::FeedUnavailable("empty response".to_string())),
        };
        let outcome = ApproachFeed::resolve(fetched);
        let now = self.store.now_millis();
        self.board.sync(&outcome.records, now);
        self.store.load_approaches(outcome);
    }

    /// Display text for one approach countdown.
    pub fn countdown_text(&self, id: &str) -> Option<String> {
        self.board.reading(id).map(|reading| reading.to_string())
    }

    pub fn countdown_reading(&self, id: &str) -> Option<CountdownReading> {
        self.board.reading(id)
    }

    /// Cancel the countdown of an approach that left the page.
    pub fn untrack_countdown(&mut self, id: &str) -> bool {
        self.board.untrack(id)
    }

    pub fn store(&self) -> &Store<C> {
        &self.store
    }

    pub fn board(&self) -> &CountdownBoard {
        &self.board
    }

    // ---- Accessors for the JS side ----

    pub fn header(&self) -> &FrameHeader {
        &self.header
    }

    pub fn header_ptr(&self) -> *const u8 {
        self.header.as_bytes().as_ptr()
    }

    pub fn selected_body(&self) -> Option<String> {
        self.store.get().selection.selected().map(BodyId::to_string)
    }

    pub fn focus_target(&self) -> Option<String> {
        self.store.get().selection.focus_target().map(BodyId::to_string)
    }

    pub fn speed_label(&self) -> String {
        self.store.get().clock.speed_label().to_string()
    }

    pub fn formatted_time(&self) -> String {
        self.store.formatted_time()
    }

    pub fn advisory(&self) -> Option<String> {
        self.store.get().advisory.clone()
    }
}
