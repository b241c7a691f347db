use log::debug;

use crate::api::types::ApproachRecord;
use crate::approach::countdown::{ApproachCountdown, CountdownReading, DEFAULT_COUNTDOWN_INTERVAL_SECS};

/// The countdowns currently on display, in display order.
///
/// Removing an entry cancels its refresh timer; nothing keeps firing for an
/// event that is no longer shown.
pub struct CountdownBoard {
    interval_secs: f64,
    entries: Vec<(String, ApproachCountdown)>,
}

impl CountdownBoard {
    pub fn new(interval_secs: f64) -> Self {
        Self {
            interval_secs,
            entries: Vec::with_capacity(16),
        }
    }

    /// Start displaying a countdown for `record`. Re-tracking an id restarts it.
    pub fn track(&mut self, record: &ApproachRecord, now_millis: f64) {
        let countdown = ApproachCountdown::new(record.epoch_millis, now_millis, self.interval_secs);
        match self.entries.iter_mut().find(|(id, _)| *id == record.id) {
            Some(entry) => entry.1 = countdown,
            None => self.entries.push((record.id.clone(), countdown)),
        }
    }

    /// Stop displaying (and cancel) the countdown for `id`.
    pub fn untrack(&mut self, id: &str) -> bool {
        if let Some(idx) = self.entries.iter().position(|(entry_id, _)| entry_id == id) {
            self.entries.remove(idx);
            debug!("countdown for {id} cancelled");
            true
        } else {
            false
        }
    }

    /// Make the board mirror `records`: vanished ids are cancelled, new ids
    /// start, surviving countdowns keep running.
    pub fn sync(&mut self, records: &[ApproachRecord], now_millis: f64) {
        self.entries
            .retain(|(id, _)| records.iter().any(|r| r.id == *id));
        for record in records {
            if self.get(&record.id).is_none() {
                self.track(record, now_millis);
            }
        }
    }

    /// Feed real frame time to every countdown. Returns how many refreshed.
    pub fn advance(&mut self, frame_dt_secs: f64, now_millis: f64) -> usize {
        self.entries
            .iter_mut()
            .map(|(_, c)| usize::from(c.advance(frame_dt_secs, now_millis)))
            .sum()
    }

    pub fn get(&self, id: &str) -> Option<&ApproachCountdown> {
        self.entries.iter().find(|(entry_id, _)| entry_id == id).map(|(_, c)| c)
    }

    pub fn reading(&self, id: &str) -> Option<CountdownReading> {
        self.get(id).map(ApproachCountdown::reading)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ApproachCountdown)> {
        self.entries.iter().map(|(id, c)| (id.as_str(), c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for CountdownBoard {
    fn default() -> Self {
        Self::new(DEFAULT_COUNTDOWN_INTERVAL_SECS)
    }
}
