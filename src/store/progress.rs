use chrono::NaiveDate;
use std::collections::btree_map::Entry;
use std::sync::Arc;

use crate::models::{DayDefaults, DayProgress, History, ListField, ProgressField};

/// Owns every day record. All mutation goes through this type; readers get
/// `Arc` snapshots that are never modified after they are handed out.
#[derive(Debug, Clone)]
pub struct ProgressStore {
    history: Arc<History>,
    defaults: DayDefaults,
    revision: u64,
}

impl ProgressStore {
    pub fn new(defaults: DayDefaults) -> Self {
        Self::from_history(History::new(), defaults)
    }

    pub fn from_history(history: History, defaults: DayDefaults) -> Self {
        Self {
            history: Arc::new(history),
            defaults,
            revision: 0,
        }
    }

    pub fn defaults(&self) -> DayDefaults {
        self.defaults
    }

    /// Affects only records synthesized from now on.
    pub fn set_defaults(&mut self, defaults: DayDefaults) {
        self.defaults = defaults;
    }

    pub fn snapshot(&self) -> Arc<History> {
        Arc::clone(&self.history)
    }

    /// Bumped once per write.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.history.contains_key(&date)
    }

    /// The stored record, or a synthesized default that is not stored.
    pub fn get_or_default(&self, date: NaiveDate) -> DayProgress {
        match self.history.get(&date) {
            Some(day) => day.clone(),
            None => DayProgress::synthesize(date, &self.defaults),
        }
    }

    /// Overlay one field. A missing day is synthesized and stored first.
    pub fn update(&mut self, date: NaiveDate, field: ProgressField) -> &DayProgress {
        log::debug!("update {} {}", date, field.name());
        let next = field.apply(&self.get_or_default(date));
        self.replace(next)
    }

    /// Add `id` to the set if absent, remove it if present.
    pub fn toggle(&mut self, date: NaiveDate, list: ListField, id: &str) -> &DayProgress {
        let mut set = list.get(&self.get_or_default(date)).clone();
        if !set.remove(id) {
            set.insert(id.to_string());
        }
        self.update(date, list.with(set))
    }

    /// Count one bead. Passing the target wraps the count to 1 and carries
    /// into `tasbih_cycles`; both land in a single replacement.
    pub fn advance_tasbih(&mut self, date: NaiveDate) -> &DayProgress {
        let mut next = self.get_or_default(date);
        if next.tasbih_count >= next.tasbih_target {
            next.tasbih_count = 1;
            next.tasbih_cycles = next.tasbih_cycles.saturating_add(1);
            log::info!("tasbih cycle {} completed for {}", next.tasbih_cycles, date);
        } else {
            next.tasbih_count += 1;
        }
        self.replace(next)
    }

    pub fn reset_tasbih(&mut self, date: NaiveDate) -> &DayProgress {
        let mut next = self.get_or_default(date);
        next.tasbih_count = 0;
        next.tasbih_cycles = 0;
        self.replace(next)
    }

    /// Merge imported records over the current collection, one write.
    pub fn import(&mut self, records: History) -> usize {
        let count = records.len();
        Arc::make_mut(&mut self.history).extend(records);
        self.revision += 1;
        count
    }

    fn replace(&mut self, record: DayProgress) -> &DayProgress {
        self.revision += 1;
        // copies the map only while an older snapshot is still held
        let history = Arc::make_mut(&mut self.history);
        match history.entry(record.date) {
            Entry::Occupied(mut slot) => {
                slot.insert(record);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(record),
        }
    }
}

impl Default for ProgressStore {
    fn default() -> Self {
        Self::new(DayDefaults::default())
    }
}
