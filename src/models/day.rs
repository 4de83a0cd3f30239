use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::ProgressError;
use crate::utils::hijri::hijri_label;

pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Day records keyed by calendar date. Serializes as a `YYYY-MM-DD` keyed map.
pub type History = BTreeMap<NaiveDate, DayProgress>;

pub const DEFAULT_MOOD: u8 = 50;
pub const DEFAULT_PRIDE_LEVEL: u8 = 50;
pub const DEFAULT_SOUL_STATE: &str = "Not filled in";
pub const DEFAULT_SURAH: &str = "Al-Fatiha";
pub const DEFAULT_JUZ: &str = "Juz 1";

/// Parse a strict `YYYY-MM-DD` key. Unpadded or otherwise non-canonical
/// strings are rejected rather than coerced.
pub fn parse_date_key(s: &str) -> Result<NaiveDate, ProgressError> {
    let date = NaiveDate::parse_from_str(s, DATE_KEY_FORMAT)
        .map_err(|_| ProgressError::InvalidDateKey(s.to_string()))?;
    if date_key(date) != s {
        return Err(ProgressError::InvalidDateKey(s.to_string()));
    }
    Ok(date)
}

pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// A self-rated scale value in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Level(u8);

impl Level {
    pub const MAX: u8 = 100;

    pub fn value(self) -> u8 {
        self.0
    }

    /// Parse user input for the named scale field.
    pub fn parse(field: &'static str, s: &str) -> Result<Self, ProgressError> {
        let raw: i64 = s.trim().parse().map_err(|_| ProgressError::InvalidValue {
            field,
            value: s.to_string(),
        })?;
        if !(0..=Self::MAX as i64).contains(&raw) {
            return Err(ProgressError::OutOfRange { field, value: raw });
        }
        Ok(Level(raw as u8))
    }
}

impl TryFrom<u8> for Level {
    type Error = ProgressError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > Self::MAX {
            return Err(ProgressError::OutOfRange {
                field: "level",
                value: value as i64,
            });
        }
        Ok(Level(value))
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> u8 {
        level.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Settings consumed when a day record is synthesized. Captured by value so
/// that synthesis depends only on `(date, defaults)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayDefaults {
    pub tasbih_target: u32,
    pub hijri_offset: i32,
}

impl Default for DayDefaults {
    fn default() -> Self {
        Self {
            tasbih_target: 33,
            hijri_offset: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayProgress {
    pub date: NaiveDate,
    pub display_date: String,
    pub hijri_date: String,
    pub mood: Level,
    pub pride_level: Level,
    pub tasbih_count: u32,
    pub tasbih_target: u32,
    pub tasbih_cycles: u32,
    pub completed_prayers: BTreeSet<String>,
    pub completed_sunnah: BTreeSet<String>,
    pub completed_additional: BTreeSet<String>,
    pub completed_practices: BTreeSet<String>,
    pub completed_quran: BTreeSet<String>,
    pub repeated_surahs: BTreeSet<String>,
    pub repeated_juzs: BTreeSet<String>,
    pub witr_completed: bool,
    pub gratitude: String,
    pub niyyah: String,
    pub soul_state: String,
    pub charity_notes: String,
    pub dua_notes: String,
    pub sadaqa_notes: String,
    pub good_deeds_notes: String,
    pub selected_surah: String,
    pub selected_juz: String,
}

impl DayProgress {
    /// Build the default record for `date`. Labels are derived here, once,
    /// and the tasbih target is copied from `defaults`.
    pub fn synthesize(date: NaiveDate, defaults: &DayDefaults) -> Self {
        Self {
            date,
            display_date: display_label(date),
            hijri_date: hijri_label(date, defaults.hijri_offset).unwrap_or_default(),
            mood: Level(DEFAULT_MOOD),
            pride_level: Level(DEFAULT_PRIDE_LEVEL),
            tasbih_count: 0,
            tasbih_target: defaults.tasbih_target.max(1),
            tasbih_cycles: 0,
            completed_prayers: BTreeSet::new(),
            completed_sunnah: BTreeSet::new(),
            completed_additional: BTreeSet::new(),
            completed_practices: BTreeSet::new(),
            completed_quran: BTreeSet::new(),
            repeated_surahs: BTreeSet::new(),
            repeated_juzs: BTreeSet::new(),
            witr_completed: false,
            gratitude: String::new(),
            niyyah: String::new(),
            soul_state: DEFAULT_SOUL_STATE.to_string(),
            charity_notes: String::new(),
            dua_notes: String::new(),
            sadaqa_notes: String::new(),
            good_deeds_notes: String::new(),
            selected_surah: DEFAULT_SURAH.to_string(),
            selected_juz: DEFAULT_JUZ.to_string(),
        }
    }

    pub fn key(&self) -> String {
        date_key(self.date)
    }
}

/// "20 March"
pub fn display_label(date: NaiveDate) -> String {
    format!("{} {}", date.day(), date.format("%B"))
}
