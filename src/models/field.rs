use std::collections::BTreeSet;
use std::str::FromStr;

use crate::error::ProgressError;
use crate::models::day::{DayProgress, Level};

/// One writable field of a day record together with its new value.
///
/// `date`, `display_date` and `hijri_date` are fixed at creation and have no
/// variant here.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressField {
    Mood(Level),
    PrideLevel(Level),
    TasbihCount(u32),
    TasbihTarget(u32),
    TasbihCycles(u32),
    CompletedPrayers(BTreeSet<String>),
    CompletedSunnah(BTreeSet<String>),
    CompletedAdditional(BTreeSet<String>),
    CompletedPractices(BTreeSet<String>),
    CompletedQuran(BTreeSet<String>),
    RepeatedSurahs(BTreeSet<String>),
    RepeatedJuzs(BTreeSet<String>),
    WitrCompleted(bool),
    Gratitude(String),
    Niyyah(String),
    SoulState(String),
    CharityNotes(String),
    DuaNotes(String),
    SadaqaNotes(String),
    GoodDeedsNotes(String),
    SelectedSurah(String),
    SelectedJuz(String),
}

impl ProgressField {
    pub fn name(&self) -> &'static str {
        match self {
            ProgressField::Mood(_) => "mood",
            ProgressField::PrideLevel(_) => "pride_level",
            ProgressField::TasbihCount(_) => "tasbih_count",
            ProgressField::TasbihTarget(_) => "tasbih_target",
            ProgressField::TasbihCycles(_) => "tasbih_cycles",
            ProgressField::CompletedPrayers(_) => ListField::CompletedPrayers.as_str(),
            ProgressField::CompletedSunnah(_) => ListField::CompletedSunnah.as_str(),
            ProgressField::CompletedAdditional(_) => ListField::CompletedAdditional.as_str(),
            ProgressField::CompletedPractices(_) => ListField::CompletedPractices.as_str(),
            ProgressField::CompletedQuran(_) => ListField::CompletedQuran.as_str(),
            ProgressField::RepeatedSurahs(_) => ListField::RepeatedSurahs.as_str(),
            ProgressField::RepeatedJuzs(_) => ListField::RepeatedJuzs.as_str(),
            ProgressField::WitrCompleted(_) => "witr_completed",
            ProgressField::Gratitude(_) => "gratitude",
            ProgressField::Niyyah(_) => "niyyah",
            ProgressField::SoulState(_) => "soul_state",
            ProgressField::CharityNotes(_) => "charity_notes",
            ProgressField::DuaNotes(_) => "dua_notes",
            ProgressField::SadaqaNotes(_) => "sadaqa_notes",
            ProgressField::GoodDeedsNotes(_) => "good_deeds_notes",
            ProgressField::SelectedSurah(_) => "selected_surah",
            ProgressField::SelectedJuz(_) => "selected_juz",
        }
    }

    /// Return a copy of `day` with this field overlaid and nothing else changed.
    pub fn apply(self, day: &DayProgress) -> DayProgress {
        let mut next = day.clone();
        match self {
            ProgressField::Mood(v) => next.mood = v,
            ProgressField::PrideLevel(v) => next.pride_level = v,
            ProgressField::TasbihCount(v) => next.tasbih_count = v,
            ProgressField::TasbihTarget(v) => next.tasbih_target = v,
            ProgressField::TasbihCycles(v) => next.tasbih_cycles = v,
            ProgressField::CompletedPrayers(v) => next.completed_prayers = v,
            ProgressField::CompletedSunnah(v) => next.completed_sunnah = v,
            ProgressField::CompletedAdditional(v) => next.completed_additional = v,
            ProgressField::CompletedPractices(v) => next.completed_practices = v,
            ProgressField::CompletedQuran(v) => next.completed_quran = v,
            ProgressField::RepeatedSurahs(v) => next.repeated_surahs = v,
            ProgressField::RepeatedJuzs(v) => next.repeated_juzs = v,
            ProgressField::WitrCompleted(v) => next.witr_completed = v,
            ProgressField::Gratitude(v) => next.gratitude = v,
            ProgressField::Niyyah(v) => next.niyyah = v,
            ProgressField::SoulState(v) => next.soul_state = v,
            ProgressField::CharityNotes(v) => next.charity_notes = v,
            ProgressField::DuaNotes(v) => next.dua_notes = v,
            ProgressField::SadaqaNotes(v) => next.sadaqa_notes = v,
            ProgressField::GoodDeedsNotes(v) => next.good_deeds_notes = v,
            ProgressField::SelectedSurah(v) => next.selected_surah = v,
            ProgressField::SelectedJuz(v) => next.selected_juz = v,
        }
        next
    }

    /// Parse a `name value` pair typed on the command line.
    ///
    /// Set fields take a comma-separated list of ids; booleans accept
    /// `true/false`, `yes/no`, `1/0`.
    pub fn parse(name: &str, value: &str) -> Result<Self, ProgressError> {
        let name = normalize(name);
        if let Ok(list) = ListField::from_str(&name) {
            return Ok(list.with(parse_set(value)));
        }
        let field = match name.as_str() {
            "mood" => ProgressField::Mood(Level::parse("mood", value)?),
            "pride_level" | "pride" => ProgressField::PrideLevel(Level::parse("pride_level", value)?),
            "tasbih_count" => ProgressField::TasbihCount(parse_u32("tasbih_count", value)?),
            "tasbih_target" => {
                let target = parse_u32("tasbih_target", value)?;
                if target == 0 {
                    return Err(ProgressError::InvalidTarget);
                }
                ProgressField::TasbihTarget(target)
            }
            "tasbih_cycles" => ProgressField::TasbihCycles(parse_u32("tasbih_cycles", value)?),
            "witr_completed" | "witr" => ProgressField::WitrCompleted(parse_bool("witr_completed", value)?),
            "gratitude" => ProgressField::Gratitude(value.to_string()),
            "niyyah" => ProgressField::Niyyah(value.to_string()),
            "soul_state" => ProgressField::SoulState(value.to_string()),
            "charity_notes" => ProgressField::CharityNotes(value.to_string()),
            "dua_notes" => ProgressField::DuaNotes(value.to_string()),
            "sadaqa_notes" => ProgressField::SadaqaNotes(value.to_string()),
            "good_deeds_notes" => ProgressField::GoodDeedsNotes(value.to_string()),
            "selected_surah" | "surah" => ProgressField::SelectedSurah(value.to_string()),
            "selected_juz" | "juz" => ProgressField::SelectedJuz(value.to_string()),
            _ => return Err(ProgressError::UnknownField(name)),
        };
        Ok(field)
    }
}

/// The set-valued fields of a day record. Toggling is only defined on these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListField {
    CompletedPrayers,
    CompletedSunnah,
    CompletedAdditional,
    CompletedPractices,
    CompletedQuran,
    RepeatedSurahs,
    RepeatedJuzs,
}

impl ListField {
    pub fn all() -> [ListField; 7] {
        [
            ListField::CompletedPrayers,
            ListField::CompletedSunnah,
            ListField::CompletedAdditional,
            ListField::CompletedPractices,
            ListField::CompletedQuran,
            ListField::RepeatedSurahs,
            ListField::RepeatedJuzs,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ListField::CompletedPrayers => "completed_prayers",
            ListField::CompletedSunnah => "completed_sunnah",
            ListField::CompletedAdditional => "completed_additional",
            ListField::CompletedPractices => "completed_practices",
            ListField::CompletedQuran => "completed_quran",
            ListField::RepeatedSurahs => "repeated_surahs",
            ListField::RepeatedJuzs => "repeated_juzs",
        }
    }

    pub fn get<'a>(&self, day: &'a DayProgress) -> &'a BTreeSet<String> {
        match self {
            ListField::CompletedPrayers => &day.completed_prayers,
            ListField::CompletedSunnah => &day.completed_sunnah,
            ListField::CompletedAdditional => &day.completed_additional,
            ListField::CompletedPractices => &day.completed_practices,
            ListField::CompletedQuran => &day.completed_quran,
            ListField::RepeatedSurahs => &day.repeated_surahs,
            ListField::RepeatedJuzs => &day.repeated_juzs,
        }
    }

    /// Wrap a full replacement set as a field update.
    pub fn with(&self, set: BTreeSet<String>) -> ProgressField {
        match self {
            ListField::CompletedPrayers => ProgressField::CompletedPrayers(set),
            ListField::CompletedSunnah => ProgressField::CompletedSunnah(set),
            ListField::CompletedAdditional => ProgressField::CompletedAdditional(set),
            ListField::CompletedPractices => ProgressField::CompletedPractices(set),
            ListField::CompletedQuran => ProgressField::CompletedQuran(set),
            ListField::RepeatedSurahs => ProgressField::RepeatedSurahs(set),
            ListField::RepeatedJuzs => ProgressField::RepeatedJuzs(set),
        }
    }
}

impl std::fmt::Display for ListField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ListField {
    type Err = ProgressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "completed_prayers" | "prayers" | "fard" => Ok(ListField::CompletedPrayers),
            "completed_sunnah" | "sunnah" => Ok(ListField::CompletedSunnah),
            "completed_additional" | "additional" => Ok(ListField::CompletedAdditional),
            "completed_practices" | "practices" => Ok(ListField::CompletedPractices),
            "completed_quran" | "quran" => Ok(ListField::CompletedQuran),
            "repeated_surahs" | "surahs" => Ok(ListField::RepeatedSurahs),
            "repeated_juzs" | "juzs" => Ok(ListField::RepeatedJuzs),
            _ => Err(ProgressError::UnknownListField(s.to_string())),
        }
    }
}

/// Accept `camelCase`, `kebab-case` and `snake_case` spellings.
fn normalize(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.trim().chars() {
        if c.is_ascii_uppercase() {
            if !out.is_empty() {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else if c == '-' {
            out.push('_');
        } else {
            out.push(c);
        }
    }
    out
}

fn parse_set(value: &str) -> BTreeSet<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_u32(field: &'static str, value: &str) -> Result<u32, ProgressError> {
    value.trim().parse().map_err(|_| ProgressError::InvalidValue {
        field,
        value: value.to_string(),
    })
}

fn parse_bool(field: &'static str, value: &str) -> Result<bool, ProgressError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(ProgressError::InvalidValue {
            field,
            value: value.to_string(),
        }),
    }
}
