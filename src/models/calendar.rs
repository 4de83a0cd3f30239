use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

use crate::error::ProgressError;
use crate::models::day::{History, date_key};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSpan {
    /// Inclusive `YYYY-MM-DD` bounds.
    Range { start: &'static str, end: &'static str },
    Day(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Ramadan,
    Holiday,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IslamicEvent {
    pub name: &'static str,
    pub kind: EventKind,
    pub span: EventSpan,
}

impl IslamicEvent {
    fn covers(&self, key: &str) -> bool {
        match self.span {
            // ISO keys order lexically the same as chronologically
            EventSpan::Range { start, end } => key >= start && key <= end,
            EventSpan::Day(day) => key == day,
        }
    }
}

const fn ramadan(name: &'static str, start: &'static str, end: &'static str) -> IslamicEvent {
    IslamicEvent {
        name,
        kind: EventKind::Ramadan,
        span: EventSpan::Range { start, end },
    }
}

const fn holiday(name: &'static str, day: &'static str) -> IslamicEvent {
    IslamicEvent {
        name,
        kind: EventKind::Holiday,
        span: EventSpan::Day(day),
    }
}

pub const ISLAMIC_EVENTS: &[IslamicEvent] = &[
    // 2024
    ramadan("Ramadan 2024", "2024-03-11", "2024-04-09"),
    holiday("Eid al-Fitr", "2024-04-10"),
    holiday("Day of Arafah", "2024-06-15"),
    holiday("Eid al-Adha", "2024-06-16"),
    holiday("Day of Ashura", "2024-07-16"),
    holiday("Mawlid", "2024-09-15"),
    // 2025
    ramadan("Ramadan 2025", "2025-03-01", "2025-03-29"),
    holiday("Eid al-Fitr", "2025-03-30"),
    holiday("Day of Arafah", "2025-06-05"),
    holiday("Eid al-Adha", "2025-06-06"),
    holiday("Day of Ashura", "2025-07-05"),
    holiday("Mawlid", "2025-09-04"),
    // 2026
    ramadan("Ramadan 2026", "2026-02-18", "2026-03-19"),
    holiday("Eid al-Fitr", "2026-03-20"),
    holiday("Day of Arafah", "2026-05-26"),
    holiday("Eid al-Adha", "2026-05-27"),
    holiday("Day of Ashura", "2026-06-25"),
    holiday("Mawlid", "2026-08-25"),
];

pub fn ramadan_event(date: NaiveDate) -> Option<&'static IslamicEvent> {
    let key = date_key(date);
    ISLAMIC_EVENTS
        .iter()
        .find(|e| e.kind == EventKind::Ramadan && e.covers(&key))
}

pub fn holiday_name(date: NaiveDate) -> Option<&'static str> {
    let key = date_key(date);
    ISLAMIC_EVENTS
        .iter()
        .find(|e| e.kind == EventKind::Holiday && e.covers(&key))
        .map(|e| e.name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FastKind {
    Ramadan,
    Sunnah,
}

impl FastKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FastKind::Ramadan => "ramadan",
            FastKind::Sunnah => "sunnah",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FastKind::Ramadan => "Obligatory fast of the holy month",
            FastKind::Sunnah => "Voluntary Sunnah fast (Mon/Thu)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FastStatus {
    pub kind: FastKind,
    pub event_name: Option<&'static str>,
}

/// Ramadan takes precedence over the Monday/Thursday Sunnah fast.
pub fn fast_status(date: NaiveDate) -> Option<FastStatus> {
    if let Some(event) = ramadan_event(date) {
        return Some(FastStatus {
            kind: FastKind::Ramadan,
            event_name: Some(event.name),
        });
    }
    if is_sunnah_fast_weekday(date.weekday()) {
        return Some(FastStatus {
            kind: FastKind::Sunnah,
            event_name: None,
        });
    }
    None
}

pub fn is_sunnah_fast_weekday(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Mon | Weekday::Thu)
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub is_ramadan: bool,
    pub holiday: Option<&'static str>,
    pub weekday: Weekday,
    pub has_data: bool,
}

impl CalendarDay {
    pub fn classify(date: NaiveDate, history: &History) -> Self {
        Self {
            date,
            is_ramadan: ramadan_event(date).is_some(),
            holiday: holiday_name(date),
            weekday: date.weekday(),
            has_data: history.contains_key(&date),
        }
    }

    pub fn is_fast_day(&self) -> bool {
        self.is_ramadan || is_sunnah_fast_weekday(self.weekday)
    }
}

/// Parse a strict `YYYY-MM` month.
pub fn parse_month(s: &str) -> Result<(i32, u32), ProgressError> {
    let first = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .map_err(|_| ProgressError::InvalidMonth(s.to_string()))?;
    if first.format("%Y-%m").to_string() != s {
        return Err(ProgressError::InvalidMonth(s.to_string()));
    }
    Ok((first.year(), first.month()))
}

/// Monday-first month grid. Leading `None` cells pad the first week.
pub fn month_grid(year: i32, month: u32, history: &History) -> Vec<Option<CalendarDay>> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let offset = first.weekday().num_days_from_monday() as usize;

    let mut cells: Vec<Option<CalendarDay>> = vec![None; offset];
    let mut day = first;
    while day.month() == month {
        cells.push(Some(CalendarDay::classify(day, history)));
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::day::{DayDefaults, DayProgress, parse_date_key};

    fn date(s: &str) -> NaiveDate {
        parse_date_key(s).unwrap()
    }

    #[test]
    fn test_ramadan_day_is_ramadan_fast() {
        let status = fast_status(date("2024-03-20")).unwrap();
        assert_eq!(status.kind, FastKind::Ramadan);
        assert_eq!(status.kind.as_str(), "ramadan");
        assert_eq!(status.event_name, Some("Ramadan 2024"));
    }

    #[test]
    fn test_ramadan_bounds_inclusive() {
        assert!(ramadan_event(date("2024-03-11")).is_some());
        assert!(ramadan_event(date("2024-04-09")).is_some());
        assert!(ramadan_event(date("2024-03-10")).is_none());
        assert!(ramadan_event(date("2024-04-10")).is_none());
    }

    #[test]
    fn test_monday_outside_ramadan_is_sunnah_fast() {
        let monday = date("2024-06-03");
        assert_eq!(monday.weekday(), Weekday::Mon);
        let status = fast_status(monday).unwrap();
        assert_eq!(status.kind, FastKind::Sunnah);
        assert_eq!(status.event_name, None);
    }

    #[test]
    fn test_thursday_outside_ramadan_is_sunnah_fast() {
        let thursday = date("2024-06-06");
        assert_eq!(thursday.weekday(), Weekday::Thu);
        assert_eq!(fast_status(thursday).unwrap().kind, FastKind::Sunnah);
    }

    #[test]
    fn test_wednesday_outside_ramadan_is_not_fast() {
        let wednesday = date("2024-06-05");
        assert_eq!(wednesday.weekday(), Weekday::Wed);
        assert!(fast_status(wednesday).is_none());
    }

    #[test]
    fn test_monday_inside_ramadan_reports_ramadan() {
        let monday = date("2024-03-11");
        assert_eq!(monday.weekday(), Weekday::Mon);
        assert_eq!(fast_status(monday).unwrap().kind, FastKind::Ramadan);
    }

    #[test]
    fn test_holiday_lookup() {
        assert_eq!(holiday_name(date("2025-03-30")), Some("Eid al-Fitr"));
        assert_eq!(holiday_name(date("2025-03-31")), None);
    }

    #[test]
    fn test_has_data_follows_stored_records() {
        let mut history = History::new();
        let stored = date("2024-06-01");
        history.insert(stored, DayProgress::synthesize(stored, &DayDefaults::default()));

        assert!(CalendarDay::classify(stored, &history).has_data);
        assert!(!CalendarDay::classify(date("2024-06-02"), &history).has_data);
    }

    #[test]
    fn test_month_grid_offset_and_length() {
        // June 2024 starts on a Saturday
        let grid = month_grid(2024, 6, &History::new());
        assert_eq!(grid.iter().take_while(|c| c.is_none()).count(), 5);
        assert_eq!(grid.iter().flatten().count(), 30);

        let first = grid[5].as_ref().unwrap();
        assert_eq!(first.date, date("2024-06-01"));
        assert!(!first.is_fast_day());
        let monday = grid[7].as_ref().unwrap();
        assert!(monday.is_fast_day());
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2024-06"), Ok((2024, 6)));
        assert_eq!(parse_month("2024-6"), Err(ProgressError::InvalidMonth("2024-6".into())));
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("June").is_err());
    }

    #[test]
    fn test_month_grid_invalid_month() {
        assert!(month_grid(2024, 13, &History::new()).is_empty());
    }
}
