use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::checklist::FARD;
use crate::models::day::{DayProgress, History};

/// Per-cycle multiplier used for the total zikr figure. This is a fixed
/// 33 and does not follow the day's `tasbih_target`; a 99-bead day
/// under-reports completed cycles.
pub const ZIKR_CYCLE_MULTIPLIER: u64 = 33;

/// Totals at or above this are shown as "300+".
pub const ZIKR_DISPLAY_CAP: u64 = 300;

pub const BEADS_PER_RING: u32 = 33;

/// Mood values above this flag the day for reflection. Higher mood means
/// more unsettled on this scale.
pub const REFLECTION_MOOD_THRESHOLD: u8 = 70;

/// Widened to `u64`; cycles can hold any `u32`.
pub fn total_zikr(day: &DayProgress) -> u64 {
    day.tasbih_count as u64 + day.tasbih_cycles as u64 * ZIKR_CYCLE_MULTIPLIER
}

pub fn zikr_label(total: u64) -> String {
    if total >= ZIKR_DISPLAY_CAP {
        format!("{}+", ZIKR_DISPLAY_CAP)
    } else {
        total.to_string()
    }
}

/// Lit beads on the 33-bead ring. A non-zero multiple of 33 lights the
/// whole ring instead of none.
pub fn lit_beads(tasbih_count: u32) -> u32 {
    let rem = tasbih_count % BEADS_PER_RING;
    if tasbih_count != 0 && rem == 0 {
        BEADS_PER_RING
    } else {
        rem
    }
}

pub fn needs_reflection(day: &DayProgress) -> bool {
    day.mood.value() > REFLECTION_MOOD_THRESHOLD
}

pub fn fard_ratio(day: &DayProgress) -> f64 {
    DailyStats::from_day(day).completion_ratio()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyStats {
    pub date: NaiveDate,
    pub prayers_done: u8,
    pub prayers_total: u8,
}

impl DailyStats {
    pub fn from_day(day: &DayProgress) -> Self {
        Self {
            date: day.date,
            prayers_done: day.completed_prayers.len().min(u8::MAX as usize) as u8,
            prayers_total: FARD.len() as u8,
        }
    }

    pub fn completion_ratio(&self) -> f64 {
        if self.prayers_total == 0 {
            0.0
        } else {
            self.prayers_done as f64 / self.prayers_total as f64
        }
    }

    pub fn is_full(&self) -> bool {
        self.prayers_done >= self.prayers_total
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Streak {
    pub current: u32,
    pub best: u32,
}

/// Days on which every fard prayer was marked. The current streak counts
/// back from `today` and may start yesterday when today is still open.
pub fn calculate_streak(history: &History, today: NaiveDate) -> Streak {
    let full_days: Vec<NaiveDate> = history
        .values()
        .filter(|d| DailyStats::from_day(d).is_full())
        .map(|d| d.date)
        .collect();

    let mut check_date = if full_days.contains(&today) {
        Some(today)
    } else {
        today.pred_opt()
    };
    let mut current = 0u32;
    while let Some(d) = check_date {
        if !full_days.contains(&d) {
            break;
        }
        current += 1;
        check_date = d.pred_opt();
    }

    Streak {
        current,
        best: calculate_best_streak(&full_days),
    }
}

fn calculate_best_streak(sorted: &[NaiveDate]) -> u32 {
    if sorted.is_empty() {
        return 0;
    }

    let mut best = 0u32;
    let mut current = 1u32;

    for i in 1..sorted.len() {
        let prev = sorted[i - 1];
        let curr = sorted[i];
        if prev.succ_opt() == Some(curr) {
            current += 1;
        } else {
            current = 1;
        }
        best = best.max(current);
    }
    best.max(current)
}

/// Aggregate figures over a whole snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub days_tracked: usize,
    pub full_fard_days: usize,
    pub witr_days: usize,
    pub total_zikr: u64,
    pub streak: Streak,
}

pub fn summarize(history: &History, today: NaiveDate) -> Summary {
    Summary {
        days_tracked: history.len(),
        full_fard_days: history
            .values()
            .filter(|d| DailyStats::from_day(d).is_full())
            .count(),
        witr_days: history.values().filter(|d| d.witr_completed).count(),
        total_zikr: history.values().map(total_zikr).sum(),
        streak: calculate_streak(history, today),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::day::{DayDefaults, Level, parse_date_key};

    fn date(s: &str) -> NaiveDate {
        parse_date_key(s).unwrap()
    }

    fn day(s: &str) -> DayProgress {
        DayProgress::synthesize(date(s), &DayDefaults::default())
    }

    fn full_day(s: &str) -> DayProgress {
        let mut d = day(s);
        d.completed_prayers = FARD.iter().map(|p| p.id.to_string()).collect();
        d
    }

    fn history(days: Vec<DayProgress>) -> History {
        days.into_iter().map(|d| (d.date, d)).collect()
    }

    #[test]
    fn test_fard_ratio_bounds() {
        assert_eq!(fard_ratio(&day("2024-06-01")), 0.0);
        assert_eq!(fard_ratio(&full_day("2024-06-01")), 1.0);

        let mut partial = day("2024-06-01");
        partial.completed_prayers.insert("fajr".into());
        partial.completed_prayers.insert("asr".into());
        assert!((fard_ratio(&partial) - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn test_total_zikr_uses_fixed_multiplier() {
        let mut d = day("2024-06-01");
        d.tasbih_count = 5;
        d.tasbih_cycles = 2;
        assert_eq!(total_zikr(&d), 71);

        // a 99-bead day still multiplies by 33
        d.tasbih_target = 99;
        d.tasbih_count = 10;
        d.tasbih_cycles = 1;
        assert_eq!(total_zikr(&d), 43);
    }

    #[test]
    fn test_total_zikr_large_cycles() {
        let mut d = day("2024-06-01");
        d.tasbih_count = 7;
        d.tasbih_cycles = 200_000_000;
        assert_eq!(total_zikr(&d), 6_600_000_007);
        assert_eq!(zikr_label(total_zikr(&d)), "300+");

        d.tasbih_count = u32::MAX;
        d.tasbih_cycles = u32::MAX;
        assert_eq!(total_zikr(&d), u32::MAX as u64 * 34);

        let h = history(vec![d]);
        assert_eq!(summarize(&h, date("2024-06-01")).total_zikr, u32::MAX as u64 * 34);
    }

    #[test]
    fn test_zikr_label_caps() {
        assert_eq!(zikr_label(0), "0");
        assert_eq!(zikr_label(299), "299");
        assert_eq!(zikr_label(300), "300+");
        assert_eq!(zikr_label(1000), "300+");
    }

    #[test]
    fn test_lit_beads() {
        assert_eq!(lit_beads(0), 0);
        assert_eq!(lit_beads(1), 1);
        assert_eq!(lit_beads(33), 33);
        assert_eq!(lit_beads(34), 1);
        assert_eq!(lit_beads(66), 33);
    }

    #[test]
    fn test_reflection_threshold_is_strict() {
        let mut d = day("2024-06-01");
        d.mood = Level::try_from(70u8).unwrap();
        assert!(!needs_reflection(&d));
        d.mood = Level::try_from(71u8).unwrap();
        assert!(needs_reflection(&d));
        d.mood = Level::try_from(0u8).unwrap();
        assert!(!needs_reflection(&d));
    }

    #[test]
    fn test_streak_counts_back_from_today() {
        let h = history(vec![
            full_day("2024-06-01"),
            full_day("2024-06-02"),
            full_day("2024-06-03"),
            day("2024-06-04"),
            full_day("2024-06-05"),
        ]);
        let streak = calculate_streak(&h, date("2024-06-05"));
        assert_eq!(streak, Streak { current: 1, best: 3 });
    }

    #[test]
    fn test_streak_allows_open_today() {
        let h = history(vec![full_day("2024-06-01"), full_day("2024-06-02")]);
        let streak = calculate_streak(&h, date("2024-06-03"));
        assert_eq!(streak.current, 2);

        let broken = calculate_streak(&h, date("2024-06-04"));
        assert_eq!(broken.current, 0);
        assert_eq!(broken.best, 2);
    }

    #[test]
    fn test_streak_empty_history() {
        assert_eq!(
            calculate_streak(&History::new(), date("2024-06-01")),
            Streak::default()
        );
    }

    #[test]
    fn test_summarize() {
        let mut witr = day("2024-06-02");
        witr.witr_completed = true;
        witr.tasbih_count = 3;
        let h = history(vec![full_day("2024-06-01"), witr]);

        let summary = summarize(&h, date("2024-06-02"));
        assert_eq!(summary.days_tracked, 2);
        assert_eq!(summary.full_fard_days, 1);
        assert_eq!(summary.witr_days, 1);
        assert_eq!(summary.total_zikr, 3);
        assert_eq!(summary.streak.best, 1);
    }
}
