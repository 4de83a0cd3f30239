use anyhow::{Context, Result, bail};
use chrono::{Datelike, Duration, Local, NaiveDate};
use rusqlite::Connection;
use std::path::Path;
use std::str::FromStr;

use crate::config::AppConfig;
use crate::db::repository::{DayRepo, MetaRepo};
use crate::error::ProgressError;
use crate::models::calendar::{fast_status, holiday_name, month_grid, parse_month, ramadan_event};
use crate::models::checklist::{self, ChecklistItem};
use crate::models::day::{date_key, parse_date_key};
use crate::models::stats::{
    fard_ratio, lit_beads, needs_reflection, summarize, total_zikr, zikr_label, DailyStats,
    BEADS_PER_RING,
};
use crate::models::{DayProgress, History, ListField, ProgressField};
use crate::store::ProgressStore;
use crate::utils::format::{check_mark, format_percent, or_placeholder, progress_bar};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;196;160;68m";
const RESET: &str = "\x1b[0m";

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Today when no date was given, otherwise a strictly parsed key.
pub fn resolve_date(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        None => Ok(today()),
        Some(s) => Ok(parse_date_key(s)?),
    }
}

// ─── Show ────────────────────────────────────────────────────────────────────

pub fn handle_show(store: &ProgressStore, date: Option<&str>, json: bool) -> Result<()> {
    let date = resolve_date(date)?;
    let day = store.get_or_default(date);

    if json {
        println!("{}", serde_json::to_string_pretty(&day)?);
        return Ok(());
    }

    println!();
    println_colored!(GOLD, "  {} • {}", day.display_date, or_placeholder(&day.hijri_date));
    println_colored!(DIM, "  {}", day.key());
    if !store.contains(date) {
        println_colored!(DIM, "  (nothing logged yet)");
    }

    if let Some(status) = fast_status(date) {
        let title = status.event_name.unwrap_or(status.kind.description());
        println_colored!(GREEN, "  ☾ {} — {}", title, status.kind.as_str());
    }
    if let Some(name) = holiday_name(date) {
        println_colored!(GOLD, "  ✦ {}", name);
    }

    println!();
    let stats = DailyStats::from_day(&day);
    println_colored!(
        BOLD,
        "  Fard        {}  {}/{}  {}",
        progress_bar(stats.prayers_done as u32, stats.prayers_total as u32, 5),
        stats.prayers_done,
        stats.prayers_total,
        format_percent(fard_ratio(&day))
    );
    print_checklist(&day, ListField::CompletedPrayers);
    println!("    {} Witr", check_mark(day.witr_completed));

    for (title, list) in [
        ("Sunnah", ListField::CompletedSunnah),
        ("Additional", ListField::CompletedAdditional),
        ("Dhikr & practices", ListField::CompletedPractices),
        ("Quran", ListField::CompletedQuran),
    ] {
        println!();
        println_colored!(BOLD, "  {}", title);
        print_checklist(&day, list);
    }

    println!();
    println_colored!(BOLD, "  Reading");
    println!("    Surah: {}   Juz: {}", or_placeholder(&day.selected_surah), or_placeholder(&day.selected_juz));
    if !day.repeated_surahs.is_empty() || !day.repeated_juzs.is_empty() {
        let repeated: Vec<&str> = day
            .repeated_surahs
            .iter()
            .chain(day.repeated_juzs.iter())
            .map(String::as_str)
            .collect();
        println!("    Revised: {}", repeated.join(", "));
    }

    println!();
    println_colored!(BOLD, "  Tasbih");
    println!(
        "    {}/{}  cycles {}  beads {}/{}  total {}",
        day.tasbih_count,
        day.tasbih_target,
        day.tasbih_cycles,
        lit_beads(day.tasbih_count),
        BEADS_PER_RING,
        zikr_label(total_zikr(&day))
    );

    println!();
    println_colored!(BOLD, "  Heart");
    println!("    Mood {}   Pride {}   {}", day.mood, day.pride_level, or_placeholder(&day.soul_state));
    if needs_reflection(&day) {
        println_colored!(
            AMBER,
            "    Heart unsettled? \"Verily, in the remembrance of Allah do hearts find rest\" (13:28)"
        );
    }

    println!();
    for (label, text) in [
        ("Niyyah", &day.niyyah),
        ("Gratitude", &day.gratitude),
        ("Charity", &day.charity_notes),
        ("Sadaqa", &day.sadaqa_notes),
        ("Good deeds", &day.good_deeds_notes),
        ("Dua", &day.dua_notes),
    ] {
        println!("  {:<11} {}", label, or_placeholder(text));
    }
    println!();
    Ok(())
}

fn print_checklist(day: &DayProgress, list: ListField) {
    let done = list.get(day);
    for item in checklist::catalog(list) {
        println!("    {} {}", check_mark(done.contains(item.id)), item_label(item));
    }
    // ids outside the catalog are kept, show them too
    for id in done.iter().filter(|id| checklist::find(list, id).is_none()) {
        println_colored!(DIM, "    ● {}", id);
    }
}

fn item_label(item: &ChecklistItem) -> String {
    match item.arabic {
        Some(ar) => format!("{}  {}{}{}", item.name, DIM, ar, RESET),
        None => item.name.to_string(),
    }
}

// ─── Set / toggle ────────────────────────────────────────────────────────────

pub fn handle_set(
    conn: &Connection,
    store: &mut ProgressStore,
    field: &str,
    value: &str,
    date: Option<&str>,
) -> Result<()> {
    let date = resolve_date(date)?;
    let field = ProgressField::parse(field, value)?;

    // keep the tasbih counter within its cycle
    let current = store.get_or_default(date);
    match field {
        ProgressField::TasbihCount(count) if count > current.tasbih_target => {
            bail!(
                "tasbih_count {} exceeds the day's target of {}",
                count,
                current.tasbih_target
            );
        }
        ProgressField::TasbihTarget(target) if target < current.tasbih_count => {
            bail!(
                "tasbih_target {} is below the day's count of {}; reset the tasbih first",
                target,
                current.tasbih_count
            );
        }
        _ => {}
    }

    let name = field.name();
    let day = store.update(date, field);
    DayRepo::save(conn, day)?;
    println_colored!(GREEN, "  ✓ {} updated for {}", name, date_key(date));
    Ok(())
}

pub fn handle_toggle(
    conn: &Connection,
    store: &mut ProgressStore,
    list: &str,
    id: &str,
    date: Option<&str>,
) -> Result<()> {
    let date = resolve_date(date)?;
    let list = ListField::from_str(list)?;
    if !checklist::is_known_id(list, id) {
        log::warn!("'{}' is not a known {} item, recording it anyway", id, list);
    }

    let day = store.toggle(date, list, id);
    DayRepo::save(conn, day)?;

    let label = checklist::find(list, id).map(|i| i.name).unwrap_or(id);
    if list.get(day).contains(id) {
        println_colored!(GREEN, "  ✓ {} — done", label);
    } else {
        println_colored!(DIM, "  ○ {} — unmarked", label);
    }
    Ok(())
}

// ─── Tasbih ──────────────────────────────────────────────────────────────────

pub fn handle_tasbih(
    conn: &Connection,
    store: &mut ProgressStore,
    times: u32,
    reset: bool,
    date: Option<&str>,
) -> Result<()> {
    let date = resolve_date(date)?;

    if reset {
        let day = store.reset_tasbih(date);
        DayRepo::save(conn, day)?;
        println_colored!(DIM, "  ○ Tasbih reset");
        return Ok(());
    }

    if times == 0 {
        return Ok(());
    }

    let before = store.get_or_default(date).tasbih_cycles;
    for _ in 0..times {
        store.advance_tasbih(date);
    }
    let day = store.get_or_default(date);
    DayRepo::save(conn, &day)?;

    if day.tasbih_cycles > before {
        println_colored!(
            GREEN,
            "  ✓ {}/{} — cycle {} complete!",
            day.tasbih_count,
            day.tasbih_target,
            day.tasbih_cycles
        );
    } else {
        println_colored!(AMBER, "  ◑ {}/{}", day.tasbih_count, day.tasbih_target);
    }
    println_colored!(DIM, "  Total today: {}", zikr_label(total_zikr(&day)));
    Ok(())
}

// ─── Calendar ────────────────────────────────────────────────────────────────

pub fn handle_calendar(store: &ProgressStore, month: Option<&str>) -> Result<()> {
    let (year, month) = match month {
        Some(s) => parse_month(s)?,
        None => {
            let t = today();
            (t.year(), t.month())
        }
    };
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| ProgressError::InvalidMonth(format!("{}-{:02}", year, month)))?;

    let snapshot = store.snapshot();
    let grid = month_grid(year, month, &snapshot);
    let today = today();

    println!();
    println_colored!(GOLD, "  {}", first.format("%B %Y"));
    println!();
    println_colored!(DIM, "   Mo  Tu  We  Th  Fr  Sa  Su");

    for week in grid.chunks(7) {
        let mut line = String::from(" ");
        for cell in week {
            match cell {
                None => line.push_str("    "),
                Some(day) => {
                    let color = if day.holiday.is_some() {
                        GOLD
                    } else if day.is_fast_day() {
                        GREEN
                    } else {
                        ""
                    };
                    let marker = if day.date == today {
                        '<'
                    } else if day.has_data {
                        '•'
                    } else {
                        ' '
                    };
                    line.push_str(&format!(
                        "{}{:>3}{}{}",
                        color,
                        day.date.day(),
                        RESET,
                        marker
                    ));
                }
            }
        }
        println!("{}", line);
    }

    println!();
    println_colored!(DIM, "  green = fast day, gold = holiday, • = logged, < = today");

    let notable: Vec<String> = grid
        .iter()
        .flatten()
        .filter_map(|d| d.holiday.map(|h| format!("  {:>2}  {}", d.date.day(), h)))
        .collect();
    let mut ramadan: Vec<&str> = grid
        .iter()
        .flatten()
        .filter_map(|d| ramadan_event(d.date))
        .map(|e| e.name)
        .collect();
    ramadan.dedup();
    if !notable.is_empty() || !ramadan.is_empty() {
        println!();
        for name in ramadan {
            println_colored!(GREEN, "  {}", name);
        }
        for line in notable {
            println_colored!(GOLD, "{}", line);
        }
    }
    println!();
    Ok(())
}

// ─── Stats ───────────────────────────────────────────────────────────────────

pub fn handle_stats(store: &ProgressStore) -> Result<()> {
    let today = today();
    let snapshot = store.snapshot();
    let summary = summarize(&snapshot, today);

    println!();
    println_colored!(GOLD, "  Statistics");
    println!();
    println_colored!(
        BOLD,
        "  Streak:      {} days current  |  {} days best",
        summary.streak.current,
        summary.streak.best
    );
    println!("  Days logged: {}", summary.days_tracked);
    println!("  Full fard:   {} days", summary.full_fard_days);
    println!("  Witr:        {} days", summary.witr_days);
    println!("  Zikr total:  {}", summary.total_zikr);

    println!();
    println_colored!(DIM, "  Last 7 days");
    for offset in (0..7).rev() {
        let date = today - Duration::days(offset);
        let stats = DailyStats::from_day(&store.get_or_default(date));
        println!(
            "  {}  {}/{}  {}",
            date_key(date),
            stats.prayers_done,
            stats.prayers_total,
            progress_bar(stats.prayers_done as u32, stats.prayers_total as u32, 5)
        );
    }
    println!();
    Ok(())
}

// ─── Export / import ─────────────────────────────────────────────────────────

pub fn handle_export(conn: &Connection, store: &ProgressStore) -> Result<()> {
    let snapshot = store.snapshot();
    println!("{}", serde_json::to_string_pretty(&*snapshot)?);
    MetaRepo::set(conn, "last_export", &date_key(today()))?;
    Ok(())
}

pub fn handle_import(conn: &mut Connection, store: &mut ProgressStore, file: &Path) -> Result<()> {
    let content =
        std::fs::read_to_string(file).with_context(|| format!("Reading {:?}", file))?;
    let records: History = serde_json::from_str(&content)
        .with_context(|| format!("Parsing history from {:?}", file))?;
    if let Some((key, day)) = records.iter().find(|(key, day)| **key != day.date) {
        bail!("Record under {} is dated {}", date_key(*key), day.key());
    }
    if let Some(day) = records
        .values()
        .find(|day| day.tasbih_target == 0 || day.tasbih_count > day.tasbih_target)
    {
        bail!(
            "Record {} has tasbih count {} over target {}",
            day.key(),
            day.tasbih_count,
            day.tasbih_target
        );
    }

    DayRepo::save_all(conn, &records)?;
    let count = store.import(records);
    log::info!("Imported {} days from {:?}", count, file);
    println_colored!(GREEN, "  ✓ Imported {} days", count);
    Ok(())
}

// ─── Config ──────────────────────────────────────────────────────────────────

pub fn handle_config(
    config: &mut AppConfig,
    store: &mut ProgressStore,
    zikr_count: Option<u32>,
    city: Option<String>,
    hijri_offset: Option<i32>,
) -> Result<()> {
    if zikr_count.is_none() && city.is_none() && hijri_offset.is_none() {
        println!();
        println_colored!(GOLD, "  Settings");
        println!();
        println!("{}", toml::to_string_pretty(&*config)?);
        return Ok(());
    }

    if let Some(count) = zikr_count {
        if count == 0 {
            return Err(ProgressError::InvalidTarget.into());
        }
        config.zikr.default_count = count;
    }
    if let Some(city) = city {
        config.location.city = city;
    }
    if let Some(offset) = hijri_offset {
        config.location.hijri_offset = offset;
    }

    config.save()?;
    store.set_defaults(config.day_defaults());
    println_colored!(GREEN, "  ✓ Settings saved");
    if zikr_count.is_some() {
        println_colored!(DIM, "  New tasbih target applies to days not yet logged");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::models::DayDefaults;
    use tempfile::TempDir;

    fn setup() -> (Connection, ProgressStore) {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        (conn, ProgressStore::default())
    }

    #[test]
    fn test_resolve_date_rejects_malformed() {
        let err = resolve_date(Some("2024/06/01")).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ProgressError>(),
            Some(&ProgressError::InvalidDateKey("2024/06/01".into()))
        );
        assert_eq!(resolve_date(None).unwrap(), today());
    }

    #[test]
    fn test_set_persists_record() {
        let (conn, mut store) = setup();
        handle_set(&conn, &mut store, "gratitude", "quiet morning", Some("2024-06-01")).unwrap();

        let saved = DayRepo::get(&conn, "2024-06-01").unwrap().unwrap();
        assert_eq!(saved.gratitude, "quiet morning");
        assert_eq!(saved, store.get_or_default(saved.date));
    }

    #[test]
    fn test_set_rejects_bad_input_without_writing() {
        let (conn, mut store) = setup();
        assert!(handle_set(&conn, &mut store, "mood", "140", Some("2024-06-01")).is_err());
        assert!(handle_set(&conn, &mut store, "colour", "x", Some("2024-06-01")).is_err());
        assert!(handle_set(&conn, &mut store, "tasbih_count", "34", Some("2024-06-01")).is_err());
        assert_eq!(DayRepo::count(&conn).unwrap(), 0);
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_toggle_twice_restores() {
        let (conn, mut store) = setup();
        handle_toggle(&conn, &mut store, "prayers", "fajr", Some("2024-06-01")).unwrap();
        assert!(DayRepo::get(&conn, "2024-06-01").unwrap().unwrap().completed_prayers.contains("fajr"));

        handle_toggle(&conn, &mut store, "prayers", "fajr", Some("2024-06-01")).unwrap();
        assert!(DayRepo::get(&conn, "2024-06-01").unwrap().unwrap().completed_prayers.is_empty());
    }

    #[test]
    fn test_toggle_unknown_list_is_error() {
        let (conn, mut store) = setup();
        assert!(handle_toggle(&conn, &mut store, "chores", "dishes", None).is_err());
    }

    #[test]
    fn test_tasbih_times_and_reset() {
        let (conn, mut store) = setup();
        handle_tasbih(&conn, &mut store, 35, false, Some("2024-06-01")).unwrap();
        let saved = DayRepo::get(&conn, "2024-06-01").unwrap().unwrap();
        assert_eq!((saved.tasbih_count, saved.tasbih_cycles), (2, 1));

        handle_tasbih(&conn, &mut store, 1, true, Some("2024-06-01")).unwrap();
        let saved = DayRepo::get(&conn, "2024-06-01").unwrap().unwrap();
        assert_eq!((saved.tasbih_count, saved.tasbih_cycles), (0, 0));
    }

    #[test]
    fn test_tasbih_zero_times_writes_nothing() {
        let (conn, mut store) = setup();
        handle_tasbih(&conn, &mut store, 0, false, Some("2024-06-01")).unwrap();
        assert_eq!(DayRepo::count(&conn).unwrap(), 0);
        assert!(!store.contains(parse_date_key("2024-06-01").unwrap()));
    }

    #[test]
    fn test_target_cannot_drop_below_count() {
        let (conn, mut store) = setup();
        handle_tasbih(&conn, &mut store, 30, false, Some("2024-06-01")).unwrap();

        assert!(handle_set(&conn, &mut store, "tasbih_target", "10", Some("2024-06-01")).is_err());
        let saved = DayRepo::get(&conn, "2024-06-01").unwrap().unwrap();
        assert_eq!((saved.tasbih_count, saved.tasbih_target), (30, 33));

        handle_set(&conn, &mut store, "tasbih_target", "30", Some("2024-06-01")).unwrap();
        let saved = DayRepo::get(&conn, "2024-06-01").unwrap().unwrap();
        assert_eq!((saved.tasbih_count, saved.tasbih_target), (30, 30));
    }

    #[test]
    fn test_show_handles_huge_cycle_count() {
        let (conn, mut store) = setup();
        handle_set(&conn, &mut store, "tasbih_cycles", "200000000", Some("2024-06-01")).unwrap();
        handle_show(&store, Some("2024-06-01"), false).unwrap();
        handle_tasbih(&conn, &mut store, 1, false, Some("2024-06-01")).unwrap();
        handle_stats(&store).unwrap();
    }

    #[test]
    fn test_import_rejects_count_over_target() {
        let (mut conn, mut store) = setup();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");

        let k = parse_date_key("2024-06-01").unwrap();
        let mut day = DayProgress::synthesize(k, &DayDefaults::default());
        day.tasbih_count = 40;
        let mut records = History::new();
        records.insert(k, day);
        std::fs::write(&path, serde_json::to_string(&records).unwrap()).unwrap();

        assert!(handle_import(&mut conn, &mut store, &path).is_err());
        assert_eq!(DayRepo::count(&conn).unwrap(), 0);
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_import_merges_and_persists() {
        let (mut conn, mut store) = setup();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");

        let mut source = ProgressStore::default();
        source.toggle(parse_date_key("2024-03-20").unwrap(), ListField::CompletedPrayers, "isha");
        source.advance_tasbih(parse_date_key("2024-03-21").unwrap());
        std::fs::write(&path, serde_json::to_string(&*source.snapshot()).unwrap()).unwrap();

        handle_import(&mut conn, &mut store, &path).unwrap();

        assert_eq!(DayRepo::count(&conn).unwrap(), 2);
        assert_eq!(*store.snapshot(), *source.snapshot());
    }

    #[test]
    fn test_import_rejects_malformed_file() {
        let (mut conn, mut store) = setup();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, r#"{"2024-13-01": {}}"#).unwrap();

        assert!(handle_import(&mut conn, &mut store, &path).is_err());
        assert_eq!(DayRepo::count(&conn).unwrap(), 0);
    }

    #[test]
    fn test_import_rejects_key_date_mismatch() {
        let (mut conn, mut store) = setup();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");

        let day = DayProgress::synthesize(parse_date_key("2024-03-20").unwrap(), &DayDefaults::default());
        let mut records = History::new();
        records.insert(parse_date_key("2024-03-21").unwrap(), day);
        std::fs::write(&path, serde_json::to_string(&records).unwrap()).unwrap();

        assert!(handle_import(&mut conn, &mut store, &path).is_err());
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_calendar_rejects_bad_month() {
        let store = ProgressStore::default();
        assert!(handle_calendar(&store, Some("2024-13")).is_err());
        assert!(handle_calendar(&store, Some("2024-06")).is_ok());
    }
}
