use anyhow::{Context, Result};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::collections::BTreeSet;

use crate::models::day::{date_key, parse_date_key};
use crate::models::{DayProgress, History, Level};

// ─── Day progress repo ───────────────────────────────────────────────────────

const DAY_COLUMNS: &str = "date, display_date, hijri_date, mood, pride_level,
    tasbih_count, tasbih_target, tasbih_cycles,
    completed_prayers, completed_sunnah, completed_additional, completed_practices,
    completed_quran, repeated_surahs, repeated_juzs, witr_completed,
    gratitude, niyyah, soul_state, charity_notes, dua_notes, sadaqa_notes,
    good_deeds_notes, selected_surah, selected_juz";

fn conversion_error(
    idx: usize,
    ty: Type,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, ty, Box::new(err))
}

fn get_set(row: &Row, idx: usize) -> rusqlite::Result<BTreeSet<String>> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw).map_err(|e| conversion_error(idx, Type::Text, e))
}

fn get_level(row: &Row, idx: usize) -> rusqlite::Result<Level> {
    let raw: u8 = row.get(idx)?;
    Level::try_from(raw).map_err(|e| conversion_error(idx, Type::Integer, e))
}

fn to_json(set: &BTreeSet<String>) -> Result<String> {
    serde_json::to_string(set).context("Serializing id set")
}

fn row_to_day(row: &Row) -> rusqlite::Result<DayProgress> {
    let key: String = row.get(0)?;
    Ok(DayProgress {
        date: parse_date_key(&key).map_err(|e| conversion_error(0, Type::Text, e))?,
        display_date: row.get(1)?,
        hijri_date: row.get(2)?,
        mood: get_level(row, 3)?,
        pride_level: get_level(row, 4)?,
        tasbih_count: row.get(5)?,
        tasbih_target: row.get(6)?,
        tasbih_cycles: row.get(7)?,
        completed_prayers: get_set(row, 8)?,
        completed_sunnah: get_set(row, 9)?,
        completed_additional: get_set(row, 10)?,
        completed_practices: get_set(row, 11)?,
        completed_quran: get_set(row, 12)?,
        repeated_surahs: get_set(row, 13)?,
        repeated_juzs: get_set(row, 14)?,
        witr_completed: row.get::<_, i32>(15)? != 0,
        gratitude: row.get(16)?,
        niyyah: row.get(17)?,
        soul_state: row.get(18)?,
        charity_notes: row.get(19)?,
        dua_notes: row.get(20)?,
        sadaqa_notes: row.get(21)?,
        good_deeds_notes: row.get(22)?,
        selected_surah: row.get(23)?,
        selected_juz: row.get(24)?,
    })
}

pub struct DayRepo;

impl DayRepo {
    pub fn get(conn: &Connection, date: &str) -> Result<Option<DayProgress>> {
        conn.query_row(
            &format!("SELECT {} FROM day_progress WHERE date = ?1", DAY_COLUMNS),
            params![date],
            row_to_day,
        )
        .optional()
        .with_context(|| format!("Loading day {}", date))
    }

    pub fn get_all(conn: &Connection) -> Result<History> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM day_progress ORDER BY date",
            DAY_COLUMNS
        ))?;
        let rows = stmt.query_map([], row_to_day)?;

        let mut history = History::new();
        for r in rows {
            let day = r.context("Reading day_progress row")?;
            history.insert(day.date, day);
        }
        log::debug!("Loaded {} day records", history.len());
        Ok(history)
    }

    /// Insert or fully replace the row for `day.date`.
    pub fn save(conn: &Connection, day: &DayProgress) -> Result<()> {
        conn.execute(
            &format!(
                "INSERT OR REPLACE INTO day_progress ({}, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13,
                         ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25,
                         datetime('now'))",
                DAY_COLUMNS
            ),
            params![
                date_key(day.date),
                day.display_date,
                day.hijri_date,
                day.mood.value(),
                day.pride_level.value(),
                day.tasbih_count,
                day.tasbih_target,
                day.tasbih_cycles,
                to_json(&day.completed_prayers)?,
                to_json(&day.completed_sunnah)?,
                to_json(&day.completed_additional)?,
                to_json(&day.completed_practices)?,
                to_json(&day.completed_quran)?,
                to_json(&day.repeated_surahs)?,
                to_json(&day.repeated_juzs)?,
                day.witr_completed as i32,
                day.gratitude,
                day.niyyah,
                day.soul_state,
                day.charity_notes,
                day.dua_notes,
                day.sadaqa_notes,
                day.good_deeds_notes,
                day.selected_surah,
                day.selected_juz,
            ],
        )
        .with_context(|| format!("Saving day {}", day.key()))?;
        Ok(())
    }

    /// Save every record in one transaction.
    pub fn save_all(conn: &mut Connection, history: &History) -> Result<()> {
        let tx = conn.transaction()?;
        for day in history.values() {
            Self::save(&tx, day)?;
        }
        tx.commit()?;
        Ok(())
    }

    pub fn count(conn: &Connection) -> Result<i64> {
        conn.query_row("SELECT COUNT(*) FROM day_progress", [], |row| row.get(0))
            .map_err(anyhow::Error::from)
    }
}

// ─── App meta ────────────────────────────────────────────────────────────────

pub struct MetaRepo;

impl MetaRepo {
    pub fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
        conn.query_row(
            "SELECT value FROM app_meta WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(anyhow::Error::from)
    }

    pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
        conn.execute(
            "INSERT INTO app_meta (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2",
            params![key, value],
        )?;
        Ok(())
    }
}
