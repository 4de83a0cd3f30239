use anyhow::Result;
use rusqlite::Connection;

use crate::db::repository::MetaRepo;

pub const SCHEMA_VERSION: &str = "1";

pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch("
        CREATE TABLE IF NOT EXISTS day_progress (
            date                 TEXT PRIMARY KEY,
            display_date         TEXT NOT NULL,
            hijri_date           TEXT NOT NULL DEFAULT '',
            mood                 INTEGER NOT NULL CHECK(mood BETWEEN 0 AND 100),
            pride_level          INTEGER NOT NULL CHECK(pride_level BETWEEN 0 AND 100),
            tasbih_count         INTEGER NOT NULL DEFAULT 0 CHECK(tasbih_count >= 0),
            tasbih_target        INTEGER NOT NULL CHECK(tasbih_target > 0),
            tasbih_cycles        INTEGER NOT NULL DEFAULT 0 CHECK(tasbih_cycles >= 0),
            completed_prayers    TEXT NOT NULL DEFAULT '[]',
            completed_sunnah     TEXT NOT NULL DEFAULT '[]',
            completed_additional TEXT NOT NULL DEFAULT '[]',
            completed_practices  TEXT NOT NULL DEFAULT '[]',
            completed_quran      TEXT NOT NULL DEFAULT '[]',
            repeated_surahs      TEXT NOT NULL DEFAULT '[]',
            repeated_juzs        TEXT NOT NULL DEFAULT '[]',
            witr_completed       INTEGER NOT NULL DEFAULT 0,
            gratitude            TEXT NOT NULL DEFAULT '',
            niyyah               TEXT NOT NULL DEFAULT '',
            soul_state           TEXT NOT NULL DEFAULT '',
            charity_notes        TEXT NOT NULL DEFAULT '',
            dua_notes            TEXT NOT NULL DEFAULT '',
            sadaqa_notes         TEXT NOT NULL DEFAULT '',
            good_deeds_notes     TEXT NOT NULL DEFAULT '',
            selected_surah       TEXT NOT NULL DEFAULT '',
            selected_juz         TEXT NOT NULL DEFAULT '',
            updated_at           TEXT DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS app_meta (
            key   TEXT PRIMARY KEY,
            value TEXT
        );
    ")?;

    // Only the initial schema exists; there is nothing to upgrade from yet.
    if MetaRepo::get(conn, "schema_version")?.is_none() {
        MetaRepo::set(conn, "schema_version", SCHEMA_VERSION)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        assert_eq!(
            MetaRepo::get(&conn, "schema_version").unwrap().as_deref(),
            Some(SCHEMA_VERSION)
        );
    }

    #[test]
    fn test_rejects_out_of_range_mood() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        let result = conn.execute(
            "INSERT INTO day_progress (date, display_date, mood, pride_level, tasbih_target)
             VALUES ('2024-01-01', '1 January', 120, 50, 33)",
            [],
        );
        assert!(result.is_err());
    }
}
