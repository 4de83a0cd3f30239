mod cli;
mod config;
mod db;
mod error;
mod models;
mod store;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use rusqlite::Connection;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;
use db::migrations::run_migrations;
use db::repository::DayRepo;
use store::ProgressStore;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = AppConfig::load().context("Loading config")?;

    // Ensure data directory exists and open DB
    AppConfig::ensure_data_dir()?;
    let db_path = AppConfig::db_path()?;
    let mut conn = Connection::open(&db_path)
        .with_context(|| format!("Opening database at {:?}", db_path))?;

    conn.execute_batch("PRAGMA journal_mode=WAL;")?;

    // Run migrations on every startup
    run_migrations(&conn)?;

    let history = DayRepo::get_all(&conn).context("Loading history")?;
    let mut store = ProgressStore::from_history(history, config.day_defaults());

    match cli.command {
        Some(Commands::Show { date, json }) => {
            handlers::handle_show(&store, date.as_deref(), json)?;
        }
        Some(Commands::Set { field, value, date }) => {
            handlers::handle_set(&conn, &mut store, &field, &value, date.as_deref())?;
        }
        Some(Commands::Toggle { list, id, date }) => {
            handlers::handle_toggle(&conn, &mut store, &list, &id, date.as_deref())?;
        }
        Some(Commands::Tasbih { times, reset, date }) => {
            handlers::handle_tasbih(&conn, &mut store, times, reset, date.as_deref())?;
        }
        Some(Commands::Calendar { month }) => {
            handlers::handle_calendar(&store, month.as_deref())?;
        }
        Some(Commands::Stats) => {
            handlers::handle_stats(&store)?;
        }
        Some(Commands::Export) => {
            handlers::handle_export(&conn, &store)?;
        }
        Some(Commands::Import { file }) => {
            handlers::handle_import(&mut conn, &mut store, &file)?;
        }
        Some(Commands::Config {
            zikr_count,
            city,
            hijri_offset,
        }) => {
            handlers::handle_config(&mut config, &mut store, zikr_count, city, hijri_offset)?;
        }

        // No subcommand → today's page
        None => {
            handlers::handle_show(&store, None, false)?;
        }
    }

    Ok(())
}
