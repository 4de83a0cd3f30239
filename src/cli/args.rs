use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "nur", version, author, about = "A quiet terminal journal for daily prayer, dhikr and reflection")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a day's record with totals and fasting status
    Show {
        /// Day to show (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set a single field, e.g. `nur set mood 40` or `nur set gratitude "..."`
    Set {
        /// Field name (mood, pride_level, witr, niyyah, gratitude, soul_state, ...)
        field: String,
        /// New value; set fields take a comma-separated list
        value: String,
        #[arg(long)]
        date: Option<String>,
    },
    /// Flip a checklist item on or off
    Toggle {
        /// List name (prayers, sunnah, additional, practices, quran, surahs, juzs)
        list: String,
        /// Item id, e.g. fajr, duha, q_arabic, "Al-Mulk", "Juz 30"
        id: String,
        #[arg(long)]
        date: Option<String>,
    },
    /// Count tasbih beads
    Tasbih {
        /// Number of beads to count
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        times: u32,
        /// Clear the count and completed cycles instead
        #[arg(long, conflicts_with = "times")]
        reset: bool,
        #[arg(long)]
        date: Option<String>,
    },
    /// Month calendar with fast days, holidays and logged days
    Calendar {
        /// Month to show (YYYY-MM), defaults to the current month
        #[arg(long)]
        month: Option<String>,
    },
    /// Show streaks and totals across all days
    Stats,
    /// Write the full history as JSON to stdout
    Export,
    /// Load days from a JSON export, replacing days with the same date
    Import {
        /// Path to a file produced by `nur export`
        file: PathBuf,
    },
    /// Show or change settings
    Config {
        /// Default tasbih target for new days
        #[arg(long)]
        zikr_count: Option<u32>,
        /// City name
        #[arg(long)]
        city: Option<String>,
        /// Hijri day adjustment for local moon sighting
        #[arg(long, allow_hyphen_values = true)]
        hijri_offset: Option<i32>,
    },
}
