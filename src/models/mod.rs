pub mod calendar;
pub mod checklist;
pub mod day;
pub mod field;
pub mod stats;

pub use day::{DayDefaults, DayProgress, History, Level};
pub use field::{ListField, ProgressField};
