use anyhow::Result;
use chrono::{Datelike, Duration, NaiveDate};
use hijri_date::HijriDate;

/// Islamic month names in English (index 0 = Muharram = month 1)
const HIJRI_MONTH_NAMES: &[&str] = &[
    "Muharram",
    "Safar",
    "Rabi' al-Awwal",
    "Rabi' al-Thani",
    "Jumada al-Awwal",
    "Jumada al-Thani",
    "Rajab",
    "Sha'ban",
    "Ramadan",
    "Shawwal",
    "Dhu al-Qi'dah",
    "Dhu al-Hijjah",
];

/// Gregorian years the converter's Umm al-Qura tables cover.
const SUPPORTED_YEARS: std::ops::RangeInclusive<i32> = 1938..=2076;

fn hijri_month_name(month: usize) -> &'static str {
    if (1..=12).contains(&month) {
        HIJRI_MONTH_NAMES[month - 1]
    } else {
        "Unknown"
    }
}

pub struct HijriInfo {
    pub day: usize,
    pub month: usize,
    pub year: usize,
    pub month_name: String,
}

impl HijriInfo {
    /// "9 Ramadan"
    pub fn short(&self) -> String {
        format!("{} {}", self.day, self.month_name)
    }
}

/// Convert a Gregorian date, shifted by `offset_days` for local moon sighting
/// (e.g. -1 where the month starts a day after Saudi Arabia).
pub fn to_hijri(date: NaiveDate, offset_days: i32) -> Result<HijriInfo> {
    let adjusted = date
        .checked_add_signed(Duration::days(offset_days as i64))
        .ok_or_else(|| anyhow::anyhow!("Hijri offset out of range for {}", date))?;

    let hd = HijriDate::from_gr(
        adjusted.year() as usize,
        adjusted.month() as usize,
        adjusted.day() as usize,
    )
    .map_err(|e| anyhow::anyhow!("Hijri conversion error: {}", e))?;

    let month = hd.month();
    Ok(HijriInfo {
        day: hd.day(),
        month,
        year: hd.year(),
        month_name: hijri_month_name(month).to_string(),
    })
}

/// Day-and-month label for a record, `None` outside the converter's range.
pub fn hijri_label(date: NaiveDate, offset_days: i32) -> Option<String> {
    if !SUPPORTED_YEARS.contains(&date.year()) {
        return None;
    }
    match to_hijri(date, offset_days) {
        Ok(info) => Some(info.short()),
        Err(e) => {
            log::warn!("No Hijri label for {}: {}", date, e);
            None
        }
    }
}
