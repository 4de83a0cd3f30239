use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::DayDefaults;

fn default_city() -> String {
    "Moscow, Russia".to_string()
}
fn default_latitude() -> f64 {
    55.7558
}
fn default_longitude() -> f64 {
    37.6173
}
fn default_hijri_offset() -> i32 {
    0
}
fn default_zikr_count() -> u32 {
    33
}
fn default_zikr_sound() -> String {
    "soft_click".to_string()
}
fn default_bead_type() -> String {
    "dark_wood".to_string()
}
fn default_font() -> String {
    "manrope".to_string()
}
fn default_text_size() -> String {
    "standard".to_string()
}
fn default_background() -> String {
    "default".to_string()
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    #[serde(default = "default_city")]
    pub city: String,
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    #[serde(default = "default_longitude")]
    pub longitude: f64,
    /// Days to add/subtract from Hijri date for local moon sighting.
    /// 0 = default (Saudi), -1 = one day behind, +1 = one day ahead
    #[serde(default = "default_hijri_offset")]
    pub hijri_offset: i32,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            city: default_city(),
            latitude: default_latitude(),
            longitude: default_longitude(),
            hijri_offset: default_hijri_offset(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZikrConfig {
    /// Tasbih target given to newly created days.
    #[serde(default = "default_zikr_count")]
    pub default_count: u32,
    #[serde(default = "default_zikr_sound")]
    pub sound: String,
    #[serde(default = "default_true")]
    pub vibration: bool,
    #[serde(default = "default_bead_type")]
    pub bead_type: String,
}

impl Default for ZikrConfig {
    fn default() -> Self {
        Self {
            default_count: default_zikr_count(),
            sound: default_zikr_sound(),
            vibration: true,
            bead_type: default_bead_type(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_font")]
    pub font: String,
    #[serde(default = "default_text_size")]
    pub text_size: String,
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default)]
    pub night_mode: bool,
    #[serde(default = "default_true")]
    pub show_niyyah: bool,
    #[serde(default)]
    pub quiet_day: bool,
    #[serde(default)]
    pub haid_mode: bool,
    #[serde(default = "default_true")]
    pub notifications: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            font: default_font(),
            text_size: default_text_size(),
            background: default_background(),
            night_mode: false,
            show_niyyah: true,
            quiet_day: false,
            haid_mode: false,
            notifications: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub zikr: ZikrConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "nur").context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn db_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("nur.db"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
        let mut config: AppConfig = toml::from_str(&content).context("Parsing config.toml")?;
        if config.zikr.default_count == 0 {
            log::warn!("zikr.default_count must be positive, using {}", default_zikr_count());
            config.zikr.default_count = default_zikr_count();
        }
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }

    pub fn ensure_data_dir() -> Result<PathBuf> {
        let dir = Self::data_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// The slice of settings that day synthesis reads.
    pub fn day_defaults(&self) -> DayDefaults {
        DayDefaults {
            tasbih_target: self.zikr.default_count,
            hijri_offset: self.location.hijri_offset,
        }
    }
}
