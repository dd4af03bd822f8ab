use anyhow::{Context, Result};
use chrono::format::{Item, StrftimeItems};
use log::LevelFilter;
use std::path::PathBuf;

pub const DEFAULT_DATE_FORMAT: &str = "%d.%m.%Y";

pub struct Config {
    pub data_dir: PathBuf,
    pub log_path: PathBuf,
    pub log_level: LevelFilter,
    pub date_format: String,
    pub theme: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup, e.g. a map in tests
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup("BOOKINGS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                dirs::data_local_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("bookings")
            });

        let log_path = data_dir.join("bookings.log");

        let log_level = match lookup("BOOKINGS_LOG") {
            Some(level) => level
                .parse::<LevelFilter>()
                .with_context(|| format!("Invalid BOOKINGS_LOG level '{}'", level))?,
            None => LevelFilter::Info,
        };

        let date_format =
            lookup("BOOKINGS_DATE_FORMAT").unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string());
        // chrono panics when displaying an invalid format
        if StrftimeItems::new(&date_format).any(|item| matches!(item, Item::Error)) {
            anyhow::bail!("Invalid BOOKINGS_DATE_FORMAT '{}'", date_format);
        }

        let theme = lookup("BOOKINGS_THEME").unwrap_or_else(|| "dark".to_string());

        Ok(Self {
            data_dir,
            log_path,
            log_level,
            date_format,
            theme,
        })
    }
}
