use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DeckCheckError, Result};

/// Total cards in a Commander deck, command zone included.
pub const COMMANDER_DECK_SIZE: usize = 100;

/// Minimum similarity (1 - edit distance / longest length) a fuzzy candidate
/// must reach to be offered as a match.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.85;

pub const DATASET_FILE: &str = "AllPrintings.json";
pub const SETTINGS_FILE: &str = "settings.json";

pub const PRICE_CACHE_HOURS_RANGE: (u32, u32) = (1, 168);
pub const EXCHANGE_RATE_MINUTES_RANGE: (u32, u32) = (1, 1440);

pub fn default_data_dir() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        data.join("commander-deck-check")
    } else {
        PathBuf::from(".commander-deck-check")
    }
}

pub fn default_dataset_path() -> PathBuf {
    default_data_dir().join(DATASET_FILE)
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// User-editable settings persisted as JSON.
///
/// Keys missing from the file fall back to their defaults, so older settings
/// files keep loading after new keys are added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Location of the AllPrintings dataset. `None` means [`default_dataset_path`].
    pub dataset_path: Option<PathBuf>,
    pub fuzzy_threshold: f64,
    /// How long a fetched card price stays valid, in hours.
    pub price_cache_hours: u32,
    /// How long a fetched exchange rate stays valid, in minutes.
    pub exchange_rate_cache_minutes: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dataset_path: None,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            price_cache_hours: 12,
            exchange_rate_cache_minutes: 10,
        }
    }
}

impl Settings {
    /// Load settings from `path`, returning defaults if the file does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "settings file not found, using defaults");
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&contents)?;
        settings.validate()?;
        tracing::info!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    /// Write the settings as pretty-printed JSON, creating parent directories.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.validate()?;
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        tracing::info!(path = %path.display(), "settings saved");
        Ok(())
    }

    /// Check every value against its accepted range.
    pub fn validate(&self) -> Result<()> {
        check_fuzzy_threshold(self.fuzzy_threshold)?;
        check_range(
            "price_cache_hours",
            self.price_cache_hours,
            PRICE_CACHE_HOURS_RANGE,
        )?;
        check_range(
            "exchange_rate_cache_minutes",
            self.exchange_rate_cache_minutes,
            EXCHANGE_RATE_MINUTES_RANGE,
        )
    }

    pub fn dataset_path(&self) -> PathBuf {
        self.dataset_path
            .clone()
            .unwrap_or_else(default_dataset_path)
    }

    pub fn price_cache_ttl(&self) -> Duration {
        Duration::from_secs(u64::from(self.price_cache_hours) * 3600)
    }

    pub fn exchange_rate_ttl(&self) -> Duration {
        Duration::from_secs(u64::from(self.exchange_rate_cache_minutes) * 60)
    }
}

/// A fuzzy threshold must lie in `(0, 1]`; NaN is rejected.
pub fn check_fuzzy_threshold(threshold: f64) -> Result<()> {
    if threshold > 0.0 && threshold <= 1.0 {
        Ok(())
    } else {
        Err(DeckCheckError::InvalidArgument(format!(
            "fuzzy threshold must be in (0, 1], got {threshold}"
        )))
    }
}

fn check_range(key: &str, value: u32, (min, max): (u32, u32)) -> Result<()> {
    if value < min || value > max {
        return Err(DeckCheckError::InvalidArgument(format!(
            "{key} must be between {min} and {max}, got {value}"
        )));
    }
    Ok(())
}
