//! Configuration types for seminar-feed.
//!
//! [`Config::load`] reads `~/.config/seminar-feed/config.toml`, creating it
//! with hardcoded defaults if it does not yet exist. [`Config::defaults`]
//! returns the same defaults without touching the filesystem (useful in tests).
//!
//! The plausible-year range is not read from here: it is a compiled-in
//! constant of the date engine, not an operator setting.

use crate::columns::ColumnMapping;
use crate::error::SheetError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[output]
date_format = "%d/%m/%Y"
time_format = "%H:%M"

# Header text or A1 reference for each schedule field. Blank = unmapped;
# an unmapped Tanggal makes every row be searched cell by cell.
[columns]
nama    = ""
judul   = ""
tanggal = ""
jam     = ""
ruangan = ""
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration, loaded from `~/.config/seminar-feed/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    /// Mapping used when a source does not carry its own.
    #[serde(default)]
    pub columns: ColumnMapping,
    /// Registered spreadsheets.
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
}

/// `[output]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// chrono format for dates rendered from numeric serial cells.
    #[serde(default = "default_date_format")]
    pub date_format: String,
    /// chrono format for times rendered from numeric day-fraction cells.
    #[serde(default = "default_time_format")]
    pub time_format: String,
}

fn default_date_format() -> String { "%d/%m/%Y".to_string() }
fn default_time_format() -> String { "%H:%M".to_string() }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            time_format: default_time_format(),
        }
    }
}

/// One `[[sources]]` entry: a registered spreadsheet.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    pub sheet_url: String,
    /// One tab name, or several separated by commas.
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,
    pub columns: Option<ColumnMapping>,
}

fn default_sheet_name() -> String { "Sheet1".to_string() }

impl SourceConfig {
    /// This source's mapping, falling back to the global `[columns]`.
    pub fn mapping<'a>(&'a self, config: &'a Config) -> &'a ColumnMapping {
        self.columns.as_ref().unwrap_or(&config.columns)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/seminar-feed/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> Result<Self, SheetError> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
            tracing::info!(path = %path.display(), "wrote default config");
        }

        Self::load_from(&path)
    }

    /// Load an explicit file layered on top of the built-in defaults. A
    /// missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, SheetError> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    pub fn source(&self, name: &str) -> Option<&SourceConfig> {
        self.sources.iter().find(|s| s.name == name)
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("seminar-feed")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
