//! Settings file
//!
//! `settings.json` under the platform config directory. Every section is
//! `#[serde(default)]`, so a partial file loads and missing keys fall back
//! to their defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fakesql_core::SqlDialect;
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .context("Could not determine config directory")
        .map(|p| p.join("fakesql"))
}

/// Application settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Dialect DDL is parsed with
    pub dialect: SqlDialect,
    pub logging: LogSettings,
    pub display: DisplaySettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Filter used when `RUST_LOG` is not set
    pub filter: String,
    /// Write JSON logs to `log_dir`
    pub json_logs: bool,
    /// Where JSON logs go; the platform data dir when unset
    pub log_dir: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
            json_logs: false,
            log_dir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Title-case table names in the table list
    pub title_case_tables: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            title_case_tables: true,
        }
    }
}

impl AppSettings {
    pub fn settings_path() -> Result<PathBuf> {
        config_dir().map(|p| p.join("settings.json"))
    }

    /// Load from the default location, or defaults if there is no file yet
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::settings_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings JSON in {:?}", path))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write settings to {:?}", path))?;
        Ok(())
    }

    /// Let command line flags win over the file
    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(dialect) = cli.dialect {
            self.dialect = dialect;
        }
        if let Some(filter) = &cli.log_filter {
            self.logging.filter = filter.clone();
        }
        if cli.json_logs {
            self.logging.json_logs = true;
        }
        if cli.raw_names {
            self.display.title_case_tables = false;
        }
    }
}
