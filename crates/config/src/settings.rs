// Application settings
// Loaded from ~/.config/addrstat/settings.toml

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::LevelFilter;

/// How reports are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable text (default)
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Input decoding settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// Encoding label used for CSV lines that are not valid UTF-8
    pub fallback_encoding: String,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self { fallback_encoding: "windows-1251".to_string() }
    }
}

/// Report output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub format: ReportFormat,
    /// Print elapsed processing time after each report
    pub show_timing: bool,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self { format: ReportFormat::Text, show_timing: true }
    }
}

/// Interactive loop settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplSettings {
    pub prompt: String,
}

impl Default for ReplSettings {
    fn default() -> Self {
        Self { prompt: "> ".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// off, error, warn, info, debug, trace
    pub log_level: String,
    pub input: InputSettings,
    pub report: ReportSettings,
    pub repl: ReplSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            input: InputSettings::default(),
            report: ReportSettings::default(),
            repl: ReplSettings::default(),
        }
    }
}

#[derive(Debug)]
pub enum SettingsError {
    /// The settings file exists but could not be read.
    Read { path: PathBuf, message: String },
    /// TOML parse / deserialization error.
    Parse { path: PathBuf, message: String },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, message } => {
                write!(f, "cannot read {}: {message}", path.display())
            }
            Self::Parse { path, message } => {
                write!(f, "invalid settings in {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for SettingsError {}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("addrstat");
        config_dir.join("settings.toml")
    }

    /// Load settings from the default location
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(&Self::config_path())
    }

    /// Load settings from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(SettingsError::Read { path: path.to_path_buf(), message: e.to_string() })
            }
        };

        toml::from_str(&contents)
            .map_err(|e| SettingsError::Parse { path: path.to_path_buf(), message: e.to_string() })
    }

    /// Parsed `log_level`; unknown values fall back to `warn`.
    pub fn log_level(&self) -> LevelFilter {
        self.log_level.trim().parse().unwrap_or(LevelFilter::Warn)
    }
}
