use anyhow::{anyhow, Result};
use log::{debug, LevelFilter};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::errors::AppError;
use crate::file_utils::TextEncoding;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and applying command line overrides.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Character encoding of the input subtitle file
    #[serde(default = "default_encoding")]
    pub encoding: String,

    /// What to do when a shift moves a time outside a single day
    #[serde(default)]
    pub overflow_policy: OverflowPolicy,

    /// What to do with entries whose end is not after their start
    #[serde(default)]
    pub range_policy: RangePolicy,
}

/// Handling of shifted times that leave the 00:00:00,000-23:59:59,999 range
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    // @policy: Wrap around midnight, like a wall clock
    #[default]
    Wrap,
    // @policy: Clamp to the first or last millisecond of the day
    Saturate,
    // @policy: Fail the whole run
    Reject,
}

/// Handling of entries that end before they start, and of overlapping entries
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RangePolicy {
    // @policy: No timecode checks at all
    #[default]
    Ignore,
    // @policy: Log every issue and keep going
    Warn,
    // @policy: Fail on the first inverted range, warn on overlaps
    Reject,
}

impl OverflowPolicy {
    // @returns: Lowercase policy identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Wrap => "wrap".to_string(),
            Self::Saturate => "saturate".to_string(),
            Self::Reject => "reject".to_string(),
        }
    }
}

impl std::fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for OverflowPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "wrap" => Ok(Self::Wrap),
            "saturate" => Ok(Self::Saturate),
            "reject" => Ok(Self::Reject),
            _ => Err(anyhow!("Invalid overflow policy: {}", s)),
        }
    }
}

impl RangePolicy {
    // @returns: Lowercase policy identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Ignore => "ignore".to_string(),
            Self::Warn => "warn".to_string(),
            Self::Reject => "reject".to_string(),
        }
    }
}

impl std::fmt::Display for RangePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for RangePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ignore" => Ok(Self::Ignore),
            "warn" => Ok(Self::Warn),
            "reject" => Ok(Self::Reject),
            _ => Err(anyhow!("Invalid range policy: {}", s)),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Level filter for the `log` facade
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_encoding() -> String {
    "utf-8".to_string()
}

impl Config {
    /// Load the configuration from a JSON file, or the defaults if the file is absent
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> std::result::Result<Self, AppError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("Config file not found at '{}', using defaults", path.display());
            return Ok(Config::default());
        }

        let file = File::open(path).map_err(|e| {
            AppError::Config(format!("Failed to open config file {}: {}", path.display(), e))
        })?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {}: {}", path.display(), e))
        })?;

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> std::result::Result<(), AppError> {
        self.text_encoding()?;
        Ok(())
    }

    /// Resolve the configured encoding name
    pub fn text_encoding(&self) -> std::result::Result<TextEncoding, AppError> {
        self.encoding
            .parse::<TextEncoding>()
            .map_err(|e| AppError::Config(e.to_string()))
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: LogLevel::default(),
            encoding: default_encoding(),
            overflow_policy: OverflowPolicy::default(),
            range_policy: RangePolicy::default(),
        }
    }
}
