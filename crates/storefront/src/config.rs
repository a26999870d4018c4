//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `FURNISHME_STORAGE_PATH` - State file used by the CLI (default: furnishme-storage.json)
//! - `FURNISHME_SEED_DEMO_USER` - Seed the demo account on first run (default: true)
//! - `FURNISHME_FEATURED_COUNT` - Products shown on the home page (default: 4)
//! - `FURNISHME_SLIDE_COUNT` - Hero carousel slides (default: 3)
//! - `FURNISHME_LOG_FORMAT` - `pretty` or `json` (default: pretty)

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::carousel::DEFAULT_SLIDE_COUNT;
use crate::catalog::DEFAULT_FEATURED_COUNT;

/// Default state file.
pub const DEFAULT_STORAGE_PATH: &str = "furnishme-storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `pretty` or `json`, got `{other}`")),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pretty => "pretty",
            Self::Json => "json",
        })
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Path of the file-backed key/value store
    pub storage_path: PathBuf,
    /// Whether an empty user directory gets the demo account
    pub seed_demo_user: bool,
    /// Number of products on the home page
    pub featured_count: usize,
    /// Number of hero carousel slides
    pub slide_count: usize,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            seed_demo_user: true,
            featured_count: DEFAULT_FEATURED_COUNT,
            slide_count: DEFAULT_SLIDE_COUNT,
            log_format: LogFormat::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup` instead of the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            storage_path: lookup("FURNISHME_STORAGE_PATH")
                .map_or(defaults.storage_path, PathBuf::from),
            seed_demo_user: parse_or(&lookup, "FURNISHME_SEED_DEMO_USER", defaults.seed_demo_user)?,
            featured_count: parse_or(&lookup, "FURNISHME_FEATURED_COUNT", defaults.featured_count)?,
            slide_count: parse_or(&lookup, "FURNISHME_SLIDE_COUNT", defaults.slide_count)?,
            log_format: parse_or(&lookup, "FURNISHME_LOG_FORMAT", defaults.log_format)?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable if set, otherwise use `default`.
fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        None => Ok(default),
    }
}
