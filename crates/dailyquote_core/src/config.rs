//! Runtime configuration resolved from the environment.
//!
//! # Responsibility
//! - Resolve store path, log level and log directory for front ends.
//!
//! # Invariants
//! - Blank environment values count as unset.
//! - `log_level` is always a canonical level name.

use crate::logging::{default_log_level, normalize_level, LoggingError};
use std::path::PathBuf;

/// Environment variable overriding the SQLite store path.
pub const DB_PATH_ENV: &str = "DAILYQUOTE_DB_PATH";
/// Environment variable overriding the log level.
pub const LOG_LEVEL_ENV: &str = "DAILYQUOTE_LOG_LEVEL";
/// Environment variable enabling file logging in the given directory.
pub const LOG_DIR_ENV: &str = "DAILYQUOTE_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "dailyquote.sqlite3";

/// Resolved core configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: &'static str,
    /// File logging is disabled when `None`.
    pub log_dir: Option<PathBuf>,
}

impl CoreConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Result<Self, LoggingError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, LoggingError> {
        let non_blank = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = non_blank(DB_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(default_db_path);
        let log_level = match non_blank(LOG_LEVEL_ENV) {
            Some(level) => normalize_level(&level)?,
            None => default_log_level(),
        };
        let log_dir = non_blank(LOG_DIR_ENV).map(PathBuf::from);

        Ok(Self {
            db_path,
            log_level,
            log_dir,
        })
    }
}

/// Store path used when nothing is configured.
pub fn default_db_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)
}
