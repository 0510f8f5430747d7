//! SQLite backing for the quote key/value store.
//!
//! # Responsibility
//! - Open the quote store with migrations applied.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`.
//! - A store stamped by a newer binary is refused, never downgraded.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Store bootstrap and statement failures.
#[derive(Debug)]
pub enum DbError {
    /// The store at `location` could not be opened.
    Open {
        location: String,
        source: rusqlite::Error,
    },
    Sqlite(rusqlite::Error),
    /// The store was stamped by a newer binary.
    StoreTooNew { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { location, source } => {
                write!(f, "cannot open quote store `{location}`: {source}")
            }
            Self::Sqlite(err) => write!(f, "quote store query failed: {err}"),
            Self::StoreTooNew { found, supported } => write!(
                f,
                "quote store schema v{found} was written by a newer release (this build reads up to v{supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } | Self::Sqlite(source) => Some(source),
            Self::StoreTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
