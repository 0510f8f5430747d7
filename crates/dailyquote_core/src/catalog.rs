//! Static quote catalog.
//!
//! # Responsibility
//! - Ship the built-in quote list bundled with the application.
//! - Load alternative catalogs from JSON files.
//!
//! # Invariants
//! - Quote ids are unique within one catalog.
//! - Every quote passes `Quote::validate()`.
//! - Catalog order is stable and never mutated after construction.

use crate::model::quote::{Quote, QuoteValidationError};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const BUILTIN_QUOTES: &[(&str, &str, &str)] = &[
    (
        "1",
        "The only way to do great work is to love what you do.",
        "Steve Jobs",
    ),
    (
        "2",
        "Design is not just what it looks like and feels like. Design is how it works.",
        "Steve Jobs",
    ),
    ("3", "Less, but better.", "Dieter Rams"),
    (
        "4",
        "Simplicity is the ultimate sophistication.",
        "Leonardo da Vinci",
    ),
    (
        "5",
        "Good design is as little design as possible.",
        "Dieter Rams",
    ),
    (
        "6",
        "Innovation distinguishes between a leader and a follower.",
        "Steve Jobs",
    ),
    (
        "7",
        "The details are not the details. They make the design.",
        "Charles Eames",
    ),
    ("8", "Design is intelligence made visible.", "Alina Wheeler"),
    ("9", "Stay hungry, stay foolish.", "Steve Jobs"),
    (
        "10",
        "Good design is obvious. Great design is transparent.",
        "Joe Sparano",
    ),
    (
        "11",
        "Perfection is achieved not when there is nothing more to add, but when there is nothing left to take away.",
        "Antoine de Saint-Exupéry",
    ),
    (
        "12",
        "Design is not for philosophy, it's for life.",
        "Issey Miyake",
    ),
];

/// Catalog construction errors.
#[derive(Debug)]
pub enum CatalogError {
    Validation(QuoteValidationError),
    DuplicateId(String),
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateId(id) => write!(f, "duplicate quote id `{id}` in catalog"),
            Self::Io { path, source } => {
                write!(f, "failed to read catalog `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse catalog `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::DuplicateId(_) => None,
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

impl From<QuoteValidationError> for CatalogError {
    fn from(value: QuoteValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Immutable, ordered list of quotes available for rotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteCatalog {
    quotes: Vec<Quote>,
}

impl QuoteCatalog {
    /// Returns the catalog bundled with the application.
    pub fn builtin() -> Self {
        let quotes = BUILTIN_QUOTES
            .iter()
            .map(|(id, text, author)| Quote::new(*id, *text, *author))
            .collect();
        Self { quotes }
    }

    /// Builds a catalog from caller-provided quotes.
    ///
    /// # Errors
    /// - Returns `Validation` when a quote has empty required fields.
    /// - Returns `DuplicateId` when two quotes share one id.
    pub fn from_quotes(quotes: Vec<Quote>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(quotes.len());
        for quote in &quotes {
            quote.validate()?;
            if !seen.insert(quote.id.as_str()) {
                return Err(CatalogError::DuplicateId(quote.id.clone()));
            }
        }
        Ok(Self { quotes })
    }

    /// Loads a catalog from a JSON array of quote records.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let quotes: Vec<Quote> =
            serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_quotes(quotes)
    }

    pub fn get(&self, id: &str) -> Option<&Quote> {
        self.quotes.iter().find(|quote| quote.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Quote> {
        self.quotes.iter()
    }

    pub fn as_slice(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

impl Default for QuoteCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
