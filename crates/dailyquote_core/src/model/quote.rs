//! Quote domain model.
//!
//! # Responsibility
//! - Define the record rendered by the quote card and the favorites list.
//! - Provide the share text rendering used by every share path.
//!
//! # Invariants
//! - `id`, `text` and `author` are non-empty for persisted quotes.
//! - `source` is omitted from JSON when absent.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier of a quote inside its catalog.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type QuoteId = String;

/// Canonical quote record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quote {
    /// Catalog-unique stable ID.
    pub id: QuoteId,
    /// Quote body without surrounding quotation marks.
    pub text: String,
    /// Attributed author.
    pub author: String,
    /// Optional work or speech the quote is taken from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Validation failures for quote records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteValidationError {
    EmptyId,
    EmptyText { id: QuoteId },
    EmptyAuthor { id: QuoteId },
}

impl Display for QuoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "quote id cannot be empty"),
            Self::EmptyText { id } => write!(f, "quote `{id}` has empty text"),
            Self::EmptyAuthor { id } => write!(f, "quote `{id}` has empty author"),
        }
    }
}

impl Error for QuoteValidationError {}

impl Quote {
    /// Creates a quote without a source.
    pub fn new(
        id: impl Into<QuoteId>,
        text: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            author: author.into(),
            source: None,
        }
    }

    /// Returns a copy of this quote with `source` set.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Checks field-level invariants.
    ///
    /// Whitespace-only values count as empty.
    pub fn validate(&self) -> Result<(), QuoteValidationError> {
        if self.id.trim().is_empty() {
            return Err(QuoteValidationError::EmptyId);
        }
        if self.text.trim().is_empty() {
            return Err(QuoteValidationError::EmptyText {
                id: self.id.clone(),
            });
        }
        if self.author.trim().is_empty() {
            return Err(QuoteValidationError::EmptyAuthor {
                id: self.id.clone(),
            });
        }
        Ok(())
    }

    /// Renders the display string used for share and clipboard payloads.
    ///
    /// Format: `"<text>" — <author>`.
    pub fn share_text(&self) -> String {
        format!("\"{}\" \u{2014} {}", self.text, self.author)
    }
}
