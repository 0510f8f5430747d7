//! Typed access to the persisted quote state keys.
//!
//! # Responsibility
//! - Map the three state keys onto domain types with JSON encoding.
//! - Write the daily rotation (date plus current quote) atomically.
//!
//! # Invariants
//! - `favorites` holds a JSON array of quotes.
//! - `last-quote-date` holds a JSON `YYYY-MM-DD` string.
//! - `current-quote` holds one JSON quote.

use crate::model::calendar::CalendarDate;
use crate::model::quote::Quote;
use crate::repo::kv_repo::{KeyValueStore, RepoError, RepoResult};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Storage key for the ordered favorites set.
pub const FAVORITES_KEY: &str = "favorites";
/// Storage key for the date of the last automatic rotation.
pub const LAST_QUOTE_DATE_KEY: &str = "last-quote-date";
/// Storage key for the currently displayed quote.
pub const CURRENT_QUOTE_KEY: &str = "current-quote";

/// Quote state repository over any key/value backend.
pub struct QuoteStateRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> QuoteStateRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the backing store.
    pub fn into_inner(self) -> S {
        self.store
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads favorites; a missing key yields an empty list.
    pub fn load_favorites(&self) -> RepoResult<Vec<Quote>> {
        Ok(self.read_json(FAVORITES_KEY)?.unwrap_or_default())
    }

    pub fn save_favorites(&self, favorites: &[Quote]) -> RepoResult<()> {
        let encoded = encode(FAVORITES_KEY, favorites)?;
        self.store.set(FAVORITES_KEY, &encoded)
    }

    pub fn load_last_date(&self) -> RepoResult<Option<CalendarDate>> {
        self.read_json(LAST_QUOTE_DATE_KEY)
    }

    pub fn load_current(&self) -> RepoResult<Option<Quote>> {
        self.read_json(CURRENT_QUOTE_KEY)
    }

    /// Persists a manual pick without touching the rotation date.
    pub fn save_current(&self, quote: &Quote) -> RepoResult<()> {
        let encoded = encode(CURRENT_QUOTE_KEY, quote)?;
        self.store.set(CURRENT_QUOTE_KEY, &encoded)
    }

    /// Persists the rotation date together with the quote picked for it.
    pub fn save_rotation(&self, date: CalendarDate, quote: &Quote) -> RepoResult<()> {
        let encoded_date = encode(LAST_QUOTE_DATE_KEY, &date)?;
        let encoded_quote = encode(CURRENT_QUOTE_KEY, quote)?;
        self.store.set_many(&[
            (LAST_QUOTE_DATE_KEY, encoded_date.as_str()),
            (CURRENT_QUOTE_KEY, encoded_quote.as_str()),
        ])
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> RepoResult<Option<T>> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|err| RepoError::InvalidData {
                key: key.to_string(),
                message: err.to_string(),
            })
    }
}

fn encode<T: Serialize + ?Sized>(key: &str, value: &T) -> RepoResult<String> {
    serde_json::to_string(value).map_err(|err| RepoError::Encode {
        key: key.to_string(),
        message: err.to_string(),
    })
}
