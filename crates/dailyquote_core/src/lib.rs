//! Core domain logic for the daily quote app.
//! This crate owns quote rotation, favorites and share behavior; front ends
//! only render its state and forward user actions.

pub mod catalog;
pub mod config;
pub mod db;
pub mod host;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use catalog::{CatalogError, QuoteCatalog};
pub use config::CoreConfig;
pub use host::clock::{Clock, FixedClock, SystemClock};
pub use host::notify::{LogNotifier, Notice, NoticeVariant, Notifier, RecordingNotifier};
pub use host::random::{RandomSource, SeededRandom, SequenceRandom, ThreadRandom};
pub use host::share::{CapturingSharePlatform, ShareError, SharePlatform, ShareRequest};
pub use host::QuoteHost;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::calendar::CalendarDate;
pub use model::quote::{Quote, QuoteId, QuoteValidationError};
pub use repo::kv_repo::{
    KeyValueStore, MemoryKeyValueStore, RepoError, RepoResult, SqliteKeyValueStore,
};
pub use repo::quote_state_repo::QuoteStateRepository;
pub use service::quote_service::{FavoriteChange, LifecycleState, QuoteService, ShareOutcome};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
