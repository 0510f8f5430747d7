//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the quote lifecycle to Dart via FRB as sync, use-case calls.
//! - Keep error semantics simple: envelopes with a human-readable message.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every call runs one initialized lifecycle session against the store.
//! - Clipboard delivery happens on the Dart side; share calls return the
//!   payload in the envelope.

use dailyquote_core::db::open_db;
use dailyquote_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    CapturingSharePlatform, CoreConfig, Notice, Quote, QuoteCatalog, QuoteHost, QuoteService,
    QuoteStateRepository, RecordingNotifier, ShareOutcome, SqliteKeyValueStore, SystemClock,
    ThreadRandom,
};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static QUOTE_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
/// - Idempotent for the same `level + log_dir`; conflicting reconfiguration
///   returns an error message.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Quote card payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteItem {
    pub id: String,
    pub text: String,
    pub author: String,
    pub source: Option<String>,
    /// Whether the heart icon renders filled.
    pub is_favorite: bool,
}

/// Response envelope for calls that resolve one quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteResponse {
    pub ok: bool,
    /// `None` renders the "no quote" placeholder.
    pub quote: Option<QuoteItem>,
    pub message: String,
}

/// Response envelope for favorite toggles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteResponse {
    pub ok: bool,
    /// Membership after the toggle.
    pub is_favorite: bool,
    /// Toast text for the UI.
    pub message: String,
}

/// Response envelope for the favorites page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoritesResponse {
    pub ok: bool,
    pub items: Vec<QuoteItem>,
    pub message: String,
}

/// Response envelope for share calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareResponse {
    pub ok: bool,
    /// Text the Dart side writes to the clipboard.
    pub clipboard_text: Option<String>,
    /// Toast text for the UI.
    pub message: String,
}

/// Returns today's quote, rotating it on a new calendar day.
#[flutter_rust_bridge::frb(sync)]
pub fn quote_today() -> QuoteResponse {
    quote_today_at(&resolve_quote_db_path())
}

/// Replaces the current quote (manual refresh).
#[flutter_rust_bridge::frb(sync)]
pub fn quote_next() -> QuoteResponse {
    quote_next_at(&resolve_quote_db_path())
}

/// Toggles favorite membership for a catalog quote.
#[flutter_rust_bridge::frb(sync)]
pub fn quote_toggle_favorite(quote_id: String) -> FavoriteResponse {
    quote_toggle_favorite_at(&resolve_quote_db_path(), quote_id.trim())
}

/// Returns whether a quote is a favorite; `false` when the store fails.
#[flutter_rust_bridge::frb(sync)]
pub fn quote_is_favorite(quote_id: String) -> bool {
    with_quote_service(&resolve_quote_db_path(), |service, _| {
        Ok(service.is_favorite(quote_id.trim()))
    })
    .unwrap_or(false)
}

/// Lists favorites in insertion order.
#[flutter_rust_bridge::frb(sync)]
pub fn quote_favorites() -> FavoritesResponse {
    quote_favorites_at(&resolve_quote_db_path())
}

/// Prepares a quote for sharing through the Dart clipboard.
#[flutter_rust_bridge::frb(sync)]
pub fn quote_share(quote_id: String) -> ShareResponse {
    quote_share_at(&resolve_quote_db_path(), quote_id.trim())
}

fn quote_today_at(db_path: &Path) -> QuoteResponse {
    quote_response(with_quote_service(db_path, |service, _| {
        Ok(service
            .current_quote()
            .map(|quote| to_quote_item(quote, service.is_favorite(&quote.id))))
    }))
}

fn quote_next_at(db_path: &Path) -> QuoteResponse {
    quote_response(with_quote_service(db_path, |service, _| {
        Ok(service.get_new_quote().map(|quote| {
            let is_favorite = service.is_favorite(&quote.id);
            to_quote_item(&quote, is_favorite)
        }))
    }))
}

fn quote_toggle_favorite_at(db_path: &Path, quote_id: &str) -> FavoriteResponse {
    let result = with_quote_service(db_path, |service, notifier| {
        let quote = find_quote(service, quote_id)?;
        service.toggle_favorite(&quote);
        Ok((service.is_favorite(quote_id), last_message(notifier)))
    });
    match result {
        Ok((is_favorite, message)) => FavoriteResponse {
            ok: true,
            is_favorite,
            message,
        },
        Err(err) => FavoriteResponse {
            ok: false,
            is_favorite: false,
            message: format!("quote_toggle_favorite failed: {err}"),
        },
    }
}

fn quote_favorites_at(db_path: &Path) -> FavoritesResponse {
    let result = with_quote_service(db_path, |service, _| {
        Ok(service
            .favorites()
            .iter()
            .map(|quote| to_quote_item(quote, true))
            .collect::<Vec<_>>())
    });
    match result {
        Ok(items) => {
            let message = if items.is_empty() {
                "No favorites yet.".to_string()
            } else {
                format!("Found {} favorite(s).", items.len())
            };
            FavoritesResponse {
                ok: true,
                items,
                message,
            }
        }
        Err(err) => FavoritesResponse {
            ok: false,
            items: Vec::new(),
            message: format!("quote_favorites failed: {err}"),
        },
    }
}

fn quote_share_at(db_path: &Path, quote_id: &str) -> ShareResponse {
    let share = CapturingSharePlatform::clipboard_only();
    let result = with_quote_service_sharing(db_path, &share, |service, notifier| {
        let quote = find_quote(service, quote_id)?;
        let outcome = service.share_quote(&quote);
        Ok((outcome, last_message(notifier)))
    });
    match result {
        Ok((outcome, message)) => ShareResponse {
            ok: outcome != ShareOutcome::Failed,
            clipboard_text: share.clipboard(),
            message,
        },
        Err(err) => ShareResponse {
            ok: false,
            clipboard_text: None,
            message: format!("quote_share failed: {err}"),
        },
    }
}

type FfiService<'h, 'conn> = QuoteService<'h, SqliteKeyValueStore<'conn>>;

fn with_quote_service<T>(
    db_path: &Path,
    f: impl FnOnce(&mut FfiService<'_, '_>, &RecordingNotifier) -> Result<T, String>,
) -> Result<T, String> {
    let share = CapturingSharePlatform::clipboard_only();
    with_quote_service_sharing(db_path, &share, f)
}

fn with_quote_service_sharing<T>(
    db_path: &Path,
    share: &CapturingSharePlatform,
    f: impl FnOnce(&mut FfiService<'_, '_>, &RecordingNotifier) -> Result<T, String>,
) -> Result<T, String> {
    let conn = open_db(db_path).map_err(|err| format!("quote DB open failed: {err}"))?;
    let notifier = RecordingNotifier::new();
    let mut service = QuoteService::new(
        QuoteStateRepository::new(SqliteKeyValueStore::new(&conn)),
        QuoteCatalog::builtin(),
        QuoteHost::new(SystemClock, ThreadRandom, share, &notifier),
    );
    service.initialize();
    let result = f(&mut service, &notifier);
    service.teardown();
    result
}

fn quote_response(result: Result<Option<QuoteItem>, String>) -> QuoteResponse {
    match result {
        Ok(Some(item)) => QuoteResponse {
            ok: true,
            quote: Some(item),
            message: "Quote ready.".to_string(),
        },
        Ok(None) => QuoteResponse {
            ok: true,
            quote: None,
            message: "No quote available. Try refreshing.".to_string(),
        },
        Err(err) => QuoteResponse {
            ok: false,
            quote: None,
            message: err,
        },
    }
}

fn find_quote(service: &FfiService<'_, '_>, quote_id: &str) -> Result<Quote, String> {
    service
        .catalog()
        .get(quote_id)
        .or_else(|| service.favorites().iter().find(|fav| fav.id == quote_id))
        .cloned()
        .ok_or_else(|| format!("unknown quote id `{quote_id}`"))
}

fn last_message(notifier: &RecordingNotifier) -> String {
    notifier
        .last()
        .map(Notice::message)
        .unwrap_or_default()
        .to_string()
}

fn to_quote_item(quote: &Quote, is_favorite: bool) -> QuoteItem {
    QuoteItem {
        id: quote.id.clone(),
        text: quote.text.clone(),
        author: quote.author.clone(),
        source: quote.source.clone(),
        is_favorite,
    }
}

fn resolve_quote_db_path() -> PathBuf {
    QUOTE_DB_PATH
        .get_or_init(|| match CoreConfig::from_env() {
            Ok(config) => config.db_path,
            Err(_) => dailyquote_core::config::default_db_path(),
        })
        .clone()
}
