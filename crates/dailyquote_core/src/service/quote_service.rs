//! Quote lifecycle service.
//!
//! # Responsibility
//! - Own the current quote and the favorites set for one UI session.
//! - Rotate the current quote once per calendar day or on demand.
//! - Provide favorite and share actions with user notices.
//!
//! # Invariants
//! - Storage and host failures are absorbed here; no operation returns an
//!   error to the presentation layer.
//! - The current quote, when present, is a catalog member.
//! - Favorites never hold two quotes with the same id.
//! - The rotation date is written only by the day-rollover branch of
//!   `initialize`, together with the quote picked for it.

use crate::catalog::QuoteCatalog;
use crate::host::notify::Notice;
use crate::host::share::ShareRequest;
use crate::host::QuoteHost;
use crate::model::calendar::CalendarDate;
use crate::model::quote::Quote;
use crate::repo::kv_repo::KeyValueStore;
use crate::repo::quote_state_repo::QuoteStateRepository;
use crate::service::selection::{candidate_pool, pick_quote};
use log::{error, info, warn};
use std::collections::HashSet;
use std::time::Instant;

/// Lifecycle of the current quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Constructed; storage not read yet.
    Uninitialized,
    /// A quote is being resolved.
    Loading,
    /// Resolution finished; the current quote may still be `None`.
    Ready,
}

/// Result of toggling a favorite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteChange {
    Added,
    Removed,
}

/// Result of a share attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    CopiedToClipboard,
    Failed,
}

/// How `initialize` resolved the current quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InitBranch {
    Restored,
    Rotated,
    Fallback,
}

impl InitBranch {
    fn as_str(self) -> &'static str {
        match self {
            Self::Restored => "restored",
            Self::Rotated => "rotated",
            Self::Fallback => "fallback",
        }
    }
}

/// Session-scoped quote lifecycle manager.
pub struct QuoteService<'h, S: KeyValueStore> {
    repo: QuoteStateRepository<S>,
    catalog: QuoteCatalog,
    host: QuoteHost<'h>,
    current: Option<Quote>,
    favorites: Vec<Quote>,
    state: LifecycleState,
}

impl<'h, S: KeyValueStore> QuoteService<'h, S> {
    /// Creates an uninitialized session; call `initialize` before use.
    pub fn new(repo: QuoteStateRepository<S>, catalog: QuoteCatalog, host: QuoteHost<'h>) -> Self {
        Self {
            repo,
            catalog,
            host,
            current: None,
            favorites: Vec::new(),
            state: LifecycleState::Uninitialized,
        }
    }

    /// Loads persisted state and resolves today's quote.
    ///
    /// # Contract
    /// - Corrupt or missing favorites load as an empty set.
    /// - A missing, unreadable or stale rotation date triggers a new pick,
    ///   persisted together with today's date.
    /// - On the same day, the stored quote is restored without consulting
    ///   the random source; a missing, corrupt or unknown stored quote falls
    ///   back to a new pick that leaves the date untouched.
    pub fn initialize(&mut self) -> Option<&Quote> {
        let started_at = Instant::now();
        self.state = LifecycleState::Loading;
        self.favorites = self.load_favorites_or_default();

        let today = self.host.clock.today();
        let branch = match self.repo.load_last_date() {
            Ok(Some(last_date)) if last_date == today => match self.restore_current() {
                Some(quote) => {
                    self.current = Some(quote);
                    InitBranch::Restored
                }
                None => {
                    self.get_new_quote();
                    InitBranch::Fallback
                }
            },
            Ok(_) => {
                self.rotate_for_day(today);
                InitBranch::Rotated
            }
            Err(err) => {
                warn!(
                    "event=quote_init module=service status=degraded reason=last_date_unreadable error={err}"
                );
                self.rotate_for_day(today);
                InitBranch::Rotated
            }
        };

        self.state = LifecycleState::Ready;
        info!(
            "event=quote_init module=service status=ok branch={} favorites={} has_quote={} duration_ms={}",
            branch.as_str(),
            self.favorites.len(),
            self.current.is_some(),
            started_at.elapsed().as_millis()
        );
        self.current.as_ref()
    }

    /// Picks and persists a new current quote.
    ///
    /// Returns `None` only when the catalog is empty. The rotation date is
    /// not updated.
    pub fn get_new_quote(&mut self) -> Option<Quote> {
        self.state = LifecycleState::Loading;

        let picked = self.pick_next();
        if let Some(quote) = &picked {
            if let Err(err) = self.repo.save_current(quote) {
                error!(
                    "event=quote_rotate module=service status=error error_code=persist_failed error={err}"
                );
            }
        } else {
            warn!("event=quote_rotate module=service status=empty reason=no_quote_available");
        }
        self.current = picked.clone();

        self.state = LifecycleState::Ready;
        picked
    }

    /// Adds the quote to favorites, or removes it when already present.
    ///
    /// The updated set is persisted in both cases.
    pub fn toggle_favorite(&mut self, quote: &Quote) -> FavoriteChange {
        let change = match self.favorites.iter().position(|fav| fav.id == quote.id) {
            Some(index) => {
                self.favorites.remove(index);
                FavoriteChange::Removed
            }
            None => {
                self.favorites.push(quote.clone());
                FavoriteChange::Added
            }
        };

        self.host.notifier.notify(match change {
            FavoriteChange::Added => Notice::FavoriteAdded,
            FavoriteChange::Removed => Notice::FavoriteRemoved,
        });

        if let Err(err) = self.repo.save_favorites(&self.favorites) {
            error!(
                "event=favorite_toggle module=service status=error error_code=persist_failed error={err}"
            );
        }
        change
    }

    /// Toggles the current quote; no-op without one.
    pub fn toggle_current_favorite(&mut self) -> Option<FavoriteChange> {
        let quote = self.current.clone()?;
        Some(self.toggle_favorite(&quote))
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.iter().any(|fav| fav.id == id)
    }

    /// Shares the quote natively, or copies it to the clipboard when the
    /// host has no share facility.
    ///
    /// Failures are logged and reported as `Notice::ShareFailed`.
    pub fn share_quote(&self, quote: &Quote) -> ShareOutcome {
        let text = quote.share_text();
        let share = &self.host.share;

        let result = if share.supports_native_share() {
            share
                .share(&ShareRequest::new(text))
                .map(|()| ShareOutcome::Shared)
        } else {
            share
                .copy_to_clipboard(&text)
                .map(|()| ShareOutcome::CopiedToClipboard)
        };

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(err) => {
                error!("event=quote_share module=service status=error error={err}");
                ShareOutcome::Failed
            }
        };

        self.host.notifier.notify(match outcome {
            ShareOutcome::Shared => Notice::Shared,
            ShareOutcome::CopiedToClipboard => Notice::CopiedToClipboard,
            ShareOutcome::Failed => Notice::ShareFailed,
        });
        outcome
    }

    /// Shares the current quote; no-op without one.
    pub fn share_current(&self) -> Option<ShareOutcome> {
        let quote = self.current.as_ref()?;
        Some(self.share_quote(quote))
    }

    pub fn current_quote(&self) -> Option<&Quote> {
        self.current.as_ref()
    }

    pub fn favorites(&self) -> &[Quote] {
        &self.favorites
    }

    /// True until `initialize` completes and while a rotation runs.
    pub fn is_loading(&self) -> bool {
        self.state != LifecycleState::Ready
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn catalog(&self) -> &QuoteCatalog {
        &self.catalog
    }

    /// Ends the session and hands back the state repository.
    pub fn teardown(self) -> QuoteStateRepository<S> {
        info!(
            "event=quote_teardown module=service status=ok favorites={} has_quote={}",
            self.favorites.len(),
            self.current.is_some()
        );
        self.repo
    }

    fn pick_next(&mut self) -> Option<Quote> {
        let pool = candidate_pool(&self.catalog, &self.favorites, self.current.as_ref());
        pick_quote(&pool, self.host.random.as_mut()).cloned()
    }

    fn rotate_for_day(&mut self, today: CalendarDate) {
        self.state = LifecycleState::Loading;
        self.current = self.pick_next();

        match &self.current {
            Some(quote) => {
                if let Err(err) = self.repo.save_rotation(today, quote) {
                    error!(
                        "event=quote_rotate module=service status=error error_code=persist_failed error={err}"
                    );
                }
            }
            None => {
                warn!("event=quote_rotate module=service status=empty reason=no_quote_available");
            }
        }
    }

    fn load_favorites_or_default(&self) -> Vec<Quote> {
        match self.repo.load_favorites() {
            Ok(favorites) => dedupe_by_id(favorites),
            Err(err) => {
                error!(
                    "event=favorites_load module=service status=error error_code=favorites_unreadable error={err}"
                );
                Vec::new()
            }
        }
    }

    fn restore_current(&self) -> Option<Quote> {
        match self.repo.load_current() {
            Ok(Some(stored)) => match self.catalog.get(&stored.id) {
                Some(quote) => Some(quote.clone()),
                None => {
                    warn!(
                        "event=quote_restore module=service status=degraded reason=not_in_catalog"
                    );
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                error!(
                    "event=quote_restore module=service status=error error_code=current_unreadable error={err}"
                );
                None
            }
        }
    }
}

fn dedupe_by_id(favorites: Vec<Quote>) -> Vec<Quote> {
    let mut seen = HashSet::with_capacity(favorites.len());
    let total = favorites.len();
    let unique: Vec<Quote> = favorites
        .into_iter()
        .filter(|quote| seen.insert(quote.id.clone()))
        .collect();
    if unique.len() != total {
        warn!(
            "event=favorites_load module=service status=degraded reason=duplicate_ids dropped={}",
            total - unique.len()
        );
    }
    unique
}
