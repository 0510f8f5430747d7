use dailyquote_core::db::open_db_in_memory;
use dailyquote_core::repo::quote_state_repo::{
    CURRENT_QUOTE_KEY, FAVORITES_KEY, LAST_QUOTE_DATE_KEY,
};
use dailyquote_core::{
    CalendarDate, CapturingSharePlatform, FavoriteChange, FixedClock, KeyValueStore,
    LifecycleState, MemoryKeyValueStore, Notice, Quote, QuoteCatalog, QuoteHost, QuoteService,
    QuoteStateRepository, RecordingNotifier, RepoError, RepoResult, SeededRandom, SequenceRandom,
    ShareError, ShareOutcome, SqliteKeyValueStore,
};

fn today() -> CalendarDate {
    CalendarDate::from_ymd(2026, 10, 18).unwrap()
}

fn quote_json(quote: &Quote) -> String {
    serde_json::to_string(quote).unwrap()
}

fn date_json(date: CalendarDate) -> String {
    format!("\"{date}\"")
}

fn small_catalog(ids: &[&str]) -> QuoteCatalog {
    QuoteCatalog::from_quotes(
        ids.iter()
            .map(|id| Quote::new(*id, format!("Quote number {id}."), "Someone"))
            .collect(),
    )
    .unwrap()
}

fn service_with<'h>(
    store: &'h MemoryKeyValueStore,
    catalog: QuoteCatalog,
    clock: &'h FixedClock,
    random: &'h mut SequenceRandom,
    share: &'h CapturingSharePlatform,
    notifier: &'h RecordingNotifier,
) -> QuoteService<'h, &'h MemoryKeyValueStore> {
    QuoteService::new(
        QuoteStateRepository::new(store),
        catalog,
        QuoteHost::new(clock, random, share, notifier),
    )
}

#[test]
fn single_quote_catalog_always_returns_that_quote() {
    let store = MemoryKeyValueStore::new();
    let clock = FixedClock::new(today());
    let mut random = SequenceRandom::new([7, 3, 11]);
    let share = CapturingSharePlatform::clipboard_only();
    let notifier = RecordingNotifier::new();
    let mut service = service_with(
        &store,
        small_catalog(&["1"]),
        &clock,
        &mut random,
        &share,
        &notifier,
    );

    assert_eq!(service.initialize().map(|quote| quote.id.clone()), Some("1".to_string()));
    for _ in 0..3 {
        assert_eq!(service.get_new_quote().unwrap().id, "1");
    }
}

#[test]
fn same_day_initialize_restores_stored_quote_without_random_pick() {
    let catalog = QuoteCatalog::builtin();
    let stored = catalog.get("7").unwrap().clone();
    let store = MemoryKeyValueStore::with_entries([
        (LAST_QUOTE_DATE_KEY, date_json(today()).as_str()),
        (CURRENT_QUOTE_KEY, quote_json(&stored).as_str()),
    ]);
    let clock = FixedClock::new(today());
    let mut random = SequenceRandom::default();
    let share = CapturingSharePlatform::clipboard_only();
    let notifier = RecordingNotifier::new();

    {
        let mut service = service_with(&store, catalog, &clock, &mut random, &share, &notifier);
        assert_eq!(service.initialize(), Some(&stored));
        assert_eq!(service.state(), LifecycleState::Ready);
        assert!(!service.is_loading());
    }

    assert_eq!(random.calls(), 0);
}

#[test]
fn day_rollover_overwrites_stored_date_and_quote() {
    let catalog = QuoteCatalog::builtin();
    let yesterday_quote = catalog.get("4").unwrap().clone();
    let store = MemoryKeyValueStore::with_entries([
        (LAST_QUOTE_DATE_KEY, date_json(today().previous_day()).as_str()),
        (CURRENT_QUOTE_KEY, quote_json(&yesterday_quote).as_str()),
    ]);
    let clock = FixedClock::new(today());
    let mut random = SequenceRandom::new([0]);
    let share = CapturingSharePlatform::clipboard_only();
    let notifier = RecordingNotifier::new();

    let picked = {
        let mut service = service_with(&store, catalog, &clock, &mut random, &share, &notifier);
        service.initialize().cloned().unwrap()
    };

    assert_eq!(picked.id, "1");
    assert_eq!(random.calls(), 1);
    let snapshot = store.snapshot();
    assert_eq!(snapshot[LAST_QUOTE_DATE_KEY], date_json(today()));
    assert_eq!(snapshot[CURRENT_QUOTE_KEY], quote_json(&picked));
}

#[test]
fn missing_date_selects_quote_and_records_today() {
    let store = MemoryKeyValueStore::new();
    let clock = FixedClock::new(today());
    let mut random = SeededRandom::new(1);
    let share = CapturingSharePlatform::clipboard_only();
    let notifier = RecordingNotifier::new();

    let mut service = QuoteService::new(
        QuoteStateRepository::new(&store),
        QuoteCatalog::builtin(),
        QuoteHost::new(&clock, &mut random, &share, &notifier),
    );
    let picked = service.initialize().cloned().expect("builtin catalog has quotes");
    drop(service);

    assert!(QuoteCatalog::builtin().contains(&picked.id));
    let repo = QuoteStateRepository::new(&store);
    assert_eq!(repo.load_last_date().unwrap(), Some(today()));
    assert_eq!(repo.load_current().unwrap(), Some(picked));
}

#[test]
fn same_day_with_corrupt_current_quote_falls_back_without_touching_date() {
    let stored_date = today();
    let store = MemoryKeyValueStore::with_entries([
        (LAST_QUOTE_DATE_KEY, date_json(stored_date).as_str()),
        (CURRENT_QUOTE_KEY, "{not json"),
    ]);
    let clock = FixedClock::new(today());
    let mut random = SequenceRandom::new([1]);
    let share = CapturingSharePlatform::clipboard_only();
    let notifier = RecordingNotifier::new();

    let picked = {
        let mut service = service_with(
            &store,
            small_catalog(&["a", "b", "c"]),
            &clock,
            &mut random,
            &share,
            &notifier,
        );
        service.initialize().cloned().unwrap()
    };

    assert_eq!(picked.id, "b");
    let snapshot = store.snapshot();
    assert_eq!(snapshot[CURRENT_QUOTE_KEY], quote_json(&picked));
    assert_eq!(snapshot[LAST_QUOTE_DATE_KEY], date_json(stored_date));
}

#[test]
fn stored_quote_missing_from_catalog_is_replaced() {
    let stale = Quote::new("retired", "Gone but not forgotten.", "Nobody");
    let store = MemoryKeyValueStore::with_entries([
        (LAST_QUOTE_DATE_KEY, date_json(today()).as_str()),
        (CURRENT_QUOTE_KEY, quote_json(&stale).as_str()),
    ]);
    let clock = FixedClock::new(today());
    let mut random = SequenceRandom::default();
    let share = CapturingSharePlatform::clipboard_only();
    let notifier = RecordingNotifier::new();
    let mut service = service_with(
        &store,
        small_catalog(&["x", "y"]),
        &clock,
        &mut random,
        &share,
        &notifier,
    );

    let current = service.initialize().cloned().unwrap();
    assert!(service.catalog().contains(&current.id));
}

#[test]
fn corrupt_favorites_load_as_empty_set() {
    let store = MemoryKeyValueStore::with_entries([(FAVORITES_KEY, "[{\"id\":1}]")]);
    let clock = FixedClock::new(today());
    let mut random = SequenceRandom::default();
    let share = CapturingSharePlatform::clipboard_only();
    let notifier = RecordingNotifier::new();
    let mut service = service_with(
        &store,
        QuoteCatalog::builtin(),
        &clock,
        &mut random,
        &share,
        &notifier,
    );

    assert!(service.initialize().is_some());
    assert!(service.favorites().is_empty());
}

#[test]
fn new_quote_skips_favorites_and_current() {
    let catalog = small_catalog(&["1", "2", "3", "4"]);
    let favorite = catalog.get("1").unwrap().clone();
    let store = MemoryKeyValueStore::with_entries([(
        FAVORITES_KEY,
        serde_json::to_string(&vec![favorite.clone()]).unwrap().as_str(),
    )]);
    let clock = FixedClock::new(today());
    let mut random = SeededRandom::new(99);
    let share = CapturingSharePlatform::clipboard_only();
    let notifier = RecordingNotifier::new();
    let mut service = QuoteService::new(
        QuoteStateRepository::new(&store),
        catalog,
        QuoteHost::new(&clock, &mut random, &share, &notifier),
    );
    service.initialize();

    for _ in 0..100 {
        let previous = service.current_quote().cloned().unwrap();
        let next = service.get_new_quote().unwrap();
        assert_ne!(next.id, favorite.id);
        assert_ne!(next.id, previous.id);
        assert!(service.catalog().contains(&next.id));
    }
}

#[test]
fn new_quote_repeats_current_when_it_is_the_only_non_favorite() {
    let catalog = small_catalog(&["1", "2"]);
    let favorite = catalog.get("1").unwrap().clone();
    let store = MemoryKeyValueStore::with_entries([(
        FAVORITES_KEY,
        serde_json::to_string(&vec![favorite]).unwrap().as_str(),
    )]);
    let clock = FixedClock::new(today());
    let mut random = SequenceRandom::default();
    let share = CapturingSharePlatform::clipboard_only();
    let notifier = RecordingNotifier::new();
    let mut service = service_with(&store, catalog, &clock, &mut random, &share, &notifier);

    assert_eq!(service.initialize().unwrap().id, "2");
    assert_eq!(service.get_new_quote().unwrap().id, "2");
}

#[test]
fn manual_refresh_updates_current_but_not_rotation_date() {
    let store = MemoryKeyValueStore::new();
    let clock = FixedClock::new(today());
    let mut random = SequenceRandom::new([0, 0]);
    let share = CapturingSharePlatform::clipboard_only();
    let notifier = RecordingNotifier::new();

    let refreshed = {
        let mut service = service_with(
            &store,
            small_catalog(&["1", "2", "3"]),
            &clock,
            &mut random,
            &share,
            &notifier,
        );
        service.initialize();
        store.remove(LAST_QUOTE_DATE_KEY).unwrap();
        service.get_new_quote().unwrap()
    };

    assert_eq!(refreshed.id, "2");
    let snapshot = store.snapshot();
    assert_eq!(snapshot[CURRENT_QUOTE_KEY], quote_json(&refreshed));
    assert!(!snapshot.contains_key(LAST_QUOTE_DATE_KEY));
}

#[test]
fn empty_catalog_yields_no_quote() {
    let store = MemoryKeyValueStore::new();
    let clock = FixedClock::new(today());
    let mut random = SequenceRandom::default();
    let share = CapturingSharePlatform::clipboard_only();
    let notifier = RecordingNotifier::new();
    let mut service = service_with(
        &store,
        QuoteCatalog::from_quotes(Vec::new()).unwrap(),
        &clock,
        &mut random,
        &share,
        &notifier,
    );

    assert!(service.initialize().is_none());
    assert!(service.get_new_quote().is_none());
    assert!(!service.is_loading());
    assert!(store.snapshot().is_empty());
}

#[test]
fn toggle_favorite_twice_restores_prior_set_and_persists() {
    let catalog = QuoteCatalog::builtin();
    let existing = catalog.get("3").unwrap().clone();
    let target = catalog.get("8").unwrap().clone();
    let store = MemoryKeyValueStore::with_entries([(
        FAVORITES_KEY,
        serde_json::to_string(&vec![existing.clone()]).unwrap().as_str(),
    )]);
    let clock = FixedClock::new(today());
    let mut random = SequenceRandom::default();
    let share = CapturingSharePlatform::clipboard_only();
    let notifier = RecordingNotifier::new();
    let mut service = service_with(&store, catalog, &clock, &mut random, &share, &notifier);
    service.initialize();
    let before = service.favorites().to_vec();

    assert_eq!(service.toggle_favorite(&target), FavoriteChange::Added);
    assert!(service.is_favorite(&target.id));
    let persisted: Vec<Quote> =
        serde_json::from_str(&store.get(FAVORITES_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(persisted, vec![existing.clone(), target.clone()]);

    assert_eq!(service.toggle_favorite(&target), FavoriteChange::Removed);
    assert!(!service.is_favorite(&target.id));
    assert_eq!(service.favorites(), before.as_slice());
    let persisted: Vec<Quote> =
        serde_json::from_str(&store.get(FAVORITES_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(persisted, before);

    assert_eq!(
        notifier.notices(),
        vec![Notice::FavoriteAdded, Notice::FavoriteRemoved]
    );
}

#[test]
fn is_favorite_tracks_persisted_membership_across_sessions() {
    let store = MemoryKeyValueStore::new();
    let clock = FixedClock::new(today());
    let share = CapturingSharePlatform::clipboard_only();
    let notifier = RecordingNotifier::new();
    let catalog = QuoteCatalog::builtin();
    let toggles = ["2", "5", "2", "11", "5", "12"];

    {
        let mut random = SequenceRandom::default();
        let mut service = service_with(
            &store,
            catalog.clone(),
            &clock,
            &mut random,
            &share,
            &notifier,
        );
        service.initialize();
        for id in toggles {
            let quote = catalog.get(id).unwrap().clone();
            service.toggle_favorite(&quote);
        }
    }

    let mut random = SequenceRandom::default();
    let mut reopened =
        service_with(&store, catalog.clone(), &clock, &mut random, &share, &notifier);
    reopened.initialize();
    let ids: Vec<&str> = reopened
        .favorites()
        .iter()
        .map(|quote| quote.id.as_str())
        .collect();
    assert_eq!(ids, vec!["11", "12"]);
    for quote in catalog.iter() {
        assert_eq!(
            reopened.is_favorite(&quote.id),
            ids.contains(&quote.id.as_str())
        );
    }
}

#[test]
fn share_without_native_facility_copies_exact_text() {
    let quote = Quote::new(
        "1",
        "The only way to do great work is to love what you do.",
        "Steve Jobs",
    );
    let store = MemoryKeyValueStore::new();
    let clock = FixedClock::new(today());
    let mut random = SequenceRandom::default();
    let share = CapturingSharePlatform::clipboard_only();
    let notifier = RecordingNotifier::new();
    let service = service_with(
        &store,
        QuoteCatalog::builtin(),
        &clock,
        &mut random,
        &share,
        &notifier,
    );

    assert_eq!(service.share_quote(&quote), ShareOutcome::CopiedToClipboard);
    assert_eq!(
        share.clipboard().as_deref(),
        Some("\"The only way to do great work is to love what you do.\" — Steve Jobs")
    );
    assert!(share.shared().is_empty());
    assert_eq!(notifier.last(), Some(Notice::CopiedToClipboard));
}

#[test]
fn native_share_uses_title_and_reports_success() {
    let quote = Quote::new("3", "Less, but better.", "Dieter Rams");
    let store = MemoryKeyValueStore::new();
    let clock = FixedClock::new(today());
    let mut random = SequenceRandom::default();
    let share = CapturingSharePlatform::with_native_share();
    let notifier = RecordingNotifier::new();
    let service = service_with(
        &store,
        QuoteCatalog::builtin(),
        &clock,
        &mut random,
        &share,
        &notifier,
    );

    assert_eq!(service.share_quote(&quote), ShareOutcome::Shared);
    let shared = share.shared();
    assert_eq!(shared.len(), 1);
    assert_eq!(shared[0].title, "Inspiring Quote");
    assert_eq!(shared[0].text, "\"Less, but better.\" — Dieter Rams");
    assert_eq!(share.clipboard(), None);
    assert_eq!(notifier.last(), Some(Notice::Shared));
}

#[test]
fn share_failure_is_reported_and_leaves_state_unchanged() {
    let store = MemoryKeyValueStore::new();
    let clock = FixedClock::new(today());
    let mut random = SequenceRandom::default();
    let share = CapturingSharePlatform::with_native_share().failing(ShareError::Cancelled);
    let notifier = RecordingNotifier::new();
    let mut service = service_with(
        &store,
        QuoteCatalog::builtin(),
        &clock,
        &mut random,
        &share,
        &notifier,
    );
    let current = service.initialize().cloned();
    let before = store.snapshot();

    assert_eq!(service.share_current(), Some(ShareOutcome::Failed));
    assert_eq!(notifier.last(), Some(Notice::ShareFailed));
    assert_eq!(service.current_quote().cloned(), current);
    assert_eq!(store.snapshot(), before);
}

struct ReadOnlyStore {
    inner: MemoryKeyValueStore,
}

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, _value: &str) -> RepoResult<()> {
        Err(RepoError::Encode {
            key: key.to_string(),
            message: "read-only store".to_string(),
        })
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> RepoResult<()> {
        let key = entries.first().map(|(key, _)| *key).unwrap_or_default();
        self.set(key, "")
    }

    fn remove(&self, key: &str) -> RepoResult<()> {
        self.set(key, "")
    }
}

#[test]
fn write_failures_do_not_break_the_session() {
    let clock = FixedClock::new(today());
    let share = CapturingSharePlatform::clipboard_only();
    let notifier = RecordingNotifier::new();
    let mut service = QuoteService::new(
        QuoteStateRepository::new(ReadOnlyStore {
            inner: MemoryKeyValueStore::new(),
        }),
        QuoteCatalog::builtin(),
        QuoteHost::new(&clock, SequenceRandom::default(), &share, &notifier),
    );

    let first = service.initialize().cloned().unwrap();
    let change = service.toggle_current_favorite();
    assert_eq!(change, Some(FavoriteChange::Added));
    assert!(service.is_favorite(&first.id));
    let next = service.get_new_quote().unwrap();
    assert_ne!(next.id, first.id);
}

#[test]
fn sqlite_backed_session_survives_restart_on_same_day() {
    let conn = open_db_in_memory().unwrap();
    let clock = FixedClock::new(today());
    let share = CapturingSharePlatform::clipboard_only();
    let notifier = RecordingNotifier::new();

    let first = {
        let mut random = SequenceRandom::new([4]);
        let mut service = QuoteService::new(
            QuoteStateRepository::new(SqliteKeyValueStore::new(&conn)),
            QuoteCatalog::builtin(),
            QuoteHost::new(&clock, &mut random, &share, &notifier),
        );
        let first = service.initialize().cloned().unwrap();
        service.toggle_favorite(&first);
        service.teardown();
        first
    };
    assert_eq!(first.id, "5");

    let mut random = SequenceRandom::new([0]);
    let mut service = QuoteService::new(
        QuoteStateRepository::new(SqliteKeyValueStore::new(&conn)),
        QuoteCatalog::builtin(),
        QuoteHost::new(&clock, &mut random, &share, &notifier),
    );
    assert_eq!(service.initialize(), Some(&first));
    assert!(service.is_favorite(&first.id));

    clock.advance_day();
    let mut next_day = QuoteService::new(
        QuoteStateRepository::new(SqliteKeyValueStore::new(&conn)),
        QuoteCatalog::builtin(),
        QuoteHost::new(&clock, SequenceRandom::new([4]), &share, &notifier),
    );
    let rotated = next_day.initialize().cloned().unwrap();
    assert_ne!(rotated.id, first.id);
    assert_eq!(
        QuoteStateRepository::new(SqliteKeyValueStore::new(&conn))
            .load_last_date()
            .unwrap(),
        Some(today().next_day())
    );
}
