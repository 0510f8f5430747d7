//! Subcommand handlers.
//!
//! Each invocation opens the store, initializes one lifecycle session and
//! runs a single action against it.

use crate::output::{self, OutputFormat};
use crate::platform::{ClipboardPlatform, TerminalNotifier};
use anyhow::{anyhow, bail, Context as _, Result};
use dailyquote_core::db::open_db;
use dailyquote_core::{
    FavoriteChange, Quote, QuoteCatalog, QuoteHost, QuoteService, QuoteStateRepository,
    ShareOutcome, SqliteKeyValueStore, SystemClock, ThreadRandom,
};
use std::path::PathBuf;

/// Shared command inputs.
pub struct Context {
    pub db_path: PathBuf,
    pub catalog: QuoteCatalog,
    pub format: OutputFormat,
}

pub fn today(ctx: &Context) -> Result<()> {
    with_session(ctx, |service| {
        let current = service.current_quote().cloned();
        let is_favorite = is_favorite(service, current.as_ref());
        output::print_current(current.as_ref(), is_favorite, ctx.format)
    })
}

pub fn next(ctx: &Context) -> Result<()> {
    with_session(ctx, |service| {
        let picked = service.get_new_quote();
        let is_favorite = is_favorite(service, picked.as_ref());
        output::print_current(picked.as_ref(), is_favorite, ctx.format)
    })
}

pub fn favorite(ctx: &Context, id: Option<&str>) -> Result<()> {
    with_session(ctx, |service| {
        let quote = resolve_quote(service, id)?;
        let change = service.toggle_favorite(&quote);
        output::print_favorite_change(&quote, change == FavoriteChange::Added, ctx.format)
    })
}

pub fn favorites(ctx: &Context) -> Result<()> {
    with_session(ctx, |service| {
        output::print_favorites(service.favorites(), ctx.format)
    })
}

pub fn share(ctx: &Context, id: Option<&str>) -> Result<()> {
    with_session(ctx, |service| {
        let quote = resolve_quote(service, id)?;
        match service.share_quote(&quote) {
            ShareOutcome::Failed => bail!("unable to share quote `{}`", quote.id),
            outcome => output::print_share(&quote, outcome, ctx.format),
        }
    })
}

type CliService<'h, 'conn> = QuoteService<'h, SqliteKeyValueStore<'conn>>;

fn with_session<T>(
    ctx: &Context,
    run: impl FnOnce(&mut CliService<'_, '_>) -> Result<T>,
) -> Result<T> {
    let conn = open_db(&ctx.db_path)
        .with_context(|| format!("failed to open quote store `{}`", ctx.db_path.display()))?;
    let host = QuoteHost::new(
        SystemClock,
        ThreadRandom,
        ClipboardPlatform,
        TerminalNotifier::new(ctx.format == OutputFormat::Text),
    );
    let mut service = QuoteService::new(
        QuoteStateRepository::new(SqliteKeyValueStore::new(&conn)),
        ctx.catalog.clone(),
        host,
    );
    service.initialize();

    let result = run(&mut service);
    service.teardown();
    result
}

fn is_favorite(service: &CliService<'_, '_>, quote: Option<&Quote>) -> bool {
    quote.is_some_and(|quote| service.is_favorite(&quote.id))
}

fn resolve_quote(service: &CliService<'_, '_>, id: Option<&str>) -> Result<Quote> {
    match id {
        Some(id) => service
            .catalog()
            .get(id)
            .or_else(|| service.favorites().iter().find(|fav| fav.id == id))
            .cloned()
            .ok_or_else(|| anyhow!("unknown quote id `{id}`")),
        None => service
            .current_quote()
            .cloned()
            .ok_or_else(|| anyhow!("no quote available; try `dailyquote next`")),
    }
}
