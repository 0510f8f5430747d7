//! Pure quote selection rules.
//!
//! # Invariants
//! - Favorited quotes are skipped unless every catalog quote is a favorite.
//! - The current quote is skipped unless it is the only candidate left.
//! - Picks always come from the catalog.

use crate::catalog::QuoteCatalog;
use crate::host::random::RandomSource;
use crate::model::quote::Quote;

/// Computes the candidates for the next rotation.
///
/// Returns an empty pool only for an empty catalog.
pub fn candidate_pool<'a>(
    catalog: &'a QuoteCatalog,
    favorites: &[Quote],
    current: Option<&Quote>,
) -> Vec<&'a Quote> {
    let not_favorited: Vec<&Quote> = catalog
        .iter()
        .filter(|quote| !favorites.iter().any(|fav| fav.id == quote.id))
        .collect();
    let pool = if not_favorited.is_empty() {
        catalog.iter().collect()
    } else {
        not_favorited
    };

    match current {
        Some(current) if pool.len() > 1 => {
            let without_current: Vec<&Quote> = pool
                .iter()
                .copied()
                .filter(|quote| quote.id != current.id)
                .collect();
            if without_current.is_empty() {
                pool
            } else {
                without_current
            }
        }
        _ => pool,
    }
}

/// Picks one candidate uniformly; `None` for an empty pool.
pub fn pick_quote<'a, R: RandomSource + ?Sized>(
    pool: &[&'a Quote],
    random: &mut R,
) -> Option<&'a Quote> {
    if pool.is_empty() {
        return None;
    }
    let index = random.pick_index(pool.len());
    pool.get(index).copied()
}
