//! Host platform seams injected into the quote lifecycle.
//!
//! # Responsibility
//! - Abstract "today", randomness, sharing and user notices behind traits.
//! - Ship production implementations plus deterministic ones for tests.
//!
//! # Invariants
//! - Core logic never reads the wall clock or a global RNG directly.

pub mod clock;
pub mod notify;
pub mod random;
pub mod share;

use clock::Clock;
use notify::Notifier;
use random::RandomSource;
use share::SharePlatform;

/// Bundle of host seams owned by one lifecycle session.
pub struct QuoteHost<'h> {
    pub clock: Box<dyn Clock + 'h>,
    pub random: Box<dyn RandomSource + 'h>,
    pub share: Box<dyn SharePlatform + 'h>,
    pub notifier: Box<dyn Notifier + 'h>,
}

impl<'h> QuoteHost<'h> {
    pub fn new(
        clock: impl Clock + 'h,
        random: impl RandomSource + 'h,
        share: impl SharePlatform + 'h,
        notifier: impl Notifier + 'h,
    ) -> Self {
        Self {
            clock: Box::new(clock),
            random: Box::new(random),
            share: Box::new(share),
            notifier: Box::new(notifier),
        }
    }
}
