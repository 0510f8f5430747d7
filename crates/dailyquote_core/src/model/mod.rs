//! Domain model for the daily quote core.
//!
//! # Responsibility
//! - Define the canonical quote record shared by every front end.
//! - Define the calendar date used to decide daily rotation.
//!
//! # Invariants
//! - Every quote is identified by a stable, catalog-unique `QuoteId`.
//! - Quotes are immutable once they are part of a catalog.

pub mod calendar;
pub mod quote;
