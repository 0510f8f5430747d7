//! Repository layer for persisted quote state.
//!
//! # Responsibility
//! - Define the key/value storage contract used by the lifecycle service.
//! - Isolate SQLite and JSON encoding details from service orchestration.
//!
//! # Invariants
//! - Corrupt persisted values surface as `RepoError::InvalidData`, never as
//!   silently defaulted state; recovery is a service decision.

pub mod kv_repo;
pub mod quote_state_repo;
