//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate selection, persistence and host seams into lifecycle APIs.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod quote_service;
pub mod selection;
