//! Flutter bridge for the daily quote core.

pub mod api;
