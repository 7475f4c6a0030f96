//! Stock journal core
//!
//! The entry record types, the repository that owns the in-memory entry
//! list, the pure watchlist derivation, and the entry form state machine.

pub mod form;
pub mod models;
pub mod repository;
pub mod watchlist;
