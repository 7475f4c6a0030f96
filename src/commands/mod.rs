//! Tauri IPC commands
//!
//! All commands exposed to the frontend via Tauri's invoke system.

pub mod auth;
pub mod entries;
pub mod form;
pub mod watchlist;
