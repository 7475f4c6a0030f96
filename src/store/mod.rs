//! Remote store module
//!
//! The hosted backend provides authentication and table persistence. The
//! `RemoteStore` trait covers what the entry repository needs from it; the
//! Supabase adapter is the one production implementation.

pub mod config;
pub mod supabase;
pub mod types;

#[cfg(test)]
pub mod testing;

use crate::error::Result;
use crate::journal::models::{EntryPatch, NewEntryRow, StockEntry};
use async_trait::async_trait;
use types::StoreUser;
use uuid::Uuid;

pub use config::StoreConfig;
pub use supabase::SupabaseStore;

/// Remote store operations consumed by the entry repository.
///
/// Row scoping is the store's job (row-level security on the hosted side);
/// implementations must not be asked to filter by user.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Current signed-in user, if any
    fn current_user(&self) -> Option<StoreUser>;

    /// All of the caller's entries, newest `created_at` first
    async fn fetch_entries(&self) -> Result<Vec<StockEntry>>;

    /// Insert one row; the store assigns id and timestamp fields
    async fn insert_entry(&self, row: NewEntryRow) -> Result<()>;

    /// Partial update filtered by exact id
    async fn update_entry(&self, id: Uuid, patch: EntryPatch) -> Result<()>;

    /// Delete filtered by exact id
    async fn delete_entry(&self, id: Uuid) -> Result<()>;
}
