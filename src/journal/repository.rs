//! Entry repository
//!
//! Single source of truth for the signed-in user's entry list, and the only
//! component that talks to the remote store. Every write operation triggers
//! a full refetch instead of patching the list locally, trading a round trip
//! for a list that always matches the store.

use crate::error::{AppError, Result};
use crate::journal::models::{EntryPatch, EntryPayload, NewEntryRow, StockEntry};
use crate::store::RemoteStore;
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// Snapshot of the repository state for the presentation layer
#[derive(Debug, Clone, Serialize)]
pub struct EntriesSnapshot {
    pub entries: Vec<StockEntry>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct EntryRepository {
    store: Arc<dyn RemoteStore>,
    entries: RwLock<Vec<StockEntry>>,
    /// Sticky fetch error, cleared by the next successful fetch
    error: RwLock<Option<String>>,
    loading: AtomicBool,
    issued_fetches: AtomicU64,
    /// Sequence of the last installed fetch; written under the entries lock
    applied_fetch: AtomicU64,
}

impl EntryRepository {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self {
            store,
            entries: RwLock::new(Vec::new()),
            error: RwLock::new(None),
            loading: AtomicBool::new(false),
            issued_fetches: AtomicU64::new(0),
            applied_fetch: AtomicU64::new(0),
        }
    }

    /// Refresh the list from the store.
    ///
    /// Failures are recorded on the repository (and logged) instead of
    /// returned; the previous list is kept until a fetch succeeds again.
    pub async fn fetch_entries(&self) {
        let seq = self.issued_fetches.fetch_add(1, Ordering::SeqCst) + 1;
        self.loading.store(true, Ordering::SeqCst);

        let result = self.store.fetch_entries().await;
        self.apply_fetch(seq, result);

        self.loading.store(false, Ordering::SeqCst);
    }

    /// Create a new entry for the signed-in user, then resynchronize
    pub async fn insert_entry(&self, payload: EntryPayload) -> Result<()> {
        let user = self
            .store
            .current_user()
            .ok_or_else(|| AppError::Auth("User not authenticated".to_string()))?;

        if let Err(e) = self
            .store
            .insert_entry(NewEntryRow::from_payload(payload, user.id))
            .await
        {
            tracing::error!("Failed to insert entry: {}", e);
            return Err(e);
        }

        self.fetch_entries().await;
        Ok(())
    }

    /// Apply a partial update to the entry with the given id, then
    /// resynchronize
    pub async fn update_entry(&self, id: Uuid, patch: EntryPatch) -> Result<()> {
        if let Err(e) = self.store.update_entry(id, patch).await {
            tracing::error!("Failed to update entry {}: {}", id, e);
            return Err(e);
        }

        self.fetch_entries().await;
        Ok(())
    }

    /// Delete the entry with the given id, then resynchronize
    pub async fn delete_entry(&self, id: Uuid) -> Result<()> {
        if let Err(e) = self.store.delete_entry(id).await {
            tracing::error!("Failed to delete entry {}: {}", id, e);
            return Err(e);
        }

        self.fetch_entries().await;
        Ok(())
    }

    /// Drop all local state, used when the session ends
    pub fn reset(&self) {
        *self.entries.write() = Vec::new();
        *self.error.write() = None;
    }

    pub fn entries(&self) -> Vec<StockEntry> {
        self.entries.read().clone()
    }

    pub fn entry_by_id(&self, id: Uuid) -> Option<StockEntry> {
        self.entries.read().iter().find(|e| e.id == id).cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub fn last_error(&self) -> Option<String> {
        self.error.read().clone()
    }

    pub fn snapshot(&self) -> EntriesSnapshot {
        EntriesSnapshot {
            entries: self.entries(),
            loading: self.is_loading(),
            error: self.last_error(),
        }
    }

    // A fetch outcome is installed only if no later-issued fetch has been
    // applied yet, so a slow stale response cannot clobber fresher data.
    fn apply_fetch(&self, seq: u64, result: Result<Vec<StockEntry>>) {
        let mut entries = self.entries.write();

        if seq <= self.applied_fetch.load(Ordering::SeqCst) {
            tracing::debug!("Discarding stale fetch result (seq {})", seq);
            return;
        }
        self.applied_fetch.store(seq, Ordering::SeqCst);

        match result {
            Ok(rows) => {
                *entries = rows;
                *self.error.write() = None;
            }
            Err(e) => {
                tracing::warn!("Failed to fetch entries: {}", e);
                *self.error.write() = Some(e.to_string());
            }
        }
    }
}
