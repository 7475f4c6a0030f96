//! In-memory store implementation for tests
//!
//! Emulates the hosted table semantics closely enough to exercise the
//! repository and form flows: rows come back newest-created first, ids and
//! timestamps are assigned on insert, and failures can be forced per kind.

use crate::error::{AppError, Result};
use crate::journal::models::{EntryPatch, NewEntryRow, StockEntry};
use crate::store::types::StoreUser;
use crate::store::RemoteStore;
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use uuid::Uuid;

pub struct MockStore {
    user: Mutex<Option<StoreUser>>,
    rows: Mutex<Vec<StockEntry>>,
    clock: AtomicUsize,
    pub fail_fetch: AtomicBool,
    pub fail_mutation: AtomicBool,
    pub fetch_calls: AtomicUsize,
    pub insert_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            user: Mutex::new(None),
            rows: Mutex::new(Vec::new()),
            clock: AtomicUsize::new(0),
            fail_fetch: AtomicBool::new(false),
            fail_mutation: AtomicBool::new(false),
            fetch_calls: AtomicUsize::new(0),
            insert_calls: AtomicUsize::new(0),
            update_calls: AtomicUsize::new(0),
            delete_calls: AtomicUsize::new(0),
        }
    }

    /// A store with a signed-in user, the common case in tests
    pub fn signed_in() -> Self {
        let store = Self::new();
        store.set_user(Some(test_user()));
        store
    }

    pub fn set_user(&self, user: Option<StoreUser>) {
        *self.user.lock() = user;
    }

    pub fn seed(&self, rows: Vec<StockEntry>) {
        *self.rows.lock() = rows;
    }

    pub fn rows(&self) -> Vec<StockEntry> {
        self.rows.lock().clone()
    }

    pub fn mutation_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
            + self.update_calls.load(Ordering::SeqCst)
            + self.delete_calls.load(Ordering::SeqCst)
    }

    fn next_timestamp(&self) -> DateTime<Utc> {
        let tick = self.clock.fetch_add(1, Ordering::SeqCst) as i64;
        day(1) + Duration::seconds(tick)
    }
}

#[async_trait]
impl RemoteStore for MockStore {
    fn current_user(&self) -> Option<StoreUser> {
        self.user.lock().clone()
    }

    async fn fetch_entries(&self) -> Result<Vec<StockEntry>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(AppError::Store("fetch refused".to_string()));
        }
        let mut rows = self.rows.lock().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn insert_entry(&self, row: NewEntryRow) -> Result<()> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_mutation.load(Ordering::SeqCst) {
            return Err(AppError::Store("insert refused".to_string()));
        }
        let now = self.next_timestamp();
        self.rows.lock().push(StockEntry {
            id: Uuid::new_v4(),
            user_id: row.user_id,
            ticker: row.ticker,
            company_name: row.company_name,
            entry_date: now,
            content: row.content,
            price_at_entry: row.price_at_entry,
            sentiment: row.sentiment,
            created_at: now,
        });
        Ok(())
    }

    async fn update_entry(&self, id: Uuid, patch: EntryPatch) -> Result<()> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_mutation.load(Ordering::SeqCst) {
            return Err(AppError::Store("update refused".to_string()));
        }
        let mut rows = self.rows.lock();
        if let Some(row) = rows.iter_mut().find(|r| r.id == id) {
            if let Some(ticker) = patch.ticker {
                row.ticker = ticker;
            }
            if let Some(company_name) = patch.company_name {
                row.company_name = company_name;
            }
            if let Some(price) = patch.price_at_entry {
                row.price_at_entry = price;
            }
            if let Some(sentiment) = patch.sentiment {
                row.sentiment = sentiment;
            }
            if let Some(content) = patch.content {
                row.content = content;
            }
        }
        Ok(())
    }

    async fn delete_entry(&self, id: Uuid) -> Result<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_mutation.load(Ordering::SeqCst) {
            return Err(AppError::Store("delete refused".to_string()));
        }
        self.rows.lock().retain(|r| r.id != id);
        Ok(())
    }
}

pub fn test_user() -> StoreUser {
    StoreUser {
        id: Uuid::new_v4(),
        email: Some("trader@example.com".to_string()),
    }
}

/// Midnight UTC on the given day of January 2024
pub fn day(n: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, n, 0, 0, 0).unwrap()
}

/// Entry fixture with explicit logical and creation dates
pub fn entry_at(
    ticker: &str,
    company_name: &str,
    entry_date: DateTime<Utc>,
    created_at: DateTime<Utc>,
) -> StockEntry {
    StockEntry {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        ticker: ticker.to_string(),
        company_name: company_name.to_string(),
        entry_date,
        content: format!("notes on {}", ticker),
        price_at_entry: 100.0,
        sentiment: Default::default(),
        created_at,
    }
}
