//! Watchlist derivation
//!
//! Pure views over the entry list, recomputed whenever the list changes.
//! The watchlist itself is never stored.

use crate::journal::models::StockEntry;
use serde::Serialize;
use std::collections::HashSet;

/// One watchlist row: a ticker with its display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WatchlistItem {
    pub ticker: String,
    pub company_name: String,
}

/// Distinct tickers in first-seen order.
///
/// The display name comes from the first entry encountered for the ticker,
/// so with the store's `created_at`-descending fetch order the most recently
/// created entry's company name wins.
pub fn derive_watchlist(entries: &[StockEntry]) -> Vec<WatchlistItem> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut items = Vec::new();

    for entry in entries {
        if seen.insert(entry.ticker.as_str()) {
            items.push(WatchlistItem {
                ticker: entry.ticker.clone(),
                company_name: entry.company_name.clone(),
            });
        }
    }

    items
}

/// Entries for the selected ticker, most recent `entry_date` first.
///
/// The sort is stable, so entries with equal dates keep their original list
/// order. No ticker selected means an empty result.
pub fn select_entries_for_ticker(entries: &[StockEntry], ticker: Option<&str>) -> Vec<StockEntry> {
    let Some(ticker) = ticker else {
        return Vec::new();
    };

    let mut selected: Vec<StockEntry> = entries
        .iter()
        .filter(|e| e.ticker == ticker)
        .cloned()
        .collect();
    selected.sort_by(|a, b| b.entry_date.cmp(&a.entry_date));
    selected
}
