//! Watchlist and ticker selection commands

use crate::error::Result;
use crate::journal::models::StockEntry;
use crate::journal::watchlist::{derive_watchlist, select_entries_for_ticker, WatchlistItem};
use crate::state::AppState;
use serde::Serialize;
use tauri::State;

#[derive(Debug, Serialize)]
pub struct SelectedEntries {
    pub ticker: Option<String>,
    pub entries: Vec<StockEntry>,
}

/// Derived watchlist for the current entry list
#[tauri::command]
pub async fn get_watchlist(state: State<'_, AppState>) -> Result<Vec<WatchlistItem>> {
    let entries = state.repository()?.entries();
    Ok(derive_watchlist(&entries))
}

/// Change the selected ticker (or clear it) and return its entries
#[tauri::command]
pub async fn select_ticker(
    state: State<'_, AppState>,
    ticker: Option<String>,
) -> Result<SelectedEntries> {
    state.set_selected_ticker(ticker);
    selected_view(&state)
}

/// Entries for the currently selected ticker, newest entry date first
#[tauri::command]
pub async fn get_selected_entries(state: State<'_, AppState>) -> Result<SelectedEntries> {
    selected_view(&state)
}

fn selected_view(state: &AppState) -> Result<SelectedEntries> {
    let entries = state.repository()?.entries();
    let ticker = state.selected_ticker();
    let entries = select_entries_for_ticker(&entries, ticker.as_deref());
    Ok(SelectedEntries { ticker, entries })
}
