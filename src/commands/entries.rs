//! Entry list commands

use crate::error::Result;
use crate::journal::repository::EntriesSnapshot;
use crate::state::AppState;
use tauri::State;
use uuid::Uuid;

/// Refresh the entry list from the store and return the new snapshot.
/// Fetch failures are carried inside the snapshot, not as a command error.
#[tauri::command]
pub async fn fetch_entries(state: State<'_, AppState>) -> Result<EntriesSnapshot> {
    let repository = state.repository()?;
    repository.fetch_entries().await;
    Ok(repository.snapshot())
}

/// Current snapshot without touching the store
#[tauri::command]
pub async fn get_entries(state: State<'_, AppState>) -> Result<EntriesSnapshot> {
    Ok(state.repository()?.snapshot())
}

/// Delete an entry and resynchronize
#[tauri::command]
pub async fn delete_entry(state: State<'_, AppState>, id: Uuid) -> Result<()> {
    tracing::info!("Deleting entry {}", id);
    state.repository()?.delete_entry(id).await
}
