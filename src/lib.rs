//! StockDiary Desktop - Personal Stock Journal
//!
//! A desktop application for keeping dated stock-analysis notes against a
//! hosted backend: authentication and session state, a watchlist derived
//! from the user's own entries, and a per-ticker note history.

pub mod commands;
pub mod error;
pub mod journal;
pub mod state;
pub mod store;

use state::AppState;
use tauri::Manager;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize and run the Tauri application
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stockdiary_desktop=debug,tauri=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting StockDiary Desktop...");

    tauri::Builder::default()
        .plugin(tauri_plugin_shell::init())
        .setup(|app| {
            // A failed store initialization is kept on the state so the
            // frontend can show the diagnostic instead of a blank window
            let app_state = AppState::new();
            if let Some(message) = app_state.init_error() {
                tracing::error!("Starting without a store connection: {}", message);
            }

            app.manage(app_state);

            tracing::info!("Application state initialized");
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Session gate / auth commands
            commands::auth::get_session_gate,
            commands::auth::sign_in,
            commands::auth::sign_up,
            commands::auth::sign_out,
            commands::auth::check_session,
            commands::auth::get_current_user,
            // Entry commands
            commands::entries::fetch_entries,
            commands::entries::get_entries,
            commands::entries::delete_entry,
            // Watchlist commands
            commands::watchlist::get_watchlist,
            commands::watchlist::select_ticker,
            commands::watchlist::get_selected_entries,
            // Entry form commands
            commands::form::open_entry_form,
            commands::form::update_form_field,
            commands::form::submit_entry_form,
            commands::form::cancel_entry_form,
            commands::form::get_form_state,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
