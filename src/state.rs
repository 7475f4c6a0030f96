//! Application state management

use crate::error::{AppError, Result};
use crate::journal::form::EntryFormController;
use crate::journal::repository::EntryRepository;
use crate::store::{StoreConfig, SupabaseStore};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

/// State managed by Tauri for the lifetime of the process.
///
/// The remote store is constructed once at startup; a failed construction is
/// captured as data so the frontend can render a diagnostic screen instead
/// of a blank window, and every later store access reports the same failure.
pub struct AppState {
    store: Option<Arc<SupabaseStore>>,
    repository: Option<Arc<EntryRepository>>,
    init_error: Option<String>,
    /// Ticker currently highlighted in the watchlist pane
    selected_ticker: RwLock<Option<String>>,
    /// Live form controller while the entry dialog is open
    form: Mutex<Option<EntryFormController>>,
}

impl AppState {
    pub fn new() -> Self {
        match StoreConfig::from_env().and_then(SupabaseStore::new) {
            Ok(store) => {
                let store = Arc::new(store);
                let repository = Arc::new(EntryRepository::new(store.clone()));
                Self {
                    store: Some(store),
                    repository: Some(repository),
                    init_error: None,
                    selected_ticker: RwLock::new(None),
                    form: Mutex::new(None),
                }
            }
            Err(e) => {
                tracing::error!("Remote store initialization failed: {}", e);
                Self {
                    store: None,
                    repository: None,
                    init_error: Some(e.to_string()),
                    selected_ticker: RwLock::new(None),
                    form: Mutex::new(None),
                }
            }
        }
    }

    /// The captured initialization failure, if any
    pub fn init_error(&self) -> Option<String> {
        self.init_error.clone()
    }

    pub fn store(&self) -> Result<Arc<SupabaseStore>> {
        self.store.clone().ok_or_else(|| self.config_error())
    }

    pub fn repository(&self) -> Result<Arc<EntryRepository>> {
        self.repository.clone().ok_or_else(|| self.config_error())
    }

    fn config_error(&self) -> AppError {
        AppError::Config(
            self.init_error
                .clone()
                .unwrap_or_else(|| "Remote store is not initialized".to_string()),
        )
    }

    pub fn selected_ticker(&self) -> Option<String> {
        self.selected_ticker.read().clone()
    }

    pub fn set_selected_ticker(&self, ticker: Option<String>) {
        *self.selected_ticker.write() = ticker;
    }

    pub fn open_form(&self, controller: EntryFormController) {
        *self.form.lock() = Some(controller);
    }

    pub fn close_form(&self) {
        *self.form.lock() = None;
    }

    /// Run `f` against the open form controller
    pub fn with_form<T>(
        &self,
        f: impl FnOnce(&mut EntryFormController) -> Result<T>,
    ) -> Result<T> {
        let mut slot = self.form.lock();
        match slot.as_mut() {
            Some(controller) => f(controller),
            None => Err(AppError::NotFound("No entry form is open".to_string())),
        }
    }

    /// Read the open form controller, if any
    pub fn read_form<T>(&self, f: impl FnOnce(&EntryFormController) -> T) -> Option<T> {
        self.form.lock().as_ref().map(f)
    }

    /// Drop everything tied to the current session: the entry list, the
    /// selection and any open form
    pub fn reset_session_data(&self) {
        if let Some(repository) = &self.repository {
            repository.reset();
        }
        self.set_selected_ticker(None);
        self.close_form();
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
