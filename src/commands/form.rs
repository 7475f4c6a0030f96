//! Entry form commands
//!
//! The dialog lifecycle: open (create or edit), per-field draft updates,
//! the two-phase submit, cancel. A completed submit closes the form; the
//! frontend only re-renders what these commands return.

use crate::error::{AppError, Result};
use crate::journal::form::{
    DraftField, EntryDraft, EntryFormController, FormMode, FormStatus,
};
use crate::state::AppState;
use serde::Serialize;
use tauri::State;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct FormView {
    pub mode: &'static str,
    pub entry_id: Option<Uuid>,
    pub draft: EntryDraft,
    pub status: FormStatus,
    pub error: Option<String>,
}

fn view(controller: &EntryFormController) -> FormView {
    let (mode, entry_id) = match controller.mode() {
        FormMode::Create => ("create", None),
        FormMode::Edit(id) => ("edit", Some(id)),
    };
    FormView {
        mode,
        entry_id,
        draft: controller.draft().clone(),
        status: controller.status(),
        error: controller.error().map(str::to_string),
    }
}

/// Open the entry dialog: a blank draft, or one seeded from an existing
/// entry when an id is given
#[tauri::command]
pub async fn open_entry_form(
    state: State<'_, AppState>,
    entry_id: Option<Uuid>,
) -> Result<FormView> {
    let controller = match entry_id {
        Some(id) => {
            let entry = state
                .repository()?
                .entry_by_id(id)
                .ok_or_else(|| AppError::NotFound(format!("Entry not found: {}", id)))?;
            EntryFormController::edit(&entry)
        }
        None => EntryFormController::new(),
    };

    let view = view(&controller);
    state.open_form(controller);
    Ok(view)
}

/// Replace one field of the open draft
#[tauri::command]
pub async fn update_form_field(
    state: State<'_, AppState>,
    field: DraftField,
    value: String,
) -> Result<FormView> {
    state.with_form(|controller| {
        controller.set_field(field, &value);
        Ok(view(controller))
    })
}

/// Submit the open form.
///
/// Validation and submission errors come back inside the view (shown inline
/// on the dialog); only a missing form or a missing store is a command
/// error. A completed submit closes the dialog.
#[tauri::command]
pub async fn submit_entry_form(state: State<'_, AppState>) -> Result<FormView> {
    let pending = match state.with_form(|controller| Ok(controller.begin_submit())) {
        Ok(Ok(pending)) => pending,
        Ok(Err(AppError::Validation(_))) => {
            return state.with_form(|controller| Ok(view(controller)));
        }
        Ok(Err(e)) => return Err(e),
        Err(e) => return Err(e),
    };

    let repository = state.repository()?;
    let result = match pending.mode {
        FormMode::Create => repository.insert_entry(pending.payload).await,
        FormMode::Edit(id) => repository.update_entry(id, pending.payload.into()).await,
    };

    let view = state.with_form(|controller| {
        controller.finish_submit(result);
        Ok(view(controller))
    })?;

    if view.status == FormStatus::Completed {
        state.close_form();
    }

    Ok(view)
}

/// Discard the open form without saving
#[tauri::command]
pub async fn cancel_entry_form(state: State<'_, AppState>) -> Result<()> {
    state.close_form();
    Ok(())
}

/// Current form view, if a dialog is open
#[tauri::command]
pub async fn get_form_state(state: State<'_, AppState>) -> Result<Option<FormView>> {
    Ok(state.read_form(view))
}
