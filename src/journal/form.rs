//! Entry form controller
//!
//! Draft state machine behind the create/edit dialog: `Idle -> Submitting ->
//! Completed`, or back to `Idle` with an error and the draft intact. The
//! submit is split into a validation phase and a completion phase so no lock
//! needs to be held across the repository's await points.

use crate::error::{AppError, Result};
use crate::journal::models::{EntryPayload, Sentiment, StockEntry};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill out all required fields.";
pub const PRICE_MESSAGE: &str = "Price must be a number.";

/// Form draft; the price stays text until validation parses it
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EntryDraft {
    pub ticker: String,
    pub company_name: String,
    pub price_at_entry: String,
    pub sentiment: Sentiment,
    pub content: String,
}

/// Field addressed by a single draft update
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    Ticker,
    CompanyName,
    PriceAtEntry,
    Sentiment,
    Content,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormStatus {
    Idle,
    Submitting,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(Uuid),
}

/// Validated submission handed back by `begin_submit`
#[derive(Debug)]
pub struct PendingSubmit {
    pub mode: FormMode,
    pub payload: EntryPayload,
}

pub struct EntryFormController {
    mode: FormMode,
    draft: EntryDraft,
    status: FormStatus,
    error: Option<String>,
}

impl EntryFormController {
    /// Controller for a new entry: empty draft, Neutral sentiment
    pub fn new() -> Self {
        Self {
            mode: FormMode::Create,
            draft: EntryDraft::default(),
            status: FormStatus::Idle,
            error: None,
        }
    }

    /// Controller editing an existing entry, draft seeded from it
    pub fn edit(entry: &StockEntry) -> Self {
        Self {
            mode: FormMode::Edit(entry.id),
            draft: EntryDraft {
                ticker: entry.ticker.clone(),
                company_name: entry.company_name.clone(),
                price_at_entry: entry.price_at_entry.to_string(),
                sentiment: entry.sentiment,
                content: entry.content.clone(),
            },
            status: FormStatus::Idle,
            error: None,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn draft(&self) -> &EntryDraft {
        &self.draft
    }

    /// Replace one draft field. No cross-field validation happens here; an
    /// unknown sentiment label leaves the current selection in place.
    pub fn set_field(&mut self, field: DraftField, value: &str) {
        match field {
            DraftField::Ticker => self.draft.ticker = value.to_string(),
            DraftField::CompanyName => self.draft.company_name = value.to_string(),
            DraftField::PriceAtEntry => self.draft.price_at_entry = value.to_string(),
            DraftField::Sentiment => {
                if let Some(sentiment) = Sentiment::parse(value) {
                    self.draft.sentiment = sentiment;
                }
            }
            DraftField::Content => self.draft.content = value.to_string(),
        }
    }

    /// Validate the draft and transition `Idle -> Submitting`.
    ///
    /// On success the returned submission carries the payload with the
    /// ticker uppercased and the price parsed; the caller performs the
    /// remote call and reports back through `finish_submit`. Validation
    /// failures record the message on the form and leave the status at
    /// `Idle` without any remote call.
    pub fn begin_submit(&mut self) -> Result<PendingSubmit> {
        match self.status {
            FormStatus::Submitting => {
                return Err(AppError::Validation(
                    "A submission is already in progress.".to_string(),
                ));
            }
            FormStatus::Completed => {
                return Err(AppError::Validation(
                    "The form has already been submitted.".to_string(),
                ));
            }
            FormStatus::Idle => {}
        }

        if self.draft.ticker.is_empty()
            || self.draft.company_name.is_empty()
            || self.draft.price_at_entry.is_empty()
            || self.draft.content.is_empty()
        {
            self.error = Some(REQUIRED_FIELDS_MESSAGE.to_string());
            return Err(AppError::Validation(REQUIRED_FIELDS_MESSAGE.to_string()));
        }

        let price = match self.draft.price_at_entry.trim().parse::<f64>() {
            Ok(price) => price,
            Err(_) => {
                self.error = Some(PRICE_MESSAGE.to_string());
                return Err(AppError::Validation(PRICE_MESSAGE.to_string()));
            }
        };

        self.error = None;
        self.status = FormStatus::Submitting;

        Ok(PendingSubmit {
            mode: self.mode,
            payload: EntryPayload {
                ticker: self.draft.ticker.to_uppercase(),
                company_name: self.draft.company_name.clone(),
                price_at_entry: price,
                sentiment: self.draft.sentiment,
                content: self.draft.content.clone(),
            },
        })
    }

    /// Record the outcome of the remote call started after `begin_submit`.
    ///
    /// Success completes the form; the parent is responsible for discarding
    /// it. Failure returns to `Idle` with a user-readable message and the
    /// draft untouched, so the user can retry.
    pub fn finish_submit(&mut self, result: Result<()>) {
        match result {
            Ok(()) => {
                self.status = FormStatus::Completed;
                self.error = None;
            }
            Err(e) => {
                self.status = FormStatus::Idle;
                self.error = Some(format!("Failed to save entry: {}", e));
            }
        }
    }
}

impl Default for EntryFormController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::repository::EntryRepository;
    use crate::journal::watchlist::derive_watchlist;
    use crate::store::testing::{day, entry_at, MockStore};
    use crate::store::RemoteStore;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    fn filled_controller() -> EntryFormController {
        let mut controller = EntryFormController::new();
        controller.set_field(DraftField::Ticker, "aapl");
        controller.set_field(DraftField::CompanyName, "Apple Inc.");
        controller.set_field(DraftField::PriceAtEntry, "175.50");
        controller.set_field(DraftField::Sentiment, "Bullish");
        controller.set_field(DraftField::Content, "Q3 thesis");
        controller
    }

    #[test]
    fn create_mode_starts_empty_and_neutral() {
        let controller = EntryFormController::new();
        assert_eq!(controller.mode(), FormMode::Create);
        assert_eq!(controller.status(), FormStatus::Idle);
        assert_eq!(controller.draft().sentiment, Sentiment::Neutral);
        assert!(controller.draft().ticker.is_empty());
        assert!(controller.error().is_none());
    }

    #[test]
    fn edit_mode_seeds_draft_with_price_as_text() {
        let mut entry = entry_at("MSFT", "Microsoft", day(1), day(1));
        entry.price_at_entry = 410.25;
        entry.sentiment = Sentiment::Bearish;

        let controller = EntryFormController::edit(&entry);
        assert_eq!(controller.mode(), FormMode::Edit(entry.id));
        assert_eq!(controller.draft().ticker, "MSFT");
        assert_eq!(controller.draft().price_at_entry, "410.25");
        assert_eq!(controller.draft().sentiment, Sentiment::Bearish);
        assert_eq!(controller.draft().content, entry.content);
    }

    #[test]
    fn set_field_replaces_only_that_field() {
        let mut controller = filled_controller();
        controller.set_field(DraftField::Content, "revised");
        assert_eq!(controller.draft().content, "revised");
        assert_eq!(controller.draft().ticker, "aapl");

        // unknown sentiment labels are ignored
        controller.set_field(DraftField::Sentiment, "Euphoric");
        assert_eq!(controller.draft().sentiment, Sentiment::Bullish);
    }

    #[test]
    fn missing_content_blocks_submission() {
        let mut controller = filled_controller();
        controller.set_field(DraftField::Content, "");

        let err = controller.begin_submit().unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(controller.status(), FormStatus::Idle);
        assert_eq!(controller.error(), Some(REQUIRED_FIELDS_MESSAGE));
    }

    #[test]
    fn non_numeric_price_blocks_submission() {
        let mut controller = filled_controller();
        controller.set_field(DraftField::PriceAtEntry, "about 175");

        let err = controller.begin_submit().unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(controller.error(), Some(PRICE_MESSAGE));
    }

    #[test]
    fn begin_submit_uppercases_ticker_and_parses_price() {
        let mut controller = filled_controller();
        let pending = controller.begin_submit().unwrap();

        assert_eq!(pending.payload.ticker, "AAPL");
        assert_eq!(pending.payload.price_at_entry, 175.5);
        assert_eq!(pending.payload.sentiment, Sentiment::Bullish);
        assert_eq!(controller.status(), FormStatus::Submitting);
        assert!(controller.error().is_none());
    }

    #[test]
    fn resubmission_while_submitting_is_rejected() {
        let mut controller = filled_controller();
        controller.begin_submit().unwrap();
        assert!(controller.begin_submit().is_err());
        assert_eq!(controller.status(), FormStatus::Submitting);
    }

    #[test]
    fn failed_submit_keeps_draft_and_reports_prefixed_error() {
        let mut controller = filled_controller();
        let draft_before = controller.draft().clone();

        controller.begin_submit().unwrap();
        controller.finish_submit(Err(AppError::Store("insert refused".to_string())));

        assert_eq!(controller.status(), FormStatus::Idle);
        let error = controller.error().unwrap();
        assert!(error.starts_with("Failed to save entry: "));
        assert!(error.contains("insert refused"));
        assert_eq!(controller.draft(), &draft_before);

        // the user can retry from the same draft
        assert!(controller.begin_submit().is_ok());
    }

    #[test]
    fn completed_form_accepts_no_further_submissions() {
        let mut controller = filled_controller();
        controller.begin_submit().unwrap();
        controller.finish_submit(Ok(()));
        assert_eq!(controller.status(), FormStatus::Completed);
        assert!(controller.begin_submit().is_err());
    }

    #[tokio::test]
    async fn validation_failure_performs_zero_remote_calls() {
        let store = Arc::new(MockStore::signed_in());
        let _repository = EntryRepository::new(store.clone());

        let mut controller = filled_controller();
        controller.set_field(DraftField::Content, "");
        assert!(controller.begin_submit().is_err());

        assert_eq!(store.mutation_calls(), 0);
        assert_eq!(store.fetch_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn create_flow_round_trips_through_the_repository() {
        let store = Arc::new(MockStore::signed_in());
        let repository = EntryRepository::new(store.clone());

        let mut controller = filled_controller();
        let pending = controller.begin_submit().unwrap();
        let result = repository.insert_entry(pending.payload).await;
        controller.finish_submit(result);

        assert_eq!(controller.status(), FormStatus::Completed);

        let entries = repository.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].ticker, "AAPL");
        assert_eq!(entries[0].price_at_entry, 175.5);
        assert_eq!(entries[0].user_id, store.current_user().unwrap().id);

        let watchlist = derive_watchlist(&entries);
        assert_eq!(watchlist[0].ticker, "AAPL");
        assert_eq!(watchlist[0].company_name, "Apple Inc.");
    }

    #[tokio::test]
    async fn edit_flow_patches_the_original_entry() {
        let store = Arc::new(MockStore::signed_in());
        let entry = entry_at("MSFT", "Microsoft", day(1), day(1));
        let id = entry.id;
        store.seed(vec![entry.clone()]);

        let repository = EntryRepository::new(store.clone());
        repository.fetch_entries().await;

        let mut controller = EntryFormController::edit(&entry);
        controller.set_field(DraftField::Content, "revised thesis");
        let pending = controller.begin_submit().unwrap();
        assert_eq!(pending.mode, FormMode::Edit(id));

        let result = repository.update_entry(id, pending.payload.into()).await;
        controller.finish_submit(result);

        assert_eq!(controller.status(), FormStatus::Completed);
        assert_eq!(repository.entry_by_id(id).unwrap().content, "revised thesis");
    }
}
