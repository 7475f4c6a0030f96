//! Stock diary record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sentiment recorded with an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Sentiment {
    Bullish,
    #[default]
    Neutral,
    Bearish,
}

impl Sentiment {
    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Bullish => "Bullish",
            Sentiment::Neutral => "Neutral",
            Sentiment::Bearish => "Bearish",
        }
    }

    /// Parse a sentiment label as rendered in the form's select control
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Bullish" => Some(Sentiment::Bullish),
            "Neutral" => Some(Sentiment::Neutral),
            "Bearish" => Some(Sentiment::Bearish),
            _ => None,
        }
    }
}

/// One dated stock-analysis record, as stored in the `stock_entries` table.
///
/// `id`, `user_id`, `created_at` and `entry_date` are assigned by the store;
/// the client never edits them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub ticker: String,
    pub company_name: String,
    pub entry_date: DateTime<Utc>,
    pub content: String,
    pub price_at_entry: f64,
    pub sentiment: Sentiment,
    pub created_at: DateTime<Utc>,
}

/// Client-editable fields of an entry, produced by form validation.
/// The ticker is already uppercased and the price already parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryPayload {
    pub ticker: String,
    pub company_name: String,
    pub price_at_entry: f64,
    pub sentiment: Sentiment,
    pub content: String,
}

/// Insert row sent to the store: the payload plus the owning user.
#[derive(Debug, Clone, Serialize)]
pub struct NewEntryRow {
    pub ticker: String,
    pub company_name: String,
    pub price_at_entry: f64,
    pub sentiment: Sentiment,
    pub content: String,
    pub user_id: Uuid,
}

impl NewEntryRow {
    pub fn from_payload(payload: EntryPayload, user_id: Uuid) -> Self {
        Self {
            ticker: payload.ticker,
            company_name: payload.company_name,
            price_at_entry: payload.price_at_entry,
            sentiment: payload.sentiment,
            content: payload.content,
            user_id,
        }
    }
}

/// Partial update for an existing entry. Absent fields are left untouched
/// by the store, so they must not appear in the wire body at all.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EntryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_at_entry: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl From<EntryPayload> for EntryPatch {
    fn from(payload: EntryPayload) -> Self {
        Self {
            ticker: Some(payload.ticker),
            company_name: Some(payload.company_name),
            price_at_entry: Some(payload.price_at_entry),
            sentiment: Some(payload.sentiment),
            content: Some(payload.content),
        }
    }
}
