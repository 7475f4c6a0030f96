//! Supabase store adapter
//!
//! Talks to the hosted backend over its auth (GoTrue) and table (PostgREST)
//! endpoints. Row scoping of `stock_entries` is enforced by the service's
//! row-level security policies; this client never filters by user.

use crate::error::{AppError, Result};
use crate::journal::models::{EntryPatch, NewEntryRow, StockEntry};
use crate::store::config::StoreConfig;
use crate::store::types::{AuthSession, ErrorBody, SignUpBody, StoreUser};
use crate::store::RemoteStore;
use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Response};
use serde::Serialize;
use uuid::Uuid;

const ENTRIES_TABLE: &str = "stock_entries";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Result of a sign-up attempt. With email confirmation enabled on the
/// project the user record exists but no session is established yet.
#[derive(Debug, Clone, Serialize)]
pub struct SignUpOutcome {
    pub signed_in: bool,
    pub user: Option<StoreUser>,
}

/// Remote store client, constructed once at startup
pub struct SupabaseStore {
    client: Client,
    base_url: String,
    anon_key: String,
    anon_header: HeaderValue,
    session: RwLock<Option<AuthSession>>,
}

impl SupabaseStore {
    pub fn new(config: StoreConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        let anon_header = HeaderValue::from_str(&config.anon_key).map_err(|_| {
            AppError::Config("SUPABASE_ANON_KEY contains characters that are not valid in a header".to_string())
        })?;

        Ok(Self {
            client,
            base_url: config.base_url,
            anon_key: config.anon_key,
            anon_header,
            session: RwLock::new(None),
        })
    }

    /// Current session, if any
    pub fn session(&self) -> Option<AuthSession> {
        self.session.read().clone()
    }

    /// Sign in with the password grant and store the returned session
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<StoreUser> {
        let response = self
            .client
            .post(self.auth_endpoint("token"))
            .query(&[("grant_type", "password")])
            .headers(self.request_headers(None)?)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Auth(
                Self::error_message(response, "Sign in failed").await,
            ));
        }

        let session: AuthSession = response.json().await?;
        let user = session.user.clone();
        *self.session.write() = Some(session);
        Ok(user)
    }

    /// Register a new account; keeps the session only when the service
    /// auto-confirms and returns an access token
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome> {
        let response = self
            .client
            .post(self.auth_endpoint("signup"))
            .headers(self.request_headers(None)?)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Auth(
                Self::error_message(response, "Sign up failed").await,
            ));
        }

        let body: SignUpBody = response.json().await?;
        match (body.access_token, body.user) {
            (Some(access_token), Some(user)) => {
                *self.session.write() = Some(AuthSession {
                    access_token,
                    refresh_token: body.refresh_token,
                    user: user.clone(),
                });
                Ok(SignUpOutcome {
                    signed_in: true,
                    user: Some(user),
                })
            }
            (_, user) => {
                let user = user.or_else(|| {
                    body.id.map(|id| StoreUser {
                        id,
                        email: body.email,
                    })
                });
                Ok(SignUpOutcome {
                    signed_in: false,
                    user,
                })
            }
        }
    }

    /// Revoke the session with the service (best-effort) and clear it locally
    pub async fn sign_out(&self) -> Result<()> {
        let session = self.session.write().take();

        if let Some(session) = session {
            let result = self
                .client
                .post(self.auth_endpoint("logout"))
                .headers(self.request_headers(Some(&session.access_token))?)
                .send()
                .await;

            match result {
                Ok(response) if !response.status().is_success() => {
                    tracing::warn!("Sign out was not acknowledged by the store: {}", response.status());
                }
                Err(e) => {
                    tracing::warn!("Sign out request failed: {}", e);
                }
                _ => {}
            }
        }

        Ok(())
    }

    fn auth_endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    fn table_endpoint(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// Headers for a request: the api key plus a bearer token (the current
    /// session when given, otherwise the anon key)
    fn request_headers(&self, bearer: Option<&str>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert("apikey", self.anon_header.clone());

        let token = bearer.unwrap_or(&self.anon_key);
        let value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| AppError::Internal("Access token is not a valid header value".to_string()))?;
        headers.insert(AUTHORIZATION, value);

        Ok(headers)
    }

    fn session_headers(&self) -> Result<HeaderMap> {
        let token = self
            .session
            .read()
            .as_ref()
            .map(|s| s.access_token.clone());
        self.request_headers(token.as_deref())
    }

    async fn expect_success(response: Response, fallback: &str) -> Result<()> {
        if response.status().is_success() {
            return Ok(());
        }
        Err(AppError::Store(Self::error_message(response, fallback).await))
    }

    async fn error_message(response: Response, fallback: &str) -> String {
        let body = response.json::<ErrorBody>().await.unwrap_or_default();
        body.into_message(fallback)
    }
}

#[async_trait]
impl RemoteStore for SupabaseStore {
    fn current_user(&self) -> Option<StoreUser> {
        self.session.read().as_ref().map(|s| s.user.clone())
    }

    async fn fetch_entries(&self) -> Result<Vec<StockEntry>> {
        let response = self
            .client
            .get(self.table_endpoint(ENTRIES_TABLE))
            .headers(self.session_headers()?)
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Store(
                Self::error_message(response, "Failed to fetch entries").await,
            ));
        }

        let entries: Vec<StockEntry> = response.json().await?;
        Ok(entries)
    }

    async fn insert_entry(&self, row: NewEntryRow) -> Result<()> {
        let response = self
            .client
            .post(self.table_endpoint(ENTRIES_TABLE))
            .headers(self.session_headers()?)
            .header("Prefer", "return=minimal")
            .json(&[row])
            .send()
            .await?;

        Self::expect_success(response, "Failed to insert entry").await
    }

    async fn update_entry(&self, id: Uuid, patch: EntryPatch) -> Result<()> {
        let response = self
            .client
            .patch(self.table_endpoint(ENTRIES_TABLE))
            .headers(self.session_headers()?)
            .query(&[("id", format!("eq.{}", id))])
            .json(&patch)
            .send()
            .await?;

        Self::expect_success(response, "Failed to update entry").await
    }

    async fn delete_entry(&self, id: Uuid) -> Result<()> {
        let response = self
            .client
            .delete(self.table_endpoint(ENTRIES_TABLE))
            .headers(self.session_headers()?)
            .query(&[("id", format!("eq.{}", id))])
            .send()
            .await?;

        Self::expect_success(response, "Failed to delete entry").await
    }
}
