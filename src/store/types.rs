//! Remote store wire types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authenticated user as reported by the auth service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

/// Bearer session returned by the password grant
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: StoreUser,
}

/// Sign-up response body.
///
/// With auto-confirm enabled the service returns a full session; with email
/// confirmation required it returns the bare user record instead.
#[derive(Debug, Deserialize)]
pub(crate) struct SignUpBody {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user: Option<StoreUser>,
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Error body shapes used by the auth and table endpoints
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self, fallback: &str) -> String {
        self.message
            .or(self.msg)
            .or(self.error_description)
            .or(self.error)
            .unwrap_or_else(|| fallback.to_string())
    }
}
