//! Authentication and session gate commands

use crate::error::Result;
use crate::state::AppState;
use crate::store::types::StoreUser;
use crate::store::RemoteStore;
use serde::{Deserialize, Serialize};
use tauri::State;

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: String,
    pub email: Option<String>,
}

impl From<StoreUser> for UserInfo {
    fn from(user: StoreUser) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SignUpResponse {
    pub signed_in: bool,
    pub message: String,
}

/// What the frontend should render at the top level
#[derive(Debug, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum SessionGate {
    InitFailed { message: String },
    SignedOut,
    SignedIn { user: UserInfo },
}

/// Resolve the session gate: initialization diagnostics first, then the
/// auth surface or the main page depending on session presence
#[tauri::command]
pub async fn get_session_gate(state: State<'_, AppState>) -> Result<SessionGate> {
    if let Some(message) = state.init_error() {
        return Ok(SessionGate::InitFailed { message });
    }

    let store = state.store()?;
    Ok(match store.current_user() {
        Some(user) => SessionGate::SignedIn { user: user.into() },
        None => SessionGate::SignedOut,
    })
}

/// Sign in with email and password
#[tauri::command]
pub async fn sign_in(
    state: State<'_, AppState>,
    request: CredentialsRequest,
) -> Result<UserInfo> {
    tracing::info!("Sign in attempt for {}", request.email);

    let store = state.store()?;
    let user = store.sign_in(&request.email, &request.password).await?;

    // fresh page for the new session
    state.reset_session_data();

    tracing::info!("User {} signed in", user.id);
    Ok(user.into())
}

/// Register a new account
#[tauri::command]
pub async fn sign_up(
    state: State<'_, AppState>,
    request: CredentialsRequest,
) -> Result<SignUpResponse> {
    tracing::info!("Sign up attempt for {}", request.email);

    let store = state.store()?;
    let outcome = store.sign_up(&request.email, &request.password).await?;

    let message = if outcome.signed_in {
        state.reset_session_data();
        "Account created successfully.".to_string()
    } else {
        "Account created. Check your email to confirm it, then sign in.".to_string()
    };

    Ok(SignUpResponse {
        signed_in: outcome.signed_in,
        message,
    })
}

/// Sign out and drop all session-scoped state
#[tauri::command]
pub async fn sign_out(state: State<'_, AppState>) -> Result<()> {
    tracing::info!("Sign out");

    let store = state.store()?;
    store.sign_out().await?;
    state.reset_session_data();

    Ok(())
}

/// Check if a user is signed in
#[tauri::command]
pub async fn check_session(state: State<'_, AppState>) -> Result<bool> {
    Ok(state.store()?.current_user().is_some())
}

/// Get current user info
#[tauri::command]
pub async fn get_current_user(state: State<'_, AppState>) -> Result<Option<UserInfo>> {
    Ok(state.store()?.current_user().map(UserInfo::from))
}
