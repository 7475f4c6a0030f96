//! Remote store configuration
//!
//! Both values are required at startup. A missing or malformed value is a
//! fatal initialization error; it is captured as data on the application
//! state and shown in place of the UI, never a panic.

use crate::error::{AppError, Result};
use url::Url;

pub const URL_ENV: &str = "SUPABASE_URL";
pub const ANON_KEY_ENV: &str = "SUPABASE_ANON_KEY";

/// Validated remote store endpoint and access key
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Project base URL without a trailing slash
    pub base_url: String,
    pub anon_key: String,
}

impl StoreConfig {
    /// Read and validate the configuration from the environment
    pub fn from_env() -> Result<Self> {
        Self::from_values(
            std::env::var(URL_ENV).ok(),
            std::env::var(ANON_KEY_ENV).ok(),
        )
    }

    fn from_values(url: Option<String>, anon_key: Option<String>) -> Result<Self> {
        let url = url
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                AppError::Config(format!(
                    "{} is missing. Set it to your project URL before launching the app.",
                    URL_ENV
                ))
            })?;

        let anon_key = anon_key
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                AppError::Config(format!(
                    "{} is missing. Set it to your project's anon key before launching the app.",
                    ANON_KEY_ENV
                ))
            })?;

        let parsed = Url::parse(&url)
            .map_err(|e| AppError::Config(format!("{} is not a valid URL: {}", URL_ENV, e)))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(AppError::Config(format!(
                "{} must be an http(s) URL, got '{}'",
                URL_ENV, url
            )));
        }

        Ok(Self {
            base_url: url.trim_end_matches('/').to_string(),
            anon_key,
        })
    }
}
