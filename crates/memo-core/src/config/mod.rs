//! Client configuration.
//!
//! Provides a `ClientConfig` struct shared by every front end to locate the
//! memo backend and the upload service.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::Theme;
use crate::util::{is_http_url, normalize_text_option};

const DEFAULT_LOGIN_TRANSITION_MS: u64 = 500;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_UPLOAD_ROUTE: &str = "/api/upload";

/// Endpoints and timings for a memo client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Backend origin; REST routes live under `<api_base_url>/api/...`
    pub api_base_url: String,
    /// Upload service endpoint; derived from `api_base_url` when absent
    #[serde(default)]
    pub upload_url: Option<String>,
    /// Cosmetic pause between a verified code and the unlocked view
    #[serde(default = "default_login_transition_ms")]
    pub login_transition_ms: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Theme shown before any settings are applied
    #[serde(default)]
    pub theme: Theme,
}

const fn default_login_transition_ms() -> u64 {
    DEFAULT_LOGIN_TRANSITION_MS
}

const fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl ClientConfig {
    /// Builds a validated config with default timings.
    pub fn new(api_base_url: impl Into<String>) -> Result<Self> {
        let mut config = Self {
            api_base_url: api_base_url.into(),
            upload_url: None,
            login_transition_ms: DEFAULT_LOGIN_TRANSITION_MS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            theme: Theme::default(),
        };
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_upload_url(mut self, upload_url: Option<String>) -> Self {
        self.upload_url = normalize_text_option(upload_url);
        self
    }

    #[must_use]
    pub const fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn with_login_transition(mut self, delay: Duration) -> Self {
        self.login_transition_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Normalizes URLs in place and rejects unusable values.
    pub fn validate(&mut self) -> Result<()> {
        self.api_base_url = normalize_required_http_url(&self.api_base_url, "api_base_url")?;
        self.upload_url = match normalize_text_option(self.upload_url.take()) {
            Some(url) => Some(normalize_required_http_url(&url, "upload_url")?),
            None => None,
        };
        if self.request_timeout_secs == 0 {
            return Err(Error::InvalidConfig(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Upload endpoint, falling back to `<api_base_url>/api/upload`.
    #[must_use]
    pub fn resolved_upload_url(&self) -> String {
        self.upload_url
            .clone()
            .unwrap_or_else(|| format!("{}{DEFAULT_UPLOAD_ROUTE}", self.api_base_url))
    }

    #[must_use]
    pub const fn login_transition(&self) -> Duration {
        Duration::from_millis(self.login_transition_ms)
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn normalize_required_http_url(raw: &str, field: &str) -> Result<String> {
    let value = normalize_text_option(Some(raw.to_string()))
        .ok_or_else(|| Error::InvalidConfig(format!("field '{field}' is required")))?;
    if is_http_url(&value) {
        Ok(value.trim_end_matches('/').to_string())
    } else {
        Err(Error::InvalidConfig(format!(
            "field '{field}' must include http:// or https://"
        )))
    }
}
