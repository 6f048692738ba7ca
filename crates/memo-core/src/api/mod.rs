//! Remote store client for the memo backend.
//!
//! The backend exposes five JSON operations. `MemoApi` is the seam the state
//! layer talks to; `HttpMemoApi` is the reqwest implementation.

mod http;
#[cfg(test)]
pub(crate) mod test_server;

use serde::Serialize;

pub use http::HttpMemoApi;

use crate::error::Result;
use crate::models::{Memo, MemoId, Theme};

/// Settings payload for `/api/update-settings`.
///
/// `password` is omitted from the JSON body entirely when `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub theme: Theme,
}

/// Backend operations used by the client state layer
#[allow(async_fn_in_trait)]
pub trait MemoApi {
    /// Checks a password. `Ok(false)` means the backend rejected it;
    /// `Err` is reserved for transport failures.
    async fn verify_password(&self, password: &str) -> Result<bool>;

    /// Fetch every memo
    async fn list_memos(&self) -> Result<Vec<Memo>>;

    /// Create a memo; the backend assigns the id
    async fn create_memo(&self, title: &str, content: &str) -> Result<()>;

    /// Overwrite title and content of an existing memo
    async fn update_memo(&self, id: &MemoId, title: &str, content: &str) -> Result<()>;

    async fn delete_memo(&self, id: &MemoId) -> Result<()>;

    async fn update_settings(&self, update: &SettingsUpdate) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_update_omits_blank_password() {
        let body = serde_json::to_value(SettingsUpdate {
            password: None,
            theme: Theme::LightPink,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "theme": "light-pink" }));
    }

    #[test]
    fn settings_update_includes_new_password() {
        let body = serde_json::to_value(SettingsUpdate {
            password: Some("1234".to_string()),
            theme: Theme::DeepBlue,
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "password": "1234", "theme": "deep-blue" })
        );
    }
}
