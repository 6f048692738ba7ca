//! reqwest implementation of [`MemoApi`].

use reqwest::{Client, Method, Response};
use serde::{Deserialize, Serialize};

use super::{MemoApi, SettingsUpdate};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::models::{Memo, MemoId};
use crate::util::compact_text;

const VERIFY_PASSWORD_ROUTE: &str = "/api/verify-password";
const MEMOS_ROUTE: &str = "/api/memos";
const UPDATE_SETTINGS_ROUTE: &str = "/api/update-settings";

/// HTTP client for the memo backend.
#[derive(Debug, Clone)]
pub struct HttpMemoApi {
    base_url: String,
    client: Client,
}

#[derive(Serialize)]
struct PasswordBody<'a> {
    password: &'a str,
}

#[derive(Serialize)]
struct MemoBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a MemoId>,
    title: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct IdBody<'a> {
    id: &'a MemoId,
}

#[derive(Deserialize)]
struct MemoListResponse {
    #[serde(default)]
    data: serde_json::Value,
}

impl HttpMemoApi {
    /// Builds a client from a validated config.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            base_url: config.api_base_url.clone(),
            client,
        })
    }

    /// Returns the base URL this client was configured with.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        route: &str,
        body: &B,
    ) -> Result<Response> {
        let url = format!("{}{route}", self.base_url);
        tracing::debug!(%method, %url, "memo api request");
        Ok(self
            .client
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await?)
    }
}

async fn ensure_success(response: Response, operation: &'static str) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    Err(Error::Status {
        operation,
        status,
        body: compact_text(&body),
    })
}

/// Decodes a list payload; a `data` field that is not an array means no memos.
pub(crate) fn parse_memo_list(payload: &str) -> Result<Vec<Memo>> {
    let response: MemoListResponse = serde_json::from_str(payload)?;
    match response.data {
        serde_json::Value::Array(_) => Ok(serde_json::from_value(response.data)?),
        _ => Ok(Vec::new()),
    }
}

impl MemoApi for HttpMemoApi {
    async fn verify_password(&self, password: &str) -> Result<bool> {
        let response = self
            .send_json(Method::POST, VERIFY_PASSWORD_ROUTE, &PasswordBody { password })
            .await?;
        let accepted = response.status().is_success();
        if !accepted {
            tracing::debug!(status = response.status().as_u16(), "password rejected");
        }
        Ok(accepted)
    }

    async fn list_memos(&self) -> Result<Vec<Memo>> {
        let url = format!("{}{MEMOS_ROUTE}", self.base_url);
        tracing::debug!(%url, "memo api request");
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let response = ensure_success(response, "List memos").await?;
        let body = response.text().await?;
        parse_memo_list(&body)
    }

    async fn create_memo(&self, title: &str, content: &str) -> Result<()> {
        let body = MemoBody {
            id: None,
            title,
            content,
        };
        let response = self.send_json(Method::POST, MEMOS_ROUTE, &body).await?;
        ensure_success(response, "Create memo").await?;
        Ok(())
    }

    async fn update_memo(&self, id: &MemoId, title: &str, content: &str) -> Result<()> {
        let body = MemoBody {
            id: Some(id),
            title,
            content,
        };
        let response = self.send_json(Method::PUT, MEMOS_ROUTE, &body).await?;
        ensure_success(response, "Update memo").await?;
        Ok(())
    }

    async fn delete_memo(&self, id: &MemoId) -> Result<()> {
        let response = self
            .send_json(Method::DELETE, MEMOS_ROUTE, &IdBody { id })
            .await?;
        ensure_success(response, "Delete memo").await?;
        Ok(())
    }

    async fn update_settings(&self, update: &SettingsUpdate) -> Result<()> {
        let response = self
            .send_json(Method::POST, UPDATE_SETTINGS_ROUTE, update)
            .await?;
        ensure_success(response, "Update settings").await?;
        Ok(())
    }
}
