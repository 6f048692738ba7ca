//! Image upload adapter.
//!
//! The upload service takes a multipart `file` field and answers with
//! `{"url": ...}` on success or `{"error": ...}` on failure.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::util::compact_text;

const FALLBACK_FILE_NAME: &str = "image";

/// A file picked for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// Reads a file from disk, guessing its content type from the extension.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(FALLBACK_FILE_NAME)
            .to_string();
        Ok(Self::new(file_name, bytes))
    }
}

/// Hosts a file and returns the public URL
#[allow(async_fn_in_trait)]
pub trait Uploader {
    async fn upload(&self, file: UploadFile) -> Result<String>;
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

/// Multipart uploader for the hosted upload endpoint.
#[derive(Debug, Clone)]
pub struct HttpUploader {
    upload_url: String,
    client: Client,
}

impl HttpUploader {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            upload_url: config.resolved_upload_url(),
            client,
        })
    }

    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }
}

/// Interprets an upload service payload.
pub(crate) fn parse_upload_response(payload: &str) -> Result<String> {
    let response: UploadResponse = serde_json::from_str(payload)?;
    if let Some(error) = response.error.filter(|error| !error.is_null()) {
        let message = error
            .as_str()
            .map_or_else(|| error.to_string(), ToString::to_string);
        return Err(Error::Upload(message));
    }
    response
        .url
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| Error::Upload("upload response did not include a url".to_string()))
}

impl Uploader for HttpUploader {
    async fn upload(&self, file: UploadFile) -> Result<String> {
        tracing::debug!(
            file_name = %file.file_name,
            content_type = %file.content_type,
            size = file.bytes.len(),
            "uploading image"
        );
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(&self.upload_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        match parse_upload_response(&body) {
            Ok(url) if status.is_success() => Ok(url),
            Ok(_) | Err(Error::Serialization(_)) => Err(Error::Upload(format!(
                "HTTP {}: {}",
                status.as_u16(),
                compact_text(&body)
            ))),
            Err(error) => Err(error),
        }
    }
}
