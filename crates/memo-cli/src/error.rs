use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] memo_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Memo needs a title or content")]
    EmptyMemo,
    #[error("Memo ID cannot be empty")]
    EmptyMemoId,
    #[error("Search query cannot be empty")]
    EmptySearchQuery,
    #[error("Memo not found for id/prefix: {0}")]
    MemoNotFound(String),
    #[error("{0}")]
    AmbiguousMemoId(String),
    #[error("Editor command failed: {0}")]
    EditorFailed(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error(
        "No API base URL configured. Run `memo config init --api-base-url <URL>` or set MEMO_API_BASE_URL."
    )]
    ApiNotConfigured,
    #[error("No password provided. Pass --password, set MEMO_PASSWORD, or run in a terminal.")]
    MissingPassword,
    #[error("Password must be exactly 4 characters")]
    InvalidPasswordLength,
    #[error("Incorrect password")]
    LoginRejected,
    #[error("Authentication error; check the API base URL and network")]
    LoginFailed,
}
