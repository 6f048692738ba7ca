//! Memo model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::markup;

/// Server-assigned memo identifier.
///
/// The backend owns the id scheme, so both JSON numbers and strings are
/// accepted and written back exactly as they were received.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MemoId {
    Number(i64),
    Text(String),
}

impl fmt::Display for MemoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl FromStr for MemoId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(s.parse::<i64>()
            .map_or_else(|_| Self::Text(s.to_string()), Self::Number))
    }
}

impl From<i64> for MemoId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for MemoId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A persisted memo as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memo {
    /// Server-assigned identifier
    pub id: MemoId,
    /// Title line
    #[serde(default, deserialize_with = "nullable_string")]
    pub title: String,
    /// Body text, may contain `![caption](url)` image lines
    #[serde(default, deserialize_with = "nullable_string")]
    pub content: String,
}

impl Memo {
    pub fn new(id: impl Into<MemoId>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
        }
    }

    /// Case-insensitive substring match against title and content.
    ///
    /// `needle` must already be lowercased.
    #[must_use]
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.content.to_lowercase().contains(needle)
    }

    /// One-line list preview with image markup replaced by a placeholder
    #[must_use]
    pub fn preview(&self) -> String {
        markup::preview(&self.content)
    }
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
