//! Theme settings model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Color theme choices offered by the settings panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    /// Pale pink gradient with dark text
    LightPink,
    /// Deep blue gradient with light text
    #[default]
    DeepBlue,
}

/// Colors used to paint a theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    /// Background gradient stops, top-left to bottom-right
    pub gradient: [&'static str; 3],
    /// Whether foreground text should be dark
    pub dark_text: bool,
}

impl Theme {
    pub const ALL: [Self; 2] = [Self::LightPink, Self::DeepBlue];

    /// Wire name sent to `/api/update-settings`
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LightPink => "light-pink",
            Self::DeepBlue => "deep-blue",
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::LightPink => "淡いピンク",
            Self::DeepBlue => "深い青",
        }
    }

    #[must_use]
    pub const fn palette(self) -> ThemePalette {
        match self {
            Self::LightPink => ThemePalette {
                gradient: ["#fff0f5", "#ffe4e1", "#ffb6c1"],
                dark_text: true,
            },
            Self::DeepBlue => ThemePalette {
                gradient: ["#1a237e", "#0d47a1", "#000000"],
                dark_text: false,
            },
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light-pink" => Ok(Self::LightPink),
            "deep-blue" => Ok(Self::DeepBlue),
            other => Err(format!(
                "unknown theme '{other}' (expected light-pink or deep-blue)"
            )),
        }
    }
}
