//! Data models for memo

mod memo;
mod settings;

pub use memo::{Memo, MemoId};
pub use settings::{Theme, ThemePalette};
