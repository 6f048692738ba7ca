//! memo-core - Core library for memo
//!
//! This crate contains the models, REST client, upload adapter and client
//! state machines shared by memo front ends.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod markup;
pub mod models;
pub mod state;
pub mod upload;
pub mod util;
pub mod view;

#[cfg(test)]
mod testing;

pub use app::{LoginOutcome, MemoApp};
pub use error::{Error, Result};
pub use models::{Memo, MemoId, Theme};
