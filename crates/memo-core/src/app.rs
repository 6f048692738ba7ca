//! `MemoApp` drives the client state against the backend.
//!
//! Every mutating operation takes `&mut self`, so operations on one client
//! never overlap and a response is always applied to the state that issued
//! its request. Observers subscribe to a revision counter and re-project the
//! view when it changes.

use std::time::Duration;

use tokio::sync::watch;

use crate::api::MemoApi;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::models::{Memo, MemoId, Theme};
use crate::state::{ClientState, Mode, SaveRequest, SettingsPanel};
use crate::upload::{UploadFile, Uploader};
use crate::view::{self, View};

/// Result of feeding the password gate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Fewer than four characters entered
    Incomplete,
    Unlocked,
    /// Backend refused the code; the buffer was cleared
    Rejected,
    /// Verification request failed in transport
    Failed,
}

pub struct MemoApp<A, U> {
    api: A,
    uploader: U,
    login_transition: Duration,
    state: ClientState,
    changes: watch::Sender<u64>,
}

impl<A: MemoApi, U: Uploader> MemoApp<A, U> {
    pub fn new(api: A, uploader: U, config: &ClientConfig) -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            api,
            uploader,
            login_transition: config.login_transition(),
            state: ClientState {
                settings: SettingsPanel::with_theme(config.theme),
                ..ClientState::default()
            },
            changes,
        }
    }

    /// Receiver that observes a new revision after every state change.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    pub const fn state(&self) -> &ClientState {
        &self.state
    }

    pub const fn mode(&self) -> Mode {
        self.state.mode()
    }

    pub fn view(&self) -> View {
        view::project(&self.state)
    }

    pub fn filtered(&self) -> Vec<Memo> {
        self.state.collection.filtered()
    }

    pub fn selected(&self) -> Option<&Memo> {
        self.state.collection.selected()
    }

    fn notify(&self) {
        self.changes.send_modify(|revision| *revision += 1);
    }

    fn ensure_unlocked(&self) -> Result<()> {
        if self.state.session.is_authenticated() {
            Ok(())
        } else {
            Err(Error::Locked)
        }
    }

    // -----------------------------------------------------------------------
    // Session gate
    // -----------------------------------------------------------------------

    /// Feeds the code input. A full four-character code is verified; on
    /// success the list is fetched once.
    pub async fn submit_code(&mut self, code: &str) -> LoginOutcome {
        if self.state.session.is_authenticated() {
            return LoginOutcome::Unlocked;
        }
        let ready = self.state.session.input(code);
        self.notify();
        let Some(code) = ready else {
            return LoginOutcome::Incomplete;
        };

        match self.api.verify_password(&code).await {
            Ok(true) => {
                self.state.session.begin_unlock();
                self.notify();
                if !self.login_transition.is_zero() {
                    tokio::time::sleep(self.login_transition).await;
                }
                self.state.session.finish_unlock();
                tracing::info!("memo client unlocked");
                self.notify();
                if let Err(error) = self.refresh().await {
                    tracing::debug!("initial refresh failed: {error}");
                }
                LoginOutcome::Unlocked
            }
            Ok(false) => {
                self.state.session.reject();
                tracing::info!("password rejected");
                self.notify();
                LoginOutcome::Rejected
            }
            Err(error) => {
                self.state.session.fail();
                tracing::warn!("password verification failed: {error}");
                self.notify();
                LoginOutcome::Failed
            }
        }
    }

    // -----------------------------------------------------------------------
    // Collection
    // -----------------------------------------------------------------------

    /// Replaces the cached list with the backend's.
    ///
    /// On failure the list is emptied and the error logged; it is also
    /// returned for callers that report it.
    pub async fn refresh(&mut self) -> Result<()> {
        self.ensure_unlocked()?;
        let result = self.api.list_memos().await;
        let outcome = match result {
            Ok(memos) => {
                tracing::debug!(count = memos.len(), "memo list refreshed");
                self.state.collection.replace(memos);
                Ok(())
            }
            Err(error) => {
                tracing::warn!("failed to fetch memos: {error}");
                self.state.collection.clear();
                Err(error)
            }
        };
        self.notify();
        outcome
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.state.collection.set_query(query);
        self.notify();
    }

    /// Selects a memo (or clears the selection) and leaves the editor.
    pub fn select(&mut self, id: Option<MemoId>) -> Result<bool> {
        self.ensure_unlocked()?;
        let selected = self.state.collection.select(id);
        self.state.editor.cancel();
        self.notify();
        Ok(selected)
    }

    // -----------------------------------------------------------------------
    // Editor
    // -----------------------------------------------------------------------

    pub fn start_create(&mut self) -> Result<()> {
        self.ensure_unlocked()?;
        self.state.collection.clear_selection();
        self.state.editor.start_create();
        self.notify();
        Ok(())
    }

    /// Opens the editor on the selected memo.
    pub fn start_modify(&mut self) -> Result<()> {
        self.ensure_unlocked()?;
        let memo = self
            .state
            .collection
            .selected()
            .cloned()
            .ok_or(Error::InvalidState("no memo is selected"))?;
        self.state.editor.start_modify(&memo);
        self.notify();
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.state.editor.cancel();
        self.notify();
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<()> {
        if !self.state.editor.set_title(title) {
            return Err(Error::InvalidState("the editor is not open"));
        }
        self.notify();
        Ok(())
    }

    pub fn set_content(&mut self, content: impl Into<String>) -> Result<()> {
        if !self.state.editor.set_content(content) {
            return Err(Error::InvalidState("the editor is not open"));
        }
        self.notify();
        Ok(())
    }

    /// Uploads an image and appends its markup to the draft.
    ///
    /// A failed upload leaves the draft untouched.
    pub async fn attach_image(&mut self, file: UploadFile) -> Result<String> {
        self.ensure_unlocked()?;
        if !self.state.editor.is_active() {
            return Err(Error::InvalidState("the editor is not open"));
        }

        self.state.editor.set_uploading(true);
        self.notify();
        let result = self.uploader.upload(file).await;
        self.state.editor.set_uploading(false);

        let outcome = match result {
            Ok(url) => {
                self.state.editor.append_image(&url);
                tracing::debug!(%url, "image attached to draft");
                Ok(url)
            }
            Err(error) => {
                tracing::warn!("image upload failed: {error}");
                Err(error)
            }
        };
        self.notify();
        outcome
    }

    /// Sends the draft: create when new, update when modifying.
    ///
    /// On success the list is refreshed, the editor closes and the selection
    /// is cleared. On failure the draft stays open for a retry.
    pub async fn save(&mut self) -> Result<()> {
        self.ensure_unlocked()?;
        let request = self
            .state
            .editor
            .save_request()
            .ok_or(Error::InvalidState("the editor is not open"))?;

        let result = match &request {
            SaveRequest::Create { title, content } => self.api.create_memo(title, content).await,
            SaveRequest::Update { id, title, content } => {
                self.api.update_memo(id, title, content).await
            }
        };
        if let Err(error) = result {
            tracing::warn!("failed to save memo: {error}");
            return Err(error);
        }

        match &request {
            SaveRequest::Create { .. } => tracing::info!("memo created"),
            SaveRequest::Update { id, .. } => tracing::info!(%id, "memo updated"),
        }
        self.state.editor.cancel();
        self.state.collection.clear_selection();
        if let Err(error) = self.refresh().await {
            tracing::debug!("refresh after save failed: {error}");
        }
        self.notify();
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Delete
    // -----------------------------------------------------------------------

    /// Arms the confirmation prompt for `id`; nothing is sent yet.
    pub fn request_delete(&mut self, id: MemoId) -> Result<()> {
        self.ensure_unlocked()?;
        self.state.pending_delete = Some(id);
        self.notify();
        Ok(())
    }

    pub fn cancel_delete(&mut self) {
        self.state.pending_delete = None;
        self.notify();
    }

    /// Deletes the memo awaiting confirmation.
    ///
    /// On failure the list and selection are left as they were.
    pub async fn confirm_delete(&mut self) -> Result<()> {
        self.ensure_unlocked()?;
        let id = self
            .state
            .pending_delete
            .take()
            .ok_or(Error::InvalidState("no delete is awaiting confirmation"))?;
        self.notify();

        if let Err(error) = self.api.delete_memo(&id).await {
            tracing::warn!(%id, "failed to delete memo: {error}");
            return Err(error);
        }

        tracing::info!(%id, "memo deleted");
        self.state.collection.clear_selection();
        if let Err(error) = self.refresh().await {
            tracing::debug!("refresh after delete failed: {error}");
        }
        self.notify();
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Settings
    // -----------------------------------------------------------------------

    pub fn toggle_settings(&mut self) -> Result<()> {
        self.ensure_unlocked()?;
        self.state.settings.toggle();
        self.notify();
        Ok(())
    }

    pub fn open_settings(&mut self) -> Result<()> {
        self.ensure_unlocked()?;
        self.state.settings.open();
        self.notify();
        Ok(())
    }

    pub fn close_settings(&mut self) {
        self.state.settings.close();
        self.notify();
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.state.settings.set_theme(theme);
        self.notify();
    }

    pub fn set_new_password(&mut self, password: &str) {
        self.state.settings.set_new_password(password);
        self.notify();
    }

    /// Sends the theme and, when non-blank, the new password.
    ///
    /// On success the panel closes and a new password becomes the
    /// remembered code. On failure the panel stays open.
    pub async fn apply_settings(&mut self) -> Result<()> {
        self.ensure_unlocked()?;
        let update = self.state.settings.update_request();
        if let Err(error) = self.api.update_settings(&update).await {
            tracing::warn!("failed to update settings: {error}");
            return Err(error);
        }

        tracing::info!(
            theme = %update.theme,
            password_changed = update.password.is_some(),
            "settings updated"
        );
        self.state.settings.finish_apply(&update);
        if let Some(password) = update.password.as_deref() {
            self.state.session.remember_code(password);
        }
        self.notify();
        Ok(())
    }
}
