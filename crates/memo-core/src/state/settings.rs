//! Settings panel: theme choice and password change draft.

use crate::api::SettingsUpdate;
use crate::models::Theme;
use crate::state::session::CODE_LENGTH;
use crate::util::truncate_chars;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsPanel {
    open: bool,
    /// Theme in effect for the rendered view
    active_theme: Theme,
    /// Theme picked in the panel, applied on confirm
    theme_choice: Theme,
    password_draft: String,
}

impl SettingsPanel {
    /// Closed panel with `theme` already in effect
    pub fn with_theme(theme: Theme) -> Self {
        Self {
            active_theme: theme,
            theme_choice: theme,
            ..Self::default()
        }
    }

    pub fn open(&mut self) {
        self.open = true;
        self.theme_choice = self.active_theme;
    }

    /// Closes without applying; drops the password draft.
    pub fn close(&mut self) {
        self.open = false;
        self.password_draft.clear();
        self.theme_choice = self.active_theme;
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    pub const fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme_choice = theme;
    }

    /// Keeps at most [`CODE_LENGTH`] characters, like the password input.
    pub fn set_new_password(&mut self, password: &str) {
        self.password_draft = truncate_chars(password, CODE_LENGTH);
    }

    pub const fn active_theme(&self) -> Theme {
        self.active_theme
    }

    pub const fn theme_choice(&self) -> Theme {
        self.theme_choice
    }

    pub fn password_draft(&self) -> &str {
        &self.password_draft
    }

    /// Payload for the settings endpoint; a blank password is omitted,
    /// anything else is sent exactly as typed.
    pub fn update_request(&self) -> SettingsUpdate {
        SettingsUpdate {
            password: (!self.password_draft.trim().is_empty())
                .then(|| self.password_draft.clone()),
            theme: self.theme_choice,
        }
    }

    /// Commits a successful update: closes the panel and activates the theme.
    pub fn finish_apply(&mut self, applied: &SettingsUpdate) {
        self.active_theme = applied.theme;
        self.theme_choice = applied.theme;
        self.password_draft.clear();
        self.open = false;
    }
}
