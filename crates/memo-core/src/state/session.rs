//! Password gate state.

use crate::util::truncate_chars;

/// Number of characters in a password code
pub const CODE_LENGTH: usize = 4;

/// Shown when the backend rejects a code
pub const INCORRECT_PASSWORD: &str = "Incorrect password";

/// Shown when the verification request itself fails
pub const AUTHENTICATION_ERROR: &str = "Authentication error";

/// Locked/unlocked state plus the code being typed.
///
/// Unlocking is one-way: there is no logout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionGate {
    code: String,
    authenticated: bool,
    unlocking: bool,
    error: Option<String>,
}

impl SessionGate {
    /// Replaces the code buffer, keeping at most [`CODE_LENGTH`] characters.
    ///
    /// Returns the code to verify once the buffer is full.
    pub fn input(&mut self, code: &str) -> Option<String> {
        if self.authenticated || self.unlocking {
            return None;
        }
        self.code = truncate_chars(code, CODE_LENGTH);
        (self.code.chars().count() == CODE_LENGTH).then(|| self.code.clone())
    }

    /// The backend accepted the code; the cosmetic transition starts.
    pub fn begin_unlock(&mut self) {
        self.unlocking = true;
    }

    pub fn finish_unlock(&mut self) {
        self.unlocking = false;
        self.authenticated = true;
        self.error = None;
    }

    pub fn reject(&mut self) {
        self.code.clear();
        self.error = Some(INCORRECT_PASSWORD.to_string());
    }

    pub fn fail(&mut self) {
        self.error = Some(AUTHENTICATION_ERROR.to_string());
    }

    /// Keeps a newly configured password as the remembered code.
    pub fn remember_code(&mut self, code: &str) {
        self.code = truncate_chars(code, CODE_LENGTH);
    }

    pub const fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub const fn is_unlocking(&self) -> bool {
        self.unlocking
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
