//! Client state, one value per component.
//!
//! Each component owns its transitions; `ClientState` bundles them so the
//! view can be projected from a single value.

mod collection;
mod editor;
mod session;
mod settings;

pub use collection::{filter_memos, NoteCollection};
pub use editor::{Draft, Editor, EditorState, SaveRequest};
pub use session::{SessionGate, AUTHENTICATION_ERROR, CODE_LENGTH, INCORRECT_PASSWORD};
pub use settings::SettingsPanel;

use crate::models::MemoId;

/// Which pane the unlocked UI shows; exactly one at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Browsing,
    Editing,
    Settings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientState {
    pub session: SessionGate,
    pub collection: NoteCollection,
    pub editor: Editor,
    pub settings: SettingsPanel,
    /// Memo awaiting delete confirmation
    pub pending_delete: Option<MemoId>,
}

impl ClientState {
    /// The settings panel overlays the editor, so an open panel wins.
    pub const fn mode(&self) -> Mode {
        if self.settings.is_open() {
            Mode::Settings
        } else if self.editor.is_active() {
            Mode::Editing
        } else {
            Mode::Browsing
        }
    }
}
