//! Pure projection from client state to what the screen shows.

use crate::markup::{render_blocks, Block};
use crate::models::{MemoId, Theme};
use crate::state::{ClientState, EditorState, Mode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Locked(LockedView),
    Unlocked(UnlockedView),
}

/// Password gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockedView {
    pub theme: Theme,
    /// Characters typed so far; the code itself is never projected
    pub code_len: usize,
    pub error: Option<String>,
    /// Verified and playing the transition
    pub unlocking: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnlockedView {
    pub theme: Theme,
    pub query: String,
    pub list: Vec<ListRow>,
    pub pane: Pane,
    pub delete_prompt: Option<MemoId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub id: MemoId,
    pub title: String,
    pub preview: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pane {
    Settings {
        theme_choice: Theme,
        password_len: usize,
    },
    Editor {
        creating: bool,
        title: String,
        content: String,
        uploading: bool,
    },
    Detail {
        id: MemoId,
        title: String,
        blocks: Vec<Block>,
    },
    /// Nothing selected: prompt to pick or create a memo
    Empty,
}

#[must_use]
pub fn project(state: &ClientState) -> View {
    let theme = state.settings.active_theme();
    if !state.session.is_authenticated() {
        return View::Locked(LockedView {
            theme,
            code_len: state.session.code().chars().count(),
            error: state.session.error().map(ToString::to_string),
            unlocking: state.session.is_unlocking(),
        });
    }

    let selected_id = state.collection.selected_id();
    let list = state
        .collection
        .filtered()
        .into_iter()
        .map(|memo| ListRow {
            selected: selected_id == Some(&memo.id),
            preview: memo.preview(),
            id: memo.id,
            title: memo.title,
        })
        .collect();

    View::Unlocked(UnlockedView {
        theme,
        query: state.collection.query().to_string(),
        list,
        pane: project_pane(state),
        delete_prompt: state.pending_delete.clone(),
    })
}

fn project_pane(state: &ClientState) -> Pane {
    match state.mode() {
        Mode::Settings => Pane::Settings {
            theme_choice: state.settings.theme_choice(),
            password_len: state.settings.password_draft().chars().count(),
        },
        Mode::Editing => {
            let (creating, draft) = match state.editor.state() {
                EditorState::Creating(draft) => (true, draft),
                EditorState::Modifying { draft, .. } => (false, draft),
                EditorState::Idle => return Pane::Empty,
            };
            Pane::Editor {
                creating,
                title: draft.title.clone(),
                content: draft.content.clone(),
                uploading: state.editor.is_uploading(),
            }
        }
        Mode::Browsing => state
            .collection
            .selected()
            .map_or(Pane::Empty, |memo| Pane::Detail {
                id: memo.id.clone(),
                title: memo.title.clone(),
                blocks: render_blocks(&memo.content),
            }),
    }
}
