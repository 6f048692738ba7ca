//! Editor state machine: idle, creating a memo, or modifying one.

use crate::markup::image_markup;
use crate::models::{Memo, MemoId};

/// Unsaved title and content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub content: String,
}

impl Draft {
    fn from_memo(memo: &Memo) -> Self {
        Self {
            title: memo.title.clone(),
            content: memo.content.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditorState {
    #[default]
    Idle,
    /// New memo; the backend has not assigned an id yet
    Creating(Draft),
    /// Existing memo identified by `id`
    Modifying { id: MemoId, draft: Draft },
}

/// Request the editor wants sent when the user saves
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveRequest {
    Create { title: String, content: String },
    Update { id: MemoId, title: String, content: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Editor {
    state: EditorState,
    uploaded_image: Option<String>,
    uploading: bool,
}

impl Editor {
    pub fn start_create(&mut self) {
        self.state = EditorState::Creating(Draft::default());
        self.uploaded_image = None;
    }

    pub fn start_modify(&mut self, memo: &Memo) {
        self.state = EditorState::Modifying {
            id: memo.id.clone(),
            draft: Draft::from_memo(memo),
        };
        self.uploaded_image = None;
    }

    /// Back to idle, discarding the draft and any uploaded image reference.
    pub fn cancel(&mut self) {
        self.state = EditorState::Idle;
        self.uploaded_image = None;
    }

    pub const fn state(&self) -> &EditorState {
        &self.state
    }

    pub const fn is_active(&self) -> bool {
        !matches!(self.state, EditorState::Idle)
    }

    pub const fn is_creating(&self) -> bool {
        matches!(self.state, EditorState::Creating(_))
    }

    pub const fn draft(&self) -> Option<&Draft> {
        match &self.state {
            EditorState::Idle => None,
            EditorState::Creating(draft) | EditorState::Modifying { draft, .. } => Some(draft),
        }
    }

    fn draft_mut(&mut self) -> Option<&mut Draft> {
        match &mut self.state {
            EditorState::Idle => None,
            EditorState::Creating(draft) | EditorState::Modifying { draft, .. } => Some(draft),
        }
    }

    /// Returns false when idle.
    pub fn set_title(&mut self, title: impl Into<String>) -> bool {
        let Some(draft) = self.draft_mut() else {
            return false;
        };
        draft.title = title.into();
        true
    }

    /// Returns false when idle.
    pub fn set_content(&mut self, content: impl Into<String>) -> bool {
        let Some(draft) = self.draft_mut() else {
            return false;
        };
        draft.content = content.into();
        true
    }

    pub fn set_uploading(&mut self, uploading: bool) {
        self.uploading = uploading;
    }

    pub const fn is_uploading(&self) -> bool {
        self.uploading
    }

    /// Appends image markup for `url` on a new line of the draft content.
    ///
    /// Returns false when idle, leaving nothing recorded.
    pub fn append_image(&mut self, url: &str) -> bool {
        let Some(draft) = self.draft_mut() else {
            return false;
        };
        draft.content.push('\n');
        draft.content.push_str(&image_markup(url));
        self.uploaded_image = Some(url.to_string());
        true
    }

    pub fn uploaded_image(&self) -> Option<&str> {
        self.uploaded_image.as_deref()
    }

    pub fn save_request(&self) -> Option<SaveRequest> {
        match &self.state {
            EditorState::Idle => None,
            EditorState::Creating(draft) => Some(SaveRequest::Create {
                title: draft.title.clone(),
                content: draft.content.clone(),
            }),
            EditorState::Modifying { id, draft } => Some(SaveRequest::Update {
                id: id.clone(),
                title: draft.title.clone(),
                content: draft.content.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn start_create_opens_blank_draft() {
        let mut editor = Editor::default();
        editor.start_modify(&Memo::new(1, "old", "text"));
        editor.start_create();

        assert!(editor.is_creating());
        assert_eq!(editor.draft(), Some(&Draft::default()));
    }

    #[test]
    fn start_modify_copies_memo() {
        let mut editor = Editor::default();
        editor.start_modify(&Memo::new(5, "Groceries", "milk"));

        assert_eq!(
            editor.save_request(),
            Some(SaveRequest::Update {
                id: MemoId::Number(5),
                title: "Groceries".to_string(),
                content: "milk".to_string(),
            })
        );
    }

    #[test]
    fn idle_editor_ignores_edits() {
        let mut editor = Editor::default();
        assert!(!editor.set_title("x"));
        assert!(!editor.set_content("y"));
        assert!(!editor.append_image("http://img"));
        assert_eq!(editor.save_request(), None);
        assert_eq!(editor.uploaded_image(), None);
    }

    #[test]
    fn append_image_adds_markup_line() {
        let mut editor = Editor::default();
        editor.start_create();
        editor.set_content("milk");
        assert!(editor.append_image("http://img/1.png"));

        assert_eq!(
            editor.draft().map(|draft| draft.content.as_str()),
            Some("milk\n![画像](http://img/1.png)")
        );
        assert_eq!(editor.uploaded_image(), Some("http://img/1.png"));
    }

    #[test]
    fn cancel_discards_draft_and_upload() {
        let mut editor = Editor::default();
        editor.start_create();
        editor.set_title("draft");
        editor.append_image("http://img/2.png");
        editor.cancel();

        assert!(!editor.is_active());
        assert_eq!(editor.draft(), None);
        assert_eq!(editor.uploaded_image(), None);
    }

    #[test]
    fn create_request_has_no_id() {
        let mut editor = Editor::default();
        editor.start_create();
        editor.set_title("T");
        editor.set_content("C");
        assert_eq!(
            editor.save_request(),
            Some(SaveRequest::Create {
                title: "T".to_string(),
                content: "C".to_string(),
            })
        );
    }
}
