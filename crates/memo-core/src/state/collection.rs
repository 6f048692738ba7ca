//! In-memory memo list, search filter and selection.

use crate::models::{Memo, MemoId};

/// Memos matching `query` in title or content, case-insensitively.
///
/// Order-preserving; an empty query returns every memo.
#[must_use]
pub fn filter_memos(memos: &[Memo], query: &str) -> Vec<Memo> {
    let needle = query.to_lowercase();
    memos
        .iter()
        .filter(|memo| needle.is_empty() || memo.matches_lowercase(&needle))
        .cloned()
        .collect()
}

/// Cached memo list with the current search and selection.
///
/// The selection is an id into `memos`, never an owned copy, and always
/// names a memo present in the list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteCollection {
    memos: Vec<Memo>,
    query: String,
    selected: Option<MemoId>,
}

impl NoteCollection {
    /// Replaces the list wholesale and drops a selection that vanished.
    pub fn replace(&mut self, memos: Vec<Memo>) {
        self.memos = memos;
        if self
            .selected
            .as_ref()
            .is_some_and(|id| self.get(id).is_none())
        {
            self.selected = None;
        }
    }

    pub fn clear(&mut self) {
        self.replace(Vec::new());
    }

    pub fn memos(&self) -> &[Memo] {
        &self.memos
    }

    pub fn get(&self, id: &MemoId) -> Option<&Memo> {
        self.memos.iter().find(|memo| &memo.id == id)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Memos visible under the current search query
    #[must_use]
    pub fn filtered(&self) -> Vec<Memo> {
        filter_memos(&self.memos, &self.query)
    }

    /// Selects a memo by id. Unknown ids clear the selection.
    ///
    /// Returns whether a memo is selected afterwards.
    pub fn select(&mut self, id: Option<MemoId>) -> bool {
        self.selected = id.filter(|id| self.get(id).is_some());
        self.selected.is_some()
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub const fn selected_id(&self) -> Option<&MemoId> {
        self.selected.as_ref()
    }

    pub fn selected(&self) -> Option<&Memo> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample() -> Vec<Memo> {
        vec![
            Memo::new(1, "Groceries", "milk\neggs"),
            Memo::new(2, "Ideas", "Build a MILK bar"),
            Memo::new(3, "Travel", "Kyoto in spring"),
        ]
    }

    #[test]
    fn filter_matches_title_or_content_case_insensitively() {
        let ids = filter_memos(&sample(), "Milk")
            .into_iter()
            .map(|memo| memo.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![MemoId::Number(1), MemoId::Number(2)]);

        let by_title = filter_memos(&sample(), "travel");
        assert_eq!(by_title.len(), 1);
    }

    #[test]
    fn filter_with_empty_query_is_identity() {
        assert_eq!(filter_memos(&sample(), ""), sample());
    }

    #[test]
    fn filter_is_idempotent() {
        for query in ["", "milk", "I", "zzz", "kyoto"] {
            let once = filter_memos(&sample(), query);
            let twice = filter_memos(&once, query);
            assert_eq!(once, twice, "query {query:?}");
        }
    }

    #[test]
    fn filtered_does_not_mutate_list() {
        let mut collection = NoteCollection::default();
        collection.replace(sample());
        collection.set_query("kyoto");
        assert_eq!(collection.filtered().len(), 1);
        assert_eq!(collection.memos().len(), 3);
    }

    #[test]
    fn select_rejects_unknown_ids() {
        let mut collection = NoteCollection::default();
        collection.replace(sample());

        assert!(collection.select(Some(MemoId::Number(2))));
        assert_eq!(collection.selected().map(|memo| memo.title.as_str()), Some("Ideas"));

        assert!(!collection.select(Some(MemoId::Number(99))));
        assert_eq!(collection.selected_id(), None);
    }

    #[test]
    fn replace_prunes_vanished_selection() {
        let mut collection = NoteCollection::default();
        collection.replace(sample());
        collection.select(Some(MemoId::Number(3)));

        collection.replace(sample().into_iter().take(2).collect());
        assert_eq!(collection.selected_id(), None);
    }

    #[test]
    fn replace_keeps_selection_and_picks_up_new_version() {
        let mut collection = NoteCollection::default();
        collection.replace(sample());
        collection.select(Some(MemoId::Number(1)));

        collection.replace(vec![Memo::new(1, "Groceries", "milk\neggs\nbread")]);
        assert_eq!(
            collection.selected().map(|memo| memo.content.as_str()),
            Some("milk\neggs\nbread")
        );
    }
}
