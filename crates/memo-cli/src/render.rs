//! Plain-text rendering of the client view.

use memo_core::markup::Block;
use memo_core::state::CODE_LENGTH;
use memo_core::view::{ListRow, LockedView, Pane, UnlockedView, View};

use crate::commands::common::truncate_with_ellipsis;

pub fn render_view(view: &View) -> Vec<String> {
    match view {
        View::Locked(locked) => render_locked(locked),
        View::Unlocked(unlocked) => render_unlocked(unlocked),
    }
}

fn render_locked(view: &LockedView) -> Vec<String> {
    let mut lines = vec![format!("[{}]", view.theme.label())];
    let dots = "●".repeat(view.code_len) + &"○".repeat(CODE_LENGTH.saturating_sub(view.code_len));
    lines.push(format!("Password: {dots}"));
    if view.unlocking {
        lines.push("Unlocking...".to_string());
    }
    if let Some(error) = &view.error {
        lines.push(format!("! {error}"));
    }
    lines
}

fn render_unlocked(view: &UnlockedView) -> Vec<String> {
    let mut lines = vec![format!("[{}]", view.theme.label())];
    if !view.query.is_empty() {
        lines.push(format!("Search: {}", view.query));
    }

    if view.list.is_empty() {
        lines.push("  (no memos)".to_string());
    } else {
        lines.extend(view.list.iter().map(render_row));
    }
    lines.push(String::new());
    lines.extend(render_pane(&view.pane));

    if let Some(id) = &view.delete_prompt {
        lines.push(String::new());
        lines.push(format!("Delete memo {id}? (yes/no)"));
    }
    lines
}

fn render_row(row: &ListRow) -> String {
    let marker = if row.selected { '>' } else { ' ' };
    let title = truncate_with_ellipsis(&row.title, 24);
    let preview = truncate_with_ellipsis(&row.preview, 40);
    format!("{marker} {:<8}  {title:<24}  {preview}", row.id.to_string())
}

pub fn render_pane(pane: &Pane) -> Vec<String> {
    match pane {
        Pane::Settings {
            theme_choice,
            password_len,
        } => vec![
            "Settings".to_string(),
            format!("  theme: {} ({theme_choice})", theme_choice.label()),
            format!("  new password: {}", "*".repeat(*password_len)),
        ],
        Pane::Editor {
            creating,
            title,
            content,
            uploading,
        } => {
            let heading = if *creating { "New memo" } else { "Edit memo" };
            let mut lines = vec![heading.to_string(), format!("  title: {title}")];
            lines.extend(content.lines().map(|line| format!("  | {line}")));
            if *uploading {
                lines.push("  uploading image...".to_string());
            }
            lines
        }
        Pane::Detail { id, title, blocks } => {
            let mut lines = vec![format!("#{id} {title}")];
            lines.extend(render_blocks(blocks));
            lines
        }
        Pane::Empty => vec!["Select a memo or create a new one.".to_string()],
    }
}

pub fn render_blocks(blocks: &[Block]) -> Vec<String> {
    blocks
        .iter()
        .map(|block| match block {
            Block::Text(text) => text.clone(),
            Block::Image { url } => format!("[image] {url}"),
        })
        .collect()
}
