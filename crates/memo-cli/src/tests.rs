use memo_core::{Memo, MemoId, Theme};
use pretty_assertions::assert_eq;

use crate::cli::CompletionShell;
use crate::commands::common::{
    editor_setting, fallback_editor, format_memo_lines, memo_to_list_item, normalize_content,
    normalize_memo_identifier, normalize_search_query, resolve_memo, resolve_password,
    split_editor_command, truncate_with_ellipsis, validate_code,
};
use crate::commands::completions::render_completions;
use crate::commands::config::{describe_profile, merge_profile};
use crate::commands::delete::is_affirmative;
use crate::config_profiles::CliProfile;
use crate::error::CliError;

fn sample_memos() -> Vec<Memo> {
    vec![
        Memo::new(120, "Groceries", "milk\n![画像](https://x/a.png)\neggs"),
        Memo::new(121, "Work", "standup notes"),
        Memo::new(7, "Ideas", ""),
        Memo::new("abc-1", "Text id", "string ids are kept"),
    ]
}

#[test]
fn normalize_content_trims_and_rejects_empty() {
    assert_eq!(normalize_content("  hello  "), Some("hello".to_string()));
    assert_eq!(normalize_content(" \n\t "), None);
}

#[test]
fn normalize_content_keeps_multiline_text() {
    assert_eq!(
        normalize_content("line 1\nline 2\n"),
        Some("line 1\nline 2".to_string())
    );
}

#[test]
fn editor_setting_prefers_visual_then_editor() {
    assert_eq!(
        editor_setting(Some("code --wait".to_string()), Some("nano".to_string())),
        "code --wait"
    );
    assert_eq!(
        editor_setting(Some(" ".to_string()), Some("nano".to_string())),
        "nano"
    );
    assert_eq!(editor_setting(None, None), fallback_editor());
}

#[test]
fn split_editor_command_keeps_leading_arguments() {
    assert_eq!(
        split_editor_command("code --wait"),
        Some(("code".to_string(), vec!["--wait".to_string()]))
    );
    assert_eq!(
        split_editor_command("vi"),
        Some(("vi".to_string(), Vec::new()))
    );
    assert_eq!(split_editor_command("   "), None);
}

#[test]
fn normalizers_reject_blank_input() {
    assert!(matches!(
        normalize_search_query("   "),
        Err(CliError::EmptySearchQuery)
    ));
    assert!(matches!(
        normalize_memo_identifier(""),
        Err(CliError::EmptyMemoId)
    ));
    assert_eq!(normalize_search_query(" milk ").unwrap(), "milk");
}

#[test]
fn truncate_with_ellipsis_collapses_whitespace() {
    assert_eq!(
        truncate_with_ellipsis("This is a very long sentence that should be shortened", 20),
        "This is a very lo..."
    );
    assert_eq!(truncate_with_ellipsis("  short \n text ", 20), "short text");
}

#[test]
fn resolve_memo_prefers_exact_id() {
    let memos = sample_memos();
    let memo = resolve_memo(&memos, "7").unwrap();
    assert_eq!(memo.title, "Ideas");

    let memo = resolve_memo(&memos, " abc-1 ").unwrap();
    assert_eq!(memo.id, MemoId::Text("abc-1".to_string()));
}

#[test]
fn resolve_memo_accepts_unique_prefix() {
    let memos = sample_memos();
    let memo = resolve_memo(&memos, "abc").unwrap();
    assert_eq!(memo.title, "Text id");
}

#[test]
fn resolve_memo_reports_ambiguous_and_missing_ids() {
    let memos = sample_memos();

    let error = resolve_memo(&memos, "12").unwrap_err();
    assert_eq!(
        error.to_string(),
        "ID prefix '12' is ambiguous; matches: 120, 121"
    );

    let error = resolve_memo(&memos, "999").unwrap_err();
    assert!(matches!(error, CliError::MemoNotFound(id) if id == "999"));
}

#[test]
fn format_memo_lines_uses_preview_placeholder() {
    let lines = format_memo_lines(&sample_memos()[..1]);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("120       Groceries"));
    assert!(lines[0].ends_with("milk [画像] eggs"));
}

#[test]
fn memo_list_item_serializes_original_id_type() {
    let memos = sample_memos();
    let numeric = serde_json::to_value(memo_to_list_item(&memos[0])).unwrap();
    assert_eq!(numeric["id"], serde_json::json!(120));
    assert_eq!(numeric["images"], serde_json::json!(["https://x/a.png"]));
    assert_eq!(numeric["preview"], "milk [画像] eggs");

    let text = serde_json::to_value(memo_to_list_item(&memos[3])).unwrap();
    assert_eq!(text["id"], serde_json::json!("abc-1"));
}

#[test]
fn validate_code_requires_four_characters() {
    assert!(validate_code("0427").is_ok());
    assert!(validate_code("あいうえ").is_ok());
    assert!(matches!(
        validate_code("123"),
        Err(CliError::InvalidPasswordLength)
    ));
}

#[test]
fn resolve_password_prefers_explicit_flag() {
    assert_eq!(resolve_password(Some(" 0427 ")).unwrap(), "0427");
    assert!(matches!(
        resolve_password(Some("12345")),
        Err(CliError::InvalidPasswordLength)
    ));
}

#[test]
fn delete_confirmation_accepts_yes_only() {
    assert!(is_affirmative("y"));
    assert!(is_affirmative(" YES "));
    assert!(!is_affirmative(""));
    assert!(!is_affirmative("nope"));
}

#[test]
fn merge_profile_keeps_existing_values_for_blank_input() {
    let mut profile = CliProfile {
        api_base_url: Some("https://old.example.com".to_string()),
        upload_url: Some("https://files.example.com/upload".to_string()),
        theme: Some(Theme::LightPink),
    };
    merge_profile(
        &mut profile,
        Some("https://memo.example.com/".to_string()),
        Some("  ".to_string()),
    );

    assert_eq!(
        profile.api_base_url.as_deref(),
        Some("https://memo.example.com")
    );
    assert_eq!(
        profile.upload_url.as_deref(),
        Some("https://files.example.com/upload")
    );
    assert_eq!(profile.theme, Some(Theme::LightPink));
}

#[test]
fn describe_profile_shows_derived_upload_url() {
    let profile = CliProfile {
        api_base_url: Some("https://memo.example.com".to_string()),
        ..CliProfile::default()
    };
    assert_eq!(
        describe_profile(&profile),
        vec![
            "api_base_url: https://memo.example.com".to_string(),
            "upload_url:   https://memo.example.com/api/upload (default)".to_string(),
            "theme:        deep-blue".to_string(),
        ]
    );
}

#[test]
fn completions_are_generated_for_memo_binary() {
    for shell in [
        CompletionShell::Bash,
        CompletionShell::Zsh,
        CompletionShell::Fish,
    ] {
        let script = String::from_utf8(render_completions(shell)).unwrap();
        assert!(script.contains("memo"), "{shell:?} script names the binary");
    }
}
