use std::env;
use std::io::{self, BufRead, IsTerminal, Read, Write};
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;

use memo_core::api::HttpMemoApi;
use memo_core::config::ClientConfig;
use memo_core::markup::image_urls;
use memo_core::state::CODE_LENGTH;
use memo_core::upload::{HttpUploader, UploadFile};
use memo_core::{LoginOutcome, Memo, MemoApp, MemoId};
use serde::Serialize;

use crate::config_profiles::{normalize_text_option, CliProfilesConfig};
use crate::error::CliError;

pub type CliApp = MemoApp<HttpMemoApi, HttpUploader>;

/// Flags shared by every command that talks to the backend.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub profile: Option<String>,
    pub api_base_url: Option<String>,
    pub upload_url: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MemoListItem {
    pub id: MemoId,
    pub title: String,
    pub preview: String,
    pub content: String,
    pub images: Vec<String>,
}

pub fn memo_to_list_item(memo: &Memo) -> MemoListItem {
    MemoListItem {
        id: memo.id.clone(),
        title: memo.title.clone(),
        preview: memo.preview(),
        content: memo.content.clone(),
        images: image_urls(&memo.content),
    }
}

pub fn format_memo_lines(memos: &[Memo]) -> Vec<String> {
    memos
        .iter()
        .map(|memo| {
            let title = truncate_with_ellipsis(&memo.title, 24);
            let preview = truncate_with_ellipsis(&memo.preview(), 40);
            format!("{:<8}  {title:<24}  {preview}", memo.id.to_string())
        })
        .collect()
}

pub fn truncate_with_ellipsis(value: &str, max_chars: usize) -> String {
    let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Session setup
// ---------------------------------------------------------------------------

/// Resolves endpoints from flags, then environment, then the stored profile.
///
/// `login_transition` overrides the unlock delay; `None` keeps the default.
pub fn resolve_client_config(
    options: &GlobalOptions,
    login_transition: Option<Duration>,
) -> Result<ClientConfig, CliError> {
    let profiles = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = profiles.resolve_profile_name(options.profile.as_deref());
    let profile = profiles.profile(&profile_name).cloned().unwrap_or_default();

    let api_base_url = normalize_text_option(options.api_base_url.clone())
        .or_else(|| normalize_text_option(env::var("MEMO_API_BASE_URL").ok()))
        .or_else(|| profile.api_base_url())
        .ok_or(CliError::ApiNotConfigured)?;
    let upload_url = normalize_text_option(options.upload_url.clone())
        .or_else(|| normalize_text_option(env::var("MEMO_UPLOAD_URL").ok()))
        .or_else(|| profile.upload_url());

    let mut config = ClientConfig::new(api_base_url)?
        .with_upload_url(upload_url)
        .with_theme(profile.theme.unwrap_or_default());
    if let Some(delay) = login_transition {
        config = config.with_login_transition(delay);
    }
    config.validate()?;
    tracing::debug!(profile = %profile_name, api = %config.api_base_url, "resolved client config");
    Ok(config)
}

pub fn build_app(config: &ClientConfig) -> Result<CliApp, CliError> {
    let api = HttpMemoApi::new(config)?;
    let uploader = HttpUploader::new(config)?;
    Ok(MemoApp::new(api, uploader, config))
}

/// Builds a client for a one-shot command and unlocks it.
pub async fn open_session(options: &GlobalOptions) -> Result<CliApp, CliError> {
    let config = resolve_client_config(options, Some(Duration::ZERO))?;
    let mut app = build_app(&config)?;
    let password = resolve_password(options.password.as_deref())?;
    unlock(&mut app, &password).await?;

    // The unlock fetch swallows failures; an empty list is fetched again so
    // a broken backend is reported instead of printing nothing.
    if app.state().collection.memos().is_empty() {
        app.refresh().await?;
    }
    Ok(app)
}

pub async fn unlock(app: &mut CliApp, password: &str) -> Result<(), CliError> {
    match app.submit_code(password).await {
        LoginOutcome::Unlocked => Ok(()),
        LoginOutcome::Incomplete => Err(CliError::InvalidPasswordLength),
        LoginOutcome::Rejected => Err(CliError::LoginRejected),
        LoginOutcome::Failed => Err(CliError::LoginFailed),
    }
}

pub fn resolve_password(explicit: Option<&str>) -> Result<String, CliError> {
    let password = match normalize_text_option(explicit.map(ToString::to_string))
        .or_else(|| normalize_text_option(env::var("MEMO_PASSWORD").ok()))
    {
        Some(password) => password,
        None => prompt_password()?,
    };
    validate_code(&password)?;
    Ok(password)
}

pub fn validate_code(code: &str) -> Result<(), CliError> {
    if code.chars().count() == CODE_LENGTH {
        Ok(())
    } else {
        Err(CliError::InvalidPasswordLength)
    }
}

fn prompt_password() -> Result<String, CliError> {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        return Err(CliError::MissingPassword);
    }
    let line = prompt_line("Password: ")?;
    normalize_text_option(Some(line)).ok_or(CliError::MissingPassword)
}

pub fn prompt_line(prompt: &str) -> Result<String, CliError> {
    let mut stdout = io::stdout();
    write!(stdout, "{prompt}")?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

// ---------------------------------------------------------------------------
// Memo lookup
// ---------------------------------------------------------------------------

/// Finds a memo by exact id, falling back to a unique id prefix.
pub fn resolve_memo(memos: &[Memo], memo_query: &str) -> Result<Memo, CliError> {
    let memo_query = normalize_memo_identifier(memo_query)?;
    if let Some(memo) = memos.iter().find(|memo| memo.id.to_string() == memo_query) {
        return Ok(memo.clone());
    }

    let matching = memos
        .iter()
        .filter(|memo| memo.id.to_string().starts_with(&memo_query))
        .collect::<Vec<_>>();

    match matching.as_slice() {
        [] => Err(CliError::MemoNotFound(memo_query)),
        [memo] => Ok((*memo).clone()),
        _ => {
            let options = matching
                .iter()
                .take(3)
                .map(|memo| memo.id.to_string())
                .collect::<Vec<_>>()
                .join(", ");

            Err(CliError::AmbiguousMemoId(format!(
                "ID prefix '{memo_query}' is ambiguous; matches: {options}"
            )))
        }
    }
}

pub fn normalize_content(content: &str) -> Option<String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn normalize_search_query(query: &str) -> Result<String, CliError> {
    normalize_content(query).ok_or(CliError::EmptySearchQuery)
}

pub fn normalize_memo_identifier(id: &str) -> Result<String, CliError> {
    normalize_content(id).ok_or(CliError::EmptyMemoId)
}

// ---------------------------------------------------------------------------
// Input capture
// ---------------------------------------------------------------------------

pub async fn load_images(paths: &[PathBuf]) -> Result<Vec<UploadFile>, CliError> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        files.push(UploadFile::from_path(path).await?);
    }
    Ok(files)
}

pub fn read_piped_stdin() -> Result<Option<String>, CliError> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(normalize_content(&buffer))
}

/// Opens the memo body in the user's editor and returns the saved text,
/// or `None` when it was left blank.
pub fn edit_memo_body(initial_body: &str) -> Result<Option<String>, CliError> {
    let raw = editor_setting(env::var("VISUAL").ok(), env::var("EDITOR").ok());
    let (program, args) = split_editor_command(&raw)
        .ok_or_else(|| CliError::EditorFailed("empty EDITOR command".into()))?;

    let mut draft = tempfile::Builder::new()
        .prefix("memo-draft-")
        .suffix(".md")
        .tempfile()?;
    draft.write_all(initial_body.as_bytes())?;
    draft.flush()?;

    let status = Command::new(&program)
        .args(&args)
        .arg(draft.path())
        .status()?;
    if !status.success() {
        return Err(CliError::EditorFailed(format!(
            "`{raw}` exited with status {status}"
        )));
    }

    let body = std::fs::read_to_string(draft.path())?;
    Ok(normalize_content(&body))
}

/// `$VISUAL`, then `$EDITOR`, then the platform fallback.
pub fn editor_setting(visual: Option<String>, editor: Option<String>) -> String {
    normalize_text_option(visual)
        .or_else(|| normalize_text_option(editor))
        .unwrap_or_else(|| fallback_editor().to_string())
}

/// Splits `code --wait` style settings into program and leading arguments.
pub fn split_editor_command(raw: &str) -> Option<(String, Vec<String>)> {
    let mut parts = raw.split_whitespace().map(ToString::to_string);
    let program = parts.next()?;
    Some((program, parts.collect()))
}

pub const fn fallback_editor() -> &'static str {
    if cfg!(windows) {
        "notepad"
    } else {
        "vi"
    }
}
