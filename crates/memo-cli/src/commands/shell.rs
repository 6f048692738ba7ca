//! Interactive session over the full client state machine.

use std::env;
use std::path::PathBuf;

use memo_core::{MemoId, Theme};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;

use crate::commands::common::{
    build_app, edit_memo_body, resolve_client_config, resolve_memo, CliApp,
    GlobalOptions,
};
use crate::config_profiles::normalize_text_option;
use crate::error::CliError;
use crate::render::render_view;

const HELP: &str = "\
Commands:
  list                   show the memo list
  search [TEXT]          filter by title or content (blank clears)
  open ID | close        select a memo or clear the selection
  new | edit             start a new memo or edit the selected one
  title TEXT             set the draft title
  content [TEXT]         set the draft content ($EDITOR when TEXT is omitted)
  image PATH             upload an image into the draft
  save | cancel          send or discard the draft
  delete [ID]            ask to delete a memo (then `yes` or `no`)
  settings               open or close the settings panel
  theme light-pink|deep-blue, password CODE, apply
  refresh | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Search(String),
    Open(String),
    Close,
    New,
    Edit,
    Title(String),
    Content(Option<String>),
    Image(PathBuf),
    Save,
    Cancel,
    Delete(Option<String>),
    ConfirmDelete,
    CancelDelete,
    Settings,
    Theme(Theme),
    Password(String),
    Apply,
    Refresh,
    Help,
    Quit,
}

pub fn parse_shell_command(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    let (head, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(head, rest)| (head, rest.trim()));
    let rest_opt = (!rest.is_empty()).then(|| rest.to_string());

    let command = match head.to_lowercase().as_str() {
        "list" | "ls" => ShellCommand::List,
        "search" | "find" => ShellCommand::Search(rest.to_string()),
        "open" | "show" => ShellCommand::Open(required(rest_opt, "open needs a memo ID")?),
        "close" => ShellCommand::Close,
        "new" | "add" => ShellCommand::New,
        "edit" => ShellCommand::Edit,
        "title" => ShellCommand::Title(rest.to_string()),
        "content" => ShellCommand::Content(rest_opt),
        "image" => ShellCommand::Image(PathBuf::from(required(rest_opt, "image needs a path")?)),
        "save" => ShellCommand::Save,
        "cancel" => ShellCommand::Cancel,
        "delete" | "rm" => ShellCommand::Delete(rest_opt),
        "yes" | "y" => ShellCommand::ConfirmDelete,
        "no" | "n" => ShellCommand::CancelDelete,
        "settings" => ShellCommand::Settings,
        "theme" => ShellCommand::Theme(rest.parse::<Theme>()?),
        "password" => ShellCommand::Password(rest.to_string()),
        "apply" => ShellCommand::Apply,
        "refresh" => ShellCommand::Refresh,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("Unknown command '{other}'; type `help`")),
    };
    Ok(command)
}

fn required(value: Option<String>, message: &str) -> Result<String, String> {
    value.ok_or_else(|| message.to_string())
}

pub async fn run_shell(options: &GlobalOptions) -> Result<(), CliError> {
    let config = resolve_client_config(options, None)?;
    let mut app = build_app(&config)?;
    let mut changes = app.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    if let Some(password) = initial_code(
        options.password.as_deref(),
        env::var("MEMO_PASSWORD").ok(),
    ) {
        app.submit_code(&password).await;
    }
    print_if_changed(&app, &mut changes);

    while !app.state().session.is_authenticated() {
        let Some(line) = lines.next_line().await? else {
            return Ok(());
        };
        if feed_locked_line(&mut app, &line).await == LockedStep::Quit {
            return Ok(());
        }
        print_if_changed(&app, &mut changes);
    }
    println!("Type `help` for commands.");

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match parse_shell_command(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("! {message}");
                continue;
            }
        };
        match command {
            ShellCommand::Quit => break,
            ShellCommand::Help => println!("{HELP}"),
            ShellCommand::List => print_view(&app),
            command => {
                if let Err(error) = apply_command(&mut app, command).await {
                    println!("! {error}");
                }
            }
        }
        print_if_changed(&app, &mut changes);
    }

    Ok(())
}

/// Code to try before prompting: `--password`, then `MEMO_PASSWORD`.
fn initial_code(explicit: Option<&str>, env_password: Option<String>) -> Option<String> {
    normalize_text_option(explicit.map(ToString::to_string))
        .or_else(|| normalize_text_option(env_password))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LockedStep {
    Continue,
    Quit,
}

/// Handles one line typed at the password gate. Quit words leave the shell
/// and are never sent for verification.
async fn feed_locked_line(app: &mut CliApp, line: &str) -> LockedStep {
    let line = line.trim();
    if line.is_empty() {
        return LockedStep::Continue;
    }
    if matches!(line.to_lowercase().as_str(), "quit" | "exit" | "q") {
        return LockedStep::Quit;
    }
    app.submit_code(line).await;
    LockedStep::Continue
}

async fn apply_command(app: &mut CliApp, command: ShellCommand) -> Result<(), CliError> {
    match command {
        ShellCommand::Search(query) => app.set_query(query),
        ShellCommand::Open(id) => {
            let memo = resolve_memo(app.state().collection.memos(), &id)?;
            app.select(Some(memo.id))?;
        }
        ShellCommand::Close => {
            app.select(None)?;
        }
        ShellCommand::New => app.start_create()?,
        ShellCommand::Edit => app.start_modify()?,
        ShellCommand::Title(title) => app.set_title(title)?,
        ShellCommand::Content(Some(content)) => app.set_content(content)?,
        ShellCommand::Content(None) => {
            let initial = app
                .state()
                .editor
                .draft()
                .map(|draft| draft.content.clone())
                .unwrap_or_default();
            let content = edit_memo_body(&initial)?.unwrap_or_default();
            app.set_content(content)?;
        }
        ShellCommand::Image(path) => {
            let file = memo_core::upload::UploadFile::from_path(&path).await?;
            app.attach_image(file).await?;
        }
        ShellCommand::Save => app.save().await?,
        ShellCommand::Cancel => app.cancel_edit(),
        ShellCommand::Delete(id) => {
            let id = delete_target(app, id.as_deref())?;
            app.request_delete(id)?;
        }
        ShellCommand::ConfirmDelete => app.confirm_delete().await?,
        ShellCommand::CancelDelete => app.cancel_delete(),
        ShellCommand::Settings => app.toggle_settings()?,
        ShellCommand::Theme(theme) => app.set_theme(theme),
        ShellCommand::Password(password) => app.set_new_password(&password),
        ShellCommand::Apply => app.apply_settings().await?,
        ShellCommand::Refresh => app.refresh().await?,
        ShellCommand::List | ShellCommand::Help | ShellCommand::Quit => {}
    }
    Ok(())
}

fn delete_target(app: &CliApp, id: Option<&str>) -> Result<MemoId, CliError> {
    match id {
        Some(id) => Ok(resolve_memo(app.state().collection.memos(), id)?.id),
        None => app
            .state()
            .collection
            .selected_id()
            .cloned()
            .ok_or(CliError::EmptyMemoId),
    }
}

fn print_if_changed(app: &CliApp, changes: &mut watch::Receiver<u64>) {
    if changes.has_changed().unwrap_or(false) {
        let _revision = *changes.borrow_and_update();
        print_view(app);
    }
}

fn print_view(app: &CliApp) {
    println!();
    for line in render_view(&app.view()) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn offline_app() -> CliApp {
        let config = memo_core::config::ClientConfig::new("http://127.0.0.1:9")
            .unwrap()
            .with_login_transition(std::time::Duration::ZERO);
        build_app(&config).unwrap()
    }

    #[test]
    fn initial_code_prefers_flag_then_environment() {
        assert_eq!(
            initial_code(Some("0427"), Some("1111".to_string())),
            Some("0427".to_string())
        );
        assert_eq!(
            initial_code(Some("  "), Some("1111".to_string())),
            Some("1111".to_string())
        );
        assert_eq!(initial_code(None, None), None);
    }

    #[tokio::test]
    async fn quit_at_password_gate_is_not_verified() {
        let mut app = offline_app();

        for word in ["quit", "EXIT", " q "] {
            assert_eq!(feed_locked_line(&mut app, word).await, LockedStep::Quit);
        }
        assert_eq!(app.state().session.code(), "");
        assert_eq!(app.state().session.error(), None);
        assert!(!app.state().session.is_authenticated());
    }

    #[tokio::test]
    async fn partial_code_at_password_gate_is_buffered() {
        let mut app = offline_app();

        assert_eq!(feed_locked_line(&mut app, "04").await, LockedStep::Continue);
        assert_eq!(feed_locked_line(&mut app, "   ").await, LockedStep::Continue);
        assert_eq!(app.state().session.code(), "04");
        assert_eq!(app.state().session.error(), None);
    }

    #[test]
    fn parses_commands_with_arguments() {
        assert_eq!(
            parse_shell_command("  search  milk tea "),
            Ok(ShellCommand::Search("milk tea".to_string()))
        );
        assert_eq!(
            parse_shell_command("OPEN 12"),
            Ok(ShellCommand::Open("12".to_string()))
        );
        assert_eq!(parse_shell_command("content"), Ok(ShellCommand::Content(None)));
        assert_eq!(
            parse_shell_command("theme light-pink"),
            Ok(ShellCommand::Theme(Theme::LightPink))
        );
        assert_eq!(parse_shell_command("delete"), Ok(ShellCommand::Delete(None)));
    }

    #[test]
    fn rejects_missing_arguments_and_unknown_commands() {
        assert!(parse_shell_command("open").is_err());
        assert!(parse_shell_command("image   ").is_err());
        assert!(parse_shell_command("theme purple").is_err());
        assert!(parse_shell_command("dance")
            .unwrap_err()
            .contains("Unknown command 'dance'"));
    }
}
