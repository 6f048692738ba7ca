use crate::commands::common::{open_session, prompt_line, resolve_memo, GlobalOptions};
use crate::error::CliError;

pub async fn run_delete(options: &GlobalOptions, id: &str, yes: bool) -> Result<(), CliError> {
    let mut app = open_session(options).await?;
    let memo = resolve_memo(app.state().collection.memos(), id)?;

    app.request_delete(memo.id.clone())?;
    if !yes && !confirm_delete(&memo.title)? {
        app.cancel_delete();
        println!("Cancelled.");
        return Ok(());
    }
    app.confirm_delete().await?;

    println!("Deleted memo: {}", memo.id);
    Ok(())
}

fn confirm_delete(title: &str) -> Result<bool, CliError> {
    let answer = prompt_line(&format!("Delete \"{title}\"? [y/N] "))?;
    Ok(is_affirmative(&answer))
}

pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
