use crate::commands::common::{
    format_memo_lines, memo_to_list_item, open_session, print_json, GlobalOptions,
};
use crate::error::CliError;

pub async fn run_list(
    options: &GlobalOptions,
    query: Option<&str>,
    json: bool,
) -> Result<(), CliError> {
    let mut app = open_session(options).await?;
    if let Some(query) = query {
        app.set_query(query);
    }
    let memos = app.filtered();

    if json {
        let items = memos.iter().map(memo_to_list_item).collect::<Vec<_>>();
        return print_json(&items);
    }

    if memos.is_empty() {
        println!("No memos found.");
        return Ok(());
    }

    for line in format_memo_lines(&memos) {
        println!("{line}");
    }

    Ok(())
}
