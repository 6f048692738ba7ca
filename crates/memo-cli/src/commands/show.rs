use memo_core::view::View;

use crate::commands::common::{
    memo_to_list_item, open_session, print_json, resolve_memo, GlobalOptions,
};
use crate::error::CliError;
use crate::render::render_pane;

pub async fn run_show(options: &GlobalOptions, id: &str, json: bool) -> Result<(), CliError> {
    let mut app = open_session(options).await?;
    let memo = resolve_memo(app.state().collection.memos(), id)?;

    if json {
        return print_json(&memo_to_list_item(&memo));
    }

    app.select(Some(memo.id))?;
    if let View::Unlocked(view) = app.view() {
        for line in render_pane(&view.pane) {
            println!("{line}");
        }
    }

    Ok(())
}
