use std::path::PathBuf;

use crate::commands::common::{
    edit_memo_body, load_images, open_session, resolve_memo, GlobalOptions,
};
use crate::error::CliError;

pub async fn run_edit(
    options: &GlobalOptions,
    id: &str,
    title: Option<&str>,
    content: Option<String>,
    images: &[PathBuf],
) -> Result<(), CliError> {
    let files = load_images(images).await?;
    let mut app = open_session(options).await?;
    let memo = resolve_memo(app.state().collection.memos(), id)?;

    let content = match content {
        Some(content) => Some(content),
        None if title.is_none() && files.is_empty() => {
            Some(edit_memo_body(&memo.content)?.unwrap_or_default())
        }
        None => None,
    };

    app.select(Some(memo.id.clone()))?;
    app.start_modify()?;
    if let Some(title) = title {
        app.set_title(title.trim())?;
    }
    if let Some(content) = content {
        app.set_content(content)?;
    }
    for file in files {
        let url = app.attach_image(file).await?;
        println!("Uploaded {url}");
    }
    app.save().await?;

    println!("Updated memo: {}", memo.id);
    Ok(())
}
