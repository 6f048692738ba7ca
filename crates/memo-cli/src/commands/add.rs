use std::path::PathBuf;

use crate::commands::common::{
    edit_memo_body, load_images, normalize_content, open_session,
    read_piped_stdin, GlobalOptions,
};
use crate::error::CliError;

pub async fn run_add(
    options: &GlobalOptions,
    title: &str,
    content_parts: &[String],
    images: &[PathBuf],
) -> Result<(), CliError> {
    let title = title.trim();
    let content = resolve_memo_content(content_parts, title.is_empty() && images.is_empty())?;
    if title.is_empty() && content.is_empty() && images.is_empty() {
        return Err(CliError::EmptyMemo);
    }
    let files = load_images(images).await?;

    let mut app = open_session(options).await?;
    app.start_create()?;
    app.set_title(title)?;
    app.set_content(content)?;
    for file in files {
        let url = app.attach_image(file).await?;
        println!("Uploaded {url}");
    }
    app.save().await?;

    println!("Created memo: {}", if title.is_empty() { "(untitled)" } else { title });
    Ok(())
}

/// Content from arguments, then piped stdin, then `$EDITOR` when nothing
/// else would make the memo non-empty.
fn resolve_memo_content(content_parts: &[String], use_editor: bool) -> Result<String, CliError> {
    if let Some(content) = normalize_content(&content_parts.join(" ")) {
        return Ok(content);
    }

    if let Some(content) = read_piped_stdin()? {
        return Ok(content);
    }

    if use_editor {
        if let Some(content) = edit_memo_body("")? {
            return Ok(content);
        }
    }

    Ok(String::new())
}
