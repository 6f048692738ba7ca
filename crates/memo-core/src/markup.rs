//! Inline image markup inside memo content.
//!
//! A content line of the form `![caption](url)` embeds an image. The detail
//! view renders such lines as images; list previews replace them with a
//! placeholder token.

use std::sync::OnceLock;

use regex::Regex;

/// Caption written into markup produced by the editor
pub const IMAGE_CAPTION: &str = "画像";

/// Token substituted for image markup in list previews
pub const PREVIEW_PLACEHOLDER: &str = "[画像]";

/// A rendered line of memo content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Text(String),
    Image { url: String },
}

fn image_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"!\[.*?\]\((.*?)\)").expect("Invalid regex"))
}

/// Markup for an uploaded image, as appended by the editor
#[must_use]
pub fn image_markup(url: &str) -> String {
    format!("![{IMAGE_CAPTION}]({url})")
}

/// Split content into one block per line.
///
/// Only lines that start with `![` are candidates for images; the first
/// capture of the markup pattern becomes the image source.
#[must_use]
pub fn render_blocks(content: &str) -> Vec<Block> {
    content
        .split('\n')
        .map(|line| {
            if line.starts_with("![") {
                if let Some(url) = image_line_regex()
                    .captures(line)
                    .and_then(|captures| captures.get(1))
                {
                    return Block::Image {
                        url: url.as_str().to_string(),
                    };
                }
            }
            Block::Text(line.to_string())
        })
        .collect()
}

/// Image sources referenced anywhere in `content`, in order
#[must_use]
pub fn image_urls(content: &str) -> Vec<String> {
    render_blocks(content)
        .into_iter()
        .filter_map(|block| match block {
            Block::Image { url } => Some(url),
            Block::Text(_) => None,
        })
        .collect()
}

/// Single-line preview: image markup becomes [`PREVIEW_PLACEHOLDER`] and
/// whitespace runs collapse to one space.
#[must_use]
pub fn preview(content: &str) -> String {
    let replaced = image_line_regex().replace_all(content, PREVIEW_PLACEHOLDER);
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const GROCERIES: &str = "milk\n![x](http://img/1.png)\neggs";

    #[test]
    fn render_blocks_splits_text_and_images() {
        assert_eq!(
            render_blocks(GROCERIES),
            vec![
                Block::Text("milk".to_string()),
                Block::Image {
                    url: "http://img/1.png".to_string()
                },
                Block::Text("eggs".to_string()),
            ]
        );
    }

    #[test]
    fn preview_replaces_markup_with_placeholder() {
        assert_eq!(preview(GROCERIES), "milk [画像] eggs");
    }

    #[test]
    fn inline_markup_is_text_in_detail_but_hidden_in_preview() {
        let content = "see ![x](http://img/2.png) here";
        assert_eq!(render_blocks(content), vec![Block::Text(content.to_string())]);
        assert_eq!(preview(content), "see [画像] here");
    }

    #[test]
    fn malformed_markup_line_stays_text() {
        assert_eq!(
            render_blocks("![broken(http://img)"),
            vec![Block::Text("![broken(http://img)".to_string())]
        );
    }

    #[test]
    fn empty_content_is_a_single_empty_line() {
        assert_eq!(render_blocks(""), vec![Block::Text(String::new())]);
        assert_eq!(preview(""), "");
    }

    #[test]
    fn image_markup_round_trips_through_renderer() {
        let content = format!("note\n{}", image_markup("https://cdn.example/a.png"));
        assert_eq!(image_urls(&content), vec!["https://cdn.example/a.png"]);
    }
}
