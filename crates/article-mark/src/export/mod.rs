mod clipboard;
mod file;

pub use clipboard::*;
pub use file::*;

use crate::{
    config::ExportConfig,
    error::Result,
    model::ArticleRecord,
    render::serialize_with,
};

/// A destination for a rendered article, such as the clipboard or a file.
pub trait Exporter {
    fn name(&self) -> &str;

    fn export(&self, ctx: &ExportContext<'_>) -> Result<()>;
}

#[non_exhaustive]
#[derive(Debug)]
pub struct ExportContext<'a> {
    /// The article being exported.
    pub article: &'a ArticleRecord,
    /// The article rendered as Markdown.
    pub markdown: String,
    /// Suggested file name for the Markdown, derived from the title.
    pub filename: String,
}

impl<'a> ExportContext<'a> {
    pub fn new(article: &'a ArticleRecord, config: &ExportConfig) -> Self {
        Self {
            article,
            markdown: serialize_with(article, config.escape_markdown),
            filename: download_filename(article.title.as_deref()),
        }
    }
}

/// Derive a Markdown file name from an article title.
///
/// The title is lower-cased and anything that is not an ASCII letter or digit
/// becomes `_`. Untitled articles are saved as `article.md`.
pub fn download_filename(title: Option<&str>) -> String {
    let base = match title {
        Some(title) if !title.is_empty() => title
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_lowercase()
                } else {
                    '_'
                }
            })
            .collect(),
        _ => String::from("article"),
    };

    format!("{base}.md")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn filename_is_derived_from_the_title() {
        assert_eq!(
            "mars__the_red_planet.md",
            download_filename(Some("Mars: The Red Planet"))
        );
    }

    #[test]
    fn filename_replaces_non_ascii_characters() {
        assert_eq!("caf_.md", download_filename(Some("Café")));
    }

    #[test]
    fn untitled_articles_fall_back_to_article() {
        assert_eq!("article.md", download_filename(None));
        assert_eq!("article.md", download_filename(Some("")));
    }

    #[test]
    fn context_honours_escaping() {
        let article = ArticleRecord {
            title: Some(String::from("C# tips")),
            ..Default::default()
        };
        let config = ExportConfig {
            escape_markdown: true,
            ..Default::default()
        };

        let ctx = ExportContext::new(&article, &config);

        assert_eq!("# C\\# tips\n\n", ctx.markdown);
        assert_eq!("c__tips.md", ctx.filename);
    }
}
