//! Presence-driven rendering of an `ArticleRecord`.
//!
//! [`walk`] decides which parts of an article are shown and in which order.
//! Sinks only decide how each part looks, so every output format agrees on
//! what is present.

pub mod markdown;
pub mod view;

pub use markdown::{serialize, serialize_with, MarkdownSink};
pub use view::{ViewModel, ViewNode};

use crate::model::{ArticleRecord, ContentBlock, FaqEntry};

/// Title used when an article has none.
pub const UNTITLED: &str = "Untitled Article";
/// Alt text used for images without a caption.
pub const DEFAULT_CAPTION: &str = "Image";

/// Receives the visible elements of an article in document order.
pub trait ArticleSink {
    fn title(&mut self, title: &str);

    fn subtitle(&mut self, subtitle: &str);

    fn introduction(&mut self, introduction: &str);

    fn section_heading(&mut self, heading: &str);

    fn text(&mut self, value: &str);

    fn image(&mut self, url: &str, caption: &str);

    /// Called once before the first FAQ entry, only if there is one.
    fn faq_heading(&mut self);

    fn faq_entry(&mut self, entry: &FaqEntry);

    fn conclusion(&mut self, conclusion: &str);
}

/// Drive `sink` with every element of `article` that should be shown.
pub fn walk<S>(article: &ArticleRecord, sink: &mut S)
where
    S: ArticleSink + ?Sized,
{
    sink.title(present(&article.title).unwrap_or(UNTITLED));

    if let Some(subtitle) = present(&article.subtitle) {
        sink.subtitle(subtitle);
    }

    if let Some(introduction) = present(&article.introduction) {
        sink.introduction(introduction);
    }

    for section in &article.sections {
        if let Some(heading) = present(&section.heading) {
            sink.section_heading(heading);
        }

        for block in &section.content {
            match block {
                ContentBlock::Text { value } => sink.text(value),
                ContentBlock::Image { url: Some(url), caption } if !url.is_empty() => {
                    sink.image(url, present(caption).unwrap_or(DEFAULT_CAPTION))
                }
                ContentBlock::Image { .. } => {
                    tracing::warn!("skipping image block without a url");
                }
                ContentBlock::Unknown => {
                    tracing::warn!("skipping content block of unknown type");
                }
            }
        }
    }

    if let Some(faq) = article.faq_section.as_deref().filter(|faq| !faq.is_empty()) {
        sink.faq_heading();

        for entry in faq {
            sink.faq_entry(entry);
        }
    }

    if let Some(conclusion) = present(&article.conclusion) {
        sink.conclusion(conclusion);
    }
}

/// An optional field counts as present when it is set and non-empty.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}
