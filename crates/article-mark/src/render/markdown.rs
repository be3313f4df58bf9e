use std::{borrow::Cow, fmt::Write as _};

use super::{walk, ArticleSink};
use crate::model::{ArticleRecord, FaqEntry};

/// Serialize an article to Markdown, leaving all text unescaped.
pub fn serialize(article: &ArticleRecord) -> String {
    serialize_with(article, false)
}

/// Serialize an article to Markdown, optionally escaping Markdown control characters in its text.
pub fn serialize_with(article: &ArticleRecord, escape: bool) -> String {
    let mut sink = MarkdownSink::new().with_escaping(escape);
    walk(article, &mut sink);

    sink.finish()
}

/// An `ArticleSink` that accumulates Markdown. Every element is followed by a blank line.
#[derive(Debug, Default)]
pub struct MarkdownSink {
    buffer: String,
    escape: bool,
}

impl MarkdownSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// When enabled, Markdown control characters in article text are backslash escaped.
    /// Image URLs are never escaped.
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape = escape;
        self
    }

    pub fn finish(self) -> String {
        self.buffer
    }

    fn text_of<'a>(&self, value: &'a str) -> Cow<'a, str> {
        if self.escape {
            escape(value)
        } else {
            Cow::Borrowed(value)
        }
    }

    fn block(&mut self, prefix: &str, value: &str) {
        let value = self.text_of(value);
        // Writing into a String cannot fail.
        let _ = write!(self.buffer, "{prefix}{value}\n\n");
    }
}

impl ArticleSink for MarkdownSink {
    fn title(&mut self, title: &str) {
        self.block("# ", title);
    }

    fn subtitle(&mut self, subtitle: &str) {
        self.block("## ", subtitle);
    }

    fn introduction(&mut self, introduction: &str) {
        self.block("", introduction);
    }

    fn section_heading(&mut self, heading: &str) {
        self.block("### ", heading);
    }

    fn text(&mut self, value: &str) {
        self.block("", value);
    }

    fn image(&mut self, url: &str, caption: &str) {
        let caption = self.text_of(caption);
        let _ = write!(self.buffer, "![{caption}]({url})\n\n");
    }

    fn faq_heading(&mut self) {
        self.buffer.push_str("## Frequently Asked Questions\n\n");
    }

    fn faq_entry(&mut self, entry: &FaqEntry) {
        let question = self.text_of(&entry.question);
        let answer = self.text_of(&entry.answer);
        let _ = write!(self.buffer, "* **Q:** {question}\n  **A:** {answer}\n\n");
    }

    fn conclusion(&mut self, conclusion: &str) {
        self.buffer.push_str("## Conclusion\n\n");
        self.block("", conclusion);
    }
}

const SPECIAL: &[char] = &['\\', '`', '*', '_', '[', ']', '#', '<', '>'];

/// Backslash escape characters that would otherwise be read as Markdown syntax.
pub fn escape(value: &str) -> Cow<'_, str> {
    if !value.contains(SPECIAL) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        if SPECIAL.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    Cow::Owned(escaped)
}
