use serde::{Deserialize, Serialize};

use super::{walk, ArticleSink};
use crate::model::{ArticleRecord, FaqEntry};

/// A display element of a rendered article.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ViewNode {
    Title { text: String },
    Subtitle { text: String },
    Introduction { text: String },
    Heading { text: String },
    Text { text: String },
    Image { url: String, caption: String },
    FaqHeading,
    Faq { question: String, answer: String },
    ConclusionHeading,
    Conclusion { text: String },
}

/// The structured view of an article, in display order.
#[non_exhaustive]
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ViewModel {
    pub nodes: Vec<ViewNode>,
}

impl ViewModel {
    pub fn build(article: &ArticleRecord) -> Self {
        let mut view = Self::default();
        walk(article, &mut view);

        view
    }
}

impl ArticleSink for ViewModel {
    fn title(&mut self, title: &str) {
        self.nodes.push(ViewNode::Title {
            text: title.to_owned(),
        });
    }

    fn subtitle(&mut self, subtitle: &str) {
        self.nodes.push(ViewNode::Subtitle {
            text: subtitle.to_owned(),
        });
    }

    fn introduction(&mut self, introduction: &str) {
        self.nodes.push(ViewNode::Introduction {
            text: introduction.to_owned(),
        });
    }

    fn section_heading(&mut self, heading: &str) {
        self.nodes.push(ViewNode::Heading {
            text: heading.to_owned(),
        });
    }

    fn text(&mut self, value: &str) {
        self.nodes.push(ViewNode::Text {
            text: value.to_owned(),
        });
    }

    fn image(&mut self, url: &str, caption: &str) {
        self.nodes.push(ViewNode::Image {
            url: url.to_owned(),
            caption: caption.to_owned(),
        });
    }

    fn faq_heading(&mut self) {
        self.nodes.push(ViewNode::FaqHeading);
    }

    fn faq_entry(&mut self, entry: &FaqEntry) {
        self.nodes.push(ViewNode::Faq {
            question: entry.question.clone(),
            answer: entry.answer.clone(),
        });
    }

    fn conclusion(&mut self, conclusion: &str) {
        self.nodes.push(ViewNode::ConclusionHeading);
        self.nodes.push(ViewNode::Conclusion {
            text: conclusion.to_owned(),
        });
    }
}
