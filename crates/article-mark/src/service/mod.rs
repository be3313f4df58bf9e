//! Client for the remote article generation service.

mod http;

pub use http::*;

use crate::{error::Result, model::ArticleRecord};

/// Something that turns a topic into an article.
pub trait Generator {
    fn name(&self) -> &str;

    fn generate(&self, topic: &str) -> Result<ArticleRecord>;
}

/// Trim a topic and reject it when nothing is left.
pub fn validate_topic(topic: &str) -> Result<&str> {
    let topic = topic.trim();
    if topic.is_empty() {
        anyhow::bail!("Please enter a topic");
    }

    Ok(topic)
}
