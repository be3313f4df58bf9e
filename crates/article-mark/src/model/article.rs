use anyhow::Context;
use serde::{Deserialize, Deserializer, Serialize};
use std::{fs, io::Read, path::Path, str::FromStr};

use crate::error::{Error, Result};

/// A structured article as returned by the generation service.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArticleRecord {
    /// The article title. Rendered as `Untitled Article` when absent or empty.
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    /// An optional lead paragraph preceding the first section.
    #[serde(default)]
    pub introduction: Option<String>,
    /// The body of the article. Unlike every other field this one is required.
    pub sections: Vec<Section>,
    #[serde(default)]
    pub faq_section: Option<Vec<FaqEntry>>,
    #[serde(default)]
    pub conclusion: Option<String>,
}

impl ArticleRecord {
    /// Load an article record from a JSON file on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<ArticleRecord> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to open article: {}", path.display()))?;

        ArticleRecord::from_str(&source)
            .with_context(|| format!("Failed to parse article: {}", path.display()))
    }

    /// Read an article record from any reader, such as stdin.
    pub fn from_reader(mut reader: impl Read) -> Result<ArticleRecord> {
        let mut buffer = String::new();
        reader
            .read_to_string(&mut buffer)
            .with_context(|| "Failed to read article")?;

        ArticleRecord::from_str(&buffer)
    }
}

impl FromStr for ArticleRecord {
    type Err = Error;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(source).with_context(|| "article record is malformed")
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Section {
    #[serde(default)]
    pub heading: Option<String>,
    /// Blocks that are not well-formed text or image blocks decode as `ContentBlock::Unknown`.
    #[serde(default, deserialize_with = "lenient_blocks")]
    pub content: Vec<ContentBlock>,
}

fn lenient_blocks<'de, D>(deserializer: D) -> Result<Vec<ContentBlock>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<serde_json::Value>::deserialize(deserializer)?;
    let blocks = raw
        .into_iter()
        .map(|value| ContentBlock::deserialize(value).unwrap_or(ContentBlock::Unknown))
        .collect();

    Ok(blocks)
}

/// A single block of section content, tagged by its `type` field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    /// A paragraph of text, emitted verbatim.
    Text { value: String },
    /// An image reference. Blocks without a `url` produce no output.
    Image {
        #[serde(default)]
        url: Option<String>,
        #[serde(default)]
        caption: Option<String>,
    },
    /// Any block type this client does not know how to show.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}
