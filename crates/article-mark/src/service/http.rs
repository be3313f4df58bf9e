use anyhow::Context;
use reqwest::blocking::Client;
use serde::Serialize;
use std::fmt;

use super::{validate_topic, Generator};
use crate::{config::ServiceConfig, error::Result, model::ArticleRecord};

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    topic: &'a str,
}

/// Posts `{"topic": ...}` to the configured endpoint and decodes the article in the reply.
pub struct HttpGenerator {
    client: Client,
    endpoint: String,
}

impl fmt::Debug for HttpGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpGenerator")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl HttpGenerator {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .with_context(|| "Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

impl Generator for HttpGenerator {
    fn name(&self) -> &str {
        "http"
    }

    fn generate(&self, topic: &str) -> Result<ArticleRecord> {
        let topic = validate_topic(topic)?;
        tracing::debug!(endpoint = %self.endpoint, topic, "requesting article");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&GenerateRequest { topic })
            .send()
            .with_context(|| format!("Failed to reach generation service at {}", self.endpoint))?;

        let status = response.status();
        let body = response
            .text()
            .with_context(|| "Failed to read generation service response")?;

        if !status.is_success() {
            anyhow::bail!("Generation service returned {status}: {body}");
        }

        let article = body
            .parse::<ArticleRecord>()
            .with_context(|| "Generation service returned an invalid article")?;

        tracing::debug!(sections = article.sections.len(), "received article");

        Ok(article)
    }
}
