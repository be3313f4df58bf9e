use crate::{
    config::ExportConfig,
    error::Result,
    export::{ExportContext, Exporter},
    model::ArticleRecord,
    render::{serialize_with, ViewModel},
    service::Generator,
};

/// Holds the article currently being shown and offers the actions on it.
///
/// Generating takes `&mut self`, so a session never has more than one request in flight.
/// The generator is only needed for [`Session::generate`], so sessions showing a saved
/// article never touch the network.
pub struct Session {
    export: ExportConfig,
    current: Option<ArticleRecord>,
}

impl Session {
    pub fn new(export: ExportConfig) -> Self {
        Self {
            export,
            current: None,
        }
    }

    /// Request a new article for `topic`, replacing the current one.
    ///
    /// The current article is cleared before the request is made and stays
    /// cleared if the request fails.
    pub fn generate(&mut self, generator: &dyn Generator, topic: &str) -> Result<&ArticleRecord> {
        self.current = None;

        let article = generator.generate(topic)?;
        tracing::debug!(generator = generator.name(), "article generated");

        Ok(self.current.insert(article))
    }

    /// Make an existing article the current one.
    pub fn load(&mut self, article: ArticleRecord) -> &ArticleRecord {
        self.current.insert(article)
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&ArticleRecord> {
        self.current.as_ref()
    }

    /// The current article as Markdown, escaped if the export settings ask for it.
    pub fn markdown(&self) -> Option<String> {
        self.current
            .as_ref()
            .map(|article| serialize_with(article, self.export.escape_markdown))
    }

    pub fn view(&self) -> Option<ViewModel> {
        self.current.as_ref().map(ViewModel::build)
    }

    pub fn export_config(&self) -> &ExportConfig {
        &self.export
    }

    /// Hand the current article to `exporter`.
    pub fn export(&self, exporter: &dyn Exporter) -> Result<()> {
        let Some(article) = &self.current else {
            anyhow::bail!("No article to export");
        };

        let ctx = ExportContext::new(article, &self.export);
        tracing::debug!(exporter = exporter.name(), filename = %ctx.filename, "exporting");

        exporter.export(&ctx)
    }
}
