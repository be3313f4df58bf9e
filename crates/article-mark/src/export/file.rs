use anyhow::Context;
use std::{fs, path::PathBuf};

use super::{ExportContext, Exporter};
use crate::error::Result;

/// Saves the Markdown as `<destination>/<filename>`, overwriting any existing file.
pub struct FileExporter {
    destination: PathBuf,
}

impl FileExporter {
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
        }
    }

    /// Where an export with the given context will be written.
    pub fn path_for(&self, ctx: &ExportContext<'_>) -> PathBuf {
        self.destination.join(&ctx.filename)
    }
}

impl Exporter for FileExporter {
    fn name(&self) -> &str {
        "file"
    }

    fn export(&self, ctx: &ExportContext<'_>) -> Result<()> {
        fs::create_dir_all(&self.destination).with_context(|| {
            format!(
                "Failed to create export directory: {}",
                self.destination.display()
            )
        })?;

        let path = self.path_for(ctx);
        fs::write(&path, &ctx.markdown)
            .with_context(|| format!("Failed to write article: {}", path.display()))?;

        tracing::info!("saved article to {}", path.display());

        Ok(())
    }
}
