use anyhow::Context;
use shlex::Shlex;
use std::{
    io::Write,
    process::{Command, Stdio},
};

use super::{ExportContext, Exporter};
use crate::error::Result;

/// Copies the Markdown by piping it into a clipboard program such as `pbcopy`.
pub struct ClipboardExporter {
    command: String,
}

impl ClipboardExporter {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    fn build_command(&self) -> Result<Command> {
        let mut parts = Shlex::new(&self.command);
        let Some(bin) = parts.next() else {
            anyhow::bail!("Provided clipboard command was empty");
        };

        let mut command = Command::new(bin);
        command.args(parts);

        Ok(command)
    }
}

impl Exporter for ClipboardExporter {
    fn name(&self) -> &str {
        "clipboard"
    }

    fn export(&self, ctx: &ExportContext<'_>) -> Result<()> {
        let mut process = self
            .build_command()?
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .spawn()
            .with_context(|| format!("Failed to run clipboard command: {}", self.command))?;

        let written = match process.stdin.take() {
            Some(mut stdin) => stdin.write_all(ctx.markdown.as_bytes()),
            None => Ok(()),
        };
        // NOTE: stdin is closed at the end of the match. Reap the child before reporting the write.
        let status = process
            .wait()
            .with_context(|| format!("Failed to wait for clipboard command: {}", self.command))?;

        written.with_context(|| "Failed to write article to clipboard command")?;

        if !status.success() {
            anyhow::bail!("Clipboard command {} failed ({}).", self.command, status);
        }

        tracing::info!("copied {} bytes to the clipboard", ctx.markdown.len());

        Ok(())
    }
}
