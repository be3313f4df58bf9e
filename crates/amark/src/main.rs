use anyhow::Context;
use article_mark::{
    config::{Config, DEFAULT_CONFIG_FILE},
    export::{ClipboardExporter, Exporter, FileExporter},
    model::ArticleRecord,
    service::HttpGenerator,
    session::Session,
};
use clap::{Args, Parser, Subcommand};
use std::{
    io,
    path::{Path, PathBuf},
};
use tracing::Level;

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate articles and export them as Markdown", long_about = None)]
struct Cli {
    /// Path to the configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log request and rendering details.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ask the generation service for an article about TOPIC.
    Generate {
        topic: String,
        #[command(flatten)]
        output: Output,
    },
    /// Render an article JSON file ("-" for stdin).
    Render {
        file: PathBuf,
        /// Print the structured view instead of Markdown.
        #[arg(long)]
        view: bool,
    },
    /// Copy or save an article JSON file ("-" for stdin).
    Export {
        file: PathBuf,
        #[command(flatten)]
        output: Output,
    },
}

#[derive(Args, Debug)]
struct Output {
    /// Copy the Markdown to the clipboard.
    #[arg(long)]
    copy: bool,
    /// Save the Markdown to the configured destination.
    #[arg(long)]
    download: bool,
    /// Print the structured view instead of Markdown.
    #[arg(long, conflicts_with_all = ["copy", "download"])]
    view: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => Config::load_or_default(DEFAULT_CONFIG_FILE)?,
    };

    let mut session = Session::new(config.export.clone());

    match cli.command {
        Command::Generate { topic, output } => {
            let generator = HttpGenerator::new(&config.service)?;
            tracing::info!("generating an article about {topic:?}");
            session.generate(&generator, &topic)?;
            emit(&session, &output)
        }
        Command::Render { file, view } => {
            session.load(read_article(&file)?);
            let output = Output {
                copy: false,
                download: false,
                view,
            };
            emit(&session, &output)
        }
        Command::Export { file, output } => {
            session.load(read_article(&file)?);
            emit(&session, &output)
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn read_article(file: &Path) -> anyhow::Result<ArticleRecord> {
    if file.as_os_str() == "-" {
        ArticleRecord::from_reader(io::stdin().lock())
    } else {
        ArticleRecord::load(file)
    }
}

fn emit(session: &Session, output: &Output) -> anyhow::Result<()> {
    if output.view {
        let view = session.view().context("No article to show")?;
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    let mut exporters: Vec<Box<dyn Exporter>> = Vec::new();
    if output.copy {
        exporters.push(Box::new(ClipboardExporter::new(
            session.export_config().clipboard_command.clone(),
        )));
    }
    if output.download {
        exporters.push(Box::new(FileExporter::new(
            session.export_config().destination.clone(),
        )));
    }

    if exporters.is_empty() {
        let markdown = session.markdown().context("No article to show")?;
        print!("{markdown}");
        return Ok(());
    }

    for exporter in &exporters {
        session
            .export(exporter.as_ref())
            .with_context(|| format!("{} export failed", exporter.name()))?;
    }

    Ok(())
}
