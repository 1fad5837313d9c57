//! CLI that converts a saved chat page snapshot into a Markdown transcript.
//!
//! ```text
//! chat-export --url https://chatgpt.com/c/abc page.html -o exports/
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chat_export::export::{document_filename, render_markdown};
use chat_export::{encoding, extract, ExportOptions, Locale, Options, SnapshotPage, TokioClock};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Convert a saved ChatGPT, Gemini or DeepSeek conversation page to Markdown.
#[derive(Parser)]
#[command(name = "chat-export")]
#[command(version)]
struct Cli {
    /// Saved HTML snapshot of the conversation page
    input: PathBuf,

    /// URL the page was saved from; selects the platform
    #[arg(short, long)]
    url: String,

    /// Output file, or a directory to write a timestamped file into.
    /// Prints to stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Label language for the export header (en, zh, zh-CN, ...)
    #[arg(long, default_value = "en")]
    locale: String,

    /// Emit the transcript as JSON instead of Markdown
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli) -> chat_export::Result<()> {
    let bytes = fs::read(&cli.input)?;
    let html = encoding::decode_snapshot(&bytes);
    let page = SnapshotPage::new(cli.url, html);

    // A snapshot never renders more messages, so skip the scroll loop
    let options = Options {
        scroll: false,
        ..Options::default()
    };
    let doc = extract(&page, &TokioClock, &options).await?;
    info!(platform = %doc.platform, title = %doc.title, turns = doc.turn_count(), "extracted");

    let export_options = ExportOptions {
        locale: Locale::from_tag(&cli.locale),
        ..ExportOptions::default()
    };
    let body = if cli.json {
        serde_json::to_string_pretty(&doc)?
    } else {
        render_markdown(&doc, &export_options)
    };

    match cli.output {
        Some(path) => {
            let target = resolve_output(&path, &document_filename(&doc, &export_options));
            fs::write(&target, body)?;
            info!(path = %target.display(), "wrote transcript");
        }
        None => print!("{body}"),
    }
    Ok(())
}

fn resolve_output(path: &Path, filename: &str) -> PathBuf {
    if path.is_dir() {
        path.join(filename)
    } else {
        path.to_path_buf()
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
