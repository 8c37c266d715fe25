mod batch;
mod config;
mod errors;
mod extraction;
mod models;
mod parsing;
mod routes;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, RecognizerBackend};
use crate::parsing::recognizer::{EntityRecognizer, LexiconRecognizer, NoopRecognizer};
use crate::parsing::ResumeParser;
use crate::routes::build_router;
use crate::state::AppState;

/// Resume parser: turns PDF, DOCX and TXT resumes into structured JSON records.
#[derive(Parser)]
#[command(name = "cv-parser", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API
    Serve,
    /// Parse every file in a folder into one JSON file
    Batch {
        /// Folder with resume files (not searched recursively)
        #[arg(short, long, default_value = "cv")]
        input: PathBuf,
        /// Output JSON file
        #[arg(short, long, default_value = "all_resumes.json")]
        output: PathBuf,
    },
    /// Parse a single file and print its record to stdout
    Parse {
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting cv-parser v{}", env!("CARGO_PKG_VERSION"));

    // Recognizer load failure is fatal: nothing runs without it.
    let recognizer = load_recognizer(&config)?;
    info!("Entity recognizer initialized (backend: {})", recognizer.backend());

    let blocklist = config.blocklist();
    if blocklist.is_empty() {
        warn!("Name blocklist is empty; every name-shaped match will be accepted");
    } else {
        info!("Name blocklist: {} entries", blocklist.len());
    }

    let parser = Arc::new(ResumeParser::new(recognizer, blocklist));
    info!(
        "Name resolution chain: {}",
        parser.name_resolver().strategy_labels().join(" -> ")
    );

    match cli.command {
        Command::Serve => serve(config, parser).await,
        Command::Batch { input, output } => {
            let workers = config.batch_workers;
            let report = tokio::task::spawn_blocking(move || {
                batch::run_batch(&parser, &input, &output, workers)
            })
            .await??;

            for failure in &report.failures {
                error!("Failed to parse {}: {}", failure.path.display(), failure.error);
            }
            Ok(())
        }
        Command::Parse { file } => {
            let text = extraction::extract_text(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let record = parser.parse(&text);
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(())
        }
    }
}

fn load_recognizer(config: &Config) -> Result<Arc<dyn EntityRecognizer>> {
    if config.recognizer == RecognizerBackend::Noop {
        return Ok(Arc::new(NoopRecognizer));
    }

    let recognizer = match &config.name_lexicon_path {
        Some(path) => LexiconRecognizer::from_file(path)
            .context("Failed to load entity recognizer")?,
        None => LexiconRecognizer::with_default_lexicon(),
    };
    info!("Given-name lexicon: {} names", recognizer.lexicon_size());
    Ok(Arc::new(recognizer))
}

async fn serve(config: Config, parser: Arc<ResumeParser>) -> Result<()> {
    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;

    let state = AppState { config, parser };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
