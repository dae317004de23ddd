use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;

use pumice::audit::{FileModerationLog, ModerationLog};
use pumice::classify::HttpClassifier;
use pumice::config::Config;
use pumice::guidelines::{GuidelineSet, GuidelineStore};
use pumice::media::{FfmpegDecoder, TesseractExtractor};
use pumice::pipeline::ModerationPipeline;
use pumice::verdict::ContentKind;

/// Pumice: guideline-driven content moderation.
///
/// Checks text, images, and video against a hosted toxicity classifier
/// and per-content-type banned-phrase lists, and records every decision.
#[derive(Parser)]
#[command(name = "pumice", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the moderation API server
    Serve {
        /// Port to listen on (default: 3000)
        #[arg(long, default_value = "3000")]
        port: u16,

        /// Address to bind (default: 0.0.0.0)
        #[arg(long, default_value = "0.0.0.0")]
        bind: String,
    },

    /// Moderate a single file from the command line
    Moderate {
        /// Path of the file to moderate
        path: PathBuf,

        /// Content type: text, image, or video
        #[arg(long)]
        content_type: String,

        /// Identifier recorded in the moderation log (default: the file name)
        #[arg(long)]
        identifier: Option<String>,
    },

    /// Show or replace the community guidelines
    Guidelines {
        #[command(subcommand)]
        action: GuidelinesAction,
    },

    /// Show system status (active guidelines, recent decisions)
    Status,
}

#[derive(Subcommand)]
enum GuidelinesAction {
    /// Print the active guideline set as JSON
    Show,

    /// Replace the entire guideline set from a JSON file
    Set {
        /// A JSON file shaped like {"text": [...], "image": [...], "video": [...]}
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("pumice=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, bind } => {
            let config = Config::load()?;
            config.require_classifier()?;

            let store = Arc::new(GuidelineStore::load(&config.guidelines_path));
            let pipeline = Arc::new(build_pipeline(&config, store.clone()));

            pumice::web::run_server(pipeline, store, port, &bind).await?;
        }

        Commands::Moderate {
            path,
            content_type,
            identifier,
        } => {
            let config = Config::load()?;
            config.require_classifier()?;

            let Some(kind) = ContentKind::parse(&content_type) else {
                anyhow::bail!(
                    "unknown content type '{content_type}' (expected text, image, or video)"
                );
            };

            let payload = std::fs::read(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let identifier = identifier.unwrap_or_else(|| {
                path.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string())
            });

            let store = Arc::new(GuidelineStore::load(&config.guidelines_path));
            let pipeline = build_pipeline(&config, store);

            let verdict = pipeline.moderate(kind, &identifier, &payload).await?;
            if verdict.is_safe() {
                println!("{}", "Approved".green().bold());
            } else {
                println!("{}", "Rejected".red().bold());
                for reason in verdict.reasons() {
                    println!("  - {reason}");
                }
            }
            println!(
                "{}",
                format!("Decision recorded to {}", config.log_path).dimmed()
            );
        }

        Commands::Guidelines { action } => match action {
            GuidelinesAction::Show => {
                let config = Config::load()?;
                let store = GuidelineStore::load(&config.guidelines_path);
                let set = store.snapshot().await;
                println!("{}", serde_json::to_string_pretty(set.as_ref())?);
            }

            GuidelinesAction::Set { file } => {
                let config = Config::load()?;
                let raw = std::fs::read_to_string(&file)
                    .with_context(|| format!("failed to read {}", file.display()))?;
                let set: GuidelineSet = serde_json::from_str(&raw)
                    .with_context(|| format!("failed to parse {}", file.display()))?;

                let counts = (set.text.len(), set.image.len(), set.video.len());
                let store = GuidelineStore::load(&config.guidelines_path);
                store.replace(set).await?;

                println!("{}", "Guidelines updated.".bold());
                println!(
                    "  text: {} phrases, image: {}, video: {}",
                    counts.0, counts.1, counts.2
                );
                println!("  Written to {}", config.guidelines_path);
            }
        },

        Commands::Status => {
            let config = Config::load()?;
            let store = GuidelineStore::load(&config.guidelines_path);
            let log: Arc<dyn ModerationLog> = Arc::new(FileModerationLog::new(&config.log_path));
            pumice::status::show(&store, &log, &config.log_path).await?;
        }
    }

    Ok(())
}

/// Assemble the moderation pipeline from configuration.
fn build_pipeline(config: &Config, store: Arc<GuidelineStore>) -> ModerationPipeline {
    let classifier = Arc::new(HttpClassifier::new(
        config.classifier_url.clone(),
        config.classifier_api_key.clone(),
    ));
    let ocr = Arc::new(TesseractExtractor::new(config.tesseract_path.clone()));
    let decoder = Arc::new(FfmpegDecoder::new(
        config.ffmpeg_path.clone(),
        config.ffprobe_path.clone(),
    ));
    let log = Arc::new(FileModerationLog::new(&config.log_path));

    ModerationPipeline::new(classifier, ocr, decoder, store, log, config.policy())
}
