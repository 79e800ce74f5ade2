mod render;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use revsense_core::ClassifierConfig;
use revsense_sentiment::{AnalysisReport, ReviewPipeline, SentimentClassifier, TeiRatingModel};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "revsense")]
#[command(about = "Summarize the sentiment of a business's public reviews")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve a business, fetch its reviews, and classify each one
    Analyze {
        /// Business name to search for
        name: String,

        /// City or area appended to the search text
        #[arg(long)]
        location: Option<String>,

        /// Number of classified reviews to print (defaults to `REVSENSE_SAMPLE_SIZE`)
        #[arg(long)]
        samples: Option<usize>,

        /// Print the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Load the sentiment model and print what the inference server reports
    Warmup,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            name,
            location,
            samples,
            json,
        } => {
            let config = revsense_core::load_app_config()?;
            init_tracing(&config.log_level)?;
            tracing::debug!(?config, "configuration loaded");

            let pipeline = ReviewPipeline::from_app_config(&config)?;
            let samples = samples.unwrap_or(config.sample_size);
            run_analyze(&pipeline, &name, location.as_deref(), samples, json).await
        }
        Commands::Warmup => {
            let config = revsense_core::load_classifier_config()?;
            init_tracing(&config.log_level)?;
            tracing::debug!(?config, "classifier configuration loaded");
            run_warmup(&config).await
        }
    }
}

fn init_tracing(log_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

async fn run_analyze(
    pipeline: &ReviewPipeline,
    name: &str,
    location: Option<&str>,
    samples: usize,
    json: bool,
) -> anyhow::Result<()> {
    match pipeline.analyze_business(name, location).await {
        Ok(analysis) => {
            let report = AnalysisReport::new(&analysis, samples);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render::render_report(&report));
            }
            Ok(())
        }
        Err(err) => {
            let message = render::error_message(&err);
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&render::error_json(&err, &message))?
                );
            }
            Err(anyhow::Error::new(err).context(message))
        }
    }
}

/// Loads the model without touching Google Places, so no API key is needed.
async fn run_warmup(config: &ClassifierConfig) -> anyhow::Result<()> {
    let model = TeiRatingModel::new(&config.classifier_url, config.request_timeout_secs)?
        .with_expected_model(config.classifier_model.clone());
    let classifier = SentimentClassifier::new(Arc::new(model));
    let info = classifier.ensure_loaded().await?;
    match info.max_input_length {
        Some(max) => println!("model ready: {} (max input length {max})", info.model_id),
        None => println!("model ready: {}", info.model_id),
    }
    Ok(())
}
