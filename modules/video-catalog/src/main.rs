use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use video_catalog::discovery::MAX_SEARCH_RESULTS;
use video_catalog::{harvest, Config, HarvestOutcome, HarvestRequest, Topic};
use youtube_client::YouTubeClient;

#[derive(Parser)]
#[command(name = "video-catalog", about = "Harvest topic videos from YouTube into a JSON catalog")]
struct Cli {
    /// Topic to search (random if omitted)
    #[arg(long, value_enum)]
    topic: Option<Topic>,

    /// YouTube Data API v3 key (falls back to YOUTUBE_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Catalog file to merge into (falls back to VIDEO_CATALOG_PATH, then videos.json)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Free-text search term
    #[arg(long, default_value = " ")]
    search_term: String,

    /// Search hits to request
    #[arg(long, default_value_t = MAX_SEARCH_RESULTS, value_parser = clap::value_parser!(u32).range(1..=50))]
    max_results: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("video_catalog=info".parse()?))
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(key) = cli.api_key {
        config.youtube_api_key = Some(key);
    }
    if let Some(output) = cli.output {
        config.catalog_path = output;
    }
    config.log_redacted();

    let topic = match cli.topic {
        Some(topic) => topic,
        None => {
            let topic = Topic::random(&mut rand::rng());
            println!("No topic provided. Randomly selected topic: {topic}");
            topic
        }
    };

    let client = YouTubeClient::with_config(
        config.require_api_key()?.to_string(),
        &config.client_config(),
    )?;

    let request = HarvestRequest {
        search_term: cli.search_term,
        max_results: cli.max_results,
        enrich: config.enrich_config(),
        ..HarvestRequest::new(topic, config.catalog_path.clone())
    };

    match harvest::run(&client, &request, chrono::Utc::now()).await? {
        HarvestOutcome::NoVideos => println!("No videos found."),
        HarvestOutcome::NoDetails(report) => {
            info!(%report, "Nothing to merge");
            println!("No video details found.");
        }
        HarvestOutcome::Merged(report) => {
            println!(
                "Video details appended to {} ({} new, {} updated, {} total)",
                request.catalog_path.display(),
                report.added,
                report.updated,
                report.catalog_size
            );
        }
    }

    Ok(())
}
