use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use bizdir_core::{distance_km, AppConfig, Coordinate, QueryPatch};
use bizdir_directory::{sync_store, JsonFileFeed, RankingPipeline, RecordStore};
use bizdir_geocode::GeocodeClient;

#[derive(Debug, Parser)]
#[command(name = "bizdir-cli")]
#[command(about = "Business directory discovery and address suggestion CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Load a records file and print the ranked, filtered listing.
    Search {
        /// Records JSON file; defaults to BIZDIR_RECORDS_PATH.
        #[arg(long)]
        records: Option<PathBuf>,
        /// Free-text term matched against business names.
        #[arg(long, default_value = "")]
        term: String,
        /// Exact category filter; empty keeps all categories.
        #[arg(long, default_value = "")]
        category: String,
        /// Origin latitude for distance ranking.
        #[arg(long, requires = "lon")]
        lat: Option<f64>,
        /// Origin longitude for distance ranking.
        #[arg(long, requires = "lat")]
        lon: Option<f64>,
    },
    /// Fetch ranked address candidates for partial address text.
    Suggest {
        #[arg(long)]
        query: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = bizdir_core::load_app_config_from_env()?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Search {
            records,
            term,
            category,
            lat,
            lon,
        } => search(&config, records, term, category, lat, lon).await,
        Commands::Suggest { query } => suggest(&config, &query).await,
    }
}

async fn search(
    config: &AppConfig,
    records: Option<PathBuf>,
    term: String,
    category: String,
    lat: Option<f64>,
    lon: Option<f64>,
) -> anyhow::Result<()> {
    let origin = match (lat, lon) {
        (Some(lat), Some(lon)) => {
            Some(Coordinate::new(lat, lon).context("invalid origin coordinate")?)
        }
        _ => None,
    };

    let path = records.unwrap_or_else(|| config.records_path.clone());
    let feed = JsonFileFeed::new(path);
    let store = std::sync::Arc::new(RecordStore::new());
    let outcome = sync_store(&feed, &store).await?;
    if outcome.rejected > 0 {
        tracing::warn!(
            rejected = outcome.rejected,
            "some records in the feed were malformed and skipped"
        );
    }

    let mut pipeline = RankingPipeline::new(store);
    let mut patch = QueryPatch::default().term(term).category(category);
    if let Some(origin) = origin {
        patch = patch.origin(origin);
    }
    pipeline.update_query(patch);

    let view = pipeline.current_view();
    if view.is_empty() {
        println!("No businesses found.");
        return Ok(());
    }

    for record in view {
        let distance = match (origin, record.location) {
            (Some(from), Some(to)) => format!("{:.1} km", distance_km(from, to)),
            _ => "-".to_string(),
        };
        println!(
            "{:<30} {:<12} {:>9}  {}",
            record.name, record.category, distance, record.address
        );
    }
    Ok(())
}

async fn suggest(config: &AppConfig, query: &str) -> anyhow::Result<()> {
    let api_key = config
        .geocode_api_key
        .as_deref()
        .context("OPENCAGE_API_KEY is not set")?;

    let client = GeocodeClient::with_base_url(
        api_key,
        config.geocode_timeout_secs,
        &config.geocode_base_url,
    )?;
    let candidates = client
        .forward_geocode(
            query,
            config.suggestion_limit,
            &config.suggestion_country_code,
        )
        .await?;

    if candidates.is_empty() {
        println!("No suggestions.");
        return Ok(());
    }
    for candidate in candidates {
        println!("{candidate}");
    }
    Ok(())
}
