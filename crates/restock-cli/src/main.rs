//! One-shot scrape driver for operators: runs the pipeline from the command
//! line and prints the wire-format record(s) to stdout.

use std::sync::Arc;

use clap::{Parser, Subcommand};

use restock_core::NullSink;
use restock_scraper::{
    CollectionScraper, FetcherConfig, HttpFetcher, PageAcquirer, ProductScraper, TemplateProfile,
};

#[derive(Debug, Parser)]
#[command(name = "restock-cli")]
#[command(about = "Restock command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape a single product page and print the record as JSON.
    Scrape {
        /// Absolute product page URL.
        url: String,
    },
    /// Walk a brand collection page and print the scraped records as JSON.
    Collect {
        /// Collection base URL (the brand path segment is appended).
        url: String,
        /// Brand name: adidas, nike, or jordan (case-insensitive).
        brand: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = restock_core::load_app_config_from_env()?;
    let acquirer = PageAcquirer::from_config(&config)?;
    let profile = TemplateProfile::for_version(config.template);
    let scraper = ProductScraper::new(acquirer, profile, Arc::new(NullSink));

    let cli = Cli::parse();
    match cli.command {
        Commands::Scrape { url } => {
            let record = scraper.scrape_product(&url).await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Commands::Collect { url, brand } => {
            let fetcher = HttpFetcher::new(&FetcherConfig::collection(
                config.collection_timeout_secs,
                &config.scraper_user_agent,
                config.collection_max_retries,
                config.scraper_backoff_base_secs,
            ))?;
            let collections = CollectionScraper::new(
                fetcher,
                scraper,
                config.store_origin.clone(),
                config.collect_stop_after_first,
            );
            let records = collections.scrape(&url, &brand).await?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
    }

    Ok(())
}
