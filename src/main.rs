//! # News Headlines
//!
//! A small news browsing client for the [newsapi.org](https://newsapi.org)
//! aggregation API. A query, a category and a country are turned into one
//! search request, and the returned articles are printed as text cards.
//!
//! ## Usage
//!
//! ```sh
//! NEWS_API_KEY=... news_headlines -q football -c sports -n gb
//! NEWS_API_KEY=... news_headlines --interactive
//! ```
//!
//! ## Architecture
//!
//! 1. **Configuration**: CLI flags, environment and an optional YAML file are
//!    resolved once into [`config::Settings`]
//! 2. **Fetching**: [`api::FetchClient`] builds the request, performs a single
//!    GET, and normalizes the body into a list of articles
//! 3. **Presentation**: [`dashboard::Dashboard`] holds the filters and results
//!    and applies only the latest search outcome; [`outputs`] renders cards or
//!    JSON
//!
//! Failed searches are logged and shown as an empty result list.

use clap::Parser;
use std::error::Error;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod config;
mod dashboard;
mod models;
mod outputs;
mod session;
mod utils;

use api::{FetchClient, ReqwestTransport};
use cli::Cli;
use config::{FileConfig, Settings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();

    let args = Cli::parse();
    debug!(?args.config, ?args.format, args.interactive, "Parsed CLI arguments");

    let file_config = match &args.config {
        Some(path) => config::load_config(path).await?,
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(&args, file_config)?;
    info!(
        endpoint = %settings.client.endpoint(),
        query = %settings.initial.query,
        category = %settings.initial.category,
        country = %settings.initial.country,
        "news_headlines starting up"
    );

    let client = FetchClient::new(settings.client, ReqwestTransport::new()?);

    if args.interactive {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        session::run_interactive(
            Arc::new(client),
            settings.initial,
            args.format,
            stdin,
            tokio::io::stdout(),
        )
        .await?;
    } else {
        let rendered = session::run_once(&client, settings.initial, args.format).await?;
        println!("{rendered}");
    }

    let elapsed = start_time.elapsed();
    debug!(?elapsed, "Execution complete");
    Ok(())
}
