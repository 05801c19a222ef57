//! Command-line interface definitions.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! The API key and base URL can also be provided via environment variables,
//! and every option except `--format` and `--interactive` can come from a
//! YAML config file (see [`crate::config`]).

use crate::api::Endpoint;
use crate::models::{Category, Country};
use crate::outputs::OutputFormat;
use clap::Parser;

/// Command-line arguments for the news headlines client.
///
/// # Examples
///
/// ```sh
/// # Mount with the defaults (query "technology", all categories, US)
/// NEWS_API_KEY=... news_headlines
///
/// # Sports headlines from the UK as JSON
/// news_headlines -q football -c sports -n gb --format json
///
/// # Interactive session
/// news_headlines -i
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Search text
    #[arg(short, long)]
    pub query: Option<String>,

    /// Category filter: all, technology, sports, health or business
    #[arg(short, long)]
    pub category: Option<Category>,

    /// Country filter: us, in or gb
    #[arg(short = 'n', long)]
    pub country: Option<Country>,

    /// Search endpoint: top-headlines or everything
    #[arg(long)]
    pub endpoint: Option<Endpoint>,

    /// newsapi.org API key
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Override the API base URL
    #[arg(long, env = "NEWS_API_BASE_URL")]
    pub base_url: Option<String>,

    /// Optional path to a YAML config file
    #[arg(long)]
    pub config: Option<String>,

    /// How results are printed
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Cards)]
    pub format: OutputFormat,

    /// Keep a session open on stdin instead of fetching once
    #[arg(short, long)]
    pub interactive: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["news_headlines"]);

        assert_eq!(cli.query, None);
        assert_eq!(cli.category, None);
        assert_eq!(cli.format, OutputFormat::Cards);
        assert!(!cli.interactive);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "news_headlines",
            "-q",
            "football",
            "-c",
            "sports",
            "-n",
            "gb",
            "-f",
            "json",
            "-i",
        ]);

        assert_eq!(cli.query.as_deref(), Some("football"));
        assert_eq!(cli.category, Some(Category::Sports));
        assert_eq!(cli.country, Some(Country::Gb));
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.interactive);
    }

    #[test]
    fn test_cli_long_flags() {
        let cli = Cli::parse_from([
            "news_headlines",
            "--endpoint",
            "everything",
            "--base-url",
            "http://localhost:9000/v2/",
            "--config",
            "news.yaml",
            "--category",
            "all",
        ]);

        assert_eq!(cli.endpoint, Some(Endpoint::Everything));
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:9000/v2/"));
        assert_eq!(cli.config.as_deref(), Some("news.yaml"));
        assert_eq!(cli.category, Some(Category::All));
    }

    #[test]
    fn test_cli_rejects_unknown_country() {
        let result = Cli::try_parse_from(["news_headlines", "--country", "fr"]);
        assert!(result.is_err());
    }
}
