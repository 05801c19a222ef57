//! Startup configuration.
//!
//! Settings are resolved once, before anything is fetched, from three
//! layers in order of precedence:
//!
//! 1. command-line flags (and their environment variables, see [`Cli`])
//! 2. an optional YAML config file given with `--config`
//! 3. built-in defaults
//!
//! # Config file
//!
//! ```yaml
//! api_key: your-newsapi-key
//! base_url: https://newsapi.org/v2/
//! endpoint: top-headlines
//! query: technology
//! category: ""
//! country: us
//! ```
//!
//! Every key is optional. The resolved API key is handed to the fetch client
//! through [`ClientConfig`]; nothing is kept in global state.

use crate::api::{ClientConfig, DEFAULT_BASE_URL, Endpoint};
use crate::cli::Cli;
use crate::models::{Category, Country, DEFAULT_QUERY, SearchParameters};
use serde::Deserialize;
use std::error::Error;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Contents of the YAML config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub endpoint: Option<Endpoint>,
    pub query: Option<String>,
    pub category: Option<Category>,
    pub country: Option<Country>,
}

/// Load and parse a YAML config file.
#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub async fn load_config(path: impl AsRef<Path>) -> Result<FileConfig, Box<dyn Error>> {
    let raw = tokio::fs::read_to_string(path.as_ref()).await?;
    let config: FileConfig = serde_yaml::from_str(&raw)?;
    info!("Loaded config file");
    Ok(config)
}

/// Fully resolved startup settings.
#[derive(Debug)]
pub struct Settings {
    pub client: ClientConfig,
    pub initial: SearchParameters,
}

impl Settings {
    /// Merge the command line over the config file over the defaults.
    ///
    /// # Errors
    ///
    /// Fails if no API key is available from any layer, or if the base URL
    /// does not parse.
    pub fn resolve(cli: &Cli, file: FileConfig) -> Result<Self, Box<dyn Error>> {
        let api_key = cli
            .api_key
            .clone()
            .or(file.api_key)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(
                "no API key: pass --api-key, set NEWS_API_KEY, or add api_key to the config file",
            )?;

        let base_url = cli
            .base_url
            .clone()
            .or(file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let endpoint = cli.endpoint.or(file.endpoint).unwrap_or_default();
        let client = ClientConfig::new(api_key, &base_url, endpoint)
            .map_err(|e| format!("invalid base URL '{base_url}': {e}"))?;

        let initial = SearchParameters {
            query: cli
                .query
                .clone()
                .or(file.query)
                .unwrap_or_else(|| DEFAULT_QUERY.to_string()),
            category: cli.category.or(file.category).unwrap_or_default(),
            country: cli.country.or(file.country).unwrap_or_default(),
        };

        debug!(%base_url, %endpoint, ?initial, "Resolved settings");
        Ok(Self { client, initial })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["news_headlines"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    #[test]
    fn test_defaults_apply_without_config() {
        let settings = Settings::resolve(&cli(&["--api-key", "k"]), FileConfig::default()).unwrap();

        assert_eq!(settings.initial, SearchParameters::default());
        assert_eq!(settings.client.endpoint(), Endpoint::TopHeadlines);
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = FileConfig {
            api_key: Some("file-key".to_string()),
            query: Some("cricket".to_string()),
            country: Some(Country::In),
            category: Some(Category::Sports),
            ..FileConfig::default()
        };
        let settings = Settings::resolve(&cli(&["--api-key", "k", "-n", "gb"]), file).unwrap();

        assert_eq!(settings.initial.query, "cricket");
        assert_eq!(settings.initial.category, Category::Sports);
        assert_eq!(settings.initial.country, Country::Gb);
    }

    #[test]
    fn test_blank_api_key_is_rejected() {
        let file = FileConfig {
            api_key: Some("   ".to_string()),
            ..FileConfig::default()
        };
        let err = Settings::resolve(&cli(&["--api-key", ""]), file).unwrap_err();
        assert!(err.to_string().starts_with("no API key"));
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let err = Settings::resolve(
            &cli(&["--api-key", "k", "--base-url", "::nope"]),
            FileConfig::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("invalid base URL"));
    }

    #[tokio::test]
    async fn test_load_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "api_key: from-file\nendpoint: everything\nquery: health care\ncategory: ''\ncountry: gb"
        )
        .unwrap();

        let config = load_config(file.path()).await.unwrap();
        assert_eq!(config.api_key.as_deref(), Some("from-file"));
        assert_eq!(config.endpoint, Some(Endpoint::Everything));
        assert_eq!(config.query.as_deref(), Some("health care"));
        assert_eq!(config.category, Some(Category::All));
        assert_eq!(config.country, Some(Country::Gb));
    }

    #[tokio::test]
    async fn test_load_config_rejects_unknown_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_token: oops").unwrap();
        assert!(load_config(file.path()).await.is_err());
    }

    #[tokio::test]
    async fn test_load_config_missing_file() {
        assert!(load_config("/nonexistent/news.yaml").await.is_err());
    }
}
