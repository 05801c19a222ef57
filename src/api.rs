//! News API client: request construction, the HTTP boundary, and response
//! normalization.
//!
//! # Architecture
//!
//! The module uses a trait-based design for the network edge:
//! - [`HttpGet`]: Core trait performing a single GET and returning status + body
//! - [`ReqwestTransport`]: Production implementation backed by `reqwest`
//! - [`FetchClient`]: Builds the request URL from [`SearchParameters`], calls the
//!   transport once, and normalizes the body into a `Vec<Article>`
//!
//! # Failure model
//!
//! Every failure (transport, HTTP status, undecodable body, API error object)
//! is reported as a [`FetchError`]. A response that decodes but carries no
//! `articles` field is not a failure; it yields an empty list.
//!
//! There are no retries, no timeout and no caching: one attempt per call.

use crate::models::{Article, Category, NewsResponse, SearchParameters};
use crate::utils::truncate_for_log;
use serde::Deserialize;
use std::error::Error;
use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::time::Instant;
use tracing::{debug, info, instrument, trace};
use url::Url;

/// Base URL of the aggregation API.
pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2/";

/// The API refuses requests without a `User-Agent`.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Query parameter carrying the secret key.
const API_KEY_PARAM: &str = "apiKey";

/// Error type returned by [`HttpGet`] implementations.
pub type TransportError = Box<dyn Error + Send + Sync>;

/// Which search endpoint requests are sent to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Endpoint {
    /// `/top-headlines`: accepts `q`, `category` and `country`.
    #[default]
    TopHeadlines,
    /// `/everything`: full-text search, accepts `q` only.
    Everything,
}

impl Endpoint {
    fn path(&self) -> &'static str {
        match self {
            Endpoint::TopHeadlines => "top-headlines",
            Endpoint::Everything => "everything",
        }
    }
}

impl FromStr for Endpoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top-headlines" | "headlines" => Ok(Endpoint::TopHeadlines),
            "everything" => Ok(Endpoint::Everything),
            other => Err(format!(
                "unknown endpoint '{other}' (expected 'top-headlines' or 'everything')"
            )),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Connection settings injected into a [`FetchClient`] at startup.
#[derive(Clone)]
pub struct ClientConfig {
    api_key: String,
    endpoint: Endpoint,
    endpoint_url: Url,
}

impl ClientConfig {
    /// Resolve the endpoint against `base_url`.
    ///
    /// A missing trailing slash on `base_url` is tolerated, so both
    /// `https://newsapi.org/v2` and `https://newsapi.org/v2/` work.
    pub fn new(
        api_key: impl Into<String>,
        base_url: &str,
        endpoint: Endpoint,
    ) -> Result<Self, url::ParseError> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint_url = base.join(endpoint.path())?;
        Ok(Self {
            api_key: api_key.into(),
            endpoint,
            endpoint_url,
        })
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"REDACTED")
            .field("endpoint", &self.endpoint)
            .field("endpoint_url", &self.endpoint_url.as_str())
            .finish()
    }
}

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// A single HTTP GET.
///
/// Implementors perform exactly one request and report transport-level
/// failures only; status codes are interpreted by [`FetchClient`].
pub trait HttpGet {
    fn get(&self, url: &Url) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

/// [`HttpGet`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }
}

impl HttpGet for ReqwestTransport {
    #[instrument(level = "debug", skip_all)]
    async fn get(&self, url: &Url) -> Result<HttpResponse, TransportError> {
        // reqwest errors embed the request URL, which carries the key.
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| e.without_url())?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| e.without_url())?;
        Ok(HttpResponse { status, body })
    }
}

/// Reasons a search produced no usable response.
#[derive(Debug)]
pub enum FetchError {
    /// The query was blank; no request was sent.
    EmptyQuery,
    /// The request never completed.
    Transport(TransportError),
    /// The server answered with a non-2xx status.
    Status {
        status: u16,
        code: Option<String>,
        message: Option<String>,
    },
    /// The body was not the expected JSON object.
    Decode(serde_json::Error),
    /// The body was a well-formed API error object.
    Api {
        code: Option<String>,
        message: Option<String>,
    },
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::EmptyQuery => f.write_str("search query is empty"),
            FetchError::Transport(e) => write!(f, "request failed: {e}"),
            FetchError::Status {
                status,
                code,
                message,
            } => {
                write!(f, "server returned HTTP {status}")?;
                write_api_detail(f, code.as_deref(), message.as_deref())
            }
            FetchError::Decode(e) => write!(f, "response was not valid JSON: {e}"),
            FetchError::Api { code, message } => {
                f.write_str("API reported an error")?;
                write_api_detail(f, code.as_deref(), message.as_deref())
            }
        }
    }
}

fn write_api_detail(
    f: &mut fmt::Formatter<'_>,
    code: Option<&str>,
    message: Option<&str>,
) -> fmt::Result {
    match (code, message) {
        (Some(code), Some(message)) => write!(f, " ({code}: {message})"),
        (Some(code), None) => write!(f, " ({code})"),
        (None, Some(message)) => write!(f, " ({message})"),
        (None, None) => Ok(()),
    }
}

impl Error for FetchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FetchError::Transport(e) => Some(e.as_ref()),
            FetchError::Decode(e) => Some(e),
            _ => None,
        }
    }
}

/// Replace the `apiKey` query value with `REDACTED` for logging.
pub fn redact_url(url: &Url) -> String {
    if url.query().is_none() {
        return url.to_string();
    }
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == API_KEY_PARAM {
                "REDACTED".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();
    let mut redacted = url.clone();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}

/// Searches the news API and normalizes the response into articles.
pub struct FetchClient<T = ReqwestTransport> {
    config: ClientConfig,
    transport: T,
}

impl<T> fmt::Debug for FetchClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchClient")
            .field("config", &self.config)
            .finish()
    }
}

impl<T: HttpGet> FetchClient<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Build the request URL for `params`.
    ///
    /// Values are percent-encoded. `category` is only sent when it filters
    /// something, and neither `category` nor `country` is sent to
    /// [`Endpoint::Everything`], which rejects them.
    pub fn build_request_url(&self, params: &SearchParameters) -> Url {
        let mut url = self.config.endpoint_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("q", params.trimmed_query());
            if self.config.endpoint == Endpoint::TopHeadlines {
                if params.category != Category::All {
                    pairs.append_pair("category", params.category.as_str());
                }
                pairs.append_pair("country", params.country.as_str());
            }
            pairs.append_pair(API_KEY_PARAM, &self.config.api_key);
        }
        url
    }

    /// Run one search.
    ///
    /// # Returns
    ///
    /// The `articles` of the decoded body in API order, or an empty list if
    /// the body has none.
    ///
    /// # Errors
    ///
    /// See [`FetchError`]. A blank query fails without touching the network.
    #[instrument(
        level = "info",
        skip_all,
        fields(query = %params.trimmed_query(), category = %params.category, country = %params.country)
    )]
    pub async fn fetch_articles(
        &self,
        params: &SearchParameters,
    ) -> Result<Vec<Article>, FetchError> {
        if params.trimmed_query().is_empty() {
            return Err(FetchError::EmptyQuery);
        }

        let url = self.build_request_url(params);
        debug!(url = %redact_url(&url), "Fetching articles");

        let t0 = Instant::now();
        let response = self
            .transport
            .get(&url)
            .await
            .map_err(FetchError::Transport)?;
        let elapsed_ms = t0.elapsed().as_millis();
        trace!(
            status = response.status,
            body = %truncate_for_log(&response.body, 500),
            "Raw API response"
        );

        let articles = decode_response(response)?;
        info!(count = articles.len(), elapsed_ms, "Fetched articles");
        Ok(articles)
    }
}

/// Turn a raw HTTP exchange into the article list.
fn decode_response(response: HttpResponse) -> Result<Vec<Article>, FetchError> {
    if !(200..300).contains(&response.status) {
        let (code, message) = serde_json::from_str::<NewsResponse>(&response.body)
            .map(|r| (r.code, r.message))
            .unwrap_or((None, None));
        return Err(FetchError::Status {
            status: response.status,
            code,
            message,
        });
    }

    let decoded: NewsResponse =
        serde_json::from_str(&response.body).map_err(FetchError::Decode)?;
    if decoded.is_error() {
        return Err(FetchError::Api {
            code: decoded.code,
            message: decoded.message,
        });
    }
    if let Some(total) = decoded.total_results {
        debug!(total_results = total, "API reported total matches");
    }
    Ok(decoded.into_articles())
}
