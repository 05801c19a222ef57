//! Data models for search parameters and the articles returned by the news API.
//!
//! This module defines the core data structures used throughout the application:
//! - [`Article`]: A single news item as returned by the aggregation API
//! - [`NewsResponse`]: The decoded response body wrapping the article list
//! - [`SearchParameters`]: The user-controlled filter set (query, category, country)
//! - Filter types: [`Category`], [`Country`]
//!
//! The wire format uses camelCase field names (`urlToImage`, `publishedAt`),
//! mapped onto snake_case fields with serde renames.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Query used on mount when neither the command line nor the config names one.
pub const DEFAULT_QUERY: &str = "technology";

/// The attribution block of an article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Source {
    /// Provider-side identifier, often `null`.
    #[serde(default)]
    pub id: Option<String>,
    /// The display name of the publication.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
}

/// A single news item as returned by the aggregation API.
///
/// Every field except `title` and `source` is optional on the wire, and the
/// API sends `null` rather than omitting keys, so decoding is lenient: a
/// `null` title becomes an empty string and an unparsable `publishedAt`
/// becomes `None` instead of failing the whole response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// The headline.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    /// A short summary, when the publisher provides one.
    #[serde(default)]
    pub description: Option<String>,
    /// Link to the original story.
    #[serde(default)]
    pub url: Option<String>,
    /// Lead image; absence suppresses the image line of the card.
    #[serde(default)]
    pub url_to_image: Option<String>,
    /// Publication that carried the story.
    #[serde(default)]
    pub source: Source,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub published_at: Option<DateTime<Utc>>,
}

impl Article {
    /// The image URL, if one is present and non-blank.
    pub fn image(&self) -> Option<&str> {
        self.url_to_image
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// The decoded body of a search request.
///
/// On success the API sends `{"status":"ok","totalResults":N,"articles":[...]}`;
/// on failure `{"status":"error","code":"...","message":"..."}`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub total_results: Option<u64>,
    #[serde(default)]
    pub articles: Option<Vec<Article>>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl NewsResponse {
    /// Whether the body is an API-level error object.
    pub fn is_error(&self) -> bool {
        self.status.as_deref() == Some("error")
    }

    /// The article list, empty when the field is missing or `null`.
    pub fn into_articles(self) -> Vec<Article> {
        self.articles.unwrap_or_default()
    }
}

/// Error returned when a category or country name is not one of the fixed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownValue {
    kind: &'static str,
    value: String,
}

impl fmt::Display for UnknownValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for UnknownValue {}

/// Article category filter. [`Category::All`] means unfiltered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    #[serde(alias = "")]
    All,
    Technology,
    Sports,
    Health,
    Business,
}

impl Category {
    /// The value sent to the API; empty for [`Category::All`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::All => "",
            Category::Technology => "technology",
            Category::Sports => "sports",
            Category::Health => "health",
            Category::Business => "business",
        }
    }

    /// Human-readable label used in the session header.
    pub fn label(&self) -> &'static str {
        match self {
            Category::All => "All Categories",
            Category::Technology => "Technology",
            Category::Sports => "Sports",
            Category::Health => "Health",
            Category::Business => "Business",
        }
    }
}

impl FromStr for Category {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Category::All),
            "technology" => Ok(Category::Technology),
            "sports" => Ok(Category::Sports),
            "health" => Ok(Category::Health),
            "business" => Ok(Category::Business),
            other => Err(UnknownValue {
                kind: "category",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::All => f.write_str("all"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Country filter, sent as an ISO 3166-1 alpha-2 code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Country {
    #[default]
    Us,
    In,
    Gb,
}

impl Country {
    pub fn as_str(&self) -> &'static str {
        match self {
            Country::Us => "us",
            Country::In => "in",
            Country::Gb => "gb",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Country::Us => "USA",
            Country::In => "India",
            Country::Gb => "UK",
        }
    }
}

impl FromStr for Country {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "us" => Ok(Country::Us),
            "in" => Ok(Country::In),
            "gb" | "uk" => Ok(Country::Gb),
            other => Err(UnknownValue {
                kind: "country",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The filter set a search is issued with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParameters {
    pub query: String,
    pub category: Category,
    pub country: Country,
}

impl SearchParameters {
    /// The query with surrounding whitespace removed.
    pub fn trimmed_query(&self) -> &str {
        self.query.trim()
    }
}

impl Default for SearchParameters {
    fn default() -> Self {
        Self {
            query: DEFAULT_QUERY.to_string(),
            category: Category::All,
            country: Country::Us,
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }))
}
