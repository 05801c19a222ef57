//! JSON output of search results.
//!
//! The output is always a JSON array of article records in API order,
//! `[]` when there are no results, using the same camelCase field names
//! the API sends.

use crate::models::Article;
use tracing::{debug, instrument};

/// Serialize `articles` as a pretty-printed JSON array.
#[instrument(level = "debug", skip_all, fields(count = articles.len()))]
pub fn render_articles(articles: &[Article]) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string_pretty(articles)?;
    debug!(bytes = json.len(), "Serialized articles");
    Ok(json)
}
