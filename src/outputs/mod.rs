//! Output generation for search results.
//!
//! # Submodules
//!
//! - [`cards`]: Renders articles as text cards, or the placeholder when empty
//! - [`json`]: Serializes the article list as a JSON array
//!
//! Both write to strings; the caller decides where they go (stdout).

use crate::models::Article;
use clap::ValueEnum;

pub mod cards;
pub mod json;

/// How results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One text card per article.
    #[default]
    Cards,
    /// A JSON array of article records.
    Json,
}

/// Render `articles` in the chosen format.
pub fn render(format: OutputFormat, articles: &[Article]) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Cards => Ok(cards::render_results(articles)),
        OutputFormat::Json => json::render_articles(articles),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty_in_both_formats() {
        assert_eq!(render(OutputFormat::Cards, &[]).unwrap(), "No news found.");
        assert_eq!(render(OutputFormat::Json, &[]).unwrap(), "[]");
    }
}
