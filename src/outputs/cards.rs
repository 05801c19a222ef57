//! Text card rendering.
//!
//! Each article becomes one card:
//!
//! ```text
//! ### Chips get smaller
//! Image: https://example.com/chips.png
//! A story about chips
//! By Jane Doe · 2025-05-06 14:30 UTC
//! Source: The Verge
//! Read more: https://example.com/chips
//! ```
//!
//! Lines for absent optional fields are left out. An empty result list
//! renders as the [`NO_RESULTS`] placeholder and no cards.

use crate::models::{Article, SearchParameters};
use crate::utils::single_line;
use itertools::Itertools;
use std::fmt::Write;

/// Placeholder shown when there is nothing to display.
pub const NO_RESULTS: &str = "No news found.";

/// Render a single article card.
pub fn render_card(article: &Article) -> String {
    let mut card = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(card, "### {}", single_line(&article.title));

    if let Some(image) = article.image() {
        let _ = writeln!(card, "Image: {image}");
    }
    if let Some(description) = article.description.as_deref().map(single_line) {
        if !description.is_empty() {
            let _ = writeln!(card, "{description}");
        }
    }
    if let Some(byline) = byline(article) {
        let _ = writeln!(card, "{byline}");
    }
    let _ = writeln!(card, "Source: {}", article.source.name);
    if let Some(url) = article.url.as_deref().filter(|u| !u.trim().is_empty()) {
        let _ = writeln!(card, "Read more: {url}");
    }

    card.truncate(card.trim_end().len());
    card
}

fn byline(article: &Article) -> Option<String> {
    let author = article
        .author
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(|a| format!("By {a}"));
    let published = article
        .published_at
        .map(|ts| ts.format("%Y-%m-%d %H:%M UTC").to_string());

    let parts: Vec<String> = author.into_iter().chain(published).collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" · "))
    }
}

/// One card per article, in input order.
pub fn render_cards(articles: &[Article]) -> Vec<String> {
    articles.iter().map(render_card).collect()
}

/// The full results view: the cards separated by blank lines, or the
/// placeholder when `articles` is empty.
pub fn render_results(articles: &[Article]) -> String {
    if articles.is_empty() {
        return NO_RESULTS.to_string();
    }
    render_cards(articles).iter().join("\n\n")
}

/// Heading shown above the results in an interactive session.
pub fn render_header(params: &SearchParameters) -> String {
    format!(
        "📰 News Headlines\nQuery: {} | Category: {} | Country: {}",
        params.query,
        params.category.label(),
        params.country.label()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Country, Source};
    use chrono::{TimeZone, Utc};

    fn minimal(title: &str, source: &str) -> Article {
        Article {
            title: title.to_string(),
            source: Source {
                id: None,
                name: source.to_string(),
            },
            ..Article::default()
        }
    }

    #[test]
    fn test_minimal_card_has_no_image() {
        let card = render_card(&minimal("A", "S"));
        assert_eq!(card, "### A\nSource: S");
        assert!(!card.contains("Image:"));
    }

    #[test]
    fn test_full_card() {
        let article = Article {
            title: "Chips get smaller".to_string(),
            description: Some("A story\n   about chips".to_string()),
            url: Some("https://example.com/chips".to_string()),
            url_to_image: Some("https://example.com/chips.png".to_string()),
            source: Source {
                id: Some("the-verge".to_string()),
                name: "The Verge".to_string(),
            },
            author: Some("Jane Doe".to_string()),
            published_at: Some(Utc.with_ymd_and_hms(2025, 5, 6, 14, 30, 0).unwrap()),
        };

        assert_eq!(
            render_card(&article),
            "### Chips get smaller\n\
             Image: https://example.com/chips.png\n\
             A story about chips\n\
             By Jane Doe · 2025-05-06 14:30 UTC\n\
             Source: The Verge\n\
             Read more: https://example.com/chips"
        );
    }

    #[test]
    fn test_byline_with_date_only() {
        let article = Article {
            published_at: Some(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 0).unwrap()),
            ..minimal("T", "S")
        };
        assert!(render_card(&article).contains("\n2024-01-02 03:04 UTC\n"));
    }

    #[test]
    fn test_one_card_per_article_in_order() {
        let articles = vec![minimal("one", "S"), minimal("two", "S"), minimal("three", "S")];
        let cards = render_cards(&articles);

        assert_eq!(cards.len(), 3);
        assert!(cards[0].starts_with("### one"));
        assert!(cards[1].starts_with("### two"));
        assert!(cards[2].starts_with("### three"));

        let view = render_results(&articles);
        assert_eq!(view.matches("### ").count(), 3);
        assert!(!view.contains(NO_RESULTS));
    }

    #[test]
    fn test_empty_results_render_placeholder_only() {
        assert!(render_cards(&[]).is_empty());
        assert_eq!(render_results(&[]), "No news found.");
    }

    #[test]
    fn test_header_labels() {
        let header = render_header(&SearchParameters {
            query: "markets".to_string(),
            category: Category::Business,
            country: Country::In,
        });
        assert!(header.ends_with("Query: markets | Category: Business | Country: India"));
    }
}
