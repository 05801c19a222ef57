//! UI state for the news dashboard.
//!
//! The dashboard holds four independent pieces of state: the query, the
//! category, the country and the current results. Editing a filter never
//! triggers a fetch; only [`Dashboard::mount`] and [`Dashboard::search`] do,
//! and each hands out a [`SearchTicket`] describing the request to run.
//!
//! # Sequencing
//!
//! Tickets carry a monotonically increasing id. When an outcome comes back,
//! [`Dashboard::apply`] accepts it only if it belongs to the most recently
//! issued ticket, so a slow response to an older search can never overwrite
//! the results of a newer one.

use crate::api::FetchError;
use crate::models::{Article, Category, Country, SearchParameters};
use tracing::{debug, info, warn};

/// A request issued by the dashboard, to be run by the fetch client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub id: u64,
    pub params: SearchParameters,
}

#[derive(Debug, Default)]
pub struct Dashboard {
    query: String,
    category: Category,
    country: Country,
    articles: Vec<Article>,
    last_issued: u64,
}

impl Dashboard {
    /// Create a dashboard with the given initial filters and no results.
    pub fn new(initial: SearchParameters) -> Self {
        Self {
            query: initial.query,
            category: initial.category,
            country: initial.country,
            articles: Vec::new(),
            last_issued: 0,
        }
    }

    /// The first search, issued once when the dashboard is shown.
    pub fn mount(&mut self) -> SearchTicket {
        let ticket = self.issue();
        info!(id = ticket.id, "Dashboard mounted");
        ticket
    }

    /// A search with the current filter values.
    pub fn search(&mut self) -> SearchTicket {
        let ticket = self.issue();
        debug!(id = ticket.id, query = %ticket.params.query, "Search requested");
        ticket
    }

    fn issue(&mut self) -> SearchTicket {
        self.last_issued += 1;
        SearchTicket {
            id: self.last_issued,
            params: self.params(),
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn set_category(&mut self, category: Category) {
        self.category = category;
    }

    pub fn set_country(&mut self, country: Country) {
        self.country = country;
    }

    /// Snapshot of the current filters.
    pub fn params(&self) -> SearchParameters {
        SearchParameters {
            query: self.query.clone(),
            category: self.category,
            country: self.country,
        }
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// Whether `ticket` is the most recently issued one.
    pub fn is_current(&self, ticket: &SearchTicket) -> bool {
        ticket.id == self.last_issued
    }

    /// Apply the outcome of a search.
    ///
    /// A successful outcome replaces the results wholesale; a failed one
    /// clears them. The error is logged and goes no further.
    ///
    /// # Returns
    ///
    /// `false` if the ticket was superseded and the outcome was discarded.
    pub fn apply(
        &mut self,
        ticket: &SearchTicket,
        outcome: Result<Vec<Article>, FetchError>,
    ) -> bool {
        if !self.is_current(ticket) {
            debug!(
                id = ticket.id,
                latest = self.last_issued,
                "Discarding outcome of superseded search"
            );
            return false;
        }

        match outcome {
            Ok(articles) => {
                info!(id = ticket.id, count = articles.len(), "Results updated");
                self.articles = articles;
            }
            Err(e) => {
                warn!(id = ticket.id, error = %e, "Error fetching news; showing no results");
                self.articles.clear();
            }
        }
        true
    }
}
