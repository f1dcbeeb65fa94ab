//! Incremental customer search with debounce and supersession.
//!
//! Each call to [`SearchSession::query`] takes the next generation number
//! before waiting out the debounce window. A result is only applied when its
//! generation is still the latest issued, so the last query typed wins even if
//! an older request returns later.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::domain::ports::JobIntakeCommand;
use crate::domain::{Customer, Error};

/// Queries shorter than this, after trimming, match nothing.
pub const MIN_QUERY_CHARS: usize = 2;

/// Quiet period after the last keystroke before a search is issued.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// One row returned by the search procedure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerSearchResult {
    pub customer: Customer,
    pub unit_count: i64,
}

impl CustomerSearchResult {
    /// Unit count with the matching noun, e.g. `1 motorcycle unit`.
    pub fn unit_summary(&self) -> String {
        if self.unit_count == 1 {
            "1 motorcycle unit".to_owned()
        } else {
            format!("{} motorcycle units", self.unit_count)
        }
    }
}

/// Search text long enough to be sent to the search procedure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Trimmed query, or `None` when it is too short to search.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (trimmed.chars().count() >= MIN_QUERY_CHARS).then(|| Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// What happened to a query once its turn came.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The query was the latest issued; show these rows.
    Applied(Vec<CustomerSearchResult>),
    /// A newer query was issued meanwhile; discard.
    Superseded,
}

/// Search-as-you-type driver over a [`JobIntakeCommand`].
pub struct SearchSession {
    command: Arc<dyn JobIntakeCommand>,
    latest: AtomicU64,
    debounce: Duration,
}

impl SearchSession {
    /// Session using the standard [`SEARCH_DEBOUNCE`] window.
    pub fn new(command: Arc<dyn JobIntakeCommand>) -> Self {
        Self {
            command,
            latest: AtomicU64::new(0),
            debounce: SEARCH_DEBOUNCE,
        }
    }

    /// Override the debounce window.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    fn is_current(&self, generation: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == generation
    }

    /// Record a keystroke's query text and, once the debounce window passes
    /// without a newer query, run the search.
    ///
    /// Short queries clear the results immediately without a backend call.
    pub async fn query(&self, raw: &str) -> Result<SearchOutcome, Error> {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let Some(query) = SearchQuery::parse(raw) else {
            return Ok(SearchOutcome::Applied(Vec::new()));
        };

        tokio::time::sleep(self.debounce).await;
        if !self.is_current(generation) {
            return Ok(SearchOutcome::Superseded);
        }

        let result = self.command.search_customers(query.as_str()).await;
        if !self.is_current(generation) {
            return Ok(SearchOutcome::Superseded);
        }
        result.map(SearchOutcome::Applied)
    }
}
