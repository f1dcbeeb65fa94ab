//! Port for the customer search procedure.
//!
//! Matching and ranking belong to the adapter; callers only rely on the
//! result shape.

use async_trait::async_trait;

use crate::domain::CustomerSearchResult;

use super::define_port_error;

define_port_error! {
    /// Errors raised by customer search adapters.
    pub enum CustomerSearchError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "customer search connection failed: {message}",
        /// Search procedure failed.
        Query { message: String } =>
            "customer search failed: {message}",
    }
}

/// Free-text customer search.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerSearch: Send + Sync {
    /// Ordered matches for `query`, each with its unit count.
    async fn search(&self, query: &str) -> Result<Vec<CustomerSearchResult>, CustomerSearchError>;
}
