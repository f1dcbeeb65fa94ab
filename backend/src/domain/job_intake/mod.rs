//! Job intake: resolve a customer by incremental search, pick one of their
//! units, then record the job with its work items.

mod form;
mod search;
mod service;

pub use form::{ItemField, JobIntakeForm, UnitFetchTicket};
pub use search::{
    CustomerSearchResult, MIN_QUERY_CHARS, SEARCH_DEBOUNCE, SearchOutcome, SearchQuery,
    SearchSession,
};
pub use service::{
    JobIntakeService, NO_JOB_ITEMS_MESSAGE, SELECT_CUSTOMER_MESSAGE, SELECT_UNIT_MESSAGE,
    UNIT_MISMATCH_MESSAGE,
};
