//! Shared helpers for the PostgreSQL adapter integration suites.
//!
//! Each file under `backend/tests/` compiles as its own crate, so the
//! embedded cluster bootstrap and the small SQL helpers live here and are
//! pulled in with `mod support;`.

mod cluster_skip;
mod embedded_postgres;
mod pg_embed;

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::{count_rows, migrate_schema, reset_database};
pub use pg_embed::test_cluster;

/// Render a `postgres` error with its SQLSTATE and detail.
///
/// The `Display` implementation of `postgres::Error` collapses server errors
/// to `db error`, which hides the message in CI logs.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    if let Some(hint) = db_error.hint() {
        summary.push_str("; hint: ");
        summary.push_str(hint);
    }
    summary
}
