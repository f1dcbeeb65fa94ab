//! Database lifecycle helpers on top of the embedded cluster.
//!
//! Creation and inspection go through the synchronous `postgres` client so
//! `DROP DATABASE` never runs inside a Diesel transaction. Schema setup uses
//! the same embedded migrations the server applies at start-up.

use avmoto_crm::outbound::persistence::run_pending_migrations;
use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use tokio::runtime::Runtime;

use super::format_postgres_error;

/// Drop and recreate `name`, returning its connection URL.
pub fn reset_database(cluster: &TestCluster, name: &str) -> Result<String, String> {
    let connection = cluster.connection();
    let admin_url = connection.database_url("postgres");
    let mut client =
        Client::connect(&admin_url, NoTls).map_err(|err| format_postgres_error(&err))?;
    let quoted = name.replace('"', "\"\"");
    client
        .batch_execute(&format!(r#"DROP DATABASE IF EXISTS "{quoted}""#))
        .map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(&format!(r#"CREATE DATABASE "{quoted}""#))
        .map_err(|err| format_postgres_error(&err))?;
    Ok(connection.database_url(name))
}

/// Apply every embedded migration to the database at `url`.
pub fn migrate_schema(runtime: &Runtime, url: &str) -> Result<(), String> {
    runtime
        .block_on(run_pending_migrations(url))
        .map_err(|err| err.to_string())
}

/// Row count of `table`, read outside the adapters under test.
pub fn count_rows(url: &str, table: &str) -> Result<i64, String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    let quoted = table.replace('"', "\"\"");
    let row = client
        .query_one(&format!(r#"SELECT count(*) FROM "{quoted}""#), &[])
        .map_err(|err| format_postgres_error(&err))?;
    Ok(row.get(0))
}
