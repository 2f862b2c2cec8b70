use anyhow::{Context, Result};
use rusqlite::Connection;

const SCHEMA_SQL: &str = include_str!("schema.sql");
const DROP_SQL: &str = include_str!("drop.sql");

/// Creates any missing tables and indexes; existing data is untouched.
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    run_script(conn, SCHEMA_SQL, "schema")?;
    log::debug!("Database schema ensured");
    Ok(())
}

/// Drops every table and recreates the schema from scratch.
pub fn reset_database(conn: &Connection) -> Result<()> {
    run_script(conn, DROP_SQL, "drop")?;
    run_script(conn, SCHEMA_SQL, "schema")?;

    log::info!("Database schema reset successfully");
    Ok(())
}

fn run_script(conn: &Connection, sql: &str, script: &str) -> Result<()> {
    let statements = split_sql_statements(sql);

    for (idx, statement) in statements.iter().enumerate() {
        execute_sql(conn, statement)
            .with_context(|| format!("Failed to execute {} statement {}", script, idx + 1))?;
    }
    Ok(())
}

fn split_sql_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn execute_sql(conn: &Connection, sql: &str) -> Result<()> {
    conn.execute(sql, [])
        .context("Failed to execute SQL statement")
        .map(|_| ())
}
