use super::*;

/// Schema metadata for PostgreSQL tables.
///
/// All methods return `&'static str` to avoid runtime allocations and
/// enable compile-time string construction via `const_format::concatcp!`.
/// This trait contains no I/O; [`prepare`] applies it.
pub trait Schema {
    /// Returns the table name in the database.
    fn name() -> &'static str;
    /// Returns `CREATE TABLE IF NOT EXISTS` DDL statement.
    fn creates() -> &'static str;
    /// Returns `CREATE INDEX IF NOT EXISTS` statements for all indices.
    fn indices() -> &'static str;
}

/// Creates the table and its indices. Idempotent.
pub async fn prepare<S: Schema>(client: &Client) -> Result<(), PgErr> {
    log::info!("creating table ({})", S::name());
    client.batch_execute(S::creates()).await?;
    if S::indices().is_empty() {
        return Ok(());
    }
    log::info!("indexing table ({})", S::name());
    client.batch_execute(S::indices()).await
}
