//! PostgreSQL connectivity and schema management.
//!
//! ## Connectivity
//!
//! - [`db()`] — Establishes a database connection from a key/value DSN
//!
//! ## Schema
//!
//! - [`Schema`] — Table metadata and DDL generation
//! - [`prepare()`] — Creates a table and its indices if absent
//!
//! ## Table Names
//!
//! Constants for all persistent entities: users, apps, and admins.
mod schema;

pub use schema::*;

use std::sync::Arc;
use tokio_postgres::Client;

/// Establishes a database connection.
///
/// Returns an `Arc<Client>` suitable for sharing across async tasks.
/// The connection driver runs on a spawned task and logs when it ends
/// abnormally.
pub async fn db(dsn: &str) -> Result<Arc<Client>, PgErr> {
    log::info!("connecting to database");
    let tls = tokio_postgres::tls::NoTls;
    let (client, connection) = tokio_postgres::connect(dsn, tls).await?;
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            log::error!("database connection closed: {}", e);
        }
    });
    client
        .execute("SET client_min_messages TO WARNING", &[])
        .await?;
    Ok(Arc::new(client))
}

/// PostgreSQL error type alias.
pub type PgErr = tokio_postgres::Error;

/// Table for client applications allowed to request tokens.
#[rustfmt::skip]
pub const APPS:   &str = "apps";
/// Table for admin markers, keyed by user id.
#[rustfmt::skip]
pub const ADMINS: &str = "admins";
/// Table for registered user accounts.
#[rustfmt::skip]
pub const USERS:  &str = "users";
