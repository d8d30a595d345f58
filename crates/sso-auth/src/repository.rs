use super::*;
use sso_core::ID;
use sso_pg::*;
use std::sync::Arc;
use tokio_postgres::Client;
use tokio_postgres::error::SqlState;

/// Creates the users, apps, and admins tables if absent.
pub async fn migrate(client: &Client) -> Result<(), PgErr> {
    prepare::<User>(client).await?;
    prepare::<App>(client).await?;
    prepare::<Admin>(client).await
}

impl From<PgErr> for StoreError {
    fn from(e: PgErr) -> Self {
        match e.code() {
            Some(code) if *code == SqlState::UNIQUE_VIOLATION => Self::AlreadyExists,
            _ => Self::Backend(Box::new(e)),
        }
    }
}

#[async_trait::async_trait]
impl UserStore for Arc<Client> {
    async fn save(&self, email: &str, hashword: &str) -> Result<ID<User>, StoreError> {
        self.query_one(
            const_format::concatcp!(
                "INSERT INTO ",
                USERS,
                " (email, pass_hash) VALUES ($1, $2) RETURNING id"
            ),
            &[&email, &hashword],
        )
        .await
        .map(|row| ID::from(row.get::<_, i64>(0)))
        .map_err(StoreError::from)
    }

    async fn find_by_email(&self, email: &str) -> Result<User, StoreError> {
        self.query_opt(
            const_format::concatcp!("SELECT id, email, pass_hash FROM ", USERS, " WHERE email = $1"),
            &[&email],
        )
        .await?
        .map(|ref row| user(row))
        .ok_or(StoreError::NotFound)
    }

    async fn find_by_id(&self, id: ID<User>) -> Result<User, StoreError> {
        self.query_opt(
            const_format::concatcp!("SELECT id, email, pass_hash FROM ", USERS, " WHERE id = $1"),
            &[&id.inner()],
        )
        .await?
        .map(|ref row| user(row))
        .ok_or(StoreError::NotFound)
    }
}

#[async_trait::async_trait]
impl AppStore for Arc<Client> {
    async fn find_by_id(&self, id: ID<App>) -> Result<App, StoreError> {
        self.query_opt(
            const_format::concatcp!("SELECT id, name FROM ", APPS, " WHERE id = $1"),
            &[&id.inner()],
        )
        .await?
        .map(|row| {
            App::new(
                ID::from(row.get::<_, i64>(0)), //
                row.get::<_, String>(1),
            )
        })
        .ok_or(StoreError::NotFound)
    }
}

#[async_trait::async_trait]
impl AdminStore for Arc<Client> {
    async fn find_by_user_id(&self, id: ID<User>) -> Result<Admin, StoreError> {
        self.query_opt(
            const_format::concatcp!("SELECT id FROM ", ADMINS, " WHERE id = $1"),
            &[&id.inner()],
        )
        .await?
        .map(|row| Admin::new(ID::from(row.get::<_, i64>(0))))
        .ok_or(StoreError::NotFound)
    }
}

fn user(row: &tokio_postgres::Row) -> User {
    User::new(
        ID::from(row.get::<_, i64>(0)),
        row.get::<_, String>(1),
        row.get::<_, String>(2),
    )
}
