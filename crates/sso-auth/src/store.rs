use super::*;
use sso_core::ID;

/// Store failures, translated from the backend at the contract boundary.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("record already exists")]
    AlreadyExists,
    #[error("store backend failure")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Account persistence. Email uniqueness is the store's responsibility.
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    async fn save(&self, email: &str, hashword: &str) -> Result<ID<User>, StoreError>;
    async fn find_by_email(&self, email: &str) -> Result<User, StoreError>;
    async fn find_by_id(&self, id: ID<User>) -> Result<User, StoreError>;
}

#[async_trait::async_trait]
pub trait AppStore: Send + Sync {
    async fn find_by_id(&self, id: ID<App>) -> Result<App, StoreError>;
}

#[async_trait::async_trait]
pub trait AdminStore: Send + Sync {
    async fn find_by_user_id(&self, id: ID<User>) -> Result<Admin, StoreError>;
}
