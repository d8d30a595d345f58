//! Credential verification and session token issuance.
//!
//! Users register once with an email and password, then log in against a
//! specific app to receive an HS256 token signed with that app's secret.
//! Admin markers elevate users for downstream authorization.
//!
//! ## Entities
//!
//! - [`User`] — Registered account with an Argon2 password hash
//! - [`App`] — Client application that tokens are minted for
//! - [`Admin`] — Marker row elevating a user
//!
//! ## Collaborators
//!
//! - [`UserStore`], [`AppStore`], [`AdminStore`] — Persistence contracts
//! - [`Hasher`] — Password hashing ([`Argon`])
//! - [`TokenIssuer`] — Token signing ([`Crypto`])
//! - [`SecretResolver`] — Per-app signing secrets ([`Keyring`])
//!
//! ## Orchestration
//!
//! - [`Service`] — Login, registration, and admin checks
//! - [`Context`] — Cancellation and deadline carried by each request
mod admin;
mod app;
mod claims;
mod context;
mod crypto;
mod dto;
mod error;
mod memory;
mod password;
mod secret;
mod service;
mod store;
mod user;

pub use admin::*;
pub use app::*;
pub use claims::*;
pub use context::*;
pub use crypto::*;
pub use dto::*;
pub use error::*;
pub use memory::*;
pub use password::*;
pub use secret::*;
pub use service::*;
pub use store::*;
pub use user::*;

#[cfg(feature = "database")]
mod repository;
#[cfg(feature = "database")]
pub use repository::*;

#[cfg(feature = "server")]
mod handlers;
#[cfg(feature = "server")]
mod validate;
#[cfg(feature = "server")]
pub use handlers::*;
#[cfg(feature = "server")]
pub use validate::*;
