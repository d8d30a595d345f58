use super::*;
use sso_core::Config;
use sso_core::ID;
use std::collections::HashMap;

/// Per-app signing secret lookup.
pub trait SecretResolver: Send + Sync {
    fn resolve(&self, app: ID<App>) -> Result<String, SecretError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SecretError {
    #[error("no secret configured for app {0}")]
    NotConfigured(ID<App>),
}

/// Secrets from configuration, optionally falling back to `APP<id>_SECRET`
/// in the process environment. Empty values count as missing.
#[derive(Clone, Default)]
pub struct Keyring {
    secrets: HashMap<ID<App>, String>,
    environment: bool,
}

impl Keyring {
    pub fn new<I>(secrets: I) -> Self
    where
        I: IntoIterator<Item = (ID<App>, String)>,
    {
        Self {
            secrets: secrets.into_iter().collect(),
            environment: false,
        }
    }
    pub fn with_environment(self) -> Self {
        Self {
            environment: true,
            ..self
        }
    }
    pub fn variable(app: ID<App>) -> String {
        format!("APP{}_SECRET", app)
    }
}

impl SecretResolver for Keyring {
    fn resolve(&self, app: ID<App>) -> Result<String, SecretError> {
        self.secrets
            .get(&app)
            .cloned()
            .or_else(|| {
                self.environment
                    .then(|| std::env::var(Self::variable(app)).ok())
                    .flatten()
            })
            .filter(|secret| !secret.is_empty())
            .ok_or(SecretError::NotConfigured(app))
    }
}

impl From<&Config> for Keyring {
    fn from(config: &Config) -> Self {
        let keyring = Self::new(
            config
                .secrets
                .iter()
                .map(|(id, secret)| (ID::from(id), secret.to_string())),
        );
        match config.secrets_from_env {
            true => keyring.with_environment(),
            false => keyring,
        }
    }
}

impl std::fmt::Debug for Keyring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keyring")
            .field("apps", &self.secrets.keys().collect::<Vec<_>>())
            .field("environment", &self.environment)
            .finish()
    }
}
