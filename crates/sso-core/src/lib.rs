//! Core identifiers, configuration, and runtime utilities for the sso service.
//!
//! ## Identity
//!
//! - [`ID`] — Store-assigned numeric identifier tagged with its entity type
//! - [`Unique`] — Entities that carry an [`ID`]
//!
//! ## Configuration
//!
//! - [`Config`] — YAML configuration with `${VAR}` environment expansion
//! - [`Env`] — Deployment environment selecting the logging profile
mod config;

pub use config::*;

// ============================================================================
// TRAITS
// ============================================================================
/// Unique identifier trait for domain entities.
pub trait Unique<T = Self> {
    fn id(&self) -> ID<T>;
}

// ============================================================================
// IDENTITY TYPES
// ============================================================================
use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;

/// Generic ID wrapper providing compile-time type safety over a BIGINT key.
pub struct ID<T> {
    inner: i64,
    marker: PhantomData<T>,
}

impl<T> ID<T> {
    pub fn inner(&self) -> i64 {
        self.inner
    }
    /// Store-assigned and externally supplied keys are strictly positive.
    pub fn valid(&self) -> bool {
        self.inner > 0
    }
}

impl<T> From<ID<T>> for i64 {
    fn from(id: ID<T>) -> Self {
        id.inner()
    }
}
impl<T> From<i64> for ID<T> {
    fn from(inner: i64) -> Self {
        Self {
            inner,
            marker: PhantomData,
        }
    }
}

impl<T> Copy for ID<T> {}
impl<T> Clone for ID<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Eq for ID<T> {}
impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Ord for ID<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<T> PartialOrd for ID<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Hash for ID<T> {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.inner.hash(state);
    }
}

impl<T> Debug for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ID").field(&self.inner).finish()
    }
}
impl<T> Display for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize logging for the given environment.
///
/// - `local`: DEBUG to terminal only
/// - `dev`:   DEBUG to terminal and a timestamped file under `logs/`
/// - `prod`:  INFO to terminal and a timestamped file under `logs/`
#[cfg(feature = "server")]
pub fn log(env: Env) -> anyhow::Result<()> {
    use anyhow::Context;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let level = match env {
        Env::Prod => log::LevelFilter::Info,
        Env::Dev | Env::Local => log::LevelFilter::Debug,
    };
    let term = simplelog::TermLogger::new(
        level,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    let mut loggers: Vec<Box<dyn simplelog::SharedLogger>> = Vec::new();
    loggers.push(term);
    if env != Env::Local {
        std::fs::create_dir_all("logs").context("create logs directory")?;
        let time = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .context("time moves slow")?
            .as_secs();
        let ref path = format!("logs/{}.log", time);
        let file = std::fs::File::create(path).with_context(|| format!("create {}", path))?;
        loggers.push(simplelog::WriteLogger::new(level, config, file));
    }
    simplelog::CombinedLogger::init(loggers).context("initialize logger")
}

#[cfg(test)]
mod tests {
    use super::*;
    struct Thing;
    #[test]
    fn ids_compare_by_key() {
        let a = ID::<Thing>::from(7);
        let b = ID::<Thing>::from(7);
        assert_eq!(a, b);
        assert!(ID::<Thing>::from(3) < a);
        assert_eq!(a.to_string(), "7");
        assert_eq!(i64::from(a), 7);
    }
    #[test]
    fn non_positive_ids_are_invalid() {
        assert!(ID::<Thing>::from(1).valid());
        assert!(!ID::<Thing>::from(0).valid());
        assert!(!ID::<Thing>::from(-4).valid());
    }
}
