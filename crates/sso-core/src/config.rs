use serde::Deserialize;
use serde::Deserializer;
use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Deployment environment. Selects the logging profile.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Env {
    #[default]
    Local,
    Dev,
    Prod,
}

impl std::fmt::Display for Env {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Dev => write!(f, "dev"),
            Self::Prod => write!(f, "prod"),
        }
    }
}

/// Service configuration, loaded from YAML.
///
/// `${VAR}` references anywhere in the file are replaced with the value of
/// the environment variable before parsing, so credentials can stay out of
/// the file itself.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub env: Env,
    #[serde(deserialize_with = "duration")]
    pub access_token_ttl: Duration,
    /// Reserved for refresh tokens. Parsed and reported, never issued.
    #[serde(deserialize_with = "duration")]
    pub refresh_token_ttl: Duration,
    #[serde(default)]
    pub server: Server,
    pub postgres: Postgres,
    #[serde(default)]
    pub hasher: Hashing,
    #[serde(default)]
    pub secrets: Secrets,
    /// Fall back to `APP<id>_SECRET` for apps absent from `secrets`.
    #[serde(default = "enabled")]
    pub secrets_from_env: bool,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
            .and_then(|ref yaml| Self::from_yaml(yaml))
    }
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(&expand(yaml))?)
    }
}

/// Listener configuration for the HTTP transport.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Server {
    #[serde(default = "host")]
    pub host: String,
    #[serde(default = "port")]
    pub port: u16,
    /// Per-request deadline handed to the auth core.
    #[serde(default = "timeout", deserialize_with = "duration")]
    pub timeout: Duration,
    #[serde(default = "workers")]
    pub workers: usize,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            host: host(),
            port: port(),
            timeout: timeout(),
            workers: workers(),
        }
    }
}

/// Connection parameters for PostgreSQL.
#[derive(Clone, Deserialize)]
pub struct Postgres {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    #[serde(default = "sslmode")]
    pub sslmode: String,
}

impl Postgres {
    /// Key/value connection string understood by `tokio_postgres::connect`.
    pub fn dsn(&self) -> String {
        format!(
            "host={} port={} user={} dbname={} password={} sslmode={}",
            self.host, self.port, self.user, self.database, self.password, self.sslmode
        )
    }
}

impl std::fmt::Debug for Postgres {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Postgres")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("database", &self.database)
            .field("sslmode", &self.sslmode)
            .finish_non_exhaustive()
    }
}

/// Argon2 cost parameters. Defaults match the OWASP baseline.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct Hashing {
    #[serde(default = "memory_kib")]
    pub memory_kib: u32,
    #[serde(default = "iterations")]
    pub iterations: u32,
    #[serde(default = "parallelism")]
    pub parallelism: u32,
}

impl Default for Hashing {
    fn default() -> Self {
        Self {
            memory_kib: memory_kib(),
            iterations: iterations(),
            parallelism: parallelism(),
        }
    }
}

/// Per-app signing secrets keyed by app id. Values never reach `Debug`.
#[derive(Clone, Default, Deserialize)]
pub struct Secrets(HashMap<i64, String>);

impl Secrets {
    pub fn iter(&self) -> impl Iterator<Item = (i64, &str)> {
        self.0.iter().map(|(id, secret)| (*id, secret.as_str()))
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.0.keys()).finish()
    }
}

impl FromIterator<(i64, String)> for Secrets {
    fn from_iter<I: IntoIterator<Item = (i64, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Parse duration string like "30s", "5m", "2h", "1d" into Duration.
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if let Some(ms) = s.strip_suffix("ms") {
        return ms.parse().ok().map(Duration::from_millis);
    }
    let (split, unit) = s.char_indices().last()?;
    let scale = match unit {
        's' => 1,
        'm' => 60,
        'h' => 3600,
        'd' => 86400,
        _ => return None,
    };
    let value: u64 = s[..split].parse().ok()?;
    value.checked_mul(scale).map(Duration::from_secs)
}

fn duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let ref text = String::deserialize(deserializer)?;
    parse_duration(text)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid duration: {}", text)))
}

/// Replaces `${VAR}` with the environment value, leaving unknown names intact.
fn expand(input: &str) -> String {
    let re = regex_lite::Regex::new(r"\$\{([^}]+)\}")
        .expect("Invalid regex pattern for environment variable expansion");
    re.replace_all(input, |caps: &regex_lite::Captures| {
        std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
    })
    .into_owned()
}

fn enabled() -> bool {
    true
}
fn host() -> String {
    String::from("0.0.0.0")
}
fn port() -> u16 {
    44044
}
fn timeout() -> Duration {
    Duration::from_secs(10)
}
fn workers() -> usize {
    4
}
fn sslmode() -> String {
    String::from("disable")
}
fn memory_kib() -> u32 {
    19 * 1024
}
fn iterations() -> u32 {
    2
}
fn parallelism() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
env: dev
access_token_ttl: 1h
refresh_token_ttl: 7d
server:
  host: 127.0.0.1
  port: 9090
  timeout: 5s
postgres:
  host: localhost
  port: 5432
  user: sso
  password: hunter2
  database: sso
secrets:
  1: my_secret_app1_key
  2: my_secret_app2_key
"#;

    #[test]
    fn parses_complete_config() {
        let config = Config::from_yaml(YAML).unwrap();
        assert_eq!(config.env, Env::Dev);
        assert_eq!(config.access_token_ttl, Duration::from_secs(3600));
        assert_eq!(config.refresh_token_ttl, Duration::from_secs(7 * 86400));
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.timeout, Duration::from_secs(5));
        assert_eq!(config.server.workers, 4);
        assert_eq!(config.secrets.len(), 2);
        assert!(config.secrets_from_env);
        assert_eq!(config.hasher, Hashing::default());
    }
    #[test]
    fn builds_dsn() {
        let config = Config::from_yaml(YAML).unwrap();
        assert_eq!(
            config.postgres.dsn(),
            "host=localhost port=5432 user=sso dbname=sso password=hunter2 sslmode=disable"
        );
    }
    #[test]
    fn debug_hides_credentials() {
        let config = Config::from_yaml(YAML).unwrap();
        let ref debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("my_secret_app1_key"));
        assert!(debug.contains("localhost"));
    }
    #[test]
    fn expands_environment() {
        // SAFETY: variable name is unique to this test.
        unsafe { std::env::set_var("SSO_CONFIG_TEST_PG_PASS", "from-env") };
        let yaml = YAML.replace("hunter2", "${SSO_CONFIG_TEST_PG_PASS}");
        let config = Config::from_yaml(&yaml).unwrap();
        assert_eq!(config.postgres.password, "from-env");
    }
    #[test]
    fn leaves_unknown_variables() {
        assert_eq!(
            expand("password: ${SSO_CONFIG_TEST_MISSING}"),
            "password: ${SSO_CONFIG_TEST_MISSING}"
        );
    }
    #[test]
    fn rejects_bad_duration() {
        let yaml = YAML.replace("access_token_ttl: 1h", "access_token_ttl: soon");
        assert!(matches!(
            Config::from_yaml(&yaml),
            Err(ConfigError::Parse(_))
        ));
    }
    #[test]
    fn parse_duration_units() {
        assert_eq!(parse_duration("250ms"), Some(Duration::from_millis(250)));
        assert_eq!(parse_duration("30s"), Some(Duration::from_secs(30)));
        assert_eq!(parse_duration("15m"), Some(Duration::from_secs(900)));
        assert_eq!(parse_duration(" 2h "), Some(Duration::from_secs(7200)));
        assert_eq!(parse_duration("1d"), Some(Duration::from_secs(86400)));
        assert_eq!(parse_duration("10"), None);
        assert_eq!(parse_duration("h"), None);
    }
    #[test]
    fn malformed_durations_are_rejected() {
        assert_eq!(parse_duration("5µ"), None);
        assert_eq!(parse_duration("µ"), None);
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("300000000000000d"), None);
        assert_eq!(
            parse_duration("18446744073709551615s"),
            Some(Duration::from_secs(u64::MAX))
        );
        let yaml = YAML.replace("access_token_ttl: 1h", "access_token_ttl: 5µ");
        assert!(matches!(
            Config::from_yaml(&yaml),
            Err(ConfigError::Parse(_))
        ));
        let yaml = YAML.replace("refresh_token_ttl: 7d", "refresh_token_ttl: 300000000000000d");
        assert!(matches!(
            Config::from_yaml(&yaml),
            Err(ConfigError::Parse(_))
        ));
    }
    #[test]
    fn missing_file_reports_path() {
        match Config::load("/nonexistent/sso.yaml") {
            Err(ConfigError::Read { path, .. }) => {
                assert_eq!(path, PathBuf::from("/nonexistent/sso.yaml"))
            }
            other => panic!("unexpected: {:?}", other.map(|_| ())),
        }
    }
}
