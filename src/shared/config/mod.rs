//! Application configuration module
//!
//! Configuration is assembled in layers, lowest precedence first:
//!
//! 1. Built-in defaults ([`AppConfig::default`])
//! 2. An optional TOML file (`VIDTUBE_CONFIG`, else `vidtube.toml` when present)
//! 3. Environment variables (`SERVER_PORT`, `DATABASE_URL`, ...)
//!
//! Token lifetimes are written as humantime strings (`15m`, `1d`, `10d`).
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use vidtube::shared::config::AppConfig;
//!
//! let config = AppConfig::builder()
//!     .server_port(9000)
//!     .access_token_expiry(Duration::from_secs(900))
//!     .build()
//!     .unwrap();
//! assert_eq!(config.server_port, 9000);
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "VIDTUBE_CONFIG";

/// Config file picked up from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "vidtube.toml";

const DEV_ACCESS_SECRET: &str = "vidtube-dev-access-secret";
const DEV_REFRESH_SECRET: &str = "vidtube-dev-refresh-secret";

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Port the HTTP server binds on
    pub server_port: u16,
    /// PostgreSQL connection string; data endpoints answer 503 without it
    pub database_url: Option<String>,
    /// Allowed CORS origin, `*` for any
    pub cors_origin: String,
    pub access_token_secret: String,
    pub access_token_expiry: Duration,
    pub refresh_token_secret: String,
    pub refresh_token_expiry: Duration,
    /// Mark auth cookies `Secure; SameSite=None`
    pub cookie_secure: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_port: 8000,
            database_url: None,
            cors_origin: "*".to_string(),
            access_token_secret: DEV_ACCESS_SECRET.to_string(),
            access_token_expiry: Duration::from_secs(24 * 60 * 60),
            refresh_token_secret: DEV_REFRESH_SECRET.to_string(),
            refresh_token_expiry: Duration::from_secs(10 * 24 * 60 * 60),
            cookie_secure: true,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from defaults, the config file and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Self::builder();

        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => builder = builder.file(path)?,
            Err(_) if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                builder = builder.file(DEFAULT_CONFIG_FILE)?
            }
            Err(_) => {}
        }

        let config = builder.env(|key| std::env::var(key).ok())?.build()?;

        if config.access_token_secret == DEV_ACCESS_SECRET
            || config.refresh_token_secret == DEV_REFRESH_SECRET
        {
            tracing::warn!("Token secrets not configured, using development defaults");
        }

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.access_token_secret.is_empty() {
            return Err(ConfigError::MissingValue("access_token_secret"));
        }
        if self.refresh_token_secret.is_empty() {
            return Err(ConfigError::MissingValue("refresh_token_secret"));
        }
        if self.access_token_expiry.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "access_token_expiry",
                value: "0s".to_string(),
            });
        }
        if self.refresh_token_expiry.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "refresh_token_expiry",
                value: "0s".to_string(),
            });
        }
        if self.cors_origin.trim().is_empty() {
            return Err(ConfigError::MissingValue("cors_origin"));
        }
        if let Some(url) = &self.database_url {
            if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
                return Err(ConfigError::InvalidUrl(url.clone()));
            }
        }
        Ok(())
    }
}

/// On-disk shape of the TOML config file; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    server_port: Option<u16>,
    database_url: Option<String>,
    cors_origin: Option<String>,
    access_token_secret: Option<String>,
    access_token_expiry: Option<String>,
    refresh_token_secret: Option<String>,
    refresh_token_expiry: Option<String>,
    cookie_secure: Option<bool>,
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    server_port: Option<u16>,
    database_url: Option<String>,
    cors_origin: Option<String>,
    access_token_secret: Option<String>,
    access_token_expiry: Option<Duration>,
    refresh_token_secret: Option<String>,
    refresh_token_expiry: Option<Duration>,
    cookie_secure: Option<bool>,
}

impl AppConfigBuilder {
    pub fn server_port(mut self, port: u16) -> Self {
        self.server_port = Some(port);
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn cors_origin(mut self, origin: impl Into<String>) -> Self {
        self.cors_origin = Some(origin.into());
        self
    }

    pub fn access_token_secret(mut self, secret: impl Into<String>) -> Self {
        self.access_token_secret = Some(secret.into());
        self
    }

    pub fn access_token_expiry(mut self, expiry: Duration) -> Self {
        self.access_token_expiry = Some(expiry);
        self
    }

    pub fn refresh_token_secret(mut self, secret: impl Into<String>) -> Self {
        self.refresh_token_secret = Some(secret.into());
        self
    }

    pub fn refresh_token_expiry(mut self, expiry: Duration) -> Self {
        self.refresh_token_expiry = Some(expiry);
        self
    }

    pub fn cookie_secure(mut self, secure: bool) -> Self {
        self.cookie_secure = Some(secure);
        self
    }

    /// Apply values from a TOML file
    pub fn file(self, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.toml_str(&raw).map_err(|err| match err {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: Some(path.to_path_buf()),
                message,
            },
            other => other,
        })
    }

    /// Apply values from TOML text
    pub fn toml_str(mut self, raw: &str) -> Result<Self, ConfigError> {
        let file: FileConfig = toml::from_str(raw).map_err(|e| ConfigError::Parse {
            path: None,
            message: e.to_string(),
        })?;

        if let Some(port) = file.server_port {
            self.server_port = Some(port);
        }
        if let Some(url) = file.database_url {
            self.database_url = Some(url);
        }
        if let Some(origin) = file.cors_origin {
            self.cors_origin = Some(origin);
        }
        if let Some(secret) = file.access_token_secret {
            self.access_token_secret = Some(secret);
        }
        if let Some(raw) = file.access_token_expiry {
            self.access_token_expiry = Some(parse_duration("access_token_expiry", &raw)?);
        }
        if let Some(secret) = file.refresh_token_secret {
            self.refresh_token_secret = Some(secret);
        }
        if let Some(raw) = file.refresh_token_expiry {
            self.refresh_token_expiry = Some(parse_duration("refresh_token_expiry", &raw)?);
        }
        if let Some(secure) = file.cookie_secure {
            self.cookie_secure = Some(secure);
        }

        Ok(self)
    }

    /// Apply overrides from an environment lookup
    ///
    /// Takes the lookup as a closure so tests can supply a map instead of
    /// mutating the process environment.
    pub fn env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(raw) = get("SERVER_PORT") {
            let port = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "SERVER_PORT",
                value: raw.clone(),
            })?;
            self.server_port = Some(port);
        }
        if let Some(url) = get("DATABASE_URL") {
            self.database_url = Some(url);
        }
        if let Some(origin) = get("CORS_ORIGIN") {
            self.cors_origin = Some(origin);
        }
        if let Some(secret) = get("ACCESS_TOKEN_SECRET") {
            self.access_token_secret = Some(secret);
        }
        if let Some(raw) = get("ACCESS_TOKEN_EXPIRY") {
            self.access_token_expiry = Some(parse_duration("ACCESS_TOKEN_EXPIRY", &raw)?);
        }
        if let Some(secret) = get("REFRESH_TOKEN_SECRET") {
            self.refresh_token_secret = Some(secret);
        }
        if let Some(raw) = get("REFRESH_TOKEN_EXPIRY") {
            self.refresh_token_expiry = Some(parse_duration("REFRESH_TOKEN_EXPIRY", &raw)?);
        }
        if let Some(raw) = get("COOKIE_SECURE") {
            self.cookie_secure = Some(parse_bool("COOKIE_SECURE", &raw)?);
        }

        Ok(self)
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let config = AppConfig {
            server_port: self.server_port.unwrap_or(defaults.server_port),
            database_url: self.database_url.or(defaults.database_url),
            cors_origin: self.cors_origin.unwrap_or(defaults.cors_origin),
            access_token_secret: self
                .access_token_secret
                .unwrap_or(defaults.access_token_secret),
            access_token_expiry: self
                .access_token_expiry
                .unwrap_or(defaults.access_token_expiry),
            refresh_token_secret: self
                .refresh_token_secret
                .unwrap_or(defaults.refresh_token_secret),
            refresh_token_expiry: self
                .refresh_token_expiry
                .unwrap_or(defaults.refresh_token_expiry),
            cookie_secure: self.cookie_secure.unwrap_or(defaults.cookie_secure),
        };
        config.validate()?;
        Ok(config)
    }
}

fn parse_duration(key: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(raw.trim()).map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
        }),
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {message}")]
    Parse {
        path: Option<PathBuf>,
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::collections::HashMap;
    use std::io::Write;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::builder().build().unwrap();
        assert_eq!(config.server_port, 8000);
        assert_eq!(config.cors_origin, "*");
        assert_eq!(config.access_token_expiry, Duration::from_secs(86_400));
        assert_eq!(config.refresh_token_expiry, Duration::from_secs(864_000));
        assert!(config.cookie_secure);
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_env_overrides_file() {
        let config = AppConfig::builder()
            .toml_str("server_port = 7000\naccess_token_expiry = \"2h\"\ncookie_secure = false")
            .unwrap()
            .env(env_of(&[
                ("SERVER_PORT", "7100"),
                ("REFRESH_TOKEN_EXPIRY", "3d"),
            ]))
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(config.server_port, 7100);
        assert_eq!(config.access_token_expiry, Duration::from_secs(7200));
        assert_eq!(config.refresh_token_expiry, Duration::from_secs(3 * 86_400));
        assert!(!config.cookie_secure);
    }

    #[test]
    fn test_blank_env_values_are_ignored() {
        let config = AppConfig::builder()
            .env(env_of(&[("DATABASE_URL", "  "), ("CORS_ORIGIN", "")]))
            .unwrap()
            .build()
            .unwrap();
        assert!(config.database_url.is_none());
        assert_eq!(config.cors_origin, "*");
    }

    #[test]
    fn test_malformed_values_rejected() {
        let err = AppConfig::builder()
            .env(env_of(&[("ACCESS_TOKEN_EXPIRY", "soon")]))
            .unwrap_err();
        assert_matches!(err, ConfigError::InvalidValue { key: "ACCESS_TOKEN_EXPIRY", .. });

        let err = AppConfig::builder()
            .env(env_of(&[("SERVER_PORT", "eighty")]))
            .unwrap_err();
        assert_matches!(err, ConfigError::InvalidValue { key: "SERVER_PORT", .. });

        let err = AppConfig::builder()
            .env(env_of(&[("COOKIE_SECURE", "maybe")]))
            .unwrap_err();
        assert_matches!(err, ConfigError::InvalidValue { key: "COOKIE_SECURE", .. });
    }

    #[test]
    fn test_validation() {
        let err = AppConfig::builder().access_token_secret("").build().unwrap_err();
        assert_matches!(err, ConfigError::MissingValue("access_token_secret"));

        let err = AppConfig::builder()
            .refresh_token_expiry(Duration::ZERO)
            .build()
            .unwrap_err();
        assert_matches!(err, ConfigError::InvalidValue { key: "refresh_token_expiry", .. });

        let err = AppConfig::builder()
            .database_url("mysql://localhost/vidtube")
            .build()
            .unwrap_err();
        assert_matches!(err, ConfigError::InvalidUrl(_));
    }

    #[test]
    fn test_unknown_file_key_rejected() {
        let err = AppConfig::builder().toml_str("jwt_secret = \"x\"").unwrap_err();
        assert_matches!(err, ConfigError::Parse { path: None, .. });
    }

    #[test]
    fn test_reads_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "database_url = \"postgres://localhost/vidtube\"\ncors_origin = \"http://localhost:5173\""
        )
        .unwrap();

        let config = AppConfig::builder().file(file.path()).unwrap().build().unwrap();
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/vidtube"));
        assert_eq!(config.cors_origin, "http://localhost:5173");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::builder().file(dir.path().join("absent.toml")).unwrap_err();
        assert_matches!(err, ConfigError::Io { .. });
    }
}
