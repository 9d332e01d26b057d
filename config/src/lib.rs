//! # Configuration Management for edstats
//!
//! This crate provides the centralized configuration structures for all edstats
//! components: the API endpoint, the HTTP response cache, token storage and the
//! session constants (current fiscal/assessment year, graduation grade label).
//!
//! Values are read once when the session starts and treated as constants for
//! its lifetime.
//!
//! ## TOML File Configuration
//! ```toml
//! [api]
//! base_url = "https://api.example.org/api/v1/"
//! refresh_path = "auth/refresh/"
//! request_timeout_ms = 10000
//!
//! [cache]
//! enabled = true
//! ttl_seconds = 300
//!
//! [auth]
//! token_path = "/home/me/.config/edstats/storage.json"
//!
//! [session]
//! fiscal_year = 2024
//! assessment_year = 2024
//! graduation_grade = "Grade 12"
//! ```
//!
//! Load configuration:
//! ```rust,no_run
//! use config::AppConfig;
//!
//! // Load from EDSTATS_CONFIG or ./edstats.toml
//! let config = AppConfig::load()?;
//!
//! // Or build it from EDSTATS_* environment variables
//! let config = AppConfig::from_env()?;
//! # Ok::<(), config::ConfigError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::{env, path::Path, path::PathBuf, time::Duration};
use thiserror::Error;
use url::Url;

const DEFAULT_CONFIG_PATH: &str = "./edstats.toml";
const DEFAULT_REFRESH_PATH: &str = "auth/refresh/";
const DEFAULT_CACHE_TTL_SECONDS: u64 = 300;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    pub session: SessionConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Versioned base URL, e.g. `https://host/api/v1/`
    pub base_url: String,
    /// Path (relative to `base_url`) that exchanges the refresh cookie for a new token
    #[serde(default = "default_refresh_path")]
    pub refresh_path: String,
    /// Request timeout; the transport default applies when unset
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
}

/// HTTP response cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub enabled: bool,
    pub ttl_seconds: u64,
}

/// Access token storage configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// File backing the token store. Tokens are kept in memory when unset.
    #[serde(default)]
    pub token_path: Option<PathBuf>,
}

/// Session constants supplied by the environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub fiscal_year: i32,
    pub assessment_year: i32,
    pub graduation_grade: String,
}

fn default_refresh_path() -> String {
    DEFAULT_REFRESH_PATH.to_string()
}

impl AppConfig {
    /// Load configuration from the TOML file named by `EDSTATS_CONFIG`, or the default path
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env file is not an error
        dotenvy::dotenv().ok();

        if let Ok(config_path) = env::var("EDSTATS_CONFIG") {
            Self::from_file(&config_path)
        } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::from_file(DEFAULT_CONFIG_PATH)
        } else {
            Err(ConfigError::Invalid(format!(
                "Config path must be specified in .env file as EDSTATS_CONFIG or in {} file",
                DEFAULT_CONFIG_PATH
            )))
        }
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Build configuration from `EDSTATS_*` environment variables (after loading `.env`)
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// `EDSTATS_API_BASE_URL`, `EDSTATS_FISCAL_YEAR` and `EDSTATS_ASSESSMENT_YEAR`
    /// are required; everything else falls back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name).ok_or_else(|| ConfigError::Invalid(format!("{} must be set", name)))
        };

        let config = Self {
            api: ApiConfig {
                base_url: required("EDSTATS_API_BASE_URL")?,
                refresh_path: lookup("EDSTATS_REFRESH_PATH").unwrap_or_else(default_refresh_path),
                request_timeout_ms: lookup("EDSTATS_REQUEST_TIMEOUT_MS")
                    .map(|value| parse_var("EDSTATS_REQUEST_TIMEOUT_MS", &value))
                    .transpose()?,
            },
            cache: CacheConfig {
                enabled: lookup("EDSTATS_CACHE_ENABLED")
                    .map(|value| parse_var("EDSTATS_CACHE_ENABLED", &value))
                    .transpose()?
                    .unwrap_or(true),
                ttl_seconds: lookup("EDSTATS_CACHE_TTL_SECONDS")
                    .map(|value| parse_var("EDSTATS_CACHE_TTL_SECONDS", &value))
                    .transpose()?
                    .unwrap_or(DEFAULT_CACHE_TTL_SECONDS),
            },
            auth: AuthConfig {
                token_path: lookup("EDSTATS_TOKEN_PATH").map(PathBuf::from),
            },
            session: SessionConfig {
                fiscal_year: parse_var("EDSTATS_FISCAL_YEAR", &required("EDSTATS_FISCAL_YEAR")?)?,
                assessment_year: parse_var(
                    "EDSTATS_ASSESSMENT_YEAR",
                    &required("EDSTATS_ASSESSMENT_YEAR")?,
                )?,
                graduation_grade: lookup("EDSTATS_GRADUATION_GRADE")
                    .unwrap_or_else(|| "Grade 12".to_string()),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.is_empty() {
            return Err(ConfigError::Invalid("API base_url cannot be empty".to_string()));
        }
        let base = Url::parse(&self.api.base_url)?;
        if !base.path().ends_with('/') {
            return Err(ConfigError::Invalid(
                "API base_url must end with '/' so endpoint paths join under it".to_string(),
            ));
        }
        if self.api.refresh_path.is_empty() {
            return Err(ConfigError::Invalid("API refresh_path cannot be empty".to_string()));
        }
        if self.api.request_timeout_ms == Some(0) {
            return Err(ConfigError::Invalid(
                "API request_timeout_ms must be greater than 0".to_string(),
            ));
        }
        if self.cache.enabled && self.cache.ttl_seconds == 0 {
            return Err(ConfigError::Invalid(
                "Cache ttl_seconds must be greater than 0 when the cache is enabled".to_string(),
            ));
        }
        if self.session.fiscal_year <= 0 || self.session.assessment_year <= 0 {
            return Err(ConfigError::Invalid(
                "Session years must be positive".to_string(),
            ));
        }
        if self.session.graduation_grade.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "Session graduation_grade cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
    })
}

impl ApiConfig {
    /// Create a new API configuration with the default refresh path and no timeout
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            refresh_path: default_refresh_path(),
            request_timeout_ms: None,
        }
    }

    pub fn with_request_timeout(mut self, timeout_ms: u64) -> Self {
        self.request_timeout_ms = Some(timeout_ms);
        self
    }

    /// Get the request timeout as Duration
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

impl CacheConfig {
    /// Create a new cache configuration
    pub fn new(enabled: bool, ttl_seconds: u64) -> Self {
        Self {
            enabled,
            ttl_seconds,
        }
    }

    /// Get TTL as Duration
    pub fn ttl_duration(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_seconds: DEFAULT_CACHE_TTL_SECONDS, // 5 minutes
        }
    }
}

impl SessionConfig {
    pub fn new(fiscal_year: i32, assessment_year: i32, graduation_grade: String) -> Self {
        Self {
            fiscal_year,
            assessment_year,
            graduation_grade,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SAMPLE: &str = r#"
        [api]
        base_url = "https://edstats.example.org/api/v1/"

        [session]
        fiscal_year = 2024
        assessment_year = 2023
        graduation_grade = "Grade 12"
    "#;

    #[test]
    fn test_toml_defaults() {
        let config = AppConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.api.refresh_path, "auth/refresh/");
        assert_eq!(config.api.request_timeout(), None);
        assert!(config.cache.enabled);
        assert_eq!(config.cache.ttl_duration(), Duration::from_secs(300));
        assert!(config.auth.token_path.is_none());
        assert_eq!(config.session.assessment_year, 2023);
    }

    #[test]
    fn test_base_url_must_end_with_slash() {
        let text = SAMPLE.replace("api/v1/", "api/v1");
        let err = AppConfig::from_toml_str(&text).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_zero_ttl_rejected_when_enabled() {
        let text = format!("{}\n[cache]\nenabled = true\nttl_seconds = 0\n", SAMPLE);
        assert!(AppConfig::from_toml_str(&text).is_err());

        let text = format!("{}\n[cache]\nenabled = false\nttl_seconds = 0\n", SAMPLE);
        assert!(AppConfig::from_toml_str(&text).is_ok());
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("EDSTATS_API_BASE_URL", "http://localhost:8000/api/v1/"),
            ("EDSTATS_FISCAL_YEAR", "2024"),
            ("EDSTATS_ASSESSMENT_YEAR", "2023"),
            ("EDSTATS_CACHE_TTL_SECONDS", "60"),
            ("EDSTATS_TOKEN_PATH", "/tmp/edstats-token.json"),
        ]
        .into_iter()
        .collect();

        let config =
            AppConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string())).unwrap();
        assert_eq!(config.session.fiscal_year, 2024);
        assert_eq!(config.session.graduation_grade, "Grade 12");
        assert_eq!(config.cache.ttl_seconds, 60);
        assert_eq!(
            config.auth.token_path,
            Some(PathBuf::from("/tmp/edstats-token.json"))
        );
    }

    #[test]
    fn test_from_lookup_reports_bad_numbers() {
        let err = AppConfig::from_lookup(|name| match name {
            "EDSTATS_API_BASE_URL" => Some("http://localhost/api/v1/".to_string()),
            "EDSTATS_FISCAL_YEAR" => Some("next year".to_string()),
            "EDSTATS_ASSESSMENT_YEAR" => Some("2023".to_string()),
            _ => None,
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref name, .. } if name == "EDSTATS_FISCAL_YEAR"));
    }

    #[test]
    fn test_from_lookup_requires_base_url() {
        let err = AppConfig::from_lookup(|_| None).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
