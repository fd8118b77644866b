//! Configuration layer: typed settings with layered precedence (file → env).

use std::{str::FromStr, time::Duration};

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "crewdeck";
const ENV_PREFIX: &str = "CREWDECK";
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
const DEFAULT_LIST_PAGE_LIMIT: usize = 64;
const DEFAULT_GATEWAY_METRICS_LIMIT: usize = 32;

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    pub cache: CacheSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: Url,
    pub token: Option<String>,
    pub request_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct CacheSettings {
    pub enable_query_cache: bool,
    pub list_page_limit: usize,
    pub gateway_metrics_limit: usize,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment).
pub fn load() -> Result<Settings, ConfigError> {
    let raw: RawSettings = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false))
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?
        .try_deserialize()?;

    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    api: RawApiSettings,
    cache: RawCacheSettings,
    logging: RawLoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawApiSettings {
    base_url: Option<String>,
    token: Option<String>,
    request_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawCacheSettings {
    enable_query_cache: Option<bool>,
    list_page_limit: Option<usize>,
    gateway_metrics_limit: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, ConfigError> {
        let RawSettings {
            api,
            cache,
            logging,
        } = raw;

        let api = build_api_settings(api)?;
        let cache = build_cache_settings(cache)?;
        let logging = build_logging_settings(logging)?;

        Ok(Self {
            api,
            cache,
            logging,
        })
    }
}

fn build_api_settings(api: RawApiSettings) -> Result<ApiSettings, ConfigError> {
    let base = api
        .base_url
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let base_url = Url::parse(base.trim())
        .map_err(|err| ConfigError::invalid("api.base_url", format!("failed to parse: {err}")))?;
    if base_url.cannot_be_a_base() {
        return Err(ConfigError::invalid(
            "api.base_url",
            "URL cannot serve as a base",
        ));
    }

    let token = api.token.and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    });

    let timeout_secs = api
        .request_timeout_seconds
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
    if timeout_secs == 0 {
        return Err(ConfigError::invalid(
            "api.request_timeout_seconds",
            "must be greater than zero",
        ));
    }

    Ok(ApiSettings {
        base_url,
        token,
        request_timeout: Duration::from_secs(timeout_secs),
    })
}

fn build_cache_settings(cache: RawCacheSettings) -> Result<CacheSettings, ConfigError> {
    let list_page_limit = cache.list_page_limit.unwrap_or(DEFAULT_LIST_PAGE_LIMIT);
    if list_page_limit == 0 {
        return Err(ConfigError::invalid(
            "cache.list_page_limit",
            "must be greater than zero",
        ));
    }

    let gateway_metrics_limit = cache
        .gateway_metrics_limit
        .unwrap_or(DEFAULT_GATEWAY_METRICS_LIMIT);
    if gateway_metrics_limit == 0 {
        return Err(ConfigError::invalid(
            "cache.gateway_metrics_limit",
            "must be greater than zero",
        ));
    }

    Ok(CacheSettings {
        enable_query_cache: cache.enable_query_cache.unwrap_or(true),
        list_page_limit,
        gateway_metrics_limit,
    })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, ConfigError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            ConfigError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_resolve() {
        let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");
        assert_eq!(settings.api.base_url.as_str(), "http://127.0.0.1:8000/");
        assert!(settings.api.token.is_none());
        assert_eq!(settings.api.request_timeout, Duration::from_secs(15));
        assert!(settings.cache.enable_query_cache);
        assert_eq!(settings.cache.list_page_limit, 64);
        assert_eq!(settings.logging.level, LevelFilter::INFO);
        assert!(matches!(settings.logging.format, LogFormat::Compact));
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let raw = RawSettings {
            api: RawApiSettings {
                base_url: Some("not a url".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            Settings::from_raw(raw),
            Err(ConfigError::Invalid { key, .. }) if key == "api.base_url"
        ));
    }

    #[test]
    fn rejects_zero_timeout() {
        let raw = RawSettings {
            api: RawApiSettings {
                request_timeout_seconds: Some(0),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(Settings::from_raw(raw).is_err());
    }

    #[test]
    fn blank_token_treated_as_absent() {
        let raw = RawSettings {
            api: RawApiSettings {
                token: Some("   ".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let settings = Settings::from_raw(raw).expect("valid settings");
        assert!(settings.api.token.is_none());
    }

    #[test]
    fn json_logging_enforces_format() {
        let raw = RawSettings {
            logging: RawLoggingSettings {
                json: Some(true),
                ..Default::default()
            },
            ..Default::default()
        };
        let settings = Settings::from_raw(raw).expect("valid settings");
        assert!(matches!(settings.logging.format, LogFormat::Json));
    }
}
