use std::env;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://api.duckyci.com";
pub const DEFAULT_CHECK_INTERVAL_SECS: f64 = 0.3;

#[derive(Debug, Clone)]
pub struct Config {
    pub upstream: UpstreamConfig,
    pub telegram: TelegramConfig,
    pub polling: PollingConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
    /// Sent verbatim as the `authorization` header.
    pub authorization_token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
}

impl TelegramConfig {
    pub fn is_enabled(&self) -> bool {
        self.bot_token.is_some() && self.chat_id.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct PollingConfig {
    pub interval: Duration,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let interval = match get("CHECK_INTERVAL") {
            Some(raw) => parse_interval(&raw)?,
            None => Duration::from_secs_f64(DEFAULT_CHECK_INTERVAL_SECS),
        };

        Ok(Config {
            upstream: UpstreamConfig {
                base_url: get("API_BASE_URL")
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                authorization_token: get("AUTHORIZATION_TOKEN"),
            },
            telegram: TelegramConfig {
                bot_token: get("TG_BOT_TOKEN"),
                chat_id: get("TG_CHAT_ID"),
            },
            polling: PollingConfig { interval },
            logging: LoggingConfig {
                level: get("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
                dir: get("LOG_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("log")),
            },
        })
    }
}

fn parse_interval(raw: &str) -> Result<Duration, ConfigError> {
    let secs: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidInterval(raw.to_string()))?;

    if !secs.is_finite() || secs < 0.0 {
        return Err(ConfigError::InvalidInterval(raw.to_string()));
    }

    Ok(Duration::from_secs_f64(secs))
}
