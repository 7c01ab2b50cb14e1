//! Runtime configuration read from environment variables.
//!
//! `HOST`, `PORT`, `SPEECH_LANGUAGE`, `VOCABULARY_CSV`, `INACTIVITY_HOURS`.

use std::path::PathBuf;
use std::time::Duration;

/// Errors while reading configuration values.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConfigError {
    /// A variable was set but could not be parsed.
    InvalidValue { key: &'static str, value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { key, value } => {
                write!(f, "Invalid value for {}: {:?}", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Language handed to the browser's speech recognition (`start({ continuous, language })`).
    pub speech_language: String,
    /// Phrase table to load instead of the built-in one.
    pub vocabulary_csv: Option<PathBuf>,
    /// Matches not touched for this long are dropped.
    pub inactivity_timeout: Duration,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_speech_language() -> String {
    "en-US".to_string()
}

fn default_inactivity_hours() -> u64 {
    12
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            speech_language: default_speech_language(),
            vocabulary_csv: None,
            inactivity_timeout: Duration::from_secs(default_inactivity_hours() * 3600),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup. Unset or blank keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match get("PORT") {
            Some(v) => v.parse::<u16>().map_err(|_| ConfigError::InvalidValue { key: "PORT", value: v })?,
            None => default_port(),
        };
        let inactivity_hours: u64 = match get("INACTIVITY_HOURS") {
            Some(v) => match v.parse() {
                Ok(h) if h > 0 => h,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "INACTIVITY_HOURS",
                        value: v,
                    })
                }
            },
            None => default_inactivity_hours(),
        };

        Ok(Self {
            host: get("HOST").unwrap_or_else(default_host),
            port,
            speech_language: get("SPEECH_LANGUAGE").unwrap_or_else(default_speech_language),
            vocabulary_csv: get("VOCABULARY_CSV").map(PathBuf::from),
            inactivity_timeout: Duration::from_secs(inactivity_hours * 3600),
        })
    }
}
