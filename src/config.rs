use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-lite";
pub const DEFAULT_MURF_BASE_URL: &str = "https://api.murf.ai";

/// Upper bound on a single speech generation call.
pub const MURF_TIMEOUT: Duration = Duration::from_secs(30);

const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("{var} must be a number, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },
}

/// Provider secret. Never printed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Redacted presence marker for logs.
pub fn key_presence(key: Option<&ApiKey>) -> &'static str {
    match key {
        Some(k) if !k.is_empty() => "***",
        _ => "not set",
    }
}

/// Whether degraded-success fallbacks are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuntimeMode {
    Development,
    #[default]
    Production,
}

impl RuntimeMode {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => RuntimeMode::Development,
            _ => RuntimeMode::Production,
        }
    }

    pub fn is_development(self) -> bool {
        self == RuntimeMode::Development
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RuntimeMode::Development => "development",
            RuntimeMode::Production => "production",
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: Option<ApiKey>,
    pub base_url: String,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct MurfSettings {
    pub api_key: Option<ApiKey>,
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
    pub max_body_bytes: usize,
    pub app_version: String,
    pub mode: RuntimeMode,
    pub gemini: GeminiSettings,
    pub murf: MurfSettings,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let port = parse_number("PORT", lookup("PORT"), 3000u16)?;
        let max_body_bytes = parse_number("MAX_BODY_BYTES", lookup("MAX_BODY_BYTES"), DEFAULT_MAX_BODY_BYTES)?;

        Ok(Self {
            host: var_or("HOST", "0.0.0.0"),
            port,
            static_dir: var_or("STATIC_DIR", "./static").into(),
            max_body_bytes,
            app_version: var_or("APP_VERSION", env!("CARGO_PKG_VERSION")),
            mode: lookup("APP_ENV")
                .map(|v| RuntimeMode::parse(&v))
                .unwrap_or_default(),
            gemini: GeminiSettings {
                api_key: lookup("GEMINI_API_KEY").map(ApiKey::new),
                base_url: var_or("GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL),
                model: var_or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            },
            murf: MurfSettings {
                api_key: lookup("MURF_API_KEY").map(ApiKey::new),
                base_url: var_or("MURF_BASE_URL", DEFAULT_MURF_BASE_URL),
                timeout: MURF_TIMEOUT,
            },
        })
    }

    pub fn vision_api_key(&self) -> Option<&ApiKey> {
        self.gemini.api_key.as_ref()
    }

    pub fn speech_api_key(&self) -> Option<&ApiKey> {
        self.murf.api_key.as_ref()
    }
}

fn parse_number<T: std::str::FromStr>(
    var: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { var, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.mode, RuntimeMode::Production);
        assert_eq!(config.gemini.model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.murf.timeout, Duration::from_secs(30));
        assert!(config.vision_api_key().is_none());
        assert!(config.speech_api_key().is_none());
    }

    #[test]
    fn reads_keys_and_mode() {
        let config = config_from(&[
            ("GEMINI_API_KEY", "g-key"),
            ("MURF_API_KEY", "m-key"),
            ("APP_ENV", "Development"),
            ("PORT", "8080"),
        ])
        .unwrap();
        assert_eq!(config.vision_api_key().map(ApiKey::expose), Some("g-key"));
        assert_eq!(config.speech_api_key().map(ApiKey::expose), Some("m-key"));
        assert!(config.mode.is_development());
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn unknown_mode_is_production() {
        let config = config_from(&[("APP_ENV", "staging")]).unwrap();
        assert_eq!(config.mode, RuntimeMode::Production);
    }

    #[test]
    fn rejects_bad_port() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn api_key_debug_is_redacted() {
        let key = ApiKey::new("super-secret");
        assert_eq!(format!("{:?}", key), "ApiKey(***)");
        assert_eq!(key_presence(Some(&key)), "***");
        assert_eq!(key_presence(Some(&ApiKey::new(""))), "not set");
        assert_eq!(key_presence(None), "not set");
    }
}
