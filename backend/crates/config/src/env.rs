use breezo_common::error::{BreezoError, BreezoResult};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub iqair: IqAirSettings,
    /// Explicit CORS origins. Empty means the request origin is mirrored.
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IqAirSettings {
    pub base_url: String,
    /// Empty when unset; the provider then reports itself not ready.
    pub api_key: String,
    pub timeout_secs: u64,
}

impl AppConfig {
    /// Load configuration from environment variables.
    /// Loads `.env` file if present, then reads required vars.
    pub fn from_env() -> BreezoResult<Self> {
        // Best-effort .env load; ignore if missing
        let _ = dotenvy::dotenv();

        Ok(Self {
            database_url: get_var("DATABASE_URL")?,
            host: get_var_or("HOST", "0.0.0.0"),
            port: parse_var("PORT", "8080")?,
            log_level: get_var_or("LOG_LEVEL", "info"),
            iqair: IqAirSettings {
                base_url: get_var_or("IQAIR_BASE_URL", "https://api.airvisual.com"),
                api_key: get_var_or("IQAIR_API_KEY", ""),
                timeout_secs: parse_var("IQAIR_TIMEOUT_SECS", "10")?,
            },
            cors_allowed_origins: split_list(&get_var_or("CORS_ALLOWED_ORIGINS", "")),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn get_var(key: &str) -> BreezoResult<String> {
    env::var(key).map_err(|_| BreezoError::Config(format!("{key} is required but not set")))
}

fn get_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_var<T>(key: &str, default: &str) -> BreezoResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_var_or(key, default)
        .parse()
        .map_err(|e| BreezoError::Config(format!("invalid {key}: {e}")))
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}
