//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::collections::HashMap;
use std::net::SocketAddr;
use tracing::Level;

/// Longest accepted auth session lifetime, in days.
pub const MAX_SESSION_TTL_DAYS: i64 = 3650;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    pub cors_origin: String,
    pub session_ttl_days: i64,
    pub cookie_secure: bool,
    pub gesture_min_confidence: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 3000)),
            log_level: Level::INFO,
            cors_origin: "http://localhost:5173".to_string(),
            session_ttl_days: 30,
            cookie_secure: true,
            gesture_min_confidence: handspeak_core::gesture::DEFAULT_MIN_CONFIDENCE,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_vars(&std::env::vars().collect())
    }

    /// Builds the configuration from an explicit variable map.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let get = |key: &str| vars.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

        // --- Server Settings ---
        let bind_address = match get("BIND_ADDRESS") {
            Some(raw) => raw.parse::<SocketAddr>().map_err(|e| {
                ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
            })?,
            None => defaults.bind_address,
        };

        let log_level = match get("RUST_LOG") {
            Some(raw) => raw.parse::<Level>().map_err(|_| {
                ConfigError::InvalidValue(
                    "RUST_LOG".to_string(),
                    format!("'{}' is not a valid log level", raw),
                )
            })?,
            None => defaults.log_level,
        };

        let cors_origin = get("CORS_ORIGIN")
            .map(str::to_string)
            .unwrap_or(defaults.cors_origin);
        if axum::http::HeaderValue::from_str(&cors_origin).is_err() {
            return Err(ConfigError::InvalidValue(
                "CORS_ORIGIN".to_string(),
                format!("'{}' is not a valid origin", cors_origin),
            ));
        }

        // --- Session Settings ---
        let session_ttl_days = match get("SESSION_TTL_DAYS") {
            Some(raw) => match raw.parse::<i64>() {
                Ok(days) if (1..=MAX_SESSION_TTL_DAYS).contains(&days) => days,
                _ => {
                    return Err(ConfigError::InvalidValue(
                        "SESSION_TTL_DAYS".to_string(),
                        format!("'{}' must be between 1 and {} days", raw, MAX_SESSION_TTL_DAYS),
                    ))
                }
            },
            None => defaults.session_ttl_days,
        };

        let cookie_secure = match get("COOKIE_SECURE") {
            Some(raw) => parse_bool(raw).ok_or_else(|| {
                ConfigError::InvalidValue("COOKIE_SECURE".to_string(), raw.to_string())
            })?,
            None => defaults.cookie_secure,
        };

        // --- Gesture Settings ---
        let gesture_min_confidence = match get("GESTURE_MIN_CONFIDENCE") {
            Some(raw) => match raw.parse::<f32>() {
                Ok(v) if v > 0.0 && v <= handspeak_core::gesture::MAX_SCORE => v,
                _ => {
                    return Err(ConfigError::InvalidValue(
                        "GESTURE_MIN_CONFIDENCE".to_string(),
                        format!("'{}' must be in (0, 10]", raw),
                    ))
                }
            },
            None => defaults.gesture_min_confidence,
        };

        Ok(Self {
            bind_address,
            log_level,
            cors_origin,
            session_ttl_days,
            cookie_secure,
            gesture_min_confidence,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
