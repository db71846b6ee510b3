// SPDX-License-Identifier: MIT
// Copyright 2026 Pitchside Developers

//! Application configuration loaded from environment variables.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Look-ahead window used when an availability query gives no `days`
    pub default_window_days: u32,
    /// Upper bound on the look-ahead window a client may request
    pub max_window_days: u32,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: parse_or("PORT", 8080)?,
            default_window_days: parse_or("DEFAULT_WINDOW_DAYS", 14)?,
            max_window_days: parse_or("MAX_WINDOW_DAYS", 60)?,
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            default_window_days: 14,
            max_window_days: 60,
        }
    }
}

/// Read a numeric env var, falling back to `default` when unset.
fn parse_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid(name)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env mutation is process-wide, so defaults and rejection run in one test.
    #[test]
    fn test_config_from_env() {
        env::remove_var("PORT");
        env::remove_var("DEFAULT_WINDOW_DAYS");
        env::remove_var("MAX_WINDOW_DAYS");

        let config = Config::from_env().expect("Config should load");
        assert_eq!(config.port, 8080);
        assert_eq!(config.default_window_days, 14);
        assert_eq!(config.max_window_days, 60);

        env::set_var("MAX_WINDOW_DAYS", "sixty");
        let result = Config::from_env();
        env::remove_var("MAX_WINDOW_DAYS");
        assert!(matches!(result, Err(ConfigError::Invalid("MAX_WINDOW_DAYS"))));
    }
}
