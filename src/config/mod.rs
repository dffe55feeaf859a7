//! Configuration Module
//!
//! Centralized configuration management for the talent service: server,
//! database, token signing, and data partition settings, all loaded from
//! the environment.

use crate::database::DatabaseConfig;

/// Environment variable helpers
pub mod env {
    use std::env;

    /// Get environment variable as string with default
    pub fn get_string(key: &str, default: &str) -> String {
        env::var(key).unwrap_or_else(|_| default.to_string())
    }

    /// Get environment variable as boolean with default
    pub fn get_bool(key: &str, default: bool) -> bool {
        env::var(key)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Get environment variable as u16 with default
    pub fn get_u16(key: &str, default: u16) -> u16 {
        env::var(key)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Get environment variable as i64 with default
    pub fn get_i64(key: &str, default: i64) -> i64 {
        env::var(key)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: env::get_string("SERVER_HOST", "0.0.0.0"),
            port: env::get_u16("SERVER_PORT", 3000),
            log_level: env::get_string("LOG_LEVEL", "info"),
        }
    }
}

/// Token signing configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HS256 signing secret; required, no default
    pub secret: String,
    /// Access token lifetime in minutes
    pub token_ttl_minutes: i64,
}

impl AuthConfig {
    fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let secret = std::env::var("AUTH_SECRET")
            .map_err(|_| "Required environment variable AUTH_SECRET is not set")?;
        Ok(Self {
            secret,
            token_ttl_minutes: env::get_i64("AUTH_TOKEN_TTL_MINUTES", 30),
        })
    }
}

/// Application configuration combining all service configurations
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Token signing configuration
    pub auth: AuthConfig,

    /// Whether to serve from the live partition (false selects shadow)
    pub live_mode: bool,
}

impl AppConfig {
    /// Load complete application configuration from environment
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::from_env()
                .map_err(|_| "Required environment variable DATABASE_URL is not set")?,
            auth: AuthConfig::from_env()?,
            live_mode: env::get_bool("LIVE_MODE", true),
        })
    }

    /// Validate the complete configuration
    pub fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".into());
        }

        if self.database.max_connections == 0 {
            return Err("Database max_connections must be greater than 0".into());
        }

        if self.auth.secret.is_empty() {
            return Err("Auth secret cannot be empty".into());
        }

        if self.auth.token_ttl_minutes <= 0 {
            return Err("Token TTL must be positive".into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AppConfig {
        AppConfig {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                log_level: "info".to_string(),
            },
            database: DatabaseConfig::default(),
            auth: AuthConfig {
                secret: "secret".to_string(),
                token_ttl_minutes: 30,
            },
            live_mode: true,
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_empty_secret_rejected() {
        let mut cfg = config();
        cfg.auth.secret = String::new();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let mut cfg = config();
        cfg.auth.token_ttl_minutes = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_zero_port_rejected() {
        let mut cfg = config();
        cfg.server.port = 0;
        assert!(cfg.validate().is_err());
    }
}
