//! Configuration module for Minimail.

use serde::Deserialize;
use std::path::Path;

use crate::{MinimailError, Result};

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/minimail.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Session configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Session expiry in seconds. 0 means sessions never expire.
    #[serde(default)]
    pub expiry_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { expiry_secs: 0 }
    }
}

/// Registration configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationConfig {
    /// Whether to check that the email domain resolves before registering.
    #[serde(default = "default_verify_domain")]
    pub verify_domain: bool,
    /// DNS lookup timeout in seconds.
    #[serde(default = "default_dns_timeout")]
    pub dns_timeout_secs: u64,
}

fn default_verify_domain() -> bool {
    true
}

fn default_dns_timeout() -> u64 {
    5
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            verify_domain: default_verify_domain(),
            dns_timeout_secs: default_dns_timeout(),
        }
    }
}

/// Body suggestion configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestConfig {
    /// Command to run for body suggestions. The subject is appended as the
    /// final argument.
    #[serde(default = "default_suggest_command")]
    pub command: Vec<String>,
    /// Timeout for the suggestion command in seconds.
    #[serde(default = "default_suggest_timeout")]
    pub timeout_secs: u64,
}

fn default_suggest_command() -> Vec<String> {
    vec!["python3".to_string(), "scripts/suggest_body.py".to_string()]
}

fn default_suggest_timeout() -> u64 {
    5
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            command: default_suggest_command(),
            timeout_secs: default_suggest_timeout(),
        }
    }
}

/// Web server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// Host address to bind.
    #[serde(default = "default_web_host")]
    pub host: String,
    /// Port number for the Web API.
    #[serde(default = "default_web_port")]
    pub port: u16,
    /// CORS allowed origins. Empty means any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Whether to serve static files.
    #[serde(default = "default_serve_static")]
    pub serve_static: bool,
    /// Path to static files directory.
    #[serde(default = "default_static_path")]
    pub static_path: String,
}

fn default_web_host() -> String {
    "0.0.0.0".to_string()
}

fn default_web_port() -> u16 {
    8080
}

fn default_serve_static() -> bool {
    true
}

fn default_static_path() -> String {
    "web".to_string()
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_web_host(),
            port: default_web_port(),
            cors_origins: vec![],
            serve_static: default_serve_static(),
            static_path: default_static_path(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file. Empty disables file logging.
    #[serde(default)]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: String::new(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Session configuration.
    #[serde(default)]
    pub session: SessionConfig,
    /// Registration configuration.
    #[serde(default)]
    pub registration: RegistrationConfig,
    /// Body suggestion configuration.
    #[serde(default)]
    pub suggest: SuggestConfig,
    /// Web server configuration.
    #[serde(default)]
    pub web: WebConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(MinimailError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| MinimailError::Validation(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `MINIMAIL_DATABASE_PATH`: Override the database file path
    /// - `MINIMAIL_WEB_PORT`: Override the web server port
    pub fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("MINIMAIL_DATABASE_PATH") {
            if !path.is_empty() {
                self.database.path = path;
            }
        }
        if let Ok(port) = std::env::var("MINIMAIL_WEB_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                self.web.port = port;
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - The database path is empty
    /// - A DNS or suggestion timeout is zero
    /// - The suggestion command is empty
    pub fn validate(&self) -> Result<()> {
        if self.database.path.is_empty() {
            return Err(MinimailError::Validation(
                "database path must not be empty".to_string(),
            ));
        }
        if self.registration.dns_timeout_secs == 0 {
            return Err(MinimailError::Validation(
                "registration.dns_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.suggest.timeout_secs == 0 {
            return Err(MinimailError::Validation(
                "suggest.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.suggest.command.is_empty() {
            return Err(MinimailError::Validation(
                "suggest.command must name a program to run".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.database.path, "data/minimail.db");

        assert_eq!(config.session.expiry_secs, 0);

        assert!(config.registration.verify_domain);
        assert_eq!(config.registration.dns_timeout_secs, 5);

        assert_eq!(config.suggest.command.len(), 2);
        assert_eq!(config.suggest.command[0], "python3");
        assert_eq!(config.suggest.timeout_secs, 5);

        assert_eq!(config.web.host, "0.0.0.0");
        assert_eq!(config.web.port, 8080);
        assert!(config.web.cors_origins.is_empty());
        assert!(config.web.serve_static);
        assert_eq!(config.web.static_path, "web");

        assert_eq!(config.logging.level, "info");
        assert!(config.logging.file.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[database]
path = "custom/mail.sqlite"

[session]
expiry_secs = 3600

[registration]
verify_domain = false
dns_timeout_secs = 2

[suggest]
command = ["python3", "custom/predict.py"]
timeout_secs = 10

[web]
host = "127.0.0.1"
port = 3000
cors_origins = ["http://localhost:5173"]
serve_static = false
static_path = "public"

[logging]
level = "debug"
file = "custom/logs/app.log"
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.database.path, "custom/mail.sqlite");

        assert_eq!(config.session.expiry_secs, 3600);

        assert!(!config.registration.verify_domain);
        assert_eq!(config.registration.dns_timeout_secs, 2);

        assert_eq!(config.suggest.command[1], "custom/predict.py");
        assert_eq!(config.suggest.timeout_secs, 10);

        assert_eq!(config.web.host, "127.0.0.1");
        assert_eq!(config.web.port, 3000);
        assert_eq!(config.web.cors_origins.len(), 1);
        assert_eq!(config.web.cors_origins[0], "http://localhost:5173");
        assert!(!config.web.serve_static);
        assert_eq!(config.web.static_path, "public");

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, "custom/logs/app.log");
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[web]
port = 3000

[session]
expiry_secs = 60
"#;

        let config = Config::parse(toml).unwrap();

        // Specified values
        assert_eq!(config.web.port, 3000);
        assert_eq!(config.session.expiry_secs, 60);

        // Default values
        assert_eq!(config.web.host, "0.0.0.0");
        assert_eq!(config.database.path, "data/minimail.db");
        assert!(config.registration.verify_domain);
    }

    #[test]
    fn test_parse_empty_config() {
        let toml = "";
        let config = Config::parse(toml).unwrap();

        // All defaults
        assert_eq!(config.web.host, "0.0.0.0");
        assert_eq!(config.web.port, 8080);
        assert_eq!(config.database.path, "data/minimail.db");
    }

    #[test]
    fn test_parse_invalid_config() {
        let toml = "this is not valid toml [[[";
        let result = Config::parse(toml);

        assert!(result.is_err());
        if let Err(MinimailError::Validation(msg)) = result {
            assert!(msg.contains("config parse error"));
        } else {
            panic!("Expected Validation error");
        }
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load("nonexistent.toml");

        assert!(result.is_err());
        assert!(matches!(result, Err(MinimailError::Io(_))));
    }

    #[test]
    fn test_apply_env_overrides_database_path() {
        let original = std::env::var("MINIMAIL_DATABASE_PATH").ok();

        std::env::set_var("MINIMAIL_DATABASE_PATH", "/tmp/override.db");

        let mut config = Config::default();
        config.apply_env_overrides();

        assert_eq!(config.database.path, "/tmp/override.db");

        if let Some(val) = original {
            std::env::set_var("MINIMAIL_DATABASE_PATH", val);
        } else {
            std::env::remove_var("MINIMAIL_DATABASE_PATH");
        }
    }

    #[test]
    fn test_apply_env_overrides_invalid_port() {
        let original = std::env::var("MINIMAIL_WEB_PORT").ok();

        std::env::set_var("MINIMAIL_WEB_PORT", "not-a-port");

        let mut config = Config::default();
        config.apply_env_overrides();

        // Should keep the default when the value does not parse
        assert_eq!(config.web.port, 8080);

        if let Some(val) = original {
            std::env::set_var("MINIMAIL_WEB_PORT", val);
        } else {
            std::env::remove_var("MINIMAIL_WEB_PORT");
        }
    }

    #[test]
    fn test_validate_empty_database_path() {
        let mut config = Config::default();
        config.database.path = String::new();

        let result = config.validate();
        assert!(result.is_err());
        if let Err(MinimailError::Validation(msg)) = result {
            assert!(msg.contains("database path"));
        }
    }

    #[test]
    fn test_validate_zero_dns_timeout() {
        let mut config = Config::default();
        config.registration.dns_timeout_secs = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_suggest_command() {
        let mut config = Config::default();
        config.suggest.command.clear();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_default_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }
}
