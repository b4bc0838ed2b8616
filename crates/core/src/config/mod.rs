//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (DOCFETCH_*, `__` separates nested keys)
//! 2. TOML config file (if DOCFETCH_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Environment variable naming an optional TOML config file.
pub const CONFIG_FILE_ENV: &str = "DOCFETCH_CONFIG_FILE";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "DOCFETCH_";

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (DOCFETCH_*)
/// 2. TOML config file (if DOCFETCH_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the SQLite key-value store.
    ///
    /// Set via DOCFETCH_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via DOCFETCH_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Credentials for the wiki document API.
    #[serde(default)]
    pub confluence: ConfluenceSettings,
}

/// The `confluence.*` settings table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfluenceSettings {
    /// Account identity, usually an email address.
    ///
    /// Set via DOCFETCH_CONFLUENCE__USERNAME.
    #[serde(default)]
    pub username: Option<String>,

    /// API token (not the account password).
    ///
    /// Set via DOCFETCH_CONFLUENCE__TOKEN.
    #[serde(default)]
    pub token: Option<String>,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./docfetch-cache.sqlite")
}

fn default_user_agent() -> String {
    "docfetch/0.1".into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { db_path: default_db_path(), user_agent: default_user_agent(), confluence: ConfluenceSettings::default() }
    }
}

impl AppConfig {
    /// Load configuration from all sources with layered precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var(CONFIG_FILE_ENV) {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed(ENV_PREFIX)
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Both wiki credentials, or the first one that is missing.
    ///
    /// Blank values count as missing.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` naming the absent setting.
    pub fn require_credentials(&self) -> Result<(&str, &str), ConfigError> {
        let present: for<'a> fn(&'a Option<String>) -> Option<&'a str> =
            |v| v.as_deref().map(str::trim).filter(|s| !s.is_empty());

        let username = present(&self.confluence.username).ok_or_else(|| ConfigError::Missing {
            field: "confluence.username".into(),
            hint: "Set DOCFETCH_CONFLUENCE__USERNAME to your account email".into(),
        })?;
        let token = present(&self.confluence.token).ok_or_else(|| ConfigError::Missing {
            field: "confluence.token".into(),
            hint: "Set DOCFETCH_CONFLUENCE__TOKEN to an API token".into(),
        })?;

        Ok((username, token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.db_path, PathBuf::from("./docfetch-cache.sqlite"));
        assert_eq!(config.user_agent, "docfetch/0.1");
        assert!(config.confluence.username.is_none());
        assert!(config.confluence.token.is_none());
    }

    #[test]
    fn test_require_credentials_missing_username() {
        let config = AppConfig::default();
        let result = config.require_credentials();
        assert!(matches!(result, Err(ConfigError::Missing { field, .. }) if field == "confluence.username"));
    }

    #[test]
    fn test_require_credentials_missing_token() {
        let config = AppConfig {
            confluence: ConfluenceSettings { username: Some("me@example.com".into()), token: None },
            ..Default::default()
        };
        let result = config.require_credentials();
        assert!(matches!(result, Err(ConfigError::Missing { field, .. }) if field == "confluence.token"));
    }

    #[test]
    fn test_require_credentials_blank_is_missing() {
        let config = AppConfig {
            confluence: ConfluenceSettings { username: Some("me@example.com".into()), token: Some("  ".into()) },
            ..Default::default()
        };
        assert!(config.require_credentials().is_err());
    }

    #[test]
    fn test_require_credentials_present() {
        let config = AppConfig {
            confluence: ConfluenceSettings { username: Some("me@example.com".into()), token: Some("tok".into()) },
            ..Default::default()
        };
        assert_eq!(config.require_credentials().unwrap(), ("me@example.com", "tok"));
    }

    #[test]
    fn test_load_nested_env() {
        Jail::expect_with(|jail| {
            jail.set_env("DOCFETCH_CONFLUENCE__USERNAME", "me@example.com");
            jail.set_env("DOCFETCH_CONFLUENCE__TOKEN", "tok");
            jail.set_env("DOCFETCH_USER_AGENT", "custom/1.0");

            let config = AppConfig::load().expect("config loads");
            assert_eq!(config.user_agent, "custom/1.0");
            assert_eq!(config.confluence.username.as_deref(), Some("me@example.com"));
            assert_eq!(config.confluence.token.as_deref(), Some("tok"));
            Ok(())
        });
    }

    #[test]
    fn test_load_toml_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "docfetch.toml",
                r#"
                    db_path = "/tmp/cache.sqlite"

                    [confluence]
                    username = "file@example.com"
                "#,
            )?;
            jail.set_env(CONFIG_FILE_ENV, "docfetch.toml");

            let config = AppConfig::load().expect("config loads");
            assert_eq!(config.db_path, PathBuf::from("/tmp/cache.sqlite"));
            assert_eq!(config.confluence.username.as_deref(), Some("file@example.com"));
            assert!(config.confluence.token.is_none());
            Ok(())
        });
    }
}
