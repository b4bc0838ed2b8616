//! Credentials for the wiki document API.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use docfetch_core::{AppConfig, ConfigError, Error};

/// Username and API token pair.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub token: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self { username: username.into(), token: token.into() }
    }

    /// `Basic base64(username:token)`.
    pub fn basic_auth_value(&self) -> String {
        format!("Basic {}", STANDARD.encode(format!("{}:{}", self.username, self.token)))
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Supplies credentials at request time.
///
/// Called once per authenticated fetch; implementations must not cache the
/// result so that settings changes apply to the next request.
pub trait CredentialsProvider: Send + Sync {
    /// # Errors
    ///
    /// [`Error::Configuration`] when either setting is missing.
    fn credentials(&self) -> Result<Credentials, Error>;
}

fn missing_credentials(err: ConfigError) -> Error {
    Error::Configuration(format!(
        "Confluence credentials not configured. Please set confluence.username and confluence.token ({err})"
    ))
}

/// Re-reads the layered [`AppConfig`] on every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigCredentials;

impl CredentialsProvider for ConfigCredentials {
    fn credentials(&self) -> Result<Credentials, Error> {
        let config = AppConfig::load()?;
        let (username, token) = config.require_credentials().map_err(missing_credentials)?;
        Ok(Credentials::new(username, token))
    }
}

/// Fixed credentials, or none at all.
#[derive(Debug, Default, Clone)]
pub struct StaticCredentials(pub Option<Credentials>);

impl StaticCredentials {
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self(Some(Credentials::new(username, token)))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl CredentialsProvider for StaticCredentials {
    fn credentials(&self) -> Result<Credentials, Error> {
        self.0.clone().ok_or_else(|| {
            missing_credentials(ConfigError::Missing {
                field: "confluence.username".into(),
                hint: "no credentials were supplied".into(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_auth_value() {
        let creds = Credentials::new("me@example.com", "secret-token");
        assert_eq!(creds.basic_auth_value(), "Basic bWVAZXhhbXBsZS5jb206c2VjcmV0LXRva2Vu");
    }

    #[test]
    fn test_debug_redacts_token() {
        let creds = Credentials::new("me@example.com", "secret-token");
        let debug = format!("{creds:?}");
        assert!(debug.contains("me@example.com"));
        assert!(!debug.contains("secret-token"));
    }

    #[test]
    fn test_static_none_is_configuration_error() {
        let result = StaticCredentials::none().credentials();
        assert!(matches!(result, Err(Error::Configuration(msg)) if msg.contains("confluence.token")));
    }

    #[test]
    fn test_static_some() {
        let creds = StaticCredentials::new("u", "t").credentials().unwrap();
        assert_eq!(creds, Credentials::new("u", "t"));
    }

    #[test]
    fn test_config_credentials_read_each_call() {
        figment::Jail::expect_with(|jail| {
            assert!(matches!(ConfigCredentials.credentials(), Err(Error::Configuration(_))));

            jail.set_env("DOCFETCH_CONFLUENCE__USERNAME", "me@example.com");
            assert!(matches!(ConfigCredentials.credentials(), Err(Error::Configuration(_))));

            jail.set_env("DOCFETCH_CONFLUENCE__TOKEN", "tok");
            assert_eq!(ConfigCredentials.credentials().unwrap(), Credentials::new("me@example.com", "tok"));
            Ok(())
        });
    }
}
