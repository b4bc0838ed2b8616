//! Unified error types for docfetch.
//!
//! Every variant renders with a stable code prefix so callers that only see
//! the message can still tell failures apart.

use rmcp::model::{ErrorCode, ErrorData as McpError};
use tokio_rusqlite::rusqlite;

/// Unified error types for the docfetch pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty URL).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// A wiki page link could not be rewritten into its REST endpoint.
    #[error("URL_FORMAT: {0}")]
    UrlFormat(String),

    /// The authenticated path was requested without the required settings.
    #[error("CONFIGURATION_ERROR: {0}")]
    Configuration(String),

    /// Network or HTTP failure, carrying a rendered diagnostic.
    #[error("FETCH_FAILED: {0}")]
    Fetch(String),

    /// Content extraction failed.
    #[error("EXTRACT_FAILED: {0}")]
    ExtractFailed(String),

    /// Anything that does not fit the categories above.
    #[error("UNEXPECTED: an unexpected error occurred: {0}")]
    Unexpected(String),

    /// Key-value store operation failed.
    #[error("CACHE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("CACHE_ERROR: migration failed: {0}")]
    MigrationFailed(String),
}

impl Error {
    /// Wrap an arbitrary error as [`Error::Unexpected`].
    pub fn unexpected(err: impl std::fmt::Display) -> Self {
        Error::Unexpected(err.to_string())
    }
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

impl From<crate::config::ConfigError> for Error {
    fn from(err: crate::config::ConfigError) -> Self {
        Error::Configuration(err.to_string())
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::InvalidInput(_) => -32602,
            Error::ExtractFailed(_) => -32000,
            Error::UrlFormat(_) => -32003,
            Error::Configuration(_) => -32004,
            Error::Fetch(_) => -32008,
            Error::Unexpected(_) => -32603,
            Error::Database(_) | Error::MigrationFailed(_) => -32002,
        };

        McpError { code: ErrorCode(code), message: err.to_string().into(), data: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UrlFormat("missing page id".to_string());
        assert!(err.to_string().starts_with("URL_FORMAT"));
        assert!(err.to_string().contains("missing page id"));
    }

    #[test]
    fn test_unexpected_wraps_message() {
        let err = Error::unexpected("boom");
        assert_eq!(err.to_string(), "UNEXPECTED: an unexpected error occurred: boom");
    }

    #[test]
    fn test_error_to_mcp_error() {
        let err = Error::Configuration("missing token".to_string());
        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code.0, -32004);
        assert!(mcp_err.message.contains("missing token"));
    }

    #[test]
    fn test_config_error_becomes_configuration() {
        let err: Error =
            crate::config::ConfigError::Missing { field: "confluence.token".into(), hint: "set it".into() }.into();
        assert!(matches!(err, Error::Configuration(msg) if msg.contains("confluence.token")));
    }
}
