//! Transport errors and the diagnostics rendered from them.

/// Failure of a single GET.
#[derive(Debug, Clone, thiserror::Error)]
pub enum HttpError {
    /// The server rejected the credentials (401).
    #[error("authentication failed (HTTP 401)")]
    Unauthorized,

    /// The credentials are valid but may not read the resource (403).
    #[error("permission denied (HTTP 403)")]
    Forbidden,

    /// Any other non-success status.
    #[error("HTTP error: status {status}")]
    Status { status: u16 },

    /// Connection, TLS, redirect or body read failure.
    #[error("network error: {0}")]
    Network(String),

    /// The request could not be built.
    #[error("invalid request: {0}")]
    Request(String),
}

impl From<reqwest::Error> for HttpError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() { HttpError::Request(err.to_string()) } else { HttpError::Network(err.to_string()) }
    }
}

/// The usual ways an authenticated wiki fetch goes wrong.
pub const WIKI_CHECKLIST: [&str; 4] = [
    "Your username (email address) is correct",
    "You are using an API token, not your account password",
    "Your account has permission to view this page",
    "The page ID in the URL is correct",
];

/// Render the message carried by `Error::Fetch`.
///
/// Wiki fetches get the misconfiguration checklist followed by the
/// underlying detail; everything else gets a single line.
pub fn describe_failure(url: &str, is_special: bool, err: &HttpError) -> String {
    if !is_special {
        return format!("Failed to fetch data from {url}: {err}");
    }

    let mut message = String::from("Failed to fetch Confluence page. Please check that:\n");
    for (i, item) in WIKI_CHECKLIST.iter().enumerate() {
        message.push_str(&format!("{}. {}\n", i + 1, item));
    }
    message.push_str(&format!("\nError details: {err}"));
    message
}
