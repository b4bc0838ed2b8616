//! Response normalization.
//!
//! A response body becomes a [`RemoteDocument`] according to how its URL was
//! classified, and [`extract`] turns that into the text we cache:
//!
//! - wiki pages: the `body.storage.value` markup converted to Markdown
//! - everything else: the whole body as pretty-printed JSON, field order
//!   preserved, nothing dropped

pub mod markdown;

pub use markdown::storage_to_markdown;

use docfetch_core::Error;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Document object returned by the wiki content API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentPage {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<PageBody>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageBody {
    #[serde(default)]
    pub storage: Option<StorageBody>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageBody {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub representation: Option<String>,
}

impl ContentPage {
    /// The storage-format markup, if the page carries any.
    pub fn storage_markup(&self) -> Option<&str> {
        self.body
            .as_ref()
            .and_then(|b| b.storage.as_ref())
            .and_then(|s| s.value.as_deref())
            .filter(|v| !v.trim().is_empty())
    }
}

/// A decoded response body.
#[derive(Debug, Clone)]
pub enum RemoteDocument {
    /// Any non-wiki response. Bodies that are not JSON are held as a string.
    Generic(Value),
    /// A wiki content API page.
    Page(ContentPage),
}

impl RemoteDocument {
    /// Decode `body` according to the URL classification.
    pub fn parse(body: &[u8], is_special: bool) -> Self {
        if is_special {
            return match serde_json::from_slice::<ContentPage>(body) {
                Ok(page) => RemoteDocument::Page(page),
                Err(e) => {
                    tracing::warn!(error = %e, "wiki response is not a content page");
                    RemoteDocument::Page(ContentPage::default())
                }
            };
        }

        match serde_json::from_slice::<Value>(body) {
            Ok(value) => RemoteDocument::Generic(value),
            Err(_) => RemoteDocument::Generic(Value::String(String::from_utf8_lossy(body).into_owned())),
        }
    }
}

/// Normalize a document to text.
///
/// Returns `Ok(None)` for a page without storage markup; callers treat that
/// as "no content extracted".
pub fn extract(document: &RemoteDocument) -> Result<Option<String>, Error> {
    match document {
        RemoteDocument::Page(page) => page.storage_markup().map(storage_to_markdown).transpose(),
        RemoteDocument::Generic(value) => serde_json::to_string_pretty(value)
            .map(Some)
            .map_err(|e| Error::ExtractFailed(format!("failed to serialize response: {e}"))),
    }
}

/// Decode and normalize a raw body in one step.
pub fn extract_response(body: &[u8], is_special: bool) -> Result<Option<String>, Error> {
    extract(&RemoteDocument::parse(body, is_special))
}
