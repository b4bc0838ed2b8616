//! Wiki document URL handling.
//!
//! Users paste human-facing page links; only the REST content endpoint
//! returns the storage-format body we can convert. This module decides which
//! URLs belong to the wiki platform and rewrites them to that endpoint.
//!
//! Two hosting variants are recognised:
//! - cloud: `https://{tenant}.atlassian.net/wiki/spaces/{SPACE}/pages/{id}/{Title}`
//! - self-hosted: any other URL mentioning the product, which gets
//!   `/rest/api/content` appended.

use std::sync::LazyLock;

use docfetch_core::Error;
use regex::Regex;

/// Product name marker.
pub const PRODUCT_MARKER: &str = "confluence";

/// Cloud hosting domain.
pub const CLOUD_DOMAIN: &str = "atlassian.net";

/// REST content path shared by both variants.
pub const CONTENT_API_PATH: &str = "/rest/api/content";

const CLOUD_SPACES_MARKER: &str = "atlassian.net/wiki/spaces";

static PAGE_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"pages/(\d+)").expect("valid page id regex"));

static TENANT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([a-z0-9-]+)\.atlassian\.net").expect("valid tenant regex"));

/// Whether `url` should go through the authenticated wiki path.
///
/// Case-insensitive substring match on the product name or the cloud domain.
/// Deliberately loose: any URL mentioning the platform qualifies.
pub fn is_special_url(url: &str) -> bool {
    let lower = url.to_lowercase();
    lower.contains(PRODUCT_MARKER) || lower.contains(CLOUD_DOMAIN)
}

/// Rewrite a wiki page link into its REST content endpoint.
///
/// Non-wiki URLs and URLs already pointing at the content API are returned
/// unchanged, so rewriting is idempotent.
///
/// # Errors
///
/// Returns [`Error::UrlFormat`] when a cloud `spaces` link has no
/// `pages/{id}` segment or no tenant subdomain.
pub fn rewrite_url(url: &str) -> Result<String, Error> {
    if !is_special_url(url) {
        return Ok(url.to_string());
    }

    let lower = url.to_lowercase();

    if lower.contains(CONTENT_API_PATH) {
        return Ok(url.to_string());
    }

    if lower.contains(CLOUD_SPACES_MARKER) {
        let page_id = PAGE_ID
            .captures(url)
            .and_then(|c| c.get(1))
            .ok_or_else(|| Error::UrlFormat(format!("could not find a pages/{{id}} segment in {url}")))?
            .as_str();

        let tenant = TENANT
            .captures(url)
            .and_then(|c| c.get(1))
            .ok_or_else(|| Error::UrlFormat(format!("could not find the {CLOUD_DOMAIN} tenant in {url}")))?
            .as_str();

        let rewritten = format!("https://{tenant}.{CLOUD_DOMAIN}/wiki{CONTENT_API_PATH}/{page_id}?expand=body.storage");
        tracing::debug!(url, rewritten = %rewritten, "rewrote cloud page link");
        return Ok(rewritten);
    }

    let rewritten = format!("{}{CONTENT_API_PATH}", url.strip_suffix('/').unwrap_or(url));
    tracing::debug!(url, rewritten = %rewritten, "rewrote self-hosted link");
    Ok(rewritten)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLOUD_PAGE: &str = "https://acme.atlassian.net/wiki/spaces/TEAM/pages/12345/Title";
    const CLOUD_ENDPOINT: &str = "https://acme.atlassian.net/wiki/rest/api/content/12345?expand=body.storage";

    #[test]
    fn test_generic_urls_not_special() {
        assert!(!is_special_url("https://example.com/data.json"));
        assert!(!is_special_url("https://api.github.com/repos/rust-lang/rust"));
        assert!(!is_special_url(""));
    }

    #[test]
    fn test_special_by_domain_or_product() {
        assert!(is_special_url(CLOUD_PAGE));
        assert!(is_special_url("https://confluence.corp.example/display/TEAM/Home"));
        assert!(is_special_url("https://wiki.corp.example/?ref=Confluence"));
    }

    #[test]
    fn test_special_is_case_insensitive() {
        assert!(is_special_url("HTTPS://ACME.ATLASSIAN.NET/wiki"));
        assert!(is_special_url("https://CONFLUENCE.corp.example"));
    }

    #[test]
    fn test_rewrite_generic_is_identity() {
        for url in ["https://example.com/data.json", "https://example.com/", "not even a url", ""] {
            assert_eq!(rewrite_url(url).unwrap(), url);
        }
    }

    #[test]
    fn test_rewrite_cloud_page() {
        assert_eq!(rewrite_url(CLOUD_PAGE).unwrap(), CLOUD_ENDPOINT);
    }

    #[test]
    fn test_rewrite_cloud_page_without_title() {
        let rewritten = rewrite_url("https://beta-team.atlassian.net/wiki/spaces/ENG/pages/987").unwrap();
        assert_eq!(rewritten, "https://beta-team.atlassian.net/wiki/rest/api/content/987?expand=body.storage");
    }

    #[test]
    fn test_rewrite_cloud_uses_first_page_id() {
        let rewritten =
            rewrite_url("https://acme.atlassian.net/wiki/spaces/TEAM/pages/42/Release+2024?focusedCommentId=7")
                .unwrap();
        assert!(rewritten.contains("/content/42?"));
    }

    #[test]
    fn test_rewrite_cloud_missing_pages_segment() {
        let result = rewrite_url("https://acme.atlassian.net/wiki/spaces/TEAM/overview");
        assert!(matches!(result, Err(Error::UrlFormat(_))));
    }

    #[test]
    fn test_rewrite_cloud_non_numeric_page() {
        let result = rewrite_url("https://acme.atlassian.net/wiki/spaces/TEAM/pages/edit-v2");
        assert!(matches!(result, Err(Error::UrlFormat(_))));
    }

    #[test]
    fn test_rewrite_self_hosted() {
        assert_eq!(
            rewrite_url("https://confluence.corp.example/").unwrap(),
            "https://confluence.corp.example/rest/api/content"
        );
        assert_eq!(
            rewrite_url("https://confluence.corp.example").unwrap(),
            "https://confluence.corp.example/rest/api/content"
        );
    }

    #[test]
    fn test_rewrite_is_idempotent() {
        for url in [CLOUD_PAGE, "https://confluence.corp.example/", "https://example.com/a"] {
            let once = rewrite_url(url).unwrap();
            assert_eq!(rewrite_url(&once).unwrap(), once);
        }
    }

    #[test]
    fn test_rewrite_canonical_endpoint_unchanged() {
        assert_eq!(rewrite_url(CLOUD_ENDPOINT).unwrap(), CLOUD_ENDPOINT);
    }
}
