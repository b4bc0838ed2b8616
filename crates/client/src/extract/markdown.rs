//! Storage-format markup to Markdown.
//!
//! Headings come out ATX style (`#` per level) and code blocks fenced.
//! Wiki code macros are unwrapped to `<pre><code>` first so their bodies
//! survive as fenced blocks instead of being dropped as unknown tags.

use std::sync::LazyLock;

use docfetch_core::Error;
use htmd::HtmlToMarkdown;
use htmd::options::{CodeBlockStyle, HeadingStyle, Options};
use regex::{Captures, Regex};

static CODE_MACRO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)<ac:structured-macro[^>]*ac:name="code"[^>]*>((?:\s*<ac:parameter[^>]*>[^<]*</ac:parameter>)*)\s*<ac:plain-text-body><!\[CDATA\[(.*?)\]\]></ac:plain-text-body>\s*</ac:structured-macro>"#,
    )
    .expect("valid code macro regex")
});

static MACRO_LANGUAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<ac:parameter[^>]*ac:name="language"[^>]*>([A-Za-z0-9_+#-]+)</ac:parameter>"#)
        .expect("valid language regex")
});

fn converter() -> HtmlToMarkdown {
    HtmlToMarkdown::builder()
        .options(Options {
            heading_style: HeadingStyle::Atx,
            code_block_style: CodeBlockStyle::Fenced,
            ..Default::default()
        })
        .build()
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Replace wiki code macros with plain `<pre><code>` blocks.
///
/// Only a macro holding nothing but parameters and a plain-text body is
/// rewritten; a match never extends past its own closing tag.
fn unwrap_code_macros(markup: &str) -> String {
    CODE_MACRO
        .replace_all(markup, |caps: &Captures| {
            let language = MACRO_LANGUAGE
                .captures(&caps[1])
                .map(|l| format!(" class=\"language-{}\"", &l[1]))
                .unwrap_or_default();
            format!("<pre><code{language}>{}</code></pre>", escape_html(&caps[2]))
        })
        .into_owned()
}

/// Convert a storage-format body to Markdown.
///
/// Same input always yields the same output.
pub fn storage_to_markdown(markup: &str) -> Result<String, Error> {
    let html = unwrap_code_macros(markup);
    converter()
        .convert(&html)
        .map_err(|e| Error::ExtractFailed(format!("markdown conversion failed: {e}")))
}
