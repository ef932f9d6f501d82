//! Plain-text conversion for provider-supplied HTML descriptions.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref BLOCK_RE: Regex =
        Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)\s*>").unwrap();
    static ref TAG_RE: Regex = Regex::new(r"(?s)<[^>]*>").unwrap();
    static ref SPACE_RE: Regex = Regex::new(r"[ \t]+").unwrap();
}

/// Removes tags (dropping script/style bodies entirely), decodes the common
/// entities and collapses runs of spaces.
pub fn strip_markup(input: &str) -> String {
    let without_blocks = BLOCK_RE.replace_all(input, "");
    let without_tags = TAG_RE.replace_all(&without_blocks, "");

    // &amp; last so "&amp;lt;" decodes to the literal "&lt;"
    let decoded = without_tags
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&");

    SPACE_RE.replace_all(decoded.trim(), " ").into_owned()
}
