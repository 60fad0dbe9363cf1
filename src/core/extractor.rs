// src/core/extractor.rs — Pull generated source out of a free-text model response

use regex::Regex;
use std::sync::LazyLock;

static CODE_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<code>(.*?)</code>").expect("valid code block regex"));

/// Return the trimmed contents of the first `<code>...</code>` block.
///
/// Matching is non-greedy and spans newlines. A block containing only
/// whitespace counts as no code.
pub fn extract_code(response: &str) -> Option<&str> {
    let body = CODE_BLOCK_RE.captures(response)?.get(1)?.as_str().trim();
    if body.is_empty() {
        None
    } else {
        Some(body)
    }
}
