//! # Content Safety
//!
//! Rejects free text that carries markup associated with script injection.
//! The policy is reject-on-match: the validator never rewrites input, so a
//! value either reaches the backend byte-for-byte or not at all. Output
//! sanitization happens elsewhere and does not depend on this check.
//!
//! Matched constructs (case-insensitive):
//!
//! - opening tags starting with `script`, `iframe`, `object`, `embed`
//! - any tag carrying an inline event handler (`<img src=x onerror=...>`,
//!   `<svg/onload=...>`)
//! - `javascript:` and `vbscript:` schemes
//! - `data:text/html` URLs
//!
//! Schemes are matched on a normalised copy of the text: numeric and
//! `&colon;`/`&tab;`/`&newline;` character references are decoded, then
//! whitespace and control characters are removed. Browsers do the same
//! before reading an `href`, so `java&#x09;script:` is still a script URL.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static UNSAFE_TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)",
        r"<\s*(script|iframe|object|embed)",
        r"|<[a-z][^>]*[\s/]on[a-z]+\s*=",
    ))
    .expect("unsafe tag regex")
});

static UNSAFE_SCHEME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(javascript|vbscript):|data:text/html").expect("unsafe scheme regex"));

static CHAR_REF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)&#x([0-9a-f]{1,6});?|&#([0-9]{1,7});?|&(colon|tab|newline);")
        .expect("character reference regex")
});

/// True when `text` contains none of the rejected constructs.
pub fn is_safe_text(text: &str) -> bool {
    !UNSAFE_TAG_RE.is_match(text) && !UNSAFE_SCHEME_RE.is_match(&normalise_for_schemes(text))
}

/// Decode character references, then drop whitespace and control characters.
fn normalise_for_schemes(text: &str) -> String {
    let decoded = CHAR_REF_RE.replace_all(text, |caps: &Captures<'_>| {
        let decoded = if let Some(hex) = caps.get(1) {
            u32::from_str_radix(hex.as_str(), 16).ok().and_then(char::from_u32)
        } else if let Some(dec) = caps.get(2) {
            dec.as_str().parse::<u32>().ok().and_then(char::from_u32)
        } else {
            match caps[3].to_ascii_lowercase().as_str() {
                "colon" => Some(':'),
                "tab" => Some('\t'),
                _ => Some('\n'),
            }
        };
        decoded.map(String::from).unwrap_or_default()
    });
    decoded
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect()
}
