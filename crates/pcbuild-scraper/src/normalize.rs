//! Normalization of scraped text and URLs into [`crate::ProductRecord`] fields.

use reqwest::Url;

/// Longest title, in characters, carried on a product record.
pub const MAX_TITLE_CHARS: usize = 80;

const ELLIPSIS: &str = "...";

/// Collapses runs of whitespace (including newlines from nested markup) into
/// single spaces and trims both ends.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Caps a title at [`MAX_TITLE_CHARS`] characters.
///
/// Longer titles keep their first 77 characters followed by `"..."`.
#[must_use]
pub fn truncate_title(title: &str) -> String {
    if title.chars().count() <= MAX_TITLE_CHARS {
        return title.to_owned();
    }

    let mut truncated: String = title
        .chars()
        .take(MAX_TITLE_CHARS - ELLIPSIS.len())
        .collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Resolves a scraped `href`/`src` value against a site's base URL.
///
/// - absolute `http(s)` URLs are returned unchanged
/// - protocol-relative `//host/path` values are upgraded to `https:`
/// - anything else is joined onto `base`
///
/// Returns `None` for empty values and for results that are not `http(s)`
/// (`data:` placeholders, `javascript:` links).
#[must_use]
pub fn resolve_url(base: &Url, raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let resolved = match raw.strip_prefix("//") {
        Some(rest) => Url::parse(&format!("https://{rest}")),
        None => base.join(raw),
    };

    resolved
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
        .map(String::from)
}

/// Extracts the scheme+host(+port) origin from a configured site URL.
///
/// Given `"https://www.startech.com.bd/"`, returns
/// `Ok(("https://www.startech.com.bd", base))` where `base` is the parsed
/// origin used for joining relative links.
///
/// # Errors
///
/// Returns a human-readable reason when the value is not an absolute
/// `http(s)` URL with a host.
pub fn parse_site_origin(origin: &str) -> Result<(String, Url), String> {
    let url = Url::parse(origin).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme \"{}\"", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err("origin has no host".to_owned());
    }

    let serialized = url.origin().ascii_serialization();
    let base = Url::parse(&serialized).map_err(|e| e.to_string())?;
    Ok((serialized, base))
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
