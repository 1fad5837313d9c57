//! Character encoding handling for saved HTML snapshots.
//!
//! Browsers usually save pages as UTF-8, but "Save as" in some locales keeps
//! the original charset (GBK for Chinese pages is common). The declared
//! charset is read from the first `<meta>` that names one.

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

/// Only the document head is scanned for a charset declaration.
const SNIFF_LEN: usize = 2048;

/// Matches both `<meta charset="...">` and the `http-equiv` content-type form.
#[allow(clippy::expect_used)]
static META_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\b[^>]*?charset\s*=\s*["']?([A-Za-z0-9_\-:.]+)"#).expect("valid regex")
});

/// Charset declared in the snapshot head, if any and if recognized.
#[must_use]
pub fn declared_encoding(html: &[u8]) -> Option<&'static Encoding> {
    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LEN)]);
    let label = META_CHARSET_RE.captures(&head)?.get(1)?.as_str().to_string();
    Encoding::for_label(label.as_bytes())
}

/// Decodes a snapshot to UTF-8.
///
/// A byte order mark wins over the declared charset; without either the
/// input is treated as UTF-8. Undecodable bytes become U+FFFD.
///
/// # Examples
///
/// ```
/// use chat_export::encoding::decode_snapshot;
///
/// let html = b"<html><body>Hello</body></html>";
/// assert!(decode_snapshot(html).contains("Hello"));
/// ```
#[must_use]
pub fn decode_snapshot(html: &[u8]) -> String {
    let fallback = declared_encoding(html).unwrap_or(UTF_8);
    let (decoded, _used, _had_errors) = fallback.decode(html);
    decoded.into_owned()
}
