//! Character encoding detection and decoding for byte input
//!
//! # Detection Cascade
//!
//! 1. **Byte-order mark**: a UTF-8 or UTF-16 BOM decides the encoding outright
//! 2. **Content-Type header**: the `charset` parameter, when supplied
//! 3. **HTML meta tags**: `<meta charset>` or `<meta http-equiv="Content-Type">`
//!    within the first 1024 bytes
//! 4. **Default**: UTF-8
//!
//! # Examples
//!
//! ```rust
//! use html2text_converter::charset::{CharsetSource, detect_charset};
//!
//! let detected = detect_charset(Some("text/html; charset=ISO-8859-1"), b"<p>x</p>");
//! assert_eq!(detected.label, "ISO-8859-1");
//! assert_eq!(detected.source, CharsetSource::ContentType);
//!
//! let detected = detect_charset(None, b"<p>No charset</p>");
//! assert_eq!(detected.label, "UTF-8");
//! assert_eq!(detected.source, CharsetSource::Default);
//! ```

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

use crate::error::ConversionError;

/// Default charset when detection fails
const DEFAULT_CHARSET: &str = "UTF-8";

/// Maximum bytes to scan for meta charset tags
const META_SCAN_LIMIT: usize = 1024;

/// Where a detected charset came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharsetSource {
    /// Byte-order mark at the start of the input
    ByteOrderMark,
    /// `charset` parameter of the Content-Type header
    ContentType,
    /// `<meta>` declaration inside the document
    MetaTag,
    /// Nothing declared; UTF-8 assumed
    Default,
}

/// Result of the detection cascade
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedCharset {
    /// Charset label, uppercased
    pub label: String,
    /// Cascade level that produced the label
    pub source: CharsetSource,
}

/// Run the detection cascade over a Content-Type header and the document bytes
pub fn detect_charset(content_type: Option<&str>, html: &[u8]) -> DetectedCharset {
    if let Some((encoding, _)) = Encoding::for_bom(html) {
        return DetectedCharset {
            label: encoding.name().to_uppercase(),
            source: CharsetSource::ByteOrderMark,
        };
    }

    if let Some(charset) = content_type.and_then(extract_charset_from_content_type) {
        return DetectedCharset {
            label: charset.to_uppercase(),
            source: CharsetSource::ContentType,
        };
    }

    if let Some(charset) = extract_charset_from_html(html) {
        return DetectedCharset {
            label: charset.to_uppercase(),
            source: CharsetSource::MetaTag,
        };
    }

    DetectedCharset {
        label: DEFAULT_CHARSET.to_string(),
        source: CharsetSource::Default,
    }
}

/// Extract the `charset` parameter from a Content-Type header value
///
/// ```rust
/// use html2text_converter::charset::extract_charset_from_content_type;
///
/// assert_eq!(
///     extract_charset_from_content_type("text/html; charset=\"UTF-8\""),
///     Some("UTF-8".to_string())
/// );
/// assert_eq!(extract_charset_from_content_type("text/html"), None);
/// ```
pub fn extract_charset_from_content_type(content_type: &str) -> Option<String> {
    static CHARSET_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    let regex =
        CHARSET_REGEX.get_or_init(|| Regex::new(r#"(?i)charset\s*=\s*"?([^";,\s]+)"?"#).ok());

    regex
        .as_ref()?
        .captures(content_type)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Extract a charset declared by a `<meta>` tag near the start of the document
///
/// Only the first 1024 bytes are scanned.
pub fn extract_charset_from_html(html: &[u8]) -> Option<String> {
    let prefix = &html[..html.len().min(META_SCAN_LIMIT)];
    let prefix = String::from_utf8_lossy(prefix);

    static META_CHARSET_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    let meta_charset = META_CHARSET_REGEX
        .get_or_init(|| Regex::new(r#"(?i)<meta\s+charset\s*=\s*["']?([^"';>\s]+)"#).ok());

    static HTTP_EQUIV_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    let http_equiv = HTTP_EQUIV_REGEX.get_or_init(|| {
        Regex::new(
            r#"(?i)<meta\s+http-equiv\s*=\s*["']?Content-Type["']?\s+content\s*=\s*["']?[^"'>]*charset\s*=\s*([^"';>\s]+)"#,
        )
        .ok()
    });

    [meta_charset, http_equiv]
        .into_iter()
        .filter_map(Option::as_ref)
        .find_map(|regex| regex.captures(&prefix))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Decode document bytes to UTF-8 according to a detected charset
///
/// A leading byte-order mark is removed. Bytes that are invalid for the chosen
/// encoding are an error rather than being replaced.
pub fn decode_to_utf8<'a>(
    html: &'a [u8],
    detected: &DetectedCharset,
) -> Result<Cow<'a, str>, ConversionError> {
    let encoding = Encoding::for_label(detected.label.as_bytes()).ok_or_else(|| {
        ConversionError::EncodingError(format!(
            "Unsupported charset '{}' for HTML parsing",
            detected.label
        ))
    })?;

    let (body, encoding) = match Encoding::for_bom(html) {
        Some((bom_encoding, bom_len)) => (&html[bom_len..], bom_encoding),
        None => (html, encoding),
    };

    if encoding == UTF_8 {
        return std::str::from_utf8(body).map(Cow::Borrowed).map_err(|e| {
            ConversionError::EncodingError(format!(
                "Invalid UTF-8 at byte position {}: {}",
                e.valid_up_to(),
                e
            ))
        });
    }

    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .ok_or_else(|| {
            ConversionError::EncodingError(format!(
                "Invalid byte sequence for charset '{}'",
                encoding.name()
            ))
        })
}
