//! HTML5 parser using html5ever
//!
//! The converter consumes an already built document tree; this module is the
//! thin layer that produces one. html5ever implements the WHATWG parsing
//! algorithm, so malformed markup (unclosed tags, misnesting, stray end tags)
//! always yields a tree instead of an error.
//!
//! Both entry points run the preprocessor (line endings, `&nbsp;`) on the
//! decoded markup before handing it to html5ever.
//!
//! # Examples
//!
//! ```rust
//! use html2text_converter::parser::parse_markup;
//!
//! let dom = parse_markup("<html><body><h1>Hello");
//! assert!(!dom.document.children.borrow().is_empty());
//! ```

use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::{ParseOpts, parse_document};
use markup5ever_rcdom::RcDom;
use tracing::debug;

use crate::charset::{decode_to_utf8, detect_charset};
use crate::error::ConversionError;
use crate::preprocess::normalize_markup;

/// Parser options
///
/// Scripting is disabled so `<noscript>` content is built into elements
/// instead of being kept as one raw text node.
fn parse_options() -> ParseOpts {
    ParseOpts {
        tree_builder: TreeBuilderOpts {
            scripting_enabled: false,
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Preprocess and parse markup that is already a Rust string
///
/// Never fails: html5ever recovers from any input, and empty input yields a
/// document with no content.
pub fn parse_markup(markup: &str) -> RcDom {
    let normalized = normalize_markup(markup);
    parse_document(RcDom::default(), parse_options()).one(normalized.as_str())
}

/// Decode, preprocess and parse raw HTML bytes
///
/// The charset comes from the detection cascade in [`crate::charset`]:
/// byte-order mark, then the `content_type` header value, then `<meta>` tags,
/// then UTF-8.
///
/// # Errors
///
/// `ConversionError::EncodingError` when the detected charset is unknown or the
/// bytes are invalid for it.
///
/// # Examples
///
/// ```rust
/// use html2text_converter::parser::parse_html_with_charset;
///
/// let dom = parse_html_with_charset(b"<p>Caf\xE9</p>", Some("text/html; charset=ISO-8859-1"))
///     .expect("latin1 input decodes");
/// # let _ = dom;
/// ```
pub fn parse_html_with_charset(
    html: &[u8],
    content_type: Option<&str>,
) -> Result<RcDom, ConversionError> {
    let detected = detect_charset(content_type, html);
    debug!(
        charset = %detected.label,
        source = ?detected.source,
        input_len = html.len(),
        "detected input charset"
    );

    let markup = decode_to_utf8(html, &detected)?;
    Ok(parse_markup(&markup))
}

/// Parse HTML bytes with no Content-Type header
pub fn parse_html(html: &[u8]) -> Result<RcDom, ConversionError> {
    parse_html_with_charset(html, None)
}
