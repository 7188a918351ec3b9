//! HTML to plain text converter
//!
//! This library renders an HTML document as plain text that reads roughly the
//! way the page looks: headings and blocks become line breaks, list items
//! become `- ` bullets, table cells are tab separated, `<hr>` becomes a
//! `------` line and anchors become inline `[text](href)` markers. The output
//! is lossy and meant for indexing, previews and email digests.
//!
//! # Architecture
//!
//! raw markup → `preprocess` → `parser` (html5ever) → `converter` → `postprocess`
//!
//! - `preprocess`: line ending and `&nbsp;` normalization before parsing
//! - `charset`: encoding detection and transcoding for byte input
//! - `parser`: HTML5 parsing using html5ever
//! - `rules`: per-tag prefix/suffix table
//! - `converter`: DOM walk, whitespace collapsing, sibling lookup
//! - `link`: anchor rendering
//! - `postprocess`: line edge clean-up and final trim
//!
//! # Examples
//!
//! ```rust
//! assert_eq!(html2text_converter::convert("<h1>A</h1><p>B</p>"), "A\n\nB");
//! assert_eq!(
//!     html2text_converter::convert("<ul><li>One</li><li>Two</li></ul>"),
//!     "- One\n- Two"
//! );
//! ```

// Module declarations
pub mod charset;
pub mod converter;
pub mod error;
pub mod link;
pub mod parser;
pub mod postprocess;
pub mod preprocess;
pub mod rules;

// Re-export main types for convenience
pub use converter::{ConversionContext, ConversionOptions, TextConverter};
pub use error::ConversionError;
pub use parser::{parse_html, parse_markup};

/// Convert HTML markup to plain text
///
/// Total over every input: the parser recovers from malformed markup and an
/// empty string converts to an empty string.
pub fn convert(markup: &str) -> String {
    TextConverter::new().convert_markup(markup)
}

/// Convert raw HTML bytes to plain text
///
/// The charset comes from a byte-order mark, `options.content_type`, a
/// `<meta>` declaration or the UTF-8 default, in that order.
///
/// # Errors
///
/// - `ConversionError::EncodingError` when the bytes cannot be decoded
/// - `ConversionError::Timeout` when `options.timeout` is non-zero and exceeded
pub fn convert_bytes(html: &[u8], options: &ConversionOptions) -> Result<String, ConversionError> {
    TextConverter::with_options(options.clone()).convert_bytes(html)
}
