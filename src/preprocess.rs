//! Raw markup normalization applied before parsing
//!
//! Two substitutions, in order:
//!
//! 1. `\r\n` and lone `\r` become `\n`
//! 2. every literal `&nbsp;` becomes a single ASCII space
//!
//! No other entity is touched here; the HTML parser decodes the rest, so a
//! numeric `&#160;` still reaches the text as U+00A0.

/// Literal entity replaced with an ASCII space before parsing
const NBSP_ENTITY: &str = "&nbsp;";

/// Normalize line endings and non-breaking space entities in raw markup
///
/// # Examples
///
/// ```rust
/// use html2text_converter::preprocess::normalize_markup;
///
/// assert_eq!(normalize_markup("a\r\nb\rc"), "a\nb\nc");
/// assert_eq!(normalize_markup("x&nbsp;&nbsp;y"), "x  y");
/// ```
pub fn normalize_markup(markup: &str) -> String {
    normalize_entities(&normalize_newlines(markup))
}

/// Replace `\r\n` and standalone `\r` with `\n`
pub fn normalize_newlines(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }

    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\r' {
            if chars.peek() == Some(&'\n') {
                chars.next();
            }
            result.push('\n');
        } else {
            result.push(ch);
        }
    }
    result
}

/// Replace every literal `&nbsp;` with a space
pub fn normalize_entities(text: &str) -> String {
    text.replace(NBSP_ENTITY, " ")
}
