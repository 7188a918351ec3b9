//! Final clean-up of the converter's raw output
//!
//! Prefixes and suffixes leave spaces and tabs hugging line breaks (a `td`
//! tab at the start of a row, a collapsed text node ending in a space before a
//! `</p>`). Those runs are dropped, then the whole string is trimmed.

use regex::Regex;
use std::sync::OnceLock;

/// Characters trimmed from both ends of the final output
///
/// ASCII only: a decoded U+00A0 at the edge of the document is content.
const EDGE_WHITESPACE: &[char] = &[' ', '\t', '\n', '\x0B', '\x0C', '\r', '\0'];

/// Remove space/tab runs adjacent to newlines, then trim the result
///
/// # Examples
///
/// ```rust
/// use html2text_converter::postprocess::postprocess;
///
/// assert_eq!(postprocess("\n Hello \n\t\tWorld \n"), "Hello\nWorld");
/// ```
pub fn postprocess(raw: &str) -> String {
    strip_line_edges(raw)
        .trim_matches(EDGE_WHITESPACE)
        .to_string()
}

/// Replace every `[ \t]*\n[ \t]*` run with a single newline
pub fn strip_line_edges(text: &str) -> String {
    static LINE_EDGE_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    let regex = LINE_EDGE_REGEX.get_or_init(|| Regex::new(r"[ \t]*\n[ \t]*").ok());

    match regex {
        Some(regex) => regex.replace_all(text, "\n").into_owned(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_spaces_around_newlines_removed() {
        assert_eq!(strip_line_edges("a  \n  b"), "a\nb");
        assert_eq!(strip_line_edges("a\t\n\tb"), "a\nb");
    }

    #[test]
    fn test_blank_lines_are_kept() {
        assert_eq!(strip_line_edges("a \n \n b"), "a\n\nb");
    }

    #[test]
    fn test_inner_spaces_untouched() {
        assert_eq!(strip_line_edges("a  b\tc"), "a  b\tc");
    }

    #[test]
    fn test_trim_ends() {
        assert_eq!(postprocess("\n\n\tTitle\n\n"), "Title");
        assert_eq!(postprocess("  \t "), "");
        assert_eq!(postprocess(""), "");
    }

    #[test]
    fn test_nbsp_at_edges_is_content() {
        assert_eq!(postprocess("\n\u{a0}x\u{a0}\n"), "\u{a0}x\u{a0}");
    }

    proptest! {
        #[test]
        fn prop_no_padding_next_to_newlines(input in "[a-c \t\n]{0,64}") {
            let result = postprocess(&input);
            prop_assert!(!result.contains(" \n"));
            prop_assert!(!result.contains("\n "));
            prop_assert!(!result.contains("\t\n"));
            prop_assert!(!result.contains("\n\t"));
        }

        #[test]
        fn prop_postprocess_is_idempotent(input in "[a-c \t\n]{0,64}") {
            let once = postprocess(&input);
            prop_assert_eq!(postprocess(&once), once.clone());
        }
    }
}
