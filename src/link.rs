//! Anchor rendering
//!
//! An anchor's rendered contents are rewritten as `[text](href)` unless the
//! visible text already shows the destination. Named anchors without an
//! `href` become `[text]`. Attribute values and text pass through unescaped.

use markup5ever_rcdom::{Handle, NodeData};

use crate::rules::is_heading;

/// Scheme prefixes under which a link is considered self-describing
const SELF_DESCRIBING_SCHEMES: &[&str] = &["mailto:", "http://", "https://"];

/// The attributes of an `<a>` element that affect rendering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Anchor {
    /// Value of the `href` attribute, if present
    pub href: Option<String>,
    /// Value of the `name` attribute, if present
    pub name: Option<String>,
}

impl Anchor {
    /// Read `href` and `name` from an element node
    ///
    /// Non-element nodes yield an anchor with neither attribute.
    pub fn from_node(node: &Handle) -> Self {
        Self {
            href: attribute(node, "href"),
            name: attribute(node, "name"),
        }
    }

    /// Wrap the anchor's rendered contents
    ///
    /// `next_element` is the lowercase tag of the anchor's next element
    /// sibling; a following heading gets a trailing newline.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use html2text_converter::link::Anchor;
    ///
    /// let anchor = Anchor { href: Some("http://x.com".to_string()), name: None };
    /// assert_eq!(anchor.wrap("Click", None), "[Click](http://x.com)");
    /// assert_eq!(anchor.wrap("x.com", None), "x.com");
    /// ```
    pub fn wrap(&self, text: &str, next_element: Option<&str>) -> String {
        let mut output = match (&self.href, &self.name) {
            (None, Some(_)) => format!("[{text}]"),
            (None, None) => text.to_string(),
            (Some(href), _) if is_self_describing(href, text) => text.to_string(),
            (Some(href), _) => format!("[{text}]({href})"),
        };

        if next_element.is_some_and(is_heading) {
            output.push('\n');
        }

        output
    }
}

/// Whether `href` equals the text, bare or behind a `mailto:`/`http://`/`https://` scheme
pub fn is_self_describing(href: &str, text: &str) -> bool {
    href == text
        || SELF_DESCRIBING_SCHEMES
            .iter()
            .any(|scheme| href.strip_prefix(scheme) == Some(text))
}

/// Look up an attribute by local name
pub fn attribute(node: &Handle, name: &str) -> Option<String> {
    match node.data {
        NodeData::Element { ref attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| attr.name.local.as_ref() == name)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}
