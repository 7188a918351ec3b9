//! Tag-driven formatting rules
//!
//! Every element contributes `prefix + children + suffix`. The prefix depends
//! only on the tag; some suffixes also depend on the tag of the next element
//! sibling. Tags not listed here get neither, which makes unknown elements
//! inline pass-through.
//!
//! | tag(s)                      | prefix        | suffix                                      |
//! |-----------------------------|---------------|---------------------------------------------|
//! | `hr`                        | `"------\n"`  |                                             |
//! | `h1`..`h6`                  | `"\n"`        | `"\n"`                                      |
//! | `ol`, `ul`, `tr`            | `"\n"`        |                                             |
//! | `p`                         | `"\n"`        | `"\n"` unless a `div` follows               |
//! | `div`                       | `"\n"`        | `"\n"` if an element follows that is no `div` |
//! | `br`                        |               | `"\n"` unless a `div` follows               |
//! | `td`, `th`                  | `"\t"`        |                                             |
//! | `li`                        | `"- "`        | `"\n"`                                      |

/// Elements whose whole subtree is dropped from the output
const STRIPPED_ELEMENTS: &[&str] = &["style", "head", "title", "meta", "script"];

/// Heading elements
const HEADING_ELEMENTS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// Suffix emitted after an element's children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuffixRule {
    /// No suffix
    None,
    /// Always a newline
    Newline,
    /// A newline unless the next element sibling is a `div`
    NewlineUnlessDivFollows,
    /// A newline only if a next element sibling exists and is not a `div`
    NewlineBeforeNonDiv,
}

impl SuffixRule {
    /// Resolve the suffix given the lowercase tag of the next element sibling
    pub fn resolve(self, next_element: Option<&str>) -> Option<&'static str> {
        let emit = match self {
            SuffixRule::None => false,
            SuffixRule::Newline => true,
            SuffixRule::NewlineUnlessDivFollows => next_element != Some("div"),
            SuffixRule::NewlineBeforeNonDiv => {
                next_element.is_some_and(|name| name != "div")
            }
        };
        emit.then_some("\n")
    }

    /// Whether resolving this rule needs the sibling lookup
    pub fn depends_on_sibling(self) -> bool {
        matches!(
            self,
            SuffixRule::NewlineUnlessDivFollows | SuffixRule::NewlineBeforeNonDiv
        )
    }
}

/// Formatting rule for one tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagRule {
    /// Text emitted before the children
    pub prefix: Option<&'static str>,
    /// Text emitted after the children
    pub suffix: SuffixRule,
}

impl TagRule {
    const PASS_THROUGH: TagRule = TagRule {
        prefix: None,
        suffix: SuffixRule::None,
    };

    const fn new(prefix: Option<&'static str>, suffix: SuffixRule) -> Self {
        Self { prefix, suffix }
    }
}

/// Look up the rule for a lowercase tag name
pub fn tag_rule(tag: &str) -> TagRule {
    match tag {
        "hr" => TagRule::new(Some("------\n"), SuffixRule::None),
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            TagRule::new(Some("\n"), SuffixRule::Newline)
        }
        "ol" | "ul" | "tr" => TagRule::new(Some("\n"), SuffixRule::None),
        "p" => TagRule::new(Some("\n"), SuffixRule::NewlineUnlessDivFollows),
        "div" => TagRule::new(Some("\n"), SuffixRule::NewlineBeforeNonDiv),
        "br" => TagRule::new(None, SuffixRule::NewlineUnlessDivFollows),
        "td" | "th" => TagRule::new(Some("\t"), SuffixRule::None),
        "li" => TagRule::new(Some("- "), SuffixRule::Newline),
        _ => TagRule::PASS_THROUGH,
    }
}

/// Whether an element's subtree contributes nothing to the output
pub fn is_stripped(tag: &str) -> bool {
    STRIPPED_ELEMENTS.contains(&tag)
}

/// Whether a lowercase tag name is `h1`..`h6`
pub fn is_heading(tag: &str) -> bool {
    HEADING_ELEMENTS.contains(&tag)
}
