//! Text converter - transforms a DOM tree into plain text
//!
//! This module holds the core of the crate: a walk over the html5ever DOM that
//! emits `prefix + children + suffix` for every element, collapses whitespace
//! in text nodes and rewrites anchors as inline `[text](href)` markers.
//!
//! # Traversal
//!
//! The walk is pre-order and in document order, but it runs on an explicit
//! work stack instead of the call stack, so arbitrarily deep documents cannot
//! exhaust the thread's stack. Every element pushes a *leave* frame before its
//! children; the leave frame emits the suffix and, for anchors, rewrites the
//! anchor's slice of the output buffer in place.
//!
//! Sibling context is carried as `(parent, index)` pairs captured while pushing
//! children, so the "next element sibling" lookup is a forward scan of the
//! parent's child list.
//!
//! # Node kinds
//!
//! - **Text**: whitespace runs collapse to a single space
//! - **Element**: `style`, `head`, `title`, `meta` and `script` subtrees are
//!   dropped; everything else follows [`crate::rules`]. A `<template>`
//!   also renders its content fragment
//! - **Document**: children only
//! - **Comment, doctype, processing instruction**: nothing
//!
//! # Example
//!
//! Input HTML:
//! ```html
//! <h1>Title</h1>
//! <ul><li>One</li><li>Two</li></ul>
//! <p>See <a href="http://x.com">the site</a>.</p>
//! ```
//!
//! Output text:
//! ```text
//! Title
//!
//! - One
//! - Two
//!
//! See [the site](http://x.com).
//! ```

use markup5ever_rcdom::{Handle, NodeData, RcDom};
use std::convert::Infallible;
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

use crate::error::ConversionError;
use crate::link::Anchor;
use crate::parser::{parse_html_with_charset, parse_markup};
use crate::postprocess::postprocess;
use crate::rules::{SuffixRule, is_stripped, tag_rule};

/// Number of visited nodes between timeout checks
const CHECKPOINT_INTERVAL: u32 = 100;

/// Conversion options
#[derive(Debug, Clone, Default)]
pub struct ConversionOptions {
    /// Content-Type header value used for charset detection of byte input
    pub content_type: Option<String>,
    /// Maximum conversion time for byte input (`Duration::ZERO` means no timeout)
    pub timeout: Duration,
}

/// Conversion context for tracking timeout and node count
///
/// The timeout is cooperative: it is checked after parsing, every 100 visited
/// nodes and after post-processing. Nothing is preempted and no thread is
/// spawned.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use html2text_converter::converter::ConversionContext;
///
/// let mut ctx = ConversionContext::new(Duration::from_secs(5));
/// for _ in 0..1000 {
///     ctx.increment_and_check()?;
/// }
/// assert_eq!(ctx.node_count(), 1000);
/// # Ok::<(), html2text_converter::error::ConversionError>(())
/// ```
#[derive(Debug)]
pub struct ConversionContext {
    /// Start time of conversion
    start_time: Instant,
    /// Timeout duration (0 means no timeout)
    timeout: Duration,
    /// Number of nodes visited
    node_count: u32,
}

impl ConversionContext {
    /// Create a new conversion context with the specified timeout
    ///
    /// `Duration::ZERO` disables the timeout.
    pub fn new(timeout: Duration) -> Self {
        Self {
            start_time: Instant::now(),
            timeout,
            node_count: 0,
        }
    }

    /// Check if timeout has been exceeded
    pub fn check_timeout(&self) -> Result<(), ConversionError> {
        if self.timeout.is_zero() {
            return Ok(());
        }

        if self.start_time.elapsed() > self.timeout {
            warn!(
                timeout_ms = self.timeout.as_millis() as u64,
                nodes = self.node_count,
                "conversion timeout exceeded"
            );
            return Err(ConversionError::Timeout);
        }

        Ok(())
    }

    /// Count one visited node, checking the timeout every 100 nodes
    pub fn increment_and_check(&mut self) -> Result<(), ConversionError> {
        self.node_count += 1;

        if self.node_count.is_multiple_of(CHECKPOINT_INTERVAL) {
            self.check_timeout()?;
        }

        Ok(())
    }

    /// Elapsed time since the context was created
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Number of nodes visited so far
    pub fn node_count(&self) -> u32 {
        self.node_count
    }
}

/// Position of a node in its parent's child list
struct Slot {
    parent: Handle,
    index: usize,
}

/// State kept for an element between emitting its prefix and its suffix
struct OpenElement {
    node: Handle,
    slot: Option<Slot>,
    tag: String,
    suffix: SuffixRule,
    /// Output length before the prefix was written
    start: usize,
}

enum Frame {
    Enter { node: Handle, slot: Option<Slot> },
    Leave(OpenElement),
}

/// Main text converter
///
/// Stateless apart from its options; one instance can convert any number of
/// documents, and separate conversions share nothing.
///
/// # Usage
///
/// ```rust
/// use html2text_converter::converter::TextConverter;
/// use html2text_converter::parser::parse_markup;
///
/// let dom = parse_markup("<h1>A</h1><p>B</p>");
/// let text = TextConverter::new().convert(&dom);
/// assert_eq!(text, "A\n\nB");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TextConverter {
    options: ConversionOptions,
}

impl TextConverter {
    /// Create a converter with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a converter with custom options
    pub fn with_options(options: ConversionOptions) -> Self {
        Self { options }
    }

    /// Preprocess, parse and convert a markup string
    ///
    /// Total: the timeout option does not apply to this path.
    pub fn convert_markup(&self, markup: &str) -> String {
        self.convert(&parse_markup(markup))
    }

    /// Decode, parse and convert raw HTML bytes
    ///
    /// Uses the configured Content-Type for charset detection and enforces the
    /// configured timeout. Empty input converts to an empty string.
    ///
    /// # Errors
    ///
    /// - `ConversionError::EncodingError` when the bytes cannot be decoded
    /// - `ConversionError::Timeout` when the timeout is exceeded
    pub fn convert_bytes(&self, html: &[u8]) -> Result<String, ConversionError> {
        if html.is_empty() {
            return Ok(String::new());
        }

        let mut ctx = ConversionContext::new(self.options.timeout);
        let dom = parse_html_with_charset(html, self.options.content_type.as_deref())?;
        ctx.check_timeout()?;

        self.convert_with_context(&dom, &mut ctx)
    }

    /// Convert a parsed document to text without any time limit
    pub fn convert(&self, dom: &RcDom) -> String {
        let mut nodes = 0u32;
        let raw = match self.render(&dom.document, || {
            nodes += 1;
            Ok::<(), Infallible>(())
        }) {
            Ok(raw) => raw,
            Err(never) => match never {},
        };

        let text = postprocess(&raw);
        debug!(nodes, output_len = text.len(), "converted document");
        text
    }

    /// Convert a parsed document to text with cooperative timeout checks
    ///
    /// # Errors
    ///
    /// `ConversionError::Timeout` when a checkpoint finds the context's
    /// timeout exceeded.
    pub fn convert_with_context(
        &self,
        dom: &RcDom,
        ctx: &mut ConversionContext,
    ) -> Result<String, ConversionError> {
        let raw = self.render(&dom.document, || ctx.increment_and_check())?;

        ctx.check_timeout()?;
        let text = postprocess(&raw);
        ctx.check_timeout()?;

        debug!(
            nodes = ctx.node_count(),
            output_len = text.len(),
            elapsed_us = ctx.elapsed().as_micros() as u64,
            "converted document"
        );
        Ok(text)
    }

    /// Walk the tree rooted at `root` and return the raw, unpostprocessed text
    ///
    /// `checkpoint` runs once per visited node; its error aborts the walk.
    fn render<E>(
        &self,
        root: &Handle,
        mut checkpoint: impl FnMut() -> Result<(), E>,
    ) -> Result<String, E> {
        let mut output = String::with_capacity(1024);
        let mut stack = vec![Frame::Enter {
            node: root.clone(),
            slot: None,
        }];

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter { node, slot } => {
                    checkpoint()?;
                    self.enter(&node, slot, &mut output, &mut stack);
                }
                Frame::Leave(open) => self.leave(open, &mut output),
            }
        }

        Ok(output)
    }

    fn enter(
        &self,
        node: &Handle,
        slot: Option<Slot>,
        output: &mut String,
        stack: &mut Vec<Frame>,
    ) {
        match node.data {
            NodeData::Document => push_children(node, stack),
            NodeData::Text { ref contents } => push_collapsed(output, &contents.borrow()),
            NodeData::Element {
                ref name,
                ref template_contents,
                ..
            } => {
                let local: &str = name.local.as_ref();
                let tag = local.to_ascii_lowercase();

                if is_stripped(&tag) {
                    trace!(tag = %tag, "skipping non-content subtree");
                    return;
                }

                let rule = tag_rule(&tag);
                let start = output.len();
                if let Some(prefix) = rule.prefix {
                    output.push_str(prefix);
                }

                stack.push(Frame::Leave(OpenElement {
                    node: node.clone(),
                    slot,
                    tag,
                    suffix: rule.suffix,
                    start,
                }));
                // <template> keeps its content in a separate fragment
                if let Some(fragment) = template_contents.borrow().as_ref() {
                    stack.push(Frame::Enter {
                        node: fragment.clone(),
                        slot: None,
                    });
                }
                push_children(node, stack);
            }
            NodeData::Comment { .. }
            | NodeData::Doctype { .. }
            | NodeData::ProcessingInstruction { .. } => {}
        }
    }

    fn leave(&self, open: OpenElement, output: &mut String) {
        let is_anchor = open.tag == "a";
        let next_element = if is_anchor || open.suffix.depends_on_sibling() {
            open.slot
                .as_ref()
                .and_then(|slot| next_element_name(&slot.parent, slot.index))
        } else {
            None
        };

        if let Some(suffix) = open.suffix.resolve(next_element.as_deref()) {
            output.push_str(suffix);
        }

        if is_anchor {
            let inner = output.split_off(open.start);
            let anchor = Anchor::from_node(&open.node);
            output.push_str(&anchor.wrap(&inner, next_element.as_deref()));
        }
    }
}

fn push_children(node: &Handle, stack: &mut Vec<Frame>) {
    let children = node.children.borrow();
    for (index, child) in children.iter().enumerate().rev() {
        stack.push(Frame::Enter {
            node: child.clone(),
            slot: Some(Slot {
                parent: node.clone(),
                index,
            }),
        });
    }
}

/// Lowercase tag of the first element among `parent`'s children after `index`
///
/// Text, comment and other non-element siblings are skipped. `None` when no
/// element follows.
pub fn next_element_name(parent: &Handle, index: usize) -> Option<String> {
    parent
        .children
        .borrow()
        .iter()
        .skip(index + 1)
        .find_map(|sibling| match sibling.data {
            NodeData::Element { ref name, .. } => {
                let local: &str = name.local.as_ref();
                Some(local.to_ascii_lowercase())
            }
            _ => None,
        })
}

/// Whitespace that collapses inside text nodes: tab, newline, form feed, carriage return, space
fn is_collapsible(ch: char) -> bool {
    matches!(ch, '\t' | '\n' | '\x0C' | '\r' | ' ')
}

fn push_collapsed(output: &mut String, text: &str) {
    let mut in_run = false;
    for ch in text.chars() {
        if is_collapsible(ch) {
            if !in_run {
                output.push(' ');
                in_run = true;
            }
        } else {
            output.push(ch);
            in_run = false;
        }
    }
}

/// Collapse every run of tab/newline/form-feed/carriage-return/space to one space
///
/// Leading and trailing runs become a single space as well; nothing is trimmed.
///
/// ```rust
/// use html2text_converter::converter::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("  a \n\t b  "), " a b ");
/// ```
pub fn collapse_whitespace(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    push_collapsed(&mut output, text);
    output
}
