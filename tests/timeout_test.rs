//! Integration tests for cooperative timeout mechanism
//!
//! These tests verify that the timeout mechanism aborts conversions that
//! exceed the configured limit and stays out of the way otherwise.

use html2text_converter::converter::{ConversionContext, ConversionOptions, TextConverter};
use html2text_converter::error::ConversionError;
use html2text_converter::parser::parse_markup;
use proptest::prelude::*;
use std::time::Duration;

fn large_document(paragraphs: usize) -> String {
    let mut html = String::from("<html><body>");
    for i in 0..paragraphs {
        html.push_str(&format!("<div><p>Paragraph {}</p></div>", i));
    }
    html.push_str("</body></html>");
    html
}

/// Test that conversion succeeds with no timeout (Duration::ZERO)
#[test]
fn test_no_timeout() {
    let dom = parse_markup("<h1>Title</h1><p>Content</p>");
    let converter = TextConverter::new();

    let mut ctx = ConversionContext::new(Duration::ZERO);
    let text = converter
        .convert_with_context(&dom, &mut ctx)
        .expect("No timeout configured");

    assert_eq!(text, "Title\n\nContent");
}

/// Test that conversion succeeds with generous timeout
#[test]
fn test_generous_timeout() {
    let dom = parse_markup("<h1>Title</h1><p>Content</p>");
    let converter = TextConverter::new();

    let mut ctx = ConversionContext::new(Duration::from_secs(10));
    let text = converter
        .convert_with_context(&dom, &mut ctx)
        .expect("Generous timeout");

    assert_eq!(text, "Title\n\nContent");
}

/// Test that timeout is detected with very short timeout
#[test]
fn test_timeout_detection() {
    let dom = parse_markup(&large_document(10_000));
    let converter = TextConverter::new();

    let mut ctx = ConversionContext::new(Duration::from_micros(1));
    std::thread::sleep(Duration::from_millis(1));

    match converter.convert_with_context(&dom, &mut ctx) {
        Err(ConversionError::Timeout) => {}
        Err(e) => panic!("Expected Timeout error, got: {:?}", e),
        Ok(_) => panic!("Expected timeout, but conversion succeeded"),
    }
}

/// Test that the byte entry point honours the configured timeout
#[test]
fn test_convert_bytes_timeout() {
    let html = large_document(20_000);
    let converter = TextConverter::with_options(ConversionOptions {
        timeout: Duration::from_nanos(1),
        ..Default::default()
    });

    let result = converter.convert_bytes(html.as_bytes());
    assert!(matches!(result, Err(ConversionError::Timeout)));
}

/// Test that the unbounded entry point ignores the configured timeout
#[test]
fn test_convert_ignores_timeout_option() {
    let converter = TextConverter::with_options(ConversionOptions {
        timeout: Duration::from_nanos(1),
        ..Default::default()
    });

    let text = converter.convert_markup(&large_document(500));
    assert!(text.starts_with("Paragraph 0\n"));
    assert!(text.ends_with("Paragraph 499"));
}

/// Test that elapsed time is tracked
#[test]
fn test_elapsed_time_tracking() {
    let dom = parse_markup("<h1>Title</h1><p>Content</p>");
    let converter = TextConverter::new();

    let mut ctx = ConversionContext::new(Duration::from_secs(10));
    std::thread::sleep(Duration::from_millis(10));
    let _ = converter.convert_with_context(&dom, &mut ctx);

    assert!(ctx.elapsed() >= Duration::from_millis(10));
}

/// Test that timeout checking happens at checkpoints (every 100 nodes)
#[test]
fn test_checkpoint_frequency() {
    let mut html = String::from("<html><body>");
    for i in 0..250 {
        html.push_str(&format!("<p>Paragraph {}</p>", i));
    }
    html.push_str("</body></html>");

    let dom = parse_markup(&html);
    let converter = TextConverter::new();

    let mut ctx = ConversionContext::new(Duration::from_secs(5));
    let result = converter.convert_with_context(&dom, &mut ctx);

    assert!(result.is_ok());
    // document, html, head, body, then a p and a text node per paragraph
    assert_eq!(ctx.node_count(), 4 + 250 * 2);
}

proptest! {
    #[test]
    fn prop_cooperative_timeout_enforced_at_checkpoints(node_increments in 0u32..220) {
        let mut ctx = ConversionContext::new(Duration::from_nanos(1));

        // Ensure the timeout is already exceeded before we start incrementing.
        std::thread::sleep(Duration::from_millis(1));

        let mut first_err_at: Option<u32> = None;
        for step in 1..=node_increments {
            if ctx.increment_and_check().is_err() {
                first_err_at = Some(step);
                break;
            }
        }

        if node_increments < 100 {
            prop_assert_eq!(
                first_err_at, None,
                "Cooperative timeout should not trigger before the first 100-node checkpoint"
            );
        } else {
            prop_assert_eq!(
                first_err_at, Some(100),
                "Timeout should trigger at the first checkpoint once already exceeded"
            );
        }
    }
}
