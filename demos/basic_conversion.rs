//! Basic conversion example demonstrating the text converter
//!
//! Run with `RUST_LOG=html2text_converter=debug` to see conversion logs.

use html2text_converter::{ConversionOptions, convert, convert_bytes};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== HTML to Text Converter - Basic Examples ===\n");

    show(
        "Heading and paragraph",
        "<h1>Welcome</h1><p>This is a   test document.</p>",
    );
    show(
        "Lists and links",
        "<ul><li><a href=\"https://example.com/a\">First</a></li>\
         <li><a href=\"https://example.com\">example.com</a></li></ul>",
    );
    show(
        "Non-content removal",
        "<head><title>Hidden</title></head><script>track()</script><p>Visible</p>",
    );
    show(
        "Table and rule",
        "<table><tr><th>Name</th><th>Qty</th></tr><tr><td>Apple</td><td>3</td></tr></table><hr><p>Done</p>",
    );

    println!("Example: Latin-1 bytes with a Content-Type header");
    let options = ConversionOptions {
        content_type: Some("text/html; charset=ISO-8859-1".to_string()),
        ..Default::default()
    };
    match convert_bytes(b"<p>Caf\xE9 cr\xE8me</p>", &options) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("Conversion failed: {}", e),
    }
    println!("---\n");
}

fn show(title: &str, html: &str) {
    println!("Example: {}", title);
    println!("Input HTML:");
    println!("{}\n", html);
    println!("Output text:");
    println!("{}", convert(html));
    println!("---\n");
}
