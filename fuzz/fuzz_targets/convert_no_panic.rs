#![no_main]

use html2text_converter::{ConversionOptions, convert, convert_bytes};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let output = convert(&text);
    assert_eq!(output.trim_matches(|c: char| c == ' ' || c == '\n'), output);

    let _ = convert_bytes(data, &ConversionOptions::default());
});
