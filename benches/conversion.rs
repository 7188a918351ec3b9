//! Benchmarks for end-to-end conversion throughput.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use html2text_converter::parser::parse_markup;
use html2text_converter::{TextConverter, convert};

/// Generate an article-like document with the given number of sections.
fn generate_html(sections: usize) -> String {
    let mut html = String::with_capacity(sections * 400);
    html.push_str("<html><head><title>Bench</title><style>p { margin: 0 }</style></head><body>");
    for i in 0..sections {
        html.push_str(&format!("<h2>Section {i}</h2>"));
        html.push_str(&format!(
            "<p>Paragraph {i} with <b>bold</b>, <i>italic</i> and a \
             <a href=\"https://example.com/{i}\">link</a>.</p>"
        ));
        html.push_str("<ul><li>first</li><li>second</li></ul>");
        html.push_str("<div>block</div><div>block</div>");
        html.push_str("<table><tr><td>a</td><td>b</td></tr></table>");
    }
    html.push_str("</body></html>");
    html
}

fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");
    for sections in [10, 100, 1000] {
        let html = generate_html(sections);
        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(sections), &html, |b, html| {
            b.iter(|| convert(html));
        });
    }
    group.finish();
}

fn bench_walk_only(c: &mut Criterion) {
    let dom = parse_markup(&generate_html(100));
    let converter = TextConverter::new();

    c.bench_function("walk_parsed_document", |b| {
        b.iter(|| converter.convert(&dom));
    });
}

criterion_group!(benches, bench_convert, bench_walk_only);
criterion_main!(benches);
