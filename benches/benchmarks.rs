// benches/benchmarks.rs — Performance benchmarks (criterion)
//
// Hot paths that scale with model output size:
//   1. Code extraction from a long response
//   2. Error-tail truncation of a long traceback

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use autocoder::core::extractor::extract_code;
use autocoder::util::tail_chars;

/// A response with prose before and after a large code block.
fn build_response(lines: usize) -> String {
    let mut s = String::from("Here is the improved game. It adds particles and waves.\n<code>\n");
    for i in 0..lines {
        s.push_str(&format!("    tower_{i} = Tower(x={i}, y={}, color=(255, 0, 0))\n", i * 2));
    }
    s.push_str("</code>\nLet me know if you want more features.");
    s
}

fn bench_extract(c: &mut Criterion) {
    let small = build_response(50);
    let large = build_response(5_000);
    let missing = large.replace("</code>", "");

    c.bench_function("extract_code_50_lines", |b| {
        b.iter(|| extract_code(black_box(&small)))
    });
    c.bench_function("extract_code_5000_lines", |b| {
        b.iter(|| extract_code(black_box(&large)))
    });
    c.bench_function("extract_code_no_closing_tag", |b| {
        b.iter(|| extract_code(black_box(&missing)))
    });
}

fn bench_truncate(c: &mut Criterion) {
    let traceback = "  File \"game.py\", line 42, in update\n    self.step()\n".repeat(2_000);

    c.bench_function("tail_chars_500_of_100k", |b| {
        b.iter(|| tail_chars(black_box(&traceback), 500))
    });
}

criterion_group!(benches, bench_extract, bench_truncate);
criterion_main!(benches);
