use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use query_highlight::markers::{extract_markers, MarkerTags};
use query_highlight::{HighlightSession, QueryLexer};

const CLAUSES: [&str; 6] = [
    "TI=\"Climate Change\"",
    "AND",
    "AB=\u{201C}Paris agreement\"",
    "OR NOT",
    "URL=\"https://example.com/a\\\"b\"",
    "sea level and rise",
];

fn make_query(clauses: usize) -> String {
    (0..clauses)
        .map(|i| CLAUSES[i % CLAUSES.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

/// Many opening quotes and no closing one; checks the scan stays linear
fn make_unterminated(len: usize) -> String {
    "\" a ".repeat(len / 4)
}

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");
    for clauses in [4usize, 64, 1_024] {
        let query = make_query(clauses);
        group.throughput(Throughput::Bytes(query.len() as u64));
        group.bench_with_input(BenchmarkId::new("mixed", clauses), &query, |b, query| {
            let mut lexer = QueryLexer::new();
            b.iter(|| black_box(lexer.tokenize(query)));
        });
    }
    for len in [256usize, 4_096, 65_536] {
        let query = make_unterminated(len);
        group.throughput(Throughput::Bytes(query.len() as u64));
        group.bench_with_input(BenchmarkId::new("unterminated", len), &query, |b, query| {
            let mut lexer = QueryLexer::new();
            b.iter(|| black_box(lexer.tokenize(query)));
        });
    }
    group.finish();
}

fn bench_keystrokes(c: &mut Criterion) {
    let query = make_query(32);
    c.bench_function("session_keystrokes", |b| {
        b.iter(|| {
            let mut session = HighlightSession::new();
            for end in (1..=query.len()).filter(|&end| query.is_char_boundary(end)) {
                black_box(session.on_input(&query[..end]));
            }
        });
    });
}

fn bench_markers(c: &mut Criterion) {
    let tags = MarkerTags::default();
    let items: Vec<String> = (0..100)
        .map(|i| format!("Item {} about {} and {} text", i, tags.wrap("climate"), tags.wrap("sea")))
        .collect();
    c.bench_function("extract_markers_100", |b| {
        b.iter(|| black_box(extract_markers(&items, &tags)));
    });
}

criterion_group!(benches, bench_tokenize, bench_keystrokes, bench_markers);
criterion_main!(benches);
