use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use markdown_scribe_engine::{Options, from_markdown, to_markdown};

fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with *some* `content` and a [link](https://example.com).\n\n- Bullet point\n  - Nested item\n- Another item\n\n1. First\n2. Second\n\n> Quoted 1. text with _marks_ and <tags>\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n";
    base.repeat(size)
}

fn bench_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize");
    group.sample_size(10);

    for size in [10, 100] {
        let tree = from_markdown(&generate_markdown_content(size));
        let options = Options::default();
        group.bench_with_input(BenchmarkId::new("to_markdown", size), &tree, |b, tree| {
            b.iter(|| to_markdown(std::hint::black_box(tree), &options));
        });
    }

    group.finish();
}

fn bench_escaping(c: &mut Criterion) {
    let mut group = c.benchmark_group("escaping");
    group.sample_size(10);

    let text = "*a* _b_ [c] <d> 1. e # f \\g ".repeat(200);
    let tree = markdown_scribe_engine::Node::paragraph(vec![markdown_scribe_engine::Node::text(
        text,
    )]);
    let options = Options::default();
    group.bench_function("dense_punctuation", |b| {
        b.iter(|| to_markdown(std::hint::black_box(&tree), &options));
    });

    group.finish();
}

fn bench_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("round_trip");
    group.sample_size(10);

    let content = generate_markdown_content(100);
    let options = Options::default();
    group.bench_function("parse_and_serialize", |b| {
        b.iter(|| to_markdown(&from_markdown(std::hint::black_box(&content)), &options));
    });

    group.finish();
}

criterion_group!(benches, bench_serialize, bench_escaping, bench_round_trip);
criterion_main!(benches);
