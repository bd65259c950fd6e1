use criterion::{black_box, criterion_group, criterion_main, Criterion};
use imap_parser::parse;

fn criterion_benchmark(c: &mut Criterion) {
    let input = b"! FETCH 7 (BODY[1.HEADER.FIELDS.NOT (\"Subject\" \"Date\")] FLAGS UID)\r\n";

    c.bench_function("parse_command", |b| {
        b.iter(|| {
            black_box(parse(black_box(&input[..]), black_box(b'/')));
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
