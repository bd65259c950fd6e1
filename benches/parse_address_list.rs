use criterion::{black_box, criterion_group, criterion_main, Criterion};
use imap_parser::parse_address_list;

fn criterion_benchmark(c: &mut Criterion) {
    let input = br#""Group" : "=?UTF-8?B?PEJlemUgam3DqW5hPg==?=" <user@domain.com>, "Another User" <other@example.org>;"#;

    c.bench_function("parse_address_list", |b| {
        b.iter(|| {
            black_box(parse_address_list(black_box(&input[..]))).ok();
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
