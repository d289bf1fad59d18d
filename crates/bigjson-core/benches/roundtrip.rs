//! Parse/serialize benchmarks over a medium-sized document with a realistic
//! mix of big integers, floats, strings, and nesting.

use std::hint::black_box;

use bigjson_core::{parse, stringify, stringify_with_schema, ParseOptions};
use criterion::{criterion_group, criterion_main, Criterion};

fn sample_document() -> String {
    let mut records = Vec::with_capacity(200);
    for i in 0..200 {
        records.push(format!(
            r#"{{"id":{}{:03},"score":{}.{:04},"name":"record {}","tags":["a","b","c"],"active":{}}}"#,
            9007199254740993u64,
            i,
            i,
            i,
            i,
            i % 2 == 0
        ));
    }
    format!(r#"{{"records":[{}],"total":200}}"#, records.join(","))
}

fn bench_parse(c: &mut Criterion) {
    let text = sample_document();
    let options = ParseOptions::default();
    c.bench_function("parse", |b| {
        b.iter(|| parse(black_box(&text), &options).unwrap())
    });

    let store = ParseOptions {
        store_as_string: true,
        ..Default::default()
    };
    c.bench_function("parse_store_as_string", |b| {
        b.iter(|| parse(black_box(&text), &store).unwrap())
    });
}

fn bench_stringify(c: &mut Criterion) {
    let text = sample_document();
    let parsed = parse(&text, &ParseOptions::default()).unwrap();
    c.bench_function("stringify", |b| {
        b.iter(|| stringify(black_box(&parsed.data), None, None))
    });

    let store = ParseOptions {
        store_as_string: true,
        ..Default::default()
    };
    let exact = parse(&text, &store).unwrap();
    c.bench_function("stringify_with_schema", |b| {
        b.iter(|| stringify_with_schema(black_box(&exact.data), &exact.data_schema, None))
    });
}

criterion_group!(benches, bench_parse, bench_stringify);
criterion_main!(benches);
