use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use repcap::{AliasRegistry, Regex, transform_with};

fn bench_plain_pass_through(c: &mut Criterion) {
    let registry = AliasRegistry::new();
    let pattern = r"^[a-zA-Z_][a-zA-Z0-9_]*\s*=\s*(\d+|'[^']*')$";

    c.bench_function("plain_pass_through", |b| {
        b.iter(|| black_box(transform_with(black_box(pattern), &registry, 12)))
    });
}

fn bench_star_expansion(c: &mut Criterion) {
    let registry = AliasRegistry::new();
    let pattern = r"(\w+)(?:,(\w+))*";

    c.bench_function("star_expansion", |b| {
        b.iter(|| black_box(transform_with(black_box(pattern), &registry, 12)))
    });
}

fn bench_nested_expansion(c: &mut Criterion) {
    let registry = AliasRegistry::new();
    let pattern = r"((\d){1,3}\.){3}(\d){1,3}";

    c.bench_function("nested_expansion", |b| {
        b.iter(|| black_box(transform_with(black_box(pattern), &registry, 12)))
    });
}

fn bench_alias_resolution(c: &mut Criterion) {
    let mut registry = AliasRegistry::new();
    registry.set_aliasing(true);
    registry.register("octet", r"\d{1,3}").unwrap();
    registry.register("ip", r"@octet(?:\.@octet){3}").unwrap();
    registry.register("endpoint", r"(@ip):(\d+)").unwrap();

    c.bench_function("alias_resolution", |b| {
        b.iter(|| black_box(transform_with(black_box("(@endpoint,?)+"), &registry, 12)))
    });
}

fn bench_expanded_captures(c: &mut Criterion) {
    let regex = Regex::with_registry(r"(\w+)(?:,(\w+))*", &AliasRegistry::new(), 12).unwrap();
    let input = "alpha,beta,gamma,delta,epsilon";

    c.bench_function("expanded_captures", |b| {
        b.iter(|| black_box(regex.captures(black_box(input)).map(|caps| caps.filter(true))))
    });
}

criterion_group!(
    benches,
    bench_plain_pass_through,
    bench_star_expansion,
    bench_nested_expansion,
    bench_alias_resolution,
    bench_expanded_captures,
);

criterion_main!(benches);
