//! Connection suite negotiation benchmarks
//!
//! Measures the per-handshake cost of choosing TLS parameters:
//! - compatibility checks against the OpenSSL socket profile
//! - resolving presets with and without fallback
//! - materialising a profile into OpenSSL context parameters
//!
//! Run with: cargo bench --bench negotiation

use accord::http::tls::{ConnectionSuite, ContextParams, SocketProfile, SuiteSelector};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn presets() -> [(&'static str, ConnectionSuite); 3] {
    [
        ("restricted", ConnectionSuite::RESTRICTED_TLS),
        ("modern", ConnectionSuite::MODERN_TLS),
        ("compatible", ConnectionSuite::COMPATIBLE_TLS),
    ]
}

fn bench_is_compatible(c: &mut Criterion) {
    let socket = SocketProfile::openssl();
    let mut group = c.benchmark_group("is_compatible");

    for (name, suite) in presets() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &suite, |b, suite| {
            b.iter(|| black_box(suite.is_compatible(black_box(&socket))));
        });
    }

    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let socket = SocketProfile::openssl();
    let mut group = c.benchmark_group("resolve");

    for (name, suite) in presets() {
        group.bench_with_input(BenchmarkId::new("first_attempt", name), &suite, |b, suite| {
            b.iter(|| black_box(suite.resolve(black_box(&socket), false)));
        });
        group.bench_with_input(BenchmarkId::new("fallback", name), &suite, |b, suite| {
            b.iter(|| black_box(suite.resolve(black_box(&socket), true)));
        });
    }

    group.finish();
}

fn bench_selector(c: &mut Criterion) {
    c.bench_function("selector_configure", |b| {
        b.iter(|| {
            let mut selector = SuiteSelector::new(vec![
                ConnectionSuite::RESTRICTED_TLS,
                ConnectionSuite::MODERN_TLS,
                ConnectionSuite::COMPATIBLE_TLS,
            ]);
            let mut socket = SocketProfile::openssl();
            black_box(selector.configure(&mut socket).ok())
        });
    });
}

fn bench_context_params(c: &mut Criterion) {
    let mut socket = SocketProfile::openssl();
    let _ = ConnectionSuite::MODERN_TLS.apply(&mut socket, true);

    c.bench_function("context_params", |b| {
        b.iter(|| black_box(ContextParams::from_profile(black_box(&socket)).ok()));
    });
}

criterion_group!(
    benches,
    bench_is_compatible,
    bench_resolve,
    bench_selector,
    bench_context_params
);
criterion_main!(benches);
