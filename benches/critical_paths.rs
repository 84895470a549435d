//! Criterion benchmarks for tokensrc critical paths
//!
//! Benchmarks the core performance-critical operations:
//! - Index: variable discovery and registration
//! - Resolve: full document rewrite with alias chains
//! - Batch: parallel resolution of several documents
//! - Color: channel conversion and hex parsing

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::{json, Value};
use tokensrc::color::{channels_to_hex, parse_hex, ColorFormat};
use tokensrc::{resolve_document, ResolveOptions, Resolver};

// =============================================================================
// Test Data Generators
// =============================================================================

/// Generate a document with `n` primitive variables and `n` aliases to them,
/// each alias chained one hop through the previous alias.
fn make_document(n: usize) -> Value {
    let mut variables = Vec::with_capacity(n * 2);
    for i in 0..n {
        variables.push(json!({
            "id": format!("VariableID:1:{}", i),
            "name": format!("Base/{}", i),
            "resolvedType": "COLOR",
            "valuesByMode": {
                "1:0": {"r": (i % 256) as f64 / 255.0, "g": 0.5, "b": 0.25},
                "1:1": {"r": 0.1, "g": (i % 256) as f64 / 255.0, "b": 0.9}
            }
        }));
    }
    for i in 0..n {
        let target = if i == 0 {
            "VariableID:1:0".to_string()
        } else {
            format!("VariableID:2:{}", i - 1)
        };
        variables.push(json!({
            "id": format!("VariableID:2:{}", i),
            "name": format!("Semantic/{}", i),
            "valuesByMode": {"1:0": {"type": "VARIABLE_ALIAS", "id": target}}
        }));
    }
    json!({
        "variableCollections": [{
            "id": "VariableCollectionId:1:0",
            "modes": [{"modeId": "1:0", "name": "Light"}, {"modeId": "1:1", "name": "Dark"}]
        }],
        "variables": variables
    })
}

// =============================================================================
// Index Benchmarks
// =============================================================================

fn bench_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("index");
    let resolver = Resolver::default();

    for size in [10, 100, 500].iter() {
        let doc = make_document(*size);
        group.throughput(Throughput::Elements(*size as u64 * 2));
        group.bench_with_input(BenchmarkId::new("build", size), &doc, |b, doc| {
            b.iter(|| resolver.index(black_box(doc)))
        });
    }

    group.finish();
}

// =============================================================================
// Resolve Benchmarks
// =============================================================================

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");

    for size in [10, 100, 500].iter() {
        let doc = make_document(*size);
        group.throughput(Throughput::Elements(*size as u64 * 2));
        group.bench_with_input(BenchmarkId::new("document", size), &doc, |b, doc| {
            b.iter(|| resolve_document(black_box(doc)))
        });
    }

    let doc = make_document(100);
    let hsl = Resolver::new(ResolveOptions { color_format: ColorFormat::Hsl, ..Default::default() });
    group.bench_function("document_hsl_100", |b| b.iter(|| hsl.resolve(black_box(&doc))));

    let strict = Resolver::new(ResolveOptions { alias_heuristic: false, ..Default::default() });
    group.bench_function("document_tagged_only_100", |b| {
        b.iter(|| strict.resolve(black_box(&doc)))
    });

    group.finish();
}

// =============================================================================
// Batch Benchmarks
// =============================================================================

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    let resolver = Resolver::default();
    let docs: Vec<Value> = (0..16).map(|_| make_document(100)).collect();

    group.throughput(Throughput::Elements(docs.len() as u64));
    group.bench_function("resolve_batch_16x100", |b| {
        b.iter(|| resolver.resolve_batch(black_box(&docs)))
    });

    group.finish();
}

// =============================================================================
// Color Benchmarks
// =============================================================================

fn bench_color(c: &mut Criterion) {
    let mut group = c.benchmark_group("color");

    group.bench_function("channels_to_hex", |b| {
        b.iter(|| channels_to_hex(black_box(1.0), black_box(0.4), black_box(0.0)))
    });

    group.bench_function("parse_hex_6", |b| b.iter(|| parse_hex(black_box("#FF6600"))));

    group.bench_function("parse_hex_8", |b| b.iter(|| parse_hex(black_box("#FF6600CC"))));

    group.bench_function("render_hsl", |b| {
        b.iter(|| ColorFormat::Hsl.render(black_box("#ff6600")))
    });

    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(benches, bench_index, bench_resolve, bench_batch, bench_color);

criterion_main!(benches);
