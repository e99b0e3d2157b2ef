// Copyright 2026 The Ontoview Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use serde_json::json;

use ontoview_engine::{Engine, ParserConfig, parse};

/// A ring of classes, each carrying a language-tagged label, one
/// subclass axiom, and one object property pointing across the ring.
fn ring_document(classes: usize) -> String {
    let class: Vec<serde_json::Value> = (0..classes)
        .map(|i| {
            json!({
                "id": format!("c{i}"),
                "label": {"en": format!("Class {i}"), "default": format!("c{i}")},
                "subClassOf": [format!("c{}", (i + 1) % classes)]
            })
        })
        .collect();
    let property: Vec<serde_json::Value> = (0..classes)
        .map(|i| {
            json!({
                "id": format!("p{i}"),
                "domain": format!("c{i}"),
                "range": format!("c{}", (i * 7 + 3) % classes)
            })
        })
        .collect();
    json!({"class": class, "property": property}).to_string()
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    let config = ParserConfig::default();

    for &classes in &[10, 100, 1_000] {
        let raw = ring_document(classes);
        group.bench_with_input(BenchmarkId::from_parameter(classes), &raw, |b, raw| {
            b.iter(|| parse(raw, &config).unwrap())
        });
    }
    group.finish();
}

fn bench_load_ontology(c: &mut Criterion) {
    let mut group = c.benchmark_group("load_ontology");

    for &classes in &[10, 100, 1_000] {
        let raw = ring_document(classes);
        group.bench_with_input(BenchmarkId::from_parameter(classes), &raw, |b, raw| {
            b.iter(|| {
                let mut engine = Engine::new();
                engine.load_ontology(raw).unwrap();
                engine
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_load_ontology);
criterion_main!(benches);
