//! Benchmarks for the two search paths.
//!
//! Exact search is index-seeded and should stay flat as the fact set grows;
//! fuzzy search scans every fact and pays for it.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use vaidya::graph::{Fact, KnowledgeGraph};
use vaidya::symbol::{Entity, Relation};

fn populated_graph(facts: usize) -> KnowledgeGraph {
    let mut kg = KnowledgeGraph::new();
    for i in 0..facts {
        kg.add(Fact::new(
            format!("head-{i}"),
            format!("relation-{}", i % 50),
            format!("tail-{}", i % 200),
        ));
    }
    kg
}

fn bench_exact_search(c: &mut Criterion) {
    let kg = populated_graph(10_000);
    let head = Entity::new("head-5000");
    let relation = Relation::new("relation-0");

    c.bench_function("exact_search_10k", |bench| {
        bench.iter(|| black_box(kg.exact_search(Some(&head), Some(&relation), None)))
    });
}

fn bench_fuzzy_search(c: &mut Criterion) {
    let kg = populated_graph(10_000);
    let head = Entity::new("head-5000");

    c.bench_function("fuzzy_search_10k", |bench| {
        bench.iter(|| black_box(kg.fuzzy_search(Some(&head), None, None)))
    });
}

fn bench_category_expansion(c: &mut Criterion) {
    let mut kg = KnowledgeGraph::new();
    // Three-level hierarchy: 10 branches x 100 leaves.
    for branch in 0..10 {
        kg.add(Fact::new(format!("branch-{branch}"), "is of", "root"));
        for leaf in 0..100 {
            kg.add(Fact::new(
                format!("leaf-{branch}-{leaf}"),
                "is of",
                format!("branch-{branch}"),
            ));
        }
    }

    c.bench_function("expand_category_1k_leaves", |bench| {
        bench.iter(|| black_box(kg.objects("root")))
    });
}

criterion_group!(
    benches,
    bench_exact_search,
    bench_fuzzy_search,
    bench_category_expansion
);
criterion_main!(benches);
