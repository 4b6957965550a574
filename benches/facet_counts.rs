//! Facet search and drill-down count benchmarks
//!
//! Run with: cargo bench --bench facet_counts
//!
//! Catalog: 5 top-level facets x 8 values x 4 sub-values, documents tagged
//! with one leaf per top-level facet.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use facetdb::FacetIndex;

/// Fixed seed for reproducible catalogs
const BENCH_SEED: u64 = 0xDEADBEEF_CAFEBABE;

/// Simple LCG for deterministic pseudo-random tagging
fn lcg_next(state: &mut u64) -> u64 {
    *state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
    *state >> 33
}

fn facets() -> Vec<String> {
    let mut out = Vec::new();
    for top in 0..5 {
        out.push(format!("f{}", top));
        for mid in 0..8 {
            out.push(format!("f{}:v{}", top, mid));
            for leaf in 0..4 {
                out.push(format!("f{}:v{}:s{}", top, mid, leaf));
            }
        }
    }
    out
}

fn build_index(docs: u32) -> FacetIndex {
    let mut index = FacetIndex::with_facets(facets()).unwrap();
    let mut state = BENCH_SEED;
    for docid in 0..docs {
        let leaves: Vec<String> = (0..5)
            .map(|top| {
                let mid = lcg_next(&mut state) % 8;
                let leaf = lcg_next(&mut state) % 4;
                format!("f{}:v{}:s{}", top, mid, leaf)
            })
            .collect();
        index.index_doc(docid, &leaves).unwrap();
    }
    index
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("facet_search");
    for docs in [10_000u32, 100_000] {
        let index = build_index(docs);
        group.throughput(Throughput::Elements(docs as u64));
        group.bench_with_input(BenchmarkId::new("two_terms", docs), &index, |b, index| {
            b.iter(|| index.search(&["f0:v3", "f1:v5:s2"]))
        });
    }
    group.finish();
}

fn bench_counts(c: &mut Criterion) {
    let mut group = c.benchmark_group("facet_counts");
    for docs in [10_000u32, 100_000] {
        let index = build_index(docs);
        let query = ["f0:v3"];
        let result = index.search(&query);
        group.bench_with_input(BenchmarkId::new("one_selection", docs), &index, |b, index| {
            b.iter(|| index.counts(&result, &query))
        });
        let all = index.docids();
        group.bench_with_input(BenchmarkId::new("top_level", docs), &index, |b, index| {
            b.iter(|| index.counts(&all, &[]))
        });
    }
    group.finish();
}

fn bench_reindex(c: &mut Criterion) {
    let mut index = build_index(10_000);
    let mut docid = 0u32;
    c.bench_function("facet_reindex", |b| {
        b.iter(|| {
            docid = (docid + 1) % 10_000;
            index.index_doc(docid, ["f2:v1:s1", "f4:v7"]).unwrap();
        })
    });
}

criterion_group!(benches, bench_search, bench_counts, bench_reindex);
criterion_main!(benches);
