//! Benchmarks for element matching and report aggregation.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use ui_parity::{
    AssignmentMethod, ElementDescriptor, ElementMatcher, MatchConfig, ReportAggregator,
};

const LABELS: [&str; 8] = [
    "Save", "Cancel", "Export", "Revenue", "Orders", "Settings", "Profile", "Help",
];

fn snapshot(count: usize, suffix: &str) -> Vec<ElementDescriptor> {
    (0..count)
        .map(|i| {
            let label = LABELS[i % LABELS.len()];
            let row = (i / 4) as f64;
            let column = (i % 4) as f64;
            ElementDescriptor::new(format!("{suffix}-{i}"))
                .with_role(if i % 3 == 0 { "button" } else { "link" })
                .with_text(format!("{label} {}{suffix}", i / LABELS.len()))
                .with_bounds(column * 300.0, row * 40.0, 120.0, 32.0)
        })
        .collect()
}

fn bench_match_elements(c: &mut Criterion) {
    let mut group = c.benchmark_group("match_elements");
    for size in [25, 100, 250] {
        let source = snapshot(size, "a");
        let target = snapshot(size, "b");
        for assignment in [AssignmentMethod::Greedy, AssignmentMethod::Optimal] {
            let matcher = ElementMatcher::new(MatchConfig::default().with_assignment(assignment));
            group.bench_with_input(
                BenchmarkId::new(format!("{assignment:?}"), size),
                &size,
                |b, _| b.iter(|| matcher.match_elements(black_box(&source), black_box(&target))),
            );
        }
    }
    group.finish();
}

fn bench_compare_elements(c: &mut Criterion) {
    let source = snapshot(200, "a");
    let target = snapshot(200, "b");
    let aggregator = ReportAggregator::default();

    c.bench_function("compare_elements_200", |b| {
        b.iter(|| aggregator.compare_elements(black_box(&source), black_box(&target)));
    });
}

criterion_group!(benches, bench_match_elements, bench_compare_elements);
criterion_main!(benches);
