//! FILENAME: core/variant-engine/benches/variant_matrix.rs
//! Benchmarks for tree building, combination enumeration and row spans on
//! option spaces of realistic and large sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use variant_engine::{
    apply_to_all_leaves, build, combinations, group_names, row_spans, update_by_path, LeafPatch,
    VariantGroup,
};

/// `axes` groups with `width` values each.
fn option_space(axes: usize, width: usize) -> Vec<VariantGroup> {
    (0..axes)
        .map(|a| {
            VariantGroup::new(
                format!("Axis{}", a),
                (0..width).map(|v| format!("v{}-{}", a, v)),
            )
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for (axes, width) in [(2, 5), (3, 10), (4, 10)] {
        let groups = option_space(axes, width);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", axes, width)),
            &groups,
            |b, g| b.iter(|| build(black_box(g))),
        );
    }
    group.finish();
}

fn bench_combinations_and_spans(c: &mut Criterion) {
    let mut group = c.benchmark_group("combinations_row_spans");
    for (axes, width) in [(2, 5), (3, 10), (4, 10)] {
        let groups = option_space(axes, width);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", axes, width)),
            &groups,
            |b, g| {
                b.iter(|| {
                    let combos = combinations(black_box(g));
                    row_spans(&combos, g.len())
                })
            },
        );
    }
    group.finish();
}

fn bench_edits(c: &mut Criterion) {
    let groups = option_space(4, 10);
    let names = group_names(&groups);
    let tree = build(&groups);
    let combo: Vec<String> = groups.iter().map(|g| g.values[7].clone()).collect();
    let patch = LeafPatch::price_stock(12.5, 3);

    c.bench_function("update_by_path_4x10", |b| {
        b.iter(|| update_by_path(black_box(&tree), &names, &combo, &patch))
    });
    c.bench_function("apply_to_all_leaves_4x10", |b| {
        b.iter(|| apply_to_all_leaves(black_box(&tree), 9.0, 1))
    });
}

criterion_group!(benches, bench_build, bench_combinations_and_spans, bench_edits);
criterion_main!(benches);
