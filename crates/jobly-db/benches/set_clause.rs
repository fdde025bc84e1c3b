use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use jobly_db::PartialUpdate;

/// Build a partial update with `n` fields: col0=.., col1=.., ...
fn build_update(n: usize) -> PartialUpdate {
    let mut update = PartialUpdate::new();
    for i in 0..n {
        update = update.set(&format!("col{i}"), i as i64);
    }
    update
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_clause/build");

    for n in [1, 5, 10, 50, 100] {
        let update = build_update(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &update, |b, update| {
            b.iter(|| black_box(update.build(&[]).unwrap()));
        });
    }

    group.finish();
}

fn bench_build_mapped(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_clause/build_mapped");

    let map: Vec<(String, String)> = (0..100)
        .map(|i| (format!("col{i}"), format!("column_{i}")))
        .collect();
    let map: Vec<(&str, &str)> = map.iter().map(|(a, b)| (a.as_str(), b.as_str())).collect();

    for n in [1, 5, 10, 50, 100] {
        let update = build_update(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &update, |b, update| {
            b.iter(|| black_box(update.build(&map).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build, bench_build_mapped);
criterion_main!(benches);
