/// Notes
/// 1. Every bench runs over 1,000 points
/// 2. The altitude correction is *unrealistic*
///    because the grid has 4 nodes only
///    but the real world one has ~100,000 nodes.
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use sokuryo::{batch, AltitudeCorrectionGridBuilder, Point, Zone};

const HYOKOREV: [(u32, f64); 4] = [
    (54401027, 0.0528),
    (54401028, 0.0541),
    (54401037, 0.0517),
    (54401038, 0.0533),
];

const REPEAT: usize = 200;
const POSITIONS: [(f64, f64); 5] = [
    (36.1003, 140.0881),
    (36.1021, 140.0912),
    (36.1048, 140.0899),
    (36.1012, 140.0934),
    (36.1077, 140.0877),
];

fn points() -> Vec<Point> {
    let mut ps = Vec::with_capacity(POSITIONS.len() * REPEAT);
    for _ in 0..REPEAT {
        ps.extend(
            POSITIONS
                .iter()
                .map(|&(lat, lon)| Point::new(0.0, 0.0, 10.0).with_geographic(lat, lon)),
        );
    }
    ps
}

fn bench_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection");

    let zone = Zone::try_from_id(9).unwrap();
    let ps = points();
    let planes = batch::to_plane(&ps, 9)
        .unwrap()
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    group.bench_function("to_plane", |b| {
        b.iter(|| {
            ps.iter()
                .map(|p| zone.to_plane(black_box(p.latitude.unwrap()), black_box(p.longitude.unwrap())))
                .collect::<Vec<_>>()
        });
    });

    group.bench_function("to_geographic", |b| {
        b.iter(|| {
            planes
                .iter()
                .map(|p| zone.to_geographic(black_box(p.x), black_box(p.y)))
                .collect::<Vec<_>>()
        });
    });

    group.finish();
}

fn bench_correction(c: &mut Criterion) {
    let mut group = c.benchmark_group("altitude");

    let grid = AltitudeCorrectionGridBuilder::new()
        .parameters(HYOKOREV)
        .build();
    let ps = points();

    group.bench_function("correction", |b| {
        b.iter(|| {
            ps.iter()
                .map(|p| grid.correction(black_box(p.latitude.unwrap()), black_box(p.longitude.unwrap())))
                .collect::<Vec<_>>()
        });
    });

    group.bench_function("correct_altitude", |b| {
        b.iter(|| batch::correct_altitude(black_box(&ps), &grid));
    });

    group.finish();
}

criterion_group!(benches, bench_projection, bench_correction);
criterion_main!(benches);
