use criterion::{black_box, criterion_group, criterion_main, Criterion};
use phys_bridge::Bridge;

fn bench_polygon_set(c: &mut Criterion) {
    let mut bridge = Bridge::new();
    let shape = bridge.polygon_shape_new();
    let mut verts: Vec<f32> = (0..8)
        .flat_map(|i| {
            let a = i as f32 * std::f32::consts::TAU / 8.0;
            [a.cos(), a.sin()]
        })
        .collect();
    let len = verts.len() as i32;

    c.bench_function("polygon_shape_set octagon", |b| {
        b.iter(|| bridge.polygon_shape_set(shape, black_box(&mut verts), 0, len))
    });
}

fn bench_body_transform(c: &mut Criterion) {
    let mut bridge = Bridge::new();
    let world = bridge.world_new(0.0, -10.0, true);
    let body = bridge
        .world_create_body(world, 2, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, true, true, false, false, true, 1.0)
        .unwrap_or_default();
    let mut out = [0.0f32; 4];

    c.bench_function("body_set_transform", |b| {
        b.iter(|| bridge.body_set_transform(body, black_box(1.0), black_box(2.0), black_box(0.5)))
    });

    c.bench_function("body_get_transform", |b| {
        b.iter(|| bridge.body_get_transform(body, black_box(&mut out)))
    });
}

criterion_group!(benches, bench_polygon_set, bench_body_transform);
criterion_main!(benches);
