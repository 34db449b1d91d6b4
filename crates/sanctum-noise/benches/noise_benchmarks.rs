use criterion::{Criterion, black_box, criterion_group, criterion_main};
use glam::{Vec2, Vec3};
use sanctum_noise::*;

fn bench_value_noise(c: &mut Criterion) {
    let p = black_box(Vec2::new(12.34, 56.78));
    c.bench_function("value_noise2", |bencher| bencher.iter(|| black_box(value_noise2(p))));
}

fn bench_fbm_five_octaves(c: &mut Criterion) {
    let p = black_box(Vec2::new(0.25, 0.75));
    c.bench_function("fbm2_5_octaves", |bencher| bencher.iter(|| black_box(fbm2(p, 5))));
}

fn bench_fbm_fragment_grid(c: &mut Criterion) {
    c.bench_function("fbm2_64x64_grid", |bencher| {
        bencher.iter(|| {
            let mut acc = 0.0;
            for y in 0..64 {
                for x in 0..64 {
                    let uv = Vec2::new(x as f32 / 64.0, y as f32 / 64.0);
                    acc += fbm2(uv * 8.0, 4);
                }
            }
            black_box(acc)
        })
    });
}

fn bench_gradient_noise(c: &mut Criterion) {
    let p = black_box(Vec3::new(1.5, -0.25, 3.0));
    c.bench_function("gradient_noise3", |bencher| bencher.iter(|| black_box(gradient_noise3(p))));
}

criterion_group!(
    benches,
    bench_value_noise,
    bench_fbm_five_octaves,
    bench_fbm_fragment_grid,
    bench_gradient_noise
);
criterion_main!(benches);
