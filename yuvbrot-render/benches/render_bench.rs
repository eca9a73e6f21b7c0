use criterion::{criterion_group, criterion_main, Criterion};

use yuvbrot_core::{Complex, IterationEngine, Resolution, ViewState};
use yuvbrot_render::FrameOrchestrator;

fn bench_full_recompute(c: &mut Criterion) {
    let mut view = ViewState::new(Resolution::NTSC).unwrap();
    let mut orch = FrameOrchestrator::new(Resolution::NTSC).unwrap();

    c.bench_function("recompute_640x460", |b| {
        b.iter(|| {
            view.pan(1, 0);
            view.pan(-1, 0);
            orch.render_frame(&mut view)
        });
    });
}

fn bench_encode_only(c: &mut Criterion) {
    let mut view = ViewState::new(Resolution::NTSC).unwrap();
    let mut orch = FrameOrchestrator::new(Resolution::NTSC).unwrap();
    view.toggle_color_cycling();
    orch.render_frame(&mut view);

    c.bench_function("encode_640x460", |b| {
        b.iter(|| orch.render_frame(&mut view));
    });
}

fn bench_iteration_throughput(c: &mut Criterion) {
    let engine = IterationEngine::new(1000);
    let points: Vec<Complex> = (0..256)
        .map(|i| Complex::new(-0.75 + i as f64 * 1e-4, 0.1))
        .collect();

    c.bench_function("iterate_256_points_1000iter", |b| {
        b.iter(|| points.iter().map(|p| engine.iterate(p.re, p.im)).sum::<u32>());
    });
}

criterion_group!(
    benches,
    bench_full_recompute,
    bench_encode_only,
    bench_iteration_throughput
);
criterion_main!(benches);
