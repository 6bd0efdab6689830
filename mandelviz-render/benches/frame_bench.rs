use criterion::{criterion_group, criterion_main, Criterion};

use mandelviz_core::{EscapeParams, GridSize, Viewport};
use mandelviz_render::{
    color_of, quad_capacity_for, render_frame, ColorScheme, FrameImage, GeometryPool,
    RenderProgress,
};

fn bench_frame(c: &mut Criterion, label: &str, grid: GridSize, depth: u32) {
    let viewport = Viewport::initial();
    let params = EscapeParams::new(depth).unwrap();
    let mut pool = GeometryPool::new();
    pool.ensure_capacity(grid.pixel_count(), quad_capacity_for(grid));
    let mut image = FrameImage::new(grid);
    let progress = RenderProgress::new();

    c.bench_function(label, |b| {
        b.iter(|| {
            pool.recycle_all();
            render_frame(
                &viewport,
                grid,
                params,
                ColorScheme::Default,
                &mut pool,
                &mut image,
                &progress,
            )
        });
    });
}

fn bench_coarse_frame(c: &mut Criterion) {
    bench_frame(c, "frame_30x45_depth100", GridSize::new(30, 45).unwrap(), 100);
}

fn bench_default_frame(c: &mut Criterion) {
    bench_frame(
        c,
        "frame_180x270_depth100",
        GridSize::new(180, 270).unwrap(),
        100,
    );
}

fn bench_deep_frame(c: &mut Criterion) {
    bench_frame(
        c,
        "frame_180x270_depth1000",
        GridSize::new(180, 270).unwrap(),
        1000,
    );
}

fn bench_colormap(c: &mut Criterion) {
    c.bench_function("color_of_all_schemes_1000", |b| {
        b.iter(|| {
            for scheme in mandelviz_render::colormap::ALL_SCHEMES {
                for i in 0..1000 {
                    let t = i as f64 / 999.0;
                    criterion::black_box(color_of([t, t, t], scheme));
                }
            }
        });
    });
}

criterion_group!(
    benches,
    bench_coarse_frame,
    bench_default_frame,
    bench_deep_frame,
    bench_colormap
);
criterion_main!(benches);
