// SPDX-License-Identifier: MPL-2.0
use canvas_slider::config::SliderConfig;
use canvas_slider::geometry::PixelRatio;
use canvas_slider::render::{PixmapCanvas, Renderer};
use canvas_slider::test_utils::ready_item;
use canvas_slider::viewport::ViewportState;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn render_frame_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_frame");

    let viewport = ViewportState {
        width: 640.0,
        height: 360.0,
        pixel_ratio: PixelRatio::new(2.0),
    };
    let config = SliderConfig::default();
    let items: Vec<_> = (0..8)
        .map(|i| ready_item(&format!("bench-{i}.png"), 640, 360))
        .collect();
    let refs: Vec<_> = items.iter().collect();

    group.bench_function("paint_640x360_at_2x", |b| {
        b.iter(|| {
            let mut canvas = PixmapCanvas::new(&viewport).expect("surface");
            let renderer = Renderer::new(&config);
            black_box(renderer.paint(&mut canvas, Some(&viewport), 480.0, black_box(&refs)));
        });
    });

    group.finish();
}

criterion_group!(benches, render_frame_benchmark);
criterion_main!(benches);
