// SPDX-License-Identifier: MPL-2.0
//! Renders one slider frame from image files into a PNG.
//!
//! Usage: render_frame_png <output.png> <image> [<image>...]

use canvas_slider::config::SliderConfig;
use canvas_slider::media::FileFetcher;
use canvas_slider::render::PixmapCanvas;
use canvas_slider::slider::CanvasSlider;
use canvas_slider::test_utils::ManualScheduler;
use std::env;
use std::process;
use std::sync::Arc;

fn main() {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <output.png> <image> [<image>...]", args[0]);
        process::exit(1);
    }
    let output = &args[1];
    let sources: Vec<String> = args[2..].to_vec();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");

    let mut scheduler = ManualScheduler::new();
    let mut slider = CanvasSlider::new(
        SliderConfig::default(),
        Arc::new(FileFetcher::new()),
        runtime.handle().clone(),
    );
    slider.set_items(sources, &mut scheduler);
    slider.resize(960.0, 540.0, 1.0);
    runtime.block_on(slider.wait_for_loads());

    let viewport = *slider.viewport().state().expect("viewport measured");
    let mut canvas = PixmapCanvas::new(&viewport).expect("drawing surface");
    slider.paint(&mut canvas);

    canvas.pixmap().save_png(output).expect("write png");
    println!("{} item(s) rendered to {}", slider.items().len(), output);
}
