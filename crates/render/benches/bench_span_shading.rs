use std::hint::black_box;
use std::time::Instant;

use volition_common::ColorArgb;
use volition_render::{AlphaInterpolator, FlatInterpolator, Interpolator, Renderer};

fn bench_spans<I: Interpolator>(label: &str, interpolator: &mut I, iterations: usize) {
    let mut renderer = Renderer::new(640, 480).expect("frame buffer");
    renderer.clear(ColorArgb::from_xrgb(10, 20, 30));
    let lit = [ColorArgb::from_argb(0x80, 200, 100, 50); 3];

    let start = Instant::now();
    let mut pixels = 0usize;
    for _ in 0..iterations {
        for y in 0..renderer.height() {
            pixels += renderer.draw_span(black_box(&mut *interpolator), lit, y, 0..renderer.width());
        }
    }
    let elapsed = start.elapsed();
    let per_pixel = elapsed.as_nanos() as f64 / pixels as f64;

    println!(
        "{label:>6}: {iterations} frames, {pixels} pixels in {elapsed:?} ({per_pixel:.2} ns/pixel)"
    );
}

fn main() {
    println!("=== Span Shading Benchmarks ===\n");
    bench_spans("flat", &mut FlatInterpolator::new(), 50);
    bench_spans("alpha", &mut AlphaInterpolator::new(), 50);
}
