use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pixelworks::prelude::*;

const SIZE: u32 = 512;

fn gradient() -> Raster {
    Raster::from_fn(SIZE, SIZE, |x, y| {
        Color::rgb(
            x as f32 / SIZE as f32,
            y as f32 / SIZE as f32,
            ((x + y) % 256) as f32 / 255.0,
        )
    })
    .expect("non-empty raster")
}

pub fn filters(c: &mut Criterion) {
    let source = gradient();
    let registry = FilterRegistry::with_builtins();
    let mut g = c.benchmark_group("filters");

    macro_rules! bench_filter {
        ($label:literal, $name:literal, $options:expr) => {
            g.bench_function($label, |b| {
                let options = $options;
                b.iter(|| {
                    registry
                        .apply($name, black_box(&source), &options)
                        .expect("builtin filter")
                })
            });
        };
    }

    bench_filter!("sepia_parallel", "Sepia", ApplyOptions::new());
    bench_filter!("sepia_sequential", "Sepia", ApplyOptions::sequential());
    bench_filter!("sharpen_parallel", "Sharpen", ApplyOptions::new());
    bench_filter!("sharpen_sequential", "Sharpen", ApplyOptions::sequential());

    g.finish();
}

criterion_group!(benches, filters);
criterion_main!(benches);
