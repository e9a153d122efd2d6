// Cost of turning a drawn signature into the PNG data URL sent on submit.
// Run with: cargo bench --bench signature_export

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use formfill_core::features::signature::SignatureSurface;

fn scribble(surface: &mut SignatureSurface, strokes: usize) {
    for s in 0..strokes {
        let offset = s as f32 * 7.0;
        let points = (0..60)
            .map(|i| {
                let t = i as f32 / 59.0;
                (20.0 + t * 440.0, 100.0 + (t * 12.0 + offset).sin() * 60.0)
            })
            .collect();
        surface.add_stroke(points);
    }
}

fn benchmark_signature_export(c: &mut Criterion) {
    let mut surface = SignatureSurface::new(500, 200, 2.5);
    scribble(&mut surface, 8);

    c.bench_function("signature_rasterize", |b| {
        b.iter(|| black_box(surface.rasterize()))
    });

    c.bench_function("signature_data_url", |b| {
        b.iter(|| black_box(surface.to_data_url()))
    });
}

criterion_group!(benches, benchmark_signature_export);
criterion_main!(benches);
