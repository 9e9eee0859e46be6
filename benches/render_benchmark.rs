//! Benchmarks for RTF rendering performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks measure payload hex encoding and block rendering
//! with synthetic image data.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mkrtf::{Block, Document, ImageBlock, ImageDecoder, ImageFormat, ImageInfo, Paragraph};

/// Fixed-geometry decoder so benchmarks skip real codec work.
struct StaticDecoder;

impl ImageDecoder for StaticDecoder {
    fn probe(&self, _data: &[u8]) -> mkrtf::Result<ImageInfo> {
        Ok(ImageInfo {
            pixel_width: 640,
            pixel_height: 480,
            horizontal_dpi: 96.0,
            vertical_dpi: 96.0,
            format: ImageFormat::Png,
        })
    }

    fn reencode(&self, data: &[u8]) -> mkrtf::Result<Vec<u8>> {
        Ok(data.to_vec())
    }
}

/// Synthetic payload with non-uniform bytes.
fn payload(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 % 251) as u8).collect()
}

/// Benchmark payload hex encoding at various sizes.
fn bench_hex_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("hex_encoding");

    for size in [1_024, 16_384, 262_144].iter() {
        let data = payload(*size);

        group.bench_function(format!("{}_bytes", size), |b| {
            b.iter(|| mkrtf::render::encode_payload(black_box(&data)));
        });
    }

    group.finish();
}

/// Benchmark full image block rendering.
fn bench_image_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("image_render");

    for size in [1_024, 65_536].iter() {
        let img = ImageBlock::from_bytes_with_decoder(payload(*size), &StaticDecoder).unwrap();

        group.bench_function(format!("{}_byte_payload", size), |b| {
            b.iter(|| img.render().unwrap());
        });
    }

    group.finish();
}

/// Benchmark a small mixed document.
fn bench_document_render(c: &mut Criterion) {
    let mut doc = Document::new();
    for i in 0..20 {
        doc.add_paragraph(Paragraph::with_text(format!("Paragraph number {}", i)));
    }
    doc.add_image(ImageBlock::from_bytes_with_decoder(payload(16_384), &StaticDecoder).unwrap());

    c.bench_function("document_render", |b| {
        b.iter(|| doc.render().unwrap());
    });
}

criterion_group!(
    benches,
    bench_hex_encoding,
    bench_image_render,
    bench_document_render,
);
criterion_main!(benches);
