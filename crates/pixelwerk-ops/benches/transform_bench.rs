// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the pixel transforms in the pixelwerk-ops crate.
// Each transform runs against a 256x256 RGBA gradient already loaded into a
// session, so only the transform itself is measured.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use pixelwerk_core::types::{Channels, CropRegion, FilterParameters, ImageDescriptor};
use pixelwerk_ops::Processor;
use pixelwerk_ops::pipeline::presets;

const SIDE: u32 = 256;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn loaded_session() -> (Processor, ImageDescriptor) {
    let desc = ImageDescriptor::new(SIDE, SIDE, Channels::Rgba);
    let data: Vec<u8> = (0..SIDE * SIDE * 4)
        .map(|i| ((i * 7 + i / 1024) % 256) as u8)
        .collect();

    let mut processor = Processor::default();
    processor
        .initialize(data.len())
        .expect("bench session should allocate");
    processor.load_input(&data).expect("bench data should fit");
    (processor, desc)
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_transforms(c: &mut Criterion) {
    let (mut processor, desc) = loaded_session();
    let filters = FilterParameters {
        brightness: 0.05,
        contrast: 1.15,
        saturation: 1.2,
        sharpness: 0.3,
        gamma: 1.0,
    };

    c.bench_function("resize 256->128 (rgba)", |b| {
        b.iter(|| processor.resize(black_box(desc), 128, 128))
    });
    c.bench_function("crop 128x128 (rgba)", |b| {
        b.iter(|| processor.crop(black_box(desc), CropRegion::new(64, 64, 128, 128)))
    });
    c.bench_function("apply_filters (rgba)", |b| {
        b.iter(|| processor.apply_filters(black_box(desc), filters))
    });
    c.bench_function("detect_edges (rgba)", |b| {
        b.iter(|| processor.detect_edges(black_box(desc), 50.0))
    });
    c.bench_function("equalize_histogram (rgba)", |b| {
        b.iter(|| processor.equalize_histogram(black_box(desc)))
    });
    c.bench_function("blur r=2 (rgba)", |b| {
        b.iter(|| processor.blur(black_box(desc), 2))
    });
    c.bench_function("color_temperature 3500K (rgba)", |b| {
        b.iter(|| processor.adjust_color_temperature(black_box(desc), 3500.0))
    });
}

fn bench_presets(c: &mut Criterion) {
    let (mut processor, desc) = loaded_session();
    let pipeline = presets::enhance_product();

    c.bench_function("enhance_product preset (rgba)", |b| {
        b.iter(|| black_box(pipeline.run(&mut processor, desc).is_success()))
    });
}

criterion_group!(benches, bench_transforms, bench_presets);
criterion_main!(benches);
