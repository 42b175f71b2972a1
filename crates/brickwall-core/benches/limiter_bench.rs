//! Criterion benchmarks for the brickwall limiter
//!
//! Run with: cargo bench -p brickwall-core
#![allow(missing_docs)]

use brickwall_core::{ChannelLink, DelayLine, LimiterEngine, LimiterParams, Smoothing};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512, 1024];

fn generate_test_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE;
            (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.95
        })
        .collect()
}

fn bench_delay_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("DelayLine");

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);

        group.bench_with_input(
            BenchmarkId::new("read_write_advance", block_size),
            &block_size,
            |b, _| {
                let mut line = DelayLine::new(256, 240).unwrap();
                b.iter(|| {
                    for &sample in &input {
                        black_box(line.read_write_advance(black_box(sample)));
                    }
                });
            },
        );
    }

    group.finish();
}

fn bench_limiter(c: &mut Criterion) {
    let mut group = c.benchmark_group("Limiter");

    for (name, link) in [
        ("stereo_linked", ChannelLink::Linked),
        ("stereo_independent", ChannelLink::Independent),
    ] {
        for &block_size in BLOCK_SIZES {
            let input = generate_test_signal(block_size);

            group.bench_with_input(BenchmarkId::new(name, block_size), &block_size, |b, _| {
                let params = LimiterParams::default()
                    .with_threshold(0.5)
                    .with_attack(Smoothing::TimeMs(0.5))
                    .with_release(Smoothing::TimeMs(100.0))
                    .with_link(link);
                let mut limiter = LimiterEngine::new(params).unwrap();
                limiter.prepare(2, 240, 256, SAMPLE_RATE).unwrap();
                let mut block = [input.clone(), input.clone()];
                b.iter(|| {
                    limiter.process(black_box(&mut block[..]));
                });
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_delay_line, bench_limiter);
criterion_main!(benches);
