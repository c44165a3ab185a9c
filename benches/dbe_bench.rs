//! Benchmarks for the bass enhancer's primitives and full pipeline.
//!
//! Run with: cargo bench
//!
//! Reference timing at 48kHz sample rate:
//!   - 64 frames  = 1.33ms deadline
//!   - 128 frames = 2.67ms deadline
//!   - 256 frames = 5.33ms deadline
//!   - 512 frames = 10.67ms deadline
//!
//! Benchmark groups:
//!   - dsp/*        Biquad, downmix, AGC and mixers in isolation
//!   - scenarios/*  `BassEnhancer::process` in each operating state

use criterion::{criterion_group, criterion_main};

mod dsp;
mod scenarios;

/// Common buffer sizes used in audio applications.
pub const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512];

/// Stereo test signal: a 55 Hz tone with a little 1 kHz on top.
pub fn bass_signal(frames: usize, channels: usize) -> Vec<f32> {
    (0..frames * channels)
        .map(|i| {
            let t = (i / channels) as f32 / 48_000.0;
            0.3 * (std::f32::consts::TAU * 55.0 * t).sin()
                + 0.05 * (std::f32::consts::TAU * 1_000.0 * t).sin()
        })
        .collect()
}

criterion_group!(
    benches,
    // Low-level DSP primitives
    dsp::bench_biquad,
    dsp::bench_downmix,
    dsp::bench_agc,
    dsp::bench_mixer,
    // Full pipeline
    scenarios::bench_enhancer,
);
criterion_main!(benches);
