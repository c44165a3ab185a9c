//! Benchmarks for the multichannel biquad.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use dbe::dsp::{Biquad, BiquadCoeffs};

use crate::{bass_signal, BLOCK_SIZES};

pub fn bench_biquad(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/biquad");

    for &size in BLOCK_SIZES {
        let input = bass_signal(size, 2);

        // Sub-bass high-pass over both channels
        let mut hpf = Biquad::new(BiquadCoeffs::highpass(55.0, 0.707, 48_000.0), 2);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("highpass_stereo", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                hpf.process_in_place(black_box(&mut buffer), size, 2);
            })
        });

        // Band-pass on the mono downmix
        let mono: Vec<f32> = input.iter().step_by(2).copied().collect();
        let mut bpf = Biquad::new(BiquadCoeffs::bandpass(55.0, 1.0, 48_000.0), 1);
        let mut buffer = mono.clone();
        group.bench_with_input(BenchmarkId::new("bandpass_mono", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&mono);
                bpf.process_in_place(black_box(&mut buffer), size, 1);
            })
        });

        // Out-of-place, six channels
        let wide = bass_signal(size, 6);
        let mut output = vec![0.0f32; size * 6];
        let mut filter = Biquad::new(BiquadCoeffs::highpass(55.0, 0.707, 48_000.0), 6);
        group.bench_with_input(BenchmarkId::new("highpass_6ch", size), &size, |b, _| {
            b.iter(|| {
                filter.process(black_box(&wide), black_box(&mut output), size, 6);
            })
        });
    }

    group.finish();
}
