//! Benchmarks for the smoothed mixers.
//!
//! Settled streams take the constant-gain loop; ramping streams pay for a
//! per-frame gain update, so both are measured.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use dbe::dsp::{SoftMixer, SoftMixer2};

use crate::{bass_signal, BLOCK_SIZES};

pub fn bench_mixer(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/mixer");

    for &size in BLOCK_SIZES {
        let a = bass_signal(size, 2);
        let b_in: Vec<f32> = a.iter().map(|s| s * 0.5).collect();
        let mut output = vec![0.0f32; size * 2];

        let mut settled = SoftMixer::new(0.8);
        group.bench_with_input(BenchmarkId::new("soft_settled", size), &size, |b, _| {
            b.iter(|| {
                settled.mix(black_box(&a), black_box(&mut output), size, 2);
            })
        });

        let mut ramping = SoftMixer::new(0.0);
        ramping.stream_mut().set_time_constant(100_000.0, 48_000.0);
        group.bench_with_input(BenchmarkId::new("soft_ramping", size), &size, |b, _| {
            b.iter(|| {
                let target = if ramping.stream().current() < 0.5 { 1.0 } else { 0.0 };
                ramping.stream_mut().set_target(target);
                ramping.mix(black_box(&a), black_box(&mut output), size, 2);
            })
        });

        let mut crossfade = SoftMixer2::new(1.0, 0.0);
        for i in 0..2 {
            crossfade.stream_mut(i).set_time_constant(100_000.0, 48_000.0);
        }
        group.bench_with_input(BenchmarkId::new("crossfade", size), &size, |b, _| {
            b.iter(|| {
                let to_b = crossfade.stream(0).current() > 0.5;
                crossfade.stream_mut(0).set_target(if to_b { 0.0 } else { 1.0 });
                crossfade.stream_mut(1).set_target(if to_b { 1.0 } else { 0.0 });
                crossfade.mix(black_box(&a), black_box(&b_in), black_box(&mut output), size, 2);
            })
        });
    }

    group.finish();
}
