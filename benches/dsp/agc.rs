//! Benchmarks for the downmix and AGC stages.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use dbe::dsp::{db_to_gain, multichannel_to_mono, AgcMix};

use crate::{bass_signal, BLOCK_SIZES};

pub fn bench_downmix(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/downmix");

    for &size in BLOCK_SIZES {
        for channels in [2, 6] {
            let input = bass_signal(size, channels);
            let mut mono = vec![0.0f32; size];
            group.bench_with_input(
                BenchmarkId::new(format!("{}ch", channels), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        multichannel_to_mono(black_box(&input), black_box(&mut mono), size, channels);
                    })
                },
            );
        }
    }

    group.finish();
}

pub fn bench_agc(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/agc");

    for &size in BLOCK_SIZES {
        let input = bass_signal(size, 2);
        let mono: Vec<f32> = input.iter().step_by(2).copied().collect();

        let mut agc = AgcMix::new();
        agc.configure(48_000.0, db_to_gain(6.0) - 1.0, db_to_gain(-0.1));
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("stereo", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                agc.process(black_box(&mut buffer), black_box(&mono), size, 2);
            })
        });
    }

    group.finish();
}
