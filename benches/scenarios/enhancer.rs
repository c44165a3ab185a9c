//! `BassEnhancer::process` in each operating state.
//!
//! "on" and "off" exercise the settled fast paths where only one branch is
//! computed; "crossfade" keeps the blend mixer moving so both branches run
//! every block.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use dbe::{BassEnhancer, Capabilities, HpfSelect, OperatingMode, Params};

use crate::{bass_signal, BLOCK_SIZES};

fn enhancer(mode: OperatingMode, hpf: HpfSelect) -> BassEnhancer {
    BassEnhancer::new(
        Capabilities::default(),
        Params::default()
            .with_mode(mode)
            .with_hpf(hpf)
            .with_effect_level(9),
    )
    .expect("valid bench configuration")
}

pub fn bench_enhancer(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/enhancer");

    for &size in BLOCK_SIZES {
        let input = bass_signal(size, 2);
        let mut output = vec![0.0f32; size * 2];

        let mut off = enhancer(OperatingMode::Off, HpfSelect::Off);
        group.bench_with_input(BenchmarkId::new("off", size), &size, |b, _| {
            b.iter(|| {
                off.process(black_box(&input), black_box(&mut output), size)
                    .expect("block fits");
            })
        });

        let mut on = enhancer(OperatingMode::On, HpfSelect::Off);
        group.bench_with_input(BenchmarkId::new("on", size), &size, |b, _| {
            b.iter(|| {
                on.process(black_box(&input), black_box(&mut output), size)
                    .expect("block fits");
            })
        });

        let mut on_hpf = enhancer(OperatingMode::On, HpfSelect::On);
        group.bench_with_input(BenchmarkId::new("on_hpf", size), &size, |b, _| {
            b.iter(|| {
                on_hpf
                    .process(black_box(&input), black_box(&mut output), size)
                    .expect("block fits");
            })
        });

        // Flip the mode whenever a fade finishes so every iteration blends.
        let mut fading = enhancer(OperatingMode::Off, HpfSelect::On);
        group.bench_with_input(BenchmarkId::new("crossfade", size), &size, |b, _| {
            b.iter(|| {
                if fading.is_settled() {
                    let params = *fading.params();
                    fading
                        .set_params(params.with_mode(params.operating_mode.toggled()))
                        .expect("valid params");
                }
                fading
                    .process(black_box(&input), black_box(&mut output), size)
                    .expect("block fits");
            })
        });
    }

    group.finish();
}
