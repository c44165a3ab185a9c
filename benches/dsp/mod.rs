//! Benchmarks for low-level DSP primitives.

mod agc;
mod biquad;
mod mixer;

pub use agc::{bench_agc, bench_downmix};
pub use biquad::bench_biquad;
pub use mixer::bench_mixer;
