//! Full-pipeline benchmarks.

mod enhancer;

pub use enhancer::bench_enhancer;
