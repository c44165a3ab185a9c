//! Low-level DSP primitives used by the bass enhancer.
//!
//! These components are allocation-free and realtime-safe once built. They
//! stay focused on the signal-processing math; the `enhancer` module layers
//! scratch management, path selection and parameter handling on top.

/// Automatic gain control that mixes a mono bass signal back into a
/// multichannel buffer.
pub mod agc;
/// Multichannel second-order IIR filter.
pub mod biquad;
/// Multichannel to mono downmix.
pub mod downmix;
/// Smoothed, saturating one- and two-input mixers.
pub mod mixer;

pub use agc::AgcMix;
pub use biquad::{Biquad, BiquadCoeffs};
pub use downmix::multichannel_to_mono;
pub use mixer::{MixerStream, SoftMixer, SoftMixer2};

/// Clamp a sample to the representable range.
#[inline]
pub fn saturate(x: f32) -> f32 {
    x.clamp(-1.0, 1.0)
}

/// Convert decibels to a linear gain factor.
#[inline]
pub fn db_to_gain(db: f32) -> f32 {
    10.0f32.powf(db / 20.0)
}
