use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Biquad Filter (multichannel)
============================

A second-order IIR section in transposed direct form II. The bass enhancer
uses two of them: a high-pass that strips sub-bass before the analysis path
(so the AGC does not chase energy the speaker cannot reproduce) and a
band-pass that isolates the band to be boosted.

Difference equation (normalised so a0 = 1):

    y[n] = b0·x[n] + b1·x[n-1] + b2·x[n-2] - a1·y[n-1] - a2·y[n-2]

Transposed DF-II keeps two state words per channel:

    y  = b0·x + s0
    s0 = b1·x - a1·y + s1
    s1 = b2·x - a2·y

One coefficient set is shared by every channel; each channel owns its own
(s0, s1) pair. State storage is sized for the instance's maximum channel
count when the filter is built, so processing never allocates.

| design    | passes            | used for                          |
| --------- | ----------------- | --------------------------------- |
| identity  | everything        | tests, bypassed stages            |
| high-pass | above cutoff      | sub-bass removal before analysis  |
| band-pass | around the centre | the bass band fed into the AGC    |

Designs follow the RBJ audio-EQ cookbook. The band-pass uses the "constant
0 dB peak gain" variant so the centre frequency passes at unity.
*/

/// State magnitudes below this are flushed to zero to avoid denormals.
const DENORMAL_FLOOR: f32 = 1.0e-30;

/// Normalised biquad coefficients (a0 already divided out).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoeffs {
    pub b0: f32,
    pub b1: f32,
    pub b2: f32,
    pub a1: f32,
    pub a2: f32,
}

impl BiquadCoeffs {
    /// Passes input through unchanged.
    pub const IDENTITY: Self = Self {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };

    /// Second-order high-pass (RBJ).
    pub fn highpass(cutoff_hz: f32, q: f32, sample_rate: f32) -> Self {
        let w0 = TAU * cutoff_hz / sample_rate;
        let alpha = w0.sin() / (2.0 * q.max(1e-6));
        let cw0 = w0.cos();
        let inv_a0 = 1.0 / (1.0 + alpha);

        Self {
            b0: ((1.0 + cw0) * 0.5) * inv_a0,
            b1: -(1.0 + cw0) * inv_a0,
            b2: ((1.0 + cw0) * 0.5) * inv_a0,
            a1: (-2.0 * cw0) * inv_a0,
            a2: (1.0 - alpha) * inv_a0,
        }
    }

    /// Second-order band-pass with 0 dB gain at the centre (RBJ).
    pub fn bandpass(centre_hz: f32, q: f32, sample_rate: f32) -> Self {
        let w0 = TAU * centre_hz / sample_rate;
        let alpha = w0.sin() / (2.0 * q.max(1e-6));
        let cw0 = w0.cos();
        let inv_a0 = 1.0 / (1.0 + alpha);

        Self {
            b0: alpha * inv_a0,
            b1: 0.0,
            b2: -alpha * inv_a0,
            a1: (-2.0 * cw0) * inv_a0,
            a2: (1.0 - alpha) * inv_a0,
        }
    }
}

impl Default for BiquadCoeffs {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Biquad filter over interleaved multichannel audio.
#[derive(Debug, Clone)]
pub struct Biquad {
    coeffs: BiquadCoeffs,
    state: Vec<[f32; 2]>,
}

impl Biquad {
    /// Build a filter with history for up to `max_channels` channels.
    pub fn new(coeffs: BiquadCoeffs, max_channels: usize) -> Self {
        Self {
            coeffs,
            state: vec![[0.0; 2]; max_channels.max(1)],
        }
    }

    pub fn identity(max_channels: usize) -> Self {
        Self::new(BiquadCoeffs::IDENTITY, max_channels)
    }

    pub fn coeffs(&self) -> BiquadCoeffs {
        self.coeffs
    }

    /// Swap coefficients. History is kept; call [`Biquad::reset`] as well
    /// when the response changes drastically.
    pub fn set_coeffs(&mut self, coeffs: BiquadCoeffs) {
        self.coeffs = coeffs;
    }

    pub fn max_channels(&self) -> usize {
        self.state.len()
    }

    /// Clear the delay state of every channel.
    pub fn reset(&mut self) {
        self.state.fill([0.0; 2]);
    }

    #[inline]
    fn tick(c: &BiquadCoeffs, s: &mut [f32; 2], x: f32) -> f32 {
        let y = c.b0 * x + s[0];
        let s0 = c.b1 * x - c.a1 * y + s[1];
        let s1 = c.b2 * x - c.a2 * y;
        s[0] = if s0.abs() < DENORMAL_FLOOR { 0.0 } else { s0 };
        s[1] = if s1.abs() < DENORMAL_FLOOR { 0.0 } else { s1 };
        y
    }

    /// Filter `frames` interleaved frames from `input` into `output`.
    pub fn process(&mut self, input: &[f32], output: &mut [f32], frames: usize, channels: usize) {
        debug_assert!(channels <= self.max_channels(), "more channels than filter state");
        let samples = frames * channels;
        let coeffs = self.coeffs;

        for (in_frame, out_frame) in input[..samples]
            .chunks_exact(channels)
            .zip(output[..samples].chunks_exact_mut(channels))
        {
            for ((x, y), s) in in_frame
                .iter()
                .zip(out_frame.iter_mut())
                .zip(self.state.iter_mut())
            {
                *y = Self::tick(&coeffs, s, *x);
            }
        }
    }

    /// Filter `frames` interleaved frames of `buffer` in place.
    pub fn process_in_place(&mut self, buffer: &mut [f32], frames: usize, channels: usize) {
        debug_assert!(channels <= self.max_channels(), "more channels than filter state");
        let samples = frames * channels;
        let coeffs = self.coeffs;

        for frame in buffer[..samples].chunks_exact_mut(channels) {
            for (x, s) in frame.iter_mut().zip(self.state.iter_mut()) {
                *x = Self::tick(&coeffs, s, *x);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 48_000.0;

    fn sine(freq: f32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| (TAU * freq * i as f32 / SAMPLE_RATE).sin())
            .collect()
    }

    fn peak_after_transient(buffer: &[f32]) -> f32 {
        let skip = buffer.len() / 2;
        buffer[skip..].iter().fold(0.0f32, |acc, &x| acc.max(x.abs()))
    }

    #[test]
    fn test_identity_is_exact() {
        let mut filter = Biquad::identity(2);
        let input: Vec<f32> = (0..64).map(|i| (i as f32 * 0.37).sin() * 0.8).collect();
        let mut output = vec![0.0; 64];

        filter.process(&input, &mut output, 32, 2);

        assert_eq!(input, output);
    }

    #[test]
    fn test_highpass_removes_dc() {
        let mut filter = Biquad::new(BiquadCoeffs::highpass(55.0, 0.707, SAMPLE_RATE), 1);
        let mut buffer = vec![1.0; 48_000];

        filter.process_in_place(&mut buffer, 48_000, 1);

        assert!(
            buffer[47_999].abs() < 1e-3,
            "DC should decay through the high-pass, got {}",
            buffer[47_999]
        );
    }

    #[test]
    fn test_bandpass_emphasizes_centre() {
        let coeffs = BiquadCoeffs::bandpass(55.0, 1.0, SAMPLE_RATE);
        let len = 48_000;

        let mut centre = sine(55.0, len);
        let mut filter = Biquad::new(coeffs, 1);
        filter.process_in_place(&mut centre, len, 1);

        let mut far = sine(2_000.0, len);
        let mut filter = Biquad::new(coeffs, 1);
        filter.process_in_place(&mut far, len, 1);

        let centre_peak = peak_after_transient(&centre);
        let far_peak = peak_after_transient(&far);
        assert!(
            (centre_peak - 1.0).abs() < 0.05,
            "centre should pass near unity, got {}",
            centre_peak
        );
        assert!(
            far_peak < centre_peak * 0.1,
            "expected far band rejected, centre={}, far={}",
            centre_peak,
            far_peak
        );
    }

    #[test]
    fn test_channels_keep_separate_state() {
        let mut filter = Biquad::new(BiquadCoeffs::bandpass(78.0, 1.0, SAMPLE_RATE), 2);
        // Left carries an impulse, right stays silent.
        let mut buffer = vec![0.0; 256];
        buffer[0] = 1.0;

        filter.process_in_place(&mut buffer, 128, 2);

        assert!(buffer.iter().step_by(2).any(|&s| s != 0.0));
        assert!(buffer.iter().skip(1).step_by(2).all(|&s| s == 0.0));
    }

    #[test]
    fn test_silence_stays_silent_after_reset() {
        let mut filter = Biquad::new(BiquadCoeffs::highpass(90.0, 0.707, SAMPLE_RATE), 2);
        let mut loud = sine(440.0, 512);
        filter.process_in_place(&mut loud, 256, 2);

        filter.reset();
        let mut silence = vec![0.0; 512];
        filter.process_in_place(&mut silence, 256, 2);

        assert!(silence.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_process_only_touches_requested_frames() {
        let mut filter = Biquad::identity(2);
        let input = vec![0.5; 20];
        let mut output = vec![-1.0; 20];

        filter.process(&input, &mut output, 4, 2);

        assert!(output[..8].iter().all(|&s| s == 0.5));
        assert!(output[8..].iter().all(|&s| s == -1.0));
    }
}
