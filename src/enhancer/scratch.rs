//! Phase-gated scratch memory for one `process` call.
//!
//! One allocation, made when the instance is built, serves three logical
//! buffers per call:
//!
//! ```text
//!  0            samples                    2·samples          3·max
//!  ├─ enhanced ─┼─ mono (frames) ─┤                  │              │
//!  │            ├──────── bypass (samples) ──────────┤   (unused)   │
//! ```
//!
//! The mono analysis buffer and the bypass-volume buffer share memory. The
//! mono view is only reachable through [`EnhancedPhase`]; the bypass view only
//! through [`BypassPhase`], which consumes the enhanced phase. The enhanced
//! path must therefore finish with the mono signal before the bypass path can
//! write a single sample, and the compiler rejects any reordering.

/// Scratch arena sized for the largest block an instance accepts.
#[derive(Debug, Clone)]
pub struct Scratch {
    buffer: Vec<f32>,
}

impl Scratch {
    /// Allocate `3 × max_channels × max_frames` samples.
    pub fn new(max_channels: usize, max_frames: usize) -> Self {
        Self {
            buffer: vec![0.0; 3 * max_channels * max_frames],
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Start a call of `frames` frames × `channels` channels.
    pub fn split(&mut self, frames: usize, channels: usize) -> EnhancedPhase<'_> {
        let samples = frames * channels;
        debug_assert!(2 * samples <= self.len(), "block larger than scratch");

        let (enhanced, rest) = self.buffer.split_at_mut(samples);
        EnhancedPhase {
            enhanced,
            shared: &mut rest[..samples],
            frames,
        }
    }

    #[cfg(test)]
    pub(crate) fn fill(&mut self, value: f32) {
        self.buffer.fill(value);
    }
}

/// First phase: the enhanced path and its mono analysis buffer are live.
pub struct EnhancedPhase<'a> {
    enhanced: &'a mut [f32],
    shared: &'a mut [f32],
    frames: usize,
}

impl<'a> EnhancedPhase<'a> {
    /// The multichannel enhanced buffer and the mono analysis buffer.
    pub fn enhanced_and_mono(&mut self) -> (&mut [f32], &mut [f32]) {
        (&mut *self.enhanced, &mut self.shared[..self.frames])
    }

    /// End the enhanced phase. The mono signal is dead from here on and its
    /// memory is handed out again as the bypass buffer; the enhanced buffer
    /// becomes read-only.
    pub fn into_bypass_phase(self) -> BypassPhase<'a> {
        BypassPhase {
            enhanced: self.enhanced,
            bypass: self.shared,
        }
    }
}

/// Second phase: the finished enhanced signal and the bypass buffer.
pub struct BypassPhase<'a> {
    pub enhanced: &'a [f32],
    pub bypass: &'a mut [f32],
}
