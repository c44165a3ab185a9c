use crate::{dsp::multichannel_to_mono, error::DbeError};

use super::{scratch::BypassPhase, BassEnhancer};

/*
Per-block pipeline
==================

      input ──┬─► copy ─► [HPF] ─┬──────────────────────────► AGC ─► enhanced ─┐
              │                  └─► downmix ─► mono ─► BPF ──┘                ├─► blend ─► output
              └─► bypass volume ─────────────────────────────────► bypass ─────┘

The mono buffer and the bypass buffer occupy the same scratch memory. The
enhanced path runs to completion (AGC has consumed the mono signal) before
the bypass path writes anything. `Scratch` enforces the order: the bypass
buffer only exists once the enhanced phase has been given up.

Which paths run is decided per block by `PathState`; a skipped path
contributes a zero-filled buffer, and at least one path always runs.
*/

impl BassEnhancer {
    /// Process one block of `frames` interleaved frames.
    ///
    /// Writes exactly `channels × frames` samples to `output`. Fails with
    /// [`DbeError::TooManySamples`] when `frames` exceeds the configured
    /// maximum block size; nothing is written and no state changes in that
    /// case. A zero-frame block is a no-op.
    ///
    /// # Panics
    ///
    /// If `input` or `output` is shorter than `channels × frames` samples.
    pub fn process(
        &mut self,
        input: &[f32],
        output: &mut [f32],
        frames: usize,
    ) -> Result<(), DbeError> {
        let max = self.capabilities.max_block_size;
        if frames > max {
            return Err(DbeError::TooManySamples { frames, max });
        }
        if frames == 0 {
            return Ok(());
        }

        let channels = self.params.channels;
        let samples = frames * channels;
        let input = &input[..samples];
        let output = &mut output[..samples];

        let enhanced_path = self.enhanced_path();
        let bypass_path = self.bypass_path();
        debug_assert!(
            enhanced_path.is_computed() || bypass_path.is_computed(),
            "both paths silent"
        );

        let hpf_enabled = self.hpf_enabled();
        let mut phase = self.scratch.split(frames, channels);

        {
            let (enhanced, mono) = phase.enhanced_and_mono();
            if enhanced_path.is_computed() {
                enhanced.copy_from_slice(input);
                if hpf_enabled {
                    self.hpf.process_in_place(enhanced, frames, channels);
                }
                multichannel_to_mono(enhanced, mono, frames, channels);
                self.bpf.process_in_place(mono, frames, 1);
                self.agc.process(enhanced, mono, frames, channels);
            } else {
                enhanced.fill(0.0);
            }
        }

        // Mono is dead from here; its memory is the bypass buffer.
        let BypassPhase { enhanced, bypass } = phase.into_bypass_phase();

        if bypass_path.is_computed() {
            self.bypass_volume.mix(input, bypass, frames, channels);
        } else {
            bypass.fill(0.0);
        }

        self.bypass_mixer
            .mix(enhanced, bypass, output, frames, channels);

        Ok(())
    }
}
