/*
AGC + Mix
=========

The last stage of the enhanced path. For every frame the band-passed mono
bass signal is scaled by the AGC gain and added to each channel of the
(volume-scaled) multichannel signal:

    out[ch] = in[ch] · volume + mono · agc_gain

The AGC then looks at the loudest sample it just wrote:

    peak > target   →  agc_gain *= attack          (fast, multiplicative)
    otherwise       →  agc_gain moves toward max_gain by `decay` (slow, linear)

`decay` is a fixed rate: the time to swing through the whole boost range,
[`FULL_SCALE_GAIN`], in [`DECAY_MS`]. It does not depend on the current
ceiling, so lowering `max_gain` (even to zero) brings an existing boost down
at the same speed as it would rise.

so the bass boost backs off as soon as the mix would clip and creeps back to
the configured effect level when there is headroom again. `volume` follows
`volume_target` with a one-pole smoother, once per frame.

All state updates happen once per frame, never per channel, so every channel
of a frame sees the same gains.
*/

/// AGC attack time: how quickly the boost backs off when the mix exceeds target.
pub const ATTACK_MS: f32 = 2.0;
/// Time for the boost to move through [`FULL_SCALE_GAIN`].
pub const DECAY_MS: f32 = 500.0;
/// Boost at the highest effect level, 10^(15/20) - 1.
pub const FULL_SCALE_GAIN: f32 = 4.623_413;
/// Volume smoothing time constant.
pub const VOLUME_TC_MS: f32 = 10.0;

#[derive(Debug, Clone, Copy)]
pub struct AgcMix {
    gain: f32,
    max_gain: f32,
    attack: f32,
    decay: f32,
    target: f32,
    volume: f32,
    volume_target: f32,
    volume_tc: f32,
}

impl AgcMix {
    /// AGC with no boost yet and unity volume; call [`AgcMix::configure`]
    /// before use.
    pub fn new() -> Self {
        Self {
            gain: 0.0,
            max_gain: 0.0,
            attack: 1.0,
            decay: 0.0,
            target: 1.0,
            volume: 1.0,
            volume_target: 1.0,
            volume_tc: 0.0,
        }
    }

    /// Non-adapting instance: the boost stays at `gain` and the volume at
    /// `volume` regardless of signal level.
    pub fn fixed(gain: f32, volume: f32) -> Self {
        Self {
            gain,
            max_gain: gain,
            attack: 1.0,
            decay: 0.0,
            target: f32::INFINITY,
            volume,
            volume_target: volume,
            volume_tc: 0.0,
        }
    }

    /// Derive attack/decay from the sample rate and set the boost ceiling
    /// and the peak target. The current gain is kept.
    pub fn configure(&mut self, sample_rate: f32, max_gain: f32, target: f32) {
        let attack_samples = ATTACK_MS * 0.001 * sample_rate;
        let decay_samples = DECAY_MS * 0.001 * sample_rate;

        self.attack = (-1.0 / attack_samples).exp();
        self.decay = FULL_SCALE_GAIN / decay_samples;
        self.max_gain = max_gain.max(0.0);
        self.target = target;
    }

    /// Ramp the volume toward `volume` with the volume time constant.
    pub fn set_volume_target(&mut self, volume: f32, sample_rate: f32) {
        self.volume_target = volume;
        self.volume_tc = 1.0 - (-1.0 / (VOLUME_TC_MS * 0.001 * sample_rate)).exp();
    }

    /// Jump straight to `volume`.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        self.volume_target = volume;
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    pub fn max_gain(&self) -> f32 {
        self.max_gain
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Drop the boost back to zero.
    pub fn reset(&mut self) {
        self.gain = 0.0;
    }

    /// Mix `mono · gain` into `buffer` (in place), adapting the gain per frame.
    pub fn process(&mut self, buffer: &mut [f32], mono: &[f32], frames: usize, channels: usize) {
        let mut gain = self.gain;
        let mut volume = self.volume;

        for (frame, &m) in buffer[..frames * channels]
            .chunks_exact_mut(channels)
            .zip(mono[..frames].iter())
        {
            let boost = m * gain;
            let mut peak = 0.0f32;
            for s in frame.iter_mut() {
                *s = *s * volume + boost;
                peak = peak.max(s.abs());
            }

            if peak > self.target {
                gain *= self.attack;
            } else if gain > self.max_gain {
                gain = (gain - self.decay).max(self.max_gain);
            } else {
                gain = (gain + self.decay).min(self.max_gain);
            }

            volume += (self.volume_target - volume) * self.volume_tc;
        }

        self.gain = gain;
        self.volume = volume;
    }
}

impl Default for AgcMix {
    fn default() -> Self {
        Self::new()
    }
}
