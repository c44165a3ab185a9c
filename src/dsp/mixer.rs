use super::saturate;

/*
Smoothed Saturating Mixers
==========================

A gain change applied in one step produces a click. These mixers never jump:
every input carries a `MixerStream` whose `current` gain walks linearly toward
its `target`, one `delta` per frame, and every output sample is clamped to
[-1.0, +1.0] instead of wrapping or overflowing.

Vocabulary
----------

  current    Gain applied to the frame being written.
  target     Gain the stream is heading for. Set by the control plane.
  delta      Per-frame step. Derived from a time constant:
                 delta = 1000 / (tc_ms · sample_rate)
             so a full 0 → 1 swing takes `tc_ms`. tc_ms = 0 means "instant".
  settled    current == target. A settled stream costs one multiply per
             sample (or nothing at all when the target is 0).

Lifecycle of one stream
-----------------------

    settled(0) ──set_target(1)──► ramping ──reaches 1──► settled(1)
        ▲                                                   │
        └────────── reaches 0 ◄── ramping ◄──set_target(0)──┘

Nothing in here changes a target. Callers only observe `is_settled()` to
decide whether a path feeding the mixer still has to be computed.

Snapping
--------

Once |current - target| drops below one step the stream snaps onto the
target, so a ramp always ends in an exactly settled state and the caller's
"is this path still audible?" question gets a crisp answer.

Two-input mixing
----------------

`SoftMixer2` crossfades two signals, each with its own stream:

    stream A settled at 0   →  output = mix(B)          (A is skipped)
    stream B settled at 0   →  output = mix(A)          (B is skipped)
    either stream ramping   →  output = mix(A); output += mix(B)
    both settled            →  output = sat(A·gA + B·gB)

The first two cases are what make a fully-on or fully-off effect
bit-identical to its single surviving path.
*/

/// Gain state of one mixer input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixerStream {
    current: f32,
    target: f32,
    delta: f32,
}

impl MixerStream {
    /// Stream settled at `gain`, with instant transitions until a time
    /// constant is set.
    pub fn new(gain: f32) -> Self {
        Self {
            current: gain,
            target: gain,
            delta: 1.0,
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn delta(&self) -> f32 {
        self.delta
    }

    #[inline]
    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Jump to `gain` immediately (both current and target).
    pub fn set_gain(&mut self, gain: f32) {
        self.current = gain;
        self.target = gain;
    }

    /// Make a full 0 → 1 swing take `tc_ms` milliseconds.
    pub fn set_time_constant(&mut self, tc_ms: f32, sample_rate: f32) {
        self.delta = if tc_ms > 0.0 {
            (1000.0 / (tc_ms * sample_rate)).clamp(1.0e-7, 1.0)
        } else {
            1.0
        };
    }

    /// Snap onto the target when less than one step away. Returns whether
    /// the stream is settled afterwards.
    #[inline]
    fn snap_if_close(&mut self) -> bool {
        if !self.is_settled() && (self.delta >= 1.0 || (self.current - self.target).abs() < self.delta)
        {
            self.current = self.target;
        }
        self.is_settled()
    }

    #[inline]
    fn step(&mut self) -> f32 {
        self.current = if self.current < self.target {
            (self.current + self.delta).min(self.target)
        } else {
            (self.current - self.delta).max(self.target)
        };
        self.current
    }
}

impl Default for MixerStream {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Write `sat(input · gain)` into `output`, stepping the gain per frame.
fn mix_stream(
    stream: &mut MixerStream,
    input: &[f32],
    output: &mut [f32],
    frames: usize,
    channels: usize,
) {
    let samples = frames * channels;
    let (input, output) = (&input[..samples], &mut output[..samples]);

    if !stream.snap_if_close() {
        for (in_frame, out_frame) in input
            .chunks_exact(channels)
            .zip(output.chunks_exact_mut(channels))
        {
            let gain = stream.step();
            for (&x, y) in in_frame.iter().zip(out_frame.iter_mut()) {
                *y = saturate(x * gain);
            }
        }
        stream.snap_if_close();
        return;
    }

    let gain = stream.target;
    if gain == 0.0 {
        output.fill(0.0);
    } else {
        for (&x, y) in input.iter().zip(output.iter_mut()) {
            *y = saturate(x * gain);
        }
    }
}

/// Accumulate `input · gain` onto `output` with saturation.
fn mix_in_stream(
    stream: &mut MixerStream,
    input: &[f32],
    output: &mut [f32],
    frames: usize,
    channels: usize,
) {
    let samples = frames * channels;
    let (input, output) = (&input[..samples], &mut output[..samples]);

    if !stream.snap_if_close() {
        for (in_frame, out_frame) in input
            .chunks_exact(channels)
            .zip(output.chunks_exact_mut(channels))
        {
            let gain = stream.step();
            for (&x, y) in in_frame.iter().zip(out_frame.iter_mut()) {
                *y = saturate(*y + x * gain);
            }
        }
        stream.snap_if_close();
        return;
    }

    let gain = stream.target;
    if gain != 0.0 {
        for (&x, y) in input.iter().zip(output.iter_mut()) {
            *y = saturate(*y + x * gain);
        }
    }
}

/// Single-input smoothed, saturating gain stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoftMixer {
    stream: MixerStream,
}

impl SoftMixer {
    pub fn new(gain: f32) -> Self {
        Self {
            stream: MixerStream::new(gain),
        }
    }

    pub fn stream(&self) -> &MixerStream {
        &self.stream
    }

    pub fn stream_mut(&mut self) -> &mut MixerStream {
        &mut self.stream
    }

    /// `output = sat(input · gain)` over `frames` interleaved frames.
    pub fn mix(&mut self, input: &[f32], output: &mut [f32], frames: usize, channels: usize) {
        if frames == 0 {
            return;
        }
        mix_stream(&mut self.stream, input, output, frames, channels);
    }

    /// `output = sat(output + input · gain)` over `frames` interleaved frames.
    pub fn mix_in(&mut self, input: &[f32], output: &mut [f32], frames: usize, channels: usize) {
        if frames == 0 {
            return;
        }
        mix_in_stream(&mut self.stream, input, output, frames, channels);
    }
}

/// Two-input smoothed, saturating crossfader.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoftMixer2 {
    streams: [MixerStream; 2],
}

impl SoftMixer2 {
    pub fn new(gain_a: f32, gain_b: f32) -> Self {
        Self {
            streams: [MixerStream::new(gain_a), MixerStream::new(gain_b)],
        }
    }

    /// Stream 0 weights input `a`, stream 1 weights input `b`.
    pub fn stream(&self, index: usize) -> &MixerStream {
        &self.streams[index]
    }

    pub fn stream_mut(&mut self, index: usize) -> &mut MixerStream {
        &mut self.streams[index]
    }

    pub fn is_settled(&self) -> bool {
        self.streams.iter().all(MixerStream::is_settled)
    }

    /// Crossfade `a` and `b` into `output` over `frames` interleaved frames.
    pub fn mix(
        &mut self,
        a: &[f32],
        b: &[f32],
        output: &mut [f32],
        frames: usize,
        channels: usize,
    ) {
        if frames == 0 {
            return;
        }

        let [stream_a, stream_b] = &mut self.streams;

        if stream_a.is_settled() && stream_a.current() == 0.0 {
            mix_stream(stream_b, b, output, frames, channels);
        } else if stream_b.is_settled() && stream_b.current() == 0.0 {
            mix_stream(stream_a, a, output, frames, channels);
        } else if !stream_a.is_settled() || !stream_b.is_settled() {
            mix_stream(stream_a, a, output, frames, channels);
            mix_in_stream(stream_b, b, output, frames, channels);
        } else {
            let samples = frames * channels;
            let (gain_a, gain_b) = (stream_a.current(), stream_b.current());
            for ((&sa, &sb), o) in a[..samples]
                .iter()
                .zip(b[..samples].iter())
                .zip(output[..samples].iter_mut())
            {
                *o = saturate(sa * gain_a + sb * gain_b);
            }
        }
    }
}
