//! Deterministic bass-heavy test signal

use std::f32::consts::TAU;

/// Bass line notes in Hz, one per step.
const NOTES: [f32; 4] = [55.0, 65.41, 82.41, 49.0];
/// Length of one note in seconds.
const STEP_SECONDS: f32 = 0.5;

/// A looping bass line with a faint upper partial, identical on every channel.
pub struct BassLine {
    sample_rate: f32,
    phase: f32,
    treble_phase: f32,
    step_len: usize,
    position: usize,
}

impl BassLine {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            phase: 0.0,
            treble_phase: 0.0,
            step_len: (sample_rate * STEP_SECONDS) as usize,
            position: 0,
        }
    }

    fn note(&self) -> f32 {
        NOTES[(self.position / self.step_len) % NOTES.len()]
    }

    /// Fill an interleaved block. Never allocates.
    pub fn render(&mut self, block: &mut [f32], channels: usize) {
        for frame in block.chunks_exact_mut(channels) {
            let freq = self.note();
            // Short fade at each note boundary to avoid clicks.
            let in_step = self.position % self.step_len;
            let edge = (in_step.min(self.step_len - in_step) as f32 / 240.0).min(1.0);

            let bass = self.phase.sin() + 0.3 * (3.0 * self.phase).sin();
            let treble = 0.05 * self.treble_phase.sin();
            let sample = 0.25 * edge * bass + treble;
            frame.fill(sample);

            self.phase = (self.phase + TAU * freq / self.sample_rate) % TAU;
            self.treble_phase = (self.treble_phase + TAU * 1_200.0 / self.sample_rate) % TAU;
            self.position = (self.position + 1) % (self.step_len * NOTES.len());
        }
    }
}
