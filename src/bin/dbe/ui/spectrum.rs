//! Low-frequency spectrum analyzer widget
//!
//! Hann-windowed FFT of the output, sampled at log-spaced frequencies
//! between [`MIN_FREQ`] and [`MAX_FREQ`] so the bass band fills the chart.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

const SPECTRUM_BINS: usize = 64;
const MIN_FREQ: f32 = 20.0;
const MAX_FREQ: f32 = 2_000.0;
const FLOOR_DB: f64 = -100.0;

pub struct SpectrumAnalyzer {
    window: Vec<f32>,
    /// FFT bin for each displayed point
    bin_indices: Vec<usize>,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    /// (log10 frequency, magnitude dB) per displayed point
    spectrum: Vec<(f64, f64)>,
}

impl SpectrumAnalyzer {
    pub fn new(buffer_len: usize, sample_rate: f32) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(buffer_len);

        let window: Vec<f32> = (0..buffer_len)
            .map(|i| {
                if buffer_len > 1 {
                    let denom = (buffer_len - 1) as f32;
                    0.5 * (1.0 - (std::f32::consts::TAU * i as f32 / denom).cos())
                } else {
                    1.0
                }
            })
            .collect();

        let max_freq = MAX_FREQ.min(sample_rate / 2.0);
        let ratio = (max_freq / MIN_FREQ) as f64;
        let half = (buffer_len / 2).max(1);

        let mut bin_indices = Vec::with_capacity(SPECTRUM_BINS);
        let mut spectrum = Vec::with_capacity(SPECTRUM_BINS);
        for i in 0..SPECTRUM_BINS {
            let t = i as f64 / (SPECTRUM_BINS - 1) as f64;
            let freq = MIN_FREQ as f64 * ratio.powf(t);
            let index = ((freq * buffer_len as f64 / sample_rate as f64).round() as usize)
                .min(half - 1);
            bin_indices.push(index);
            spectrum.push((freq.log10(), FLOOR_DB));
        }

        Self {
            window,
            bin_indices,
            fft,
            scratch: vec![Complex::new(0.0, 0.0); buffer_len],
            spectrum,
        }
    }

    /// Recompute from `buffer`; ignored unless it matches the FFT size.
    pub fn update(&mut self, buffer: &[f32]) {
        if buffer.len() != self.window.len() {
            return;
        }

        for ((bin, &sample), &w) in self.scratch.iter_mut().zip(buffer).zip(&self.window) {
            *bin = Complex::new(sample * w, 0.0);
        }

        self.fft.process(&mut self.scratch);

        // Hann window coherent gain is 0.5.
        let norm = 2.0 / self.window.len() as f32;
        for ((_, magnitude_db), &index) in self.spectrum.iter_mut().zip(&self.bin_indices) {
            let amplitude = self.scratch[index].norm() * 2.0 * norm;
            *magnitude_db = (20.0 * (amplitude.max(1e-6) as f64).log10()).max(FLOOR_DB);
        }
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.spectrum
    }
}

pub fn render_spectrum(frame: &mut Frame, area: Rect, spectrum: &[(f64, f64)]) {
    let block = Block::default()
        .title(" Spectrum (20 Hz - 2 kHz) ")
        .borders(Borders::ALL);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(spectrum);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([(MIN_FREQ as f64).log10(), (MAX_FREQ as f64).log10()])
                .labels(vec!["20", "200", "2k"])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, 0.0])
                .labels(vec!["-100", "-50", "0"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sine_peaks_near_its_frequency() {
        let sample_rate = 48_000.0;
        let len = 4096;
        let mut analyzer = SpectrumAnalyzer::new(len, sample_rate);
        let buffer: Vec<f32> = (0..len)
            .map(|n| (std::f32::consts::TAU * 110.0 * n as f32 / sample_rate).sin() * 0.5)
            .collect();

        analyzer.update(&buffer);

        let (peak_log_freq, peak_db) = analyzer
            .data()
            .iter()
            .copied()
            .fold((0.0, FLOOR_DB), |acc, p| if p.1 > acc.1 { p } else { acc });
        let peak_freq = 10f64.powf(peak_log_freq);
        assert!(
            (90.0..135.0).contains(&peak_freq),
            "peak at {} Hz",
            peak_freq
        );
        assert!(peak_db > -12.0, "peak level {} dB", peak_db);
    }
}
