//! TUI for the dbe demo
//!
//! Shows the processed output and the enhancer's state, and turns key
//! presses into control messages for the audio thread.

mod spectrum;
pub mod state;
mod status;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::{Consumer, Producer};
use std::time::Duration;

use dbe::{enhancer::params::MAX_EFFECT_LEVEL_DB, ControlMessage};

pub use state::UiStateUpdate;

use spectrum::{render_spectrum, SpectrumAnalyzer};
use status::{render_status, AudioStats};
use waveform::render_waveform;

/// Samples kept for the scope; also the FFT size.
const VIS_BUFFER_SIZE: usize = 4096;

pub struct UiApp {
    audio_rx: Consumer<f32>,
    state_rx: Consumer<UiStateUpdate>,
    control_tx: Producer<ControlMessage>,
    error_rx: Consumer<String>,
    /// Every stream error seen, logged once the terminal is restored
    stream_errors: Vec<String>,
    /// Shown in place of the help bar
    notice: Option<String>,
    current_state: UiStateUpdate,
    audio_buffer: Vec<f32>,
    spectrum: SpectrumAnalyzer,
    sample_rate: f32,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        audio_rx: Consumer<f32>,
        state_rx: Consumer<UiStateUpdate>,
        control_tx: Producer<ControlMessage>,
        error_rx: Consumer<String>,
        initial_state: UiStateUpdate,
        sample_rate: f32,
    ) -> Self {
        Self {
            audio_rx,
            state_rx,
            control_tx,
            error_rx,
            stream_errors: Vec::new(),
            notice: None,
            current_state: initial_state,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            spectrum: SpectrumAnalyzer::new(VIS_BUFFER_SIZE, sample_rate),
            sample_rate,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();
            self.poll_state();
            self.poll_errors();
            self.spectrum.update(&self.audio_buffer);

            terminal.draw(|frame| self.render(frame))?;

            // ~60fps
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    fn poll_audio(&mut self) {
        let available = self.audio_rx.slots();
        if available == 0 {
            return;
        }

        self.audio_buffer.reserve(available);
        while let Ok(sample) = self.audio_rx.pop() {
            self.audio_buffer.push(sample);
        }
        if self.audio_buffer.len() > VIS_BUFFER_SIZE {
            let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
            self.audio_buffer.drain(0..excess);
        }
    }

    /// Keep only the latest snapshot.
    fn poll_state(&mut self) {
        while let Ok(state) = self.state_rx.pop() {
            self.current_state = state;
        }
    }

    fn poll_errors(&mut self) {
        while let Ok(err) = self.error_rx.pop() {
            self.notice = Some(format!("audio stream error: {}", err));
            self.stream_errors.push(err);
        }
    }

    pub fn stream_errors(&self) -> &[String] {
        &self.stream_errors
    }

    fn handle_key(&mut self, key: KeyCode) {
        let state = self.current_state;
        let message = match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
                None
            }
            KeyCode::Char('e') | KeyCode::Char('E') => {
                Some(ControlMessage::SetMode(state.mode.toggled()))
            }
            KeyCode::Char('h') | KeyCode::Char('H') => {
                Some(ControlMessage::SetHpf(state.hpf.toggled()))
            }
            KeyCode::Char('+') | KeyCode::Char('=') => Some(ControlMessage::SetEffectLevel(
                (state.effect_level_db + 1).min(MAX_EFFECT_LEVEL_DB),
            )),
            KeyCode::Char('-') => Some(ControlMessage::SetEffectLevel(
                state.effect_level_db.saturating_sub(1),
            )),
            KeyCode::Char('c') | KeyCode::Char('C') => Some(ControlMessage::SetCentreFrequency(
                state.centre_frequency.next(),
            )),
            _ => None,
        };

        if let Some(message) = message {
            self.send(message);
        }
    }

    fn send(&mut self, message: ControlMessage) {
        self.notice = match self.control_tx.push(message) {
            Ok(()) => None,
            Err(_) => Some(format!("control queue full, dropped {:?}", message)),
        };
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Status
                Constraint::Min(8),    // Waveform
                Constraint::Min(10),   // Spectrum
                Constraint::Length(1), // Help bar
            ])
            .split(frame.area());

        let stats = AudioStats::from_buffer(&self.audio_buffer);
        render_status(frame, chunks[0], &self.current_state, &stats, self.sample_rate);
        render_waveform(frame, chunks[1], &self.audio_buffer);
        render_spectrum(frame, chunks[2], self.spectrum.data());

        let help = match &self.notice {
            Some(notice) => {
                Paragraph::new(format!(" {}", notice)).style(Style::default().fg(Color::Red))
            }
            None => Paragraph::new(
                " [E] Effect on/off  [H] High-pass  [+/-] Level  [C] Centre  [Q] Quit",
            )
            .style(Style::default().fg(Color::DarkGray)),
        };
        frame.render_widget(help, chunks[3]);
    }
}
