//! Status panel - enhancer settings, path states and output levels

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use dbe::{HpfSelect, OperatingMode, PathState};

use super::UiStateUpdate;

pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

fn path_style(state: PathState) -> Style {
    Style::default().fg(match state {
        PathState::Active => Color::Green,
        PathState::Settling => Color::Yellow,
        PathState::Silent => Color::DarkGray,
    })
}

pub fn render_status(
    frame: &mut Frame,
    area: Rect,
    state: &UiStateUpdate,
    stats: &AudioStats,
    sample_rate: f32,
) {
    let block = Block::default().title(" dbe ").borders(Borders::ALL);

    let (mode_label, mode_color) = match state.mode {
        OperatingMode::On => ("● ON ", Color::Green),
        OperatingMode::Off => ("○ OFF", Color::Yellow),
    };
    let hpf_label = match state.hpf {
        HpfSelect::On => "HPF on",
        HpfSelect::Off => "HPF off",
    };

    let settings = Line::from(vec![
        Span::styled(format!(" {}  ", mode_label), Style::default().fg(mode_color)),
        Span::styled(
            format!("Level: {} dB  ", state.effect_level_db),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("Centre: {:.0} Hz  ", state.centre_frequency.hz()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(format!("{}  ", hpf_label), Style::default().fg(Color::White)),
        Span::styled(
            format!("{:.1}kHz", sample_rate / 1000.0),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let (enhanced_gain, bypass_gain) = state.blend_gains;
    let paths = Line::from(vec![
        Span::styled(
            format!(" Enhanced: {:?} ({:.2})  ", state.enhanced_path, enhanced_gain),
            path_style(state.enhanced_path),
        ),
        Span::styled(
            format!("Bypass: {:?} ({:.2})  ", state.bypass_path, bypass_gain),
            path_style(state.bypass_path),
        ),
        Span::styled(
            format!("AGC: x{:.2}  ", state.agc_gain),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", stats.peak, stats.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    let paragraph = Paragraph::new(vec![settings, paths]).block(block);
    frame.render_widget(paragraph, area);
}
