//! Demo - builds the enhancer, starts the audio stream and hands over to the TUI

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::RingBuffer;

use dbe::{
    BassEnhancer, Capabilities, CentreFrequency, ControlMessage, HpfSelect, OperatingMode, Params,
    MAX_BLOCK_SIZE, MAX_CHANNELS,
};

use super::source::BassLine;
use super::ui::{UiApp, UiStateUpdate};

/// Output samples buffered for the scope and spectrum (channel 0 only).
const AUDIO_RING_SIZE: usize = 16_384;
const CONTROL_RING_SIZE: usize = 64;
const STATE_RING_SIZE: usize = 64;
const ERROR_RING_SIZE: usize = 16;

/// Demo application builder
pub struct Demo {
    params: Params,
}

impl Demo {
    pub fn new() -> Self {
        Self {
            params: Params::default().with_mode(OperatingMode::On),
        }
    }

    pub fn effect_level(mut self, db: u8) -> Self {
        self.params = self.params.with_effect_level(db);
        self
    }

    pub fn centre(mut self, centre: CentreFrequency) -> Self {
        self.params = self.params.with_centre_frequency(centre);
        self
    }

    pub fn hpf(mut self, hpf: HpfSelect) -> Self {
        self.params = self.params.with_hpf(hpf);
        self
    }

    /// Run until the user quits.
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        if config.sample_format() != cpal::SampleFormat::F32 {
            return Err(eyre!(
                "output device uses {:?} samples, only f32 is supported",
                config.sample_format()
            ));
        }

        let sample_rate = config.sample_rate().0;
        let channels = config.channels() as usize;
        if channels == 0 || channels > MAX_CHANNELS {
            return Err(eyre!("unsupported channel count {}", channels));
        }

        let params = self
            .params
            .with_sample_rate(sample_rate)
            .with_channels(channels);
        let capabilities = Capabilities::default().with_max_channels(channels);
        let mut dbe = BassEnhancer::new(capabilities, params)
            .wrap_err("failed to configure bass enhancer")?;
        let initial_state = UiStateUpdate::capture(&dbe);

        let (control_tx, mut control_rx) = RingBuffer::<ControlMessage>::new(CONTROL_RING_SIZE);
        let (mut audio_tx, audio_rx) = RingBuffer::<f32>::new(AUDIO_RING_SIZE);
        let (mut state_tx, state_rx) = RingBuffer::<UiStateUpdate>::new(STATE_RING_SIZE);
        // stderr belongs to the TUI while it runs; stream errors go to the UI.
        let (mut error_tx, error_rx) = RingBuffer::<String>::new(ERROR_RING_SIZE);

        let mut source = BassLine::new(sample_rate as f32);
        let mut input = vec![0.0f32; MAX_BLOCK_SIZE * channels];

        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _| {
                    // The UI only sends in-range values; a rejected change is dropped.
                    let _ = dbe.apply_messages(&mut control_rx);

                    let total_frames = data.len() / channels;
                    let mut frames_written = 0;

                    while frames_written < total_frames {
                        let frames = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                        let block = &mut input[..frames * channels];
                        source.render(block, channels);

                        let start = frames_written * channels;
                        let out = &mut data[start..start + frames * channels];
                        if dbe.process(block, out, frames).is_err() {
                            out.fill(0.0);
                        }

                        for frame in out.chunks_exact(channels) {
                            let _ = audio_tx.push(frame[0]);
                        }

                        frames_written += frames;
                    }

                    let _ = state_tx.push(UiStateUpdate::capture(&dbe));
                },
                move |err| {
                    let _ = error_tx.push(err.to_string());
                },
                None,
            )
            .wrap_err("failed to build output stream")?;

        stream.play().wrap_err("failed to start output stream")?;
        log::info!("playing on {} ch @ {} Hz", channels, sample_rate);

        let mut ui = UiApp::new(
            audio_rx,
            state_rx,
            control_tx,
            error_rx,
            initial_state,
            sample_rate as f32,
        );
        let mut terminal = ratatui::init();
        let result = ui.run(&mut terminal);
        ratatui::restore();

        for err in ui.stream_errors() {
            log::error!("audio stream error: {}", err);
        }

        result
    }
}

impl Default for Demo {
    fn default() -> Self {
        Self::new()
    }
}
