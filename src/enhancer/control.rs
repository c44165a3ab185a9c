use crate::{
    dsp::{agc, db_to_gain, AgcMix, Biquad, BiquadCoeffs, SoftMixer, SoftMixer2},
    error::DbeError,
};

use super::{
    params::{Capabilities, HpfSelect, OperatingMode, Params},
    scratch::Scratch,
    BassEnhancer, BYPASS_STREAM, ENHANCED_STREAM,
};

/// Duration of the on/off crossfade.
pub const BYPASS_MIXER_TC_MS: f32 = 100.0;
/// Q of the sub-bass high-pass.
pub const HPF_Q: f32 = 0.707;
/// Q of the bass band-pass.
pub const BPF_Q: f32 = 1.0;
/// Peak level the AGC aims for before extra headroom, in dBFS.
const AGC_TARGET_DB: f32 = -0.1;

/// Settled (enhanced, bypass) blend gains for a mode.
fn blend_targets(mode: OperatingMode) -> (f32, f32) {
    match mode {
        OperatingMode::On => (1.0, 0.0),
        OperatingMode::Off => (0.0, 1.0),
    }
}

impl BassEnhancer {
    /// Build an instance. This is the only call that allocates.
    ///
    /// The blend mixer starts settled on the initial mode, so the first
    /// block is not a fade.
    pub fn new(capabilities: Capabilities, params: Params) -> Result<Self, DbeError> {
        capabilities
            .validate()
            .inspect_err(|err| log::warn!("rejecting capabilities {:?}: {}", capabilities, err))?;
        params
            .validate(&capabilities)
            .inspect_err(|err| log::warn!("rejecting initial params: {}", err))?;

        let (enhanced_gain, bypass_gain) = blend_targets(params.operating_mode);
        let mut dbe = Self {
            capabilities,
            params,
            hpf: Biquad::identity(capabilities.max_channels),
            bpf: Biquad::identity(1),
            agc: AgcMix::new(),
            bypass_volume: SoftMixer::new(1.0),
            bypass_mixer: SoftMixer2::new(enhanced_gain, bypass_gain),
            scratch: Scratch::new(capabilities.max_channels, capabilities.max_block_size),
        };

        dbe.update_filters();
        dbe.update_agc();
        dbe.update_volume(true);
        dbe.update_time_constants();

        log::info!(
            "bass enhancer ready: {} ch @ {} Hz, max block {} frames, mode {:?}, level {} dB, centre {} Hz",
            params.channels,
            params.sample_rate,
            capabilities.max_block_size,
            params.operating_mode,
            params.effect_level_db,
            params.centre_frequency.hz(),
        );

        Ok(dbe)
    }

    /// Apply new parameters.
    ///
    /// Invalid parameters are rejected and leave the instance untouched.
    /// Only the sub-objects affected by a change are updated; a mode change
    /// retargets the blend mixer so the next blocks crossfade over
    /// [`BYPASS_MIXER_TC_MS`]. Never allocates.
    pub fn set_params(&mut self, params: Params) -> Result<(), DbeError> {
        params.validate(&self.capabilities)?;

        let old = std::mem::replace(&mut self.params, params);
        let rate_changed = old.sample_rate != params.sample_rate;

        if rate_changed
            || old.centre_frequency != params.centre_frequency
            || old.hpf != params.hpf
            || old.channels != params.channels
        {
            self.update_filters();
        }

        if rate_changed
            || old.effect_level_db != params.effect_level_db
            || old.hpf != params.hpf
            || old.headroom_db != params.headroom_db
        {
            self.update_agc();
        }

        if rate_changed {
            self.update_time_constants();
        }

        if rate_changed || old.volume_db != params.volume_db {
            self.update_volume(false);
        }

        if old.operating_mode != params.operating_mode {
            let (enhanced_gain, bypass_gain) = blend_targets(params.operating_mode);
            self.bypass_mixer
                .stream_mut(ENHANCED_STREAM)
                .set_target(enhanced_gain);
            self.bypass_mixer
                .stream_mut(BYPASS_STREAM)
                .set_target(bypass_gain);
        }

        Ok(())
    }

    /// Forget filter history and AGC boost. Crossfade state is kept.
    pub fn clear_history(&mut self) {
        self.hpf.reset();
        self.bpf.reset();
        self.agc.reset();
    }

    fn update_filters(&mut self) {
        let sample_rate = self.params.sample_rate as f32;
        let centre = self.params.centre_frequency.hz();

        self.hpf
            .set_coeffs(BiquadCoeffs::highpass(centre, HPF_Q, sample_rate));
        self.bpf
            .set_coeffs(BiquadCoeffs::bandpass(centre, BPF_Q, sample_rate));
        self.hpf.reset();
        self.bpf.reset();
    }

    fn update_agc(&mut self) {
        let max_gain = db_to_gain(self.params.effect_level_db as f32) - 1.0;
        let target = db_to_gain(AGC_TARGET_DB - self.params.headroom_db as f32);
        self.agc
            .configure(self.params.sample_rate as f32, max_gain, target);
    }

    fn update_volume(&mut self, immediate: bool) {
        let gain = self
            .params
            .volume_db
            .map_or(1.0, |db| db_to_gain(db as f32));

        if immediate {
            self.bypass_volume.stream_mut().set_gain(gain);
            self.agc.set_volume(gain);
        } else {
            self.bypass_volume.stream_mut().set_target(gain);
            self.agc
                .set_volume_target(gain, self.params.sample_rate as f32);
        }
    }

    fn update_time_constants(&mut self) {
        let sample_rate = self.params.sample_rate as f32;
        self.bypass_mixer
            .stream_mut(ENHANCED_STREAM)
            .set_time_constant(BYPASS_MIXER_TC_MS, sample_rate);
        self.bypass_mixer
            .stream_mut(BYPASS_STREAM)
            .set_time_constant(BYPASS_MIXER_TC_MS, sample_rate);
        self.bypass_volume
            .stream_mut()
            .set_time_constant(agc::VOLUME_TC_MS, sample_rate);
    }

    /// Whether the high-pass pre-filter runs on the enhanced path.
    pub fn hpf_enabled(&self) -> bool {
        self.params.hpf == HpfSelect::On
    }
}
