//! Snapshot of the enhancer sent from the audio thread to the UI
//!
//! `Copy` and allocation-free so it can be pushed from the audio callback.

use dbe::{BassEnhancer, CentreFrequency, HpfSelect, OperatingMode, PathState};

#[derive(Clone, Copy, Debug)]
pub struct UiStateUpdate {
    pub mode: OperatingMode,
    pub hpf: HpfSelect,
    pub effect_level_db: u8,
    pub centre_frequency: CentreFrequency,
    pub enhanced_path: PathState,
    pub bypass_path: PathState,
    /// Gain the AGC currently applies to the band-passed bass
    pub agc_gain: f32,
    /// (enhanced, bypass) crossfade gains
    pub blend_gains: (f32, f32),
}

impl UiStateUpdate {
    pub fn capture(dbe: &BassEnhancer) -> Self {
        let params = dbe.params();
        Self {
            mode: params.operating_mode,
            hpf: params.hpf,
            effect_level_db: params.effect_level_db,
            centre_frequency: params.centre_frequency,
            enhanced_path: dbe.enhanced_path(),
            bypass_path: dbe.bypass_path(),
            agc_gain: dbe.agc_gain(),
            blend_gains: dbe.blend_gains(),
        }
    }
}
