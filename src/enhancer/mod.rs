//! The bass enhancement stage.
//!
//! [`BassEnhancer`] owns everything one instance needs: configuration, the
//! filter/AGC/mixer sub-objects and its scratch memory. It is built once
//! (the only place that allocates), reconfigured through
//! [`BassEnhancer::set_params`] and driven block by block with
//! [`BassEnhancer::process`]. All three take `&mut self`, so calls against
//! one instance are serialised by ownership; separate instances share
//! nothing and can run on separate threads.

/// Instance construction and parameter updates.
pub mod control;
/// Lock-free parameter changes from other threads.
pub mod message;
/// Parameter and capability types.
pub mod params;
/// Per-block compute/skip decision for each signal path.
pub mod path;
/// The per-block pipeline.
pub mod process;
/// Scratch memory shared between the two paths.
pub mod scratch;

pub use message::{ControlMessage, ControlReceiver};
pub use params::{Capabilities, CentreFrequency, HpfSelect, OperatingMode, Params};
pub use path::PathState;

use crate::dsp::{AgcMix, Biquad, SoftMixer, SoftMixer2};
use scratch::Scratch;

/// Index of the enhanced path's stream in the blend mixer.
pub(crate) const ENHANCED_STREAM: usize = 0;
/// Index of the bypass path's stream in the blend mixer.
pub(crate) const BYPASS_STREAM: usize = 1;

/// One bass enhancement instance.
#[derive(Debug, Clone)]
pub struct BassEnhancer {
    capabilities: Capabilities,
    params: Params,
    hpf: Biquad,
    bpf: Biquad,
    agc: AgcMix,
    /// Volume/headroom matching of the raw input.
    bypass_volume: SoftMixer,
    /// Crossfade between the enhanced (stream 0) and bypass (stream 1) paths.
    bypass_mixer: SoftMixer2,
    scratch: Scratch,
}

impl BassEnhancer {
    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// What the enhanced path will do on the next block.
    pub fn enhanced_path(&self) -> PathState {
        PathState::enhanced(
            self.params.operating_mode,
            self.bypass_mixer.stream(ENHANCED_STREAM),
        )
    }

    /// What the bypass-volume path will do on the next block.
    pub fn bypass_path(&self) -> PathState {
        PathState::bypass(
            self.params.operating_mode,
            self.bypass_mixer.stream(BYPASS_STREAM),
        )
    }

    /// Current (enhanced, bypass) crossfade gains.
    pub fn blend_gains(&self) -> (f32, f32) {
        (
            self.bypass_mixer.stream(ENHANCED_STREAM).current(),
            self.bypass_mixer.stream(BYPASS_STREAM).current(),
        )
    }

    /// Current gain the AGC applies to the band-passed bass.
    pub fn agc_gain(&self) -> f32 {
        self.agc.gain()
    }

    /// True when no on/off crossfade is in progress.
    pub fn is_settled(&self) -> bool {
        self.bypass_mixer.is_settled()
    }
}
