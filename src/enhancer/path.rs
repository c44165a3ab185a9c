use crate::dsp::MixerStream;

use super::params::OperatingMode;

/// What a signal path has to do for the current block.
///
/// A path is computed while the operating mode wants it, and keeps being
/// computed after the mode flips away from it until its crossfade stream has
/// settled, so the fade-out is never cut short. Only then is it skipped and
/// its buffer zero-filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathState {
    /// The operating mode selects this path.
    Active,
    /// Deselected, but still fading out.
    Settling,
    /// Deselected and fully faded; contributes silence.
    Silent,
}

impl PathState {
    /// State of the enhanced path, given the blend stream that weights it.
    pub fn enhanced(mode: OperatingMode, stream: &MixerStream) -> Self {
        Self::derive(mode == OperatingMode::On, stream)
    }

    /// State of the bypass-volume path, given the blend stream that weights it.
    pub fn bypass(mode: OperatingMode, stream: &MixerStream) -> Self {
        Self::derive(mode == OperatingMode::Off, stream)
    }

    fn derive(selected: bool, stream: &MixerStream) -> Self {
        if selected {
            PathState::Active
        } else if !stream.is_settled() {
            PathState::Settling
        } else {
            PathState::Silent
        }
    }

    /// Whether the path's signal has to be produced this block.
    pub fn is_computed(self) -> bool {
        !matches!(self, PathState::Silent)
    }
}
