#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{error::DbeError, MAX_BLOCK_SIZE, MAX_CHANNELS};

/// Sample rates the enhancer accepts.
pub const SUPPORTED_SAMPLE_RATES: [u32; 13] = [
    8_000, 11_025, 12_000, 16_000, 22_050, 24_000, 32_000, 44_100, 48_000, 88_200, 96_000,
    176_400, 192_000,
];
pub const MAX_EFFECT_LEVEL_DB: u8 = 15;
pub const MIN_VOLUME_DB: i16 = -96;
pub const MAX_HEADROOM_DB: u8 = 12;

/// Whether the bass enhancement is audible.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperatingMode {
    #[default]
    Off,
    On,
}

impl OperatingMode {
    pub fn toggled(self) -> Self {
        match self {
            OperatingMode::Off => OperatingMode::On,
            OperatingMode::On => OperatingMode::Off,
        }
    }
}

/// High-pass pre-filter selection.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HpfSelect {
    #[default]
    Off,
    On,
}

impl HpfSelect {
    pub fn toggled(self) -> Self {
        match self {
            HpfSelect::Off => HpfSelect::On,
            HpfSelect::On => HpfSelect::Off,
        }
    }
}

/// Centre of the boosted bass band.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CentreFrequency {
    #[default]
    Hz55,
    Hz66,
    Hz78,
    Hz90,
}

impl CentreFrequency {
    pub fn hz(self) -> f32 {
        match self {
            CentreFrequency::Hz55 => 55.0,
            CentreFrequency::Hz66 => 66.0,
            CentreFrequency::Hz78 => 78.0,
            CentreFrequency::Hz90 => 90.0,
        }
    }

    /// Cycle to the next centre frequency, wrapping around.
    pub fn next(self) -> Self {
        match self {
            CentreFrequency::Hz55 => CentreFrequency::Hz66,
            CentreFrequency::Hz66 => CentreFrequency::Hz78,
            CentreFrequency::Hz78 => CentreFrequency::Hz90,
            CentreFrequency::Hz90 => CentreFrequency::Hz55,
        }
    }
}

/// Fixed limits of an instance, chosen once at construction.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Largest block, in frames, `process` accepts.
    pub max_block_size: usize,
    /// Largest channel count `Params::channels` may take.
    pub max_channels: usize,
}

impl Capabilities {
    pub fn with_max_block_size(mut self, frames: usize) -> Self {
        self.max_block_size = frames;
        self
    }

    pub fn with_max_channels(mut self, channels: usize) -> Self {
        self.max_channels = channels;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), DbeError> {
        if self.max_block_size == 0 {
            return Err(DbeError::InvalidCapabilities(
                "max_block_size must be at least 1",
            ));
        }
        if self.max_channels == 0 || self.max_channels > MAX_CHANNELS {
            return Err(DbeError::InvalidCapabilities(
                "max_channels must be between 1 and MAX_CHANNELS",
            ));
        }
        Ok(())
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            max_block_size: MAX_BLOCK_SIZE,
            max_channels: 2,
        }
    }
}

/// Runtime parameters. Changed through `BassEnhancer::set_params`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    pub operating_mode: OperatingMode,
    pub sample_rate: u32,
    pub channels: usize,
    /// Bass boost at the centre frequency, 0..=15 dB.
    pub effect_level_db: u8,
    pub centre_frequency: CentreFrequency,
    pub hpf: HpfSelect,
    /// Output volume in dB (-96..=0); `None` disables volume control.
    pub volume_db: Option<i16>,
    /// Extra headroom below full scale the AGC keeps, 0..=12 dB.
    pub headroom_db: u8,
}

impl Params {
    pub fn with_mode(mut self, mode: OperatingMode) -> Self {
        self.operating_mode = mode;
        self
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_channels(mut self, channels: usize) -> Self {
        self.channels = channels;
        self
    }

    pub fn with_effect_level(mut self, db: u8) -> Self {
        self.effect_level_db = db;
        self
    }

    pub fn with_centre_frequency(mut self, centre: CentreFrequency) -> Self {
        self.centre_frequency = centre;
        self
    }

    pub fn with_hpf(mut self, hpf: HpfSelect) -> Self {
        self.hpf = hpf;
        self
    }

    pub fn with_volume(mut self, db: Option<i16>) -> Self {
        self.volume_db = db;
        self
    }

    pub fn with_headroom(mut self, db: u8) -> Self {
        self.headroom_db = db;
        self
    }

    pub(crate) fn validate(&self, capabilities: &Capabilities) -> Result<(), DbeError> {
        if !SUPPORTED_SAMPLE_RATES.contains(&self.sample_rate) {
            return Err(DbeError::out_of_range("sample_rate", self.sample_rate));
        }
        if self.channels == 0 || self.channels > capabilities.max_channels {
            return Err(DbeError::out_of_range("channels", self.channels as i64));
        }
        if self.effect_level_db > MAX_EFFECT_LEVEL_DB {
            return Err(DbeError::out_of_range(
                "effect_level_db",
                self.effect_level_db,
            ));
        }
        if let Some(db) = self.volume_db {
            if !(MIN_VOLUME_DB..=0).contains(&db) {
                return Err(DbeError::out_of_range("volume_db", db));
            }
        }
        if self.headroom_db > MAX_HEADROOM_DB {
            return Err(DbeError::out_of_range("headroom_db", self.headroom_db));
        }
        Ok(())
    }
}

impl Default for Params {
    fn default() -> Self {
        Self {
            operating_mode: OperatingMode::Off,
            sample_rate: 48_000,
            channels: 2,
            effect_level_db: 6,
            centre_frequency: CentreFrequency::Hz55,
            hpf: HpfSelect::Off,
            volume_db: None,
            headroom_db: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let caps = Capabilities::default();
        assert!(caps.validate().is_ok());
        assert!(Params::default().validate(&caps).is_ok());
    }

    #[test]
    fn test_rejects_unsupported_sample_rate() {
        let params = Params::default().with_sample_rate(47_000);
        assert_eq!(
            params.validate(&Capabilities::default()),
            Err(DbeError::OutOfRange {
                param: "sample_rate",
                value: 47_000
            })
        );
    }

    #[test]
    fn test_channels_bounded_by_capabilities() {
        let caps = Capabilities::default().with_max_channels(4);
        assert!(Params::default().with_channels(4).validate(&caps).is_ok());
        assert!(Params::default().with_channels(5).validate(&caps).is_err());
        assert!(Params::default().with_channels(0).validate(&caps).is_err());
    }

    #[test]
    fn test_level_volume_and_headroom_ranges() {
        let caps = Capabilities::default();
        assert!(Params::default().with_effect_level(15).validate(&caps).is_ok());
        assert!(Params::default().with_effect_level(16).validate(&caps).is_err());
        assert!(Params::default().with_volume(Some(-96)).validate(&caps).is_ok());
        assert!(Params::default().with_volume(Some(-97)).validate(&caps).is_err());
        assert!(Params::default().with_volume(Some(1)).validate(&caps).is_err());
        assert!(Params::default().with_headroom(13).validate(&caps).is_err());
    }

    #[test]
    fn test_invalid_capabilities() {
        assert!(Capabilities::default().with_max_block_size(0).validate().is_err());
        assert!(Capabilities::default()
            .with_max_channels(MAX_CHANNELS + 1)
            .validate()
            .is_err());
    }

    #[test]
    fn test_centre_frequency_cycles() {
        let mut centre = CentreFrequency::Hz55;
        for _ in 0..4 {
            centre = centre.next();
        }
        assert_eq!(centre, CentreFrequency::Hz55);
        assert_eq!(CentreFrequency::Hz78.hz(), 78.0);
    }
}
