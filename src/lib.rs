pub mod dsp; // Filters, downmix, AGC and mixers
pub mod enhancer; // Instance state, control plane and the per-block pipeline
pub mod error;

pub use enhancer::{
    BassEnhancer, Capabilities, CentreFrequency, ControlMessage, ControlReceiver, HpfSelect,
    OperatingMode, Params, PathState,
};
pub use error::DbeError;

pub const MAX_BLOCK_SIZE: usize = 2048;
pub const MAX_CHANNELS: usize = 8;
