use thiserror::Error;

/// Errors reported by the bass enhancer.
///
/// `process` only ever returns [`DbeError::TooManySamples`]; the other
/// variants come from construction and the control plane.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbeError {
    #[error("block of {frames} frames exceeds the maximum block size of {max}")]
    TooManySamples { frames: usize, max: usize },
    #[error("parameter `{param}` out of range: {value}")]
    OutOfRange { param: &'static str, value: i64 },
    #[error("invalid capabilities: {0}")]
    InvalidCapabilities(&'static str),
}

impl DbeError {
    pub(crate) fn out_of_range(param: &'static str, value: impl Into<i64>) -> Self {
        DbeError::OutOfRange {
            param,
            value: value.into(),
        }
    }
}
