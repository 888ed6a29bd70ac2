use thiserror::Error;

use crate::device::Device;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TensorError {
    #[error("shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch { expected: Vec<usize>, got: Vec<usize> },
    #[error("placement mismatch: expected {expected}, got {got}")]
    PlacementMismatch { expected: Device, got: Device },
    #[error("index out of range: [{begin}, {end}) for first axis of length {len}")]
    IndexOutOfRange { begin: usize, end: usize, len: usize },
    #[error("{op}: unsupported rank {rank}")]
    UnsupportedRank { op: &'static str, rank: usize },
    #[error("division by zero at element {index}")]
    DivisionByZero { index: usize },
    #[error("invalid scaling factor {0} (must be below 128)")]
    InvalidScalingFactor(u32),
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, TensorError>;
