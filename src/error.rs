use thiserror::Error;

/// Failure modes of every fallible [`Vector`](crate::Vector) operation.
///
/// A returned error always means the vector was left exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VectorError {
    #[error("allocation of {bytes} bytes failed")]
    OutOfMemory { bytes: usize },
    #[error("requested capacity overflows the address space")]
    CapacityOverflow,
    #[error("index {index} is out of bounds for length {len}")]
    OutOfBounds { index: usize, len: usize },
    #[error("range {start}..={stop} is invalid for length {len}")]
    InvalidRange { start: usize, stop: usize, len: usize },
    #[error("the vector is empty")]
    Empty,
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

pub type Result<T> = std::result::Result<T, VectorError>;
