//! Error type for the bit substrate and KeyHash engine.

use thiserror::Error;

/// Errors produced by `lea-core`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Declared input length is outside `1..=32` bytes.
    #[error("input byte length {len} is outside 1..=32")]
    InvalidInputLength {
        /// Rejected length.
        len: usize,
    },
    /// Input does not fit in the target bit array.
    #[error("input of {len} bytes exceeds the {max}-byte window")]
    InputTooLong {
        /// Supplied length in bytes.
        len: usize,
        /// Capacity in bytes.
        max: usize,
    },
    /// Round count is zero or larger than the prime table.
    #[error("round count {rounds} must be within 1..={max}")]
    InvalidRounds {
        /// Requested rounds.
        rounds: usize,
        /// Entries in the prime table.
        max: usize,
    },
    /// Bit flip stride of zero would never advance.
    #[error("bit flip stride must be non-zero")]
    ZeroFlipStride,
    /// Hex digest is not 64 characters.
    #[error("hex digest must be 64 characters, got {len}")]
    InvalidHexLength {
        /// Supplied length in characters.
        len: usize,
    },
    /// Hex digest contains non-hex characters.
    #[error("invalid hex digest: {0}")]
    Hex(#[from] hex::FromHexError),
}
