//! Error type for the cipher layer.

use thiserror::Error;

/// Errors produced by `lea-cipher`.
#[derive(Debug, Error)]
pub enum CipherError {
    /// Ciphertext length is not a whole number of blocks.
    #[error("ciphertext length {len} is not a multiple of 32 bytes")]
    InvalidLength {
        /// Rejected length in bytes.
        len: usize,
    },
    /// Key file has a version this build does not read.
    #[error("unsupported key file version {found} (expected {expected})")]
    UnsupportedVersion {
        /// Version found in the file.
        found: u32,
        /// Version this build writes.
        expected: u32,
    },
    /// Key file could not be encoded or decoded.
    #[error("key file serialization failed: {0}")]
    Serialization(#[from] bincode::Error),
}
