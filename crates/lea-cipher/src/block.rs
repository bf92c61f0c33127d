//! Block representation helpers.

/// Size of a cipher block in bytes.
pub const BLOCK_BYTES: usize = 32;

/// Cipher block of 32 bytes.
pub type Block = [u8; BLOCK_BYTES];
