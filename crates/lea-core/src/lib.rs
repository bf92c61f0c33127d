//! Bit-vector substrate and KeyHash digest shared by the lea workspace.
//!
//! This crate provides:
//! - Fixed-width bit arrays (`Bits256`, `Bits512`) with bit, byte and rotate access.
//! - The KeyHash engine: a 256-bit digest over an up-to-32-byte window.
//! - Round constants as an immutable [`HashParams`] value.
//!
//! The digest is deterministic and avalanching but carries no formal security
//! claim; it exists to derive cipher keys interoperably.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod bits;
mod error;
mod keyhash;
mod params;
mod sbox;

pub use crate::bits::{BitArray, Bits256, Bits512};
pub use crate::error::Error;
pub use crate::keyhash::{
    apply_sbox, bit_interleaving_expand, gen_keyhash, gen_keyhash_with, hash_message,
    intermittent_bit_flip, mix, sequential_bit_compact, try_gen_keyhash, KeyHash, WINDOW_BYTES,
};
pub use crate::params::HashParams;
pub use crate::sbox::{sbox, PRIME1};
