//! Grid permutation block cipher keyed by KeyHash digests.
//!
//! A 32-byte block is viewed as sixteen 16-bit rows. A key yields a schedule of
//! sixteen row/column rotations; encryption applies them in order and
//! decryption applies their inverses in reverse order.
//!
//! The cipher provides confidentiality only in the loosest sense: there is no
//! integrity check, and padding removal is a heuristic on the trailing byte.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod error;
mod grid;
mod keyfile;
mod schedule;

pub use crate::block::{Block, BLOCK_BYTES};
pub use crate::cipher::{
    cipher_block, decipher_block, decrypt, encrypt, pad, strip_padding, try_decrypt,
};
pub use crate::error::CipherError;
pub use crate::grid::Grid;
pub use crate::keyfile::{KeyFile, KEY_FILE_VERSION};
pub use crate::schedule::{get_operations, Operation, Schedule, SCHEDULE_LEN};
pub use lea_core::KeyHash;
