//! Block and buffer encryption over the grid permutation network.
//!
//! Padding follows PKCS#7 except that inputs already aligned to a block get no
//! padding block at all. Decryption strips padding by trusting the trailing
//! byte; there is no authentication, so a wrong key or tampered ciphertext is
//! never detected and simply yields garbage plaintext.

use lea_core::KeyHash;
use tracing::{debug, warn};

use crate::block::{Block, BLOCK_BYTES};
use crate::error::CipherError;
use crate::grid::Grid;
use crate::schedule::Schedule;

/// Applies the forward schedule to one block.
///
/// Each operation rotates its row left, then rotates its column left; the
/// column read sees the already rotated row.
pub fn cipher_block(block: &Block, schedule: &Schedule) -> Block {
    let mut grid = Grid::from_block(block);
    for op in schedule {
        grid.rotate_row_left(op.row, op.row_offset);
        grid.rotate_column_left(op.col, op.col_offset);
    }
    grid.to_block()
}

/// Undoes [`cipher_block`] given the reversed schedule.
///
/// Each operation rotates its column right, then its row right.
pub fn decipher_block(block: &Block, reversed: &Schedule) -> Block {
    let mut grid = Grid::from_block(block);
    for op in reversed {
        grid.rotate_column_right(op.col, op.col_offset);
        grid.rotate_row_right(op.row, op.row_offset);
    }
    grid.to_block()
}

/// Pads `data` up to a multiple of 32 bytes with `pad_len` copies of `pad_len`.
///
/// Aligned input (including empty input) is returned unchanged.
pub fn pad(data: &[u8]) -> Vec<u8> {
    let pad_len = BLOCK_BYTES - data.len() % BLOCK_BYTES;
    let mut padded = Vec::with_capacity(data.len() + pad_len);
    padded.extend_from_slice(data);
    if pad_len != BLOCK_BYTES {
        padded.resize(data.len() + pad_len, pad_len as u8);
    }
    padded
}

/// Removes trailing padding when the last byte `p` is in `1..=32` and the last
/// `p` bytes all equal `p`; otherwise leaves `data` untouched.
pub fn strip_padding(data: &mut Vec<u8>) {
    let Some(&last) = data.last() else {
        return;
    };
    let pad_len = usize::from(last);
    if pad_len == 0 || pad_len > BLOCK_BYTES || pad_len > data.len() {
        return;
    }
    let tail = &data[data.len() - pad_len..];
    if tail.iter().all(|&b| b == last) {
        data.truncate(data.len() - pad_len);
    }
}

/// Encrypts `data` under `key`. The output length is always a multiple of 32.
pub fn encrypt(data: &[u8], key: &KeyHash) -> Vec<u8> {
    let padded = pad(data);
    let schedule = Schedule::from_key(key);

    let mut out = Vec::with_capacity(padded.len());
    for chunk in padded.chunks_exact(BLOCK_BYTES) {
        let mut block = [0u8; BLOCK_BYTES];
        block.copy_from_slice(chunk);
        out.extend_from_slice(&cipher_block(&block, &schedule));
    }
    debug!(
        plaintext = data.len(),
        blocks = out.len() / BLOCK_BYTES,
        "encrypted buffer"
    );
    out
}

/// Decrypts `data` under `key`, returning an empty buffer when its length is
/// not a multiple of 32.
///
/// Use [`try_decrypt`] to tell malformed input apart from an empty plaintext.
pub fn decrypt(data: &[u8], key: &KeyHash) -> Vec<u8> {
    try_decrypt(data, key).unwrap_or_default()
}

/// Decrypts `data` under `key`.
///
/// # Errors
/// Returns [`CipherError::InvalidLength`] if `data` is not a whole number of blocks.
pub fn try_decrypt(data: &[u8], key: &KeyHash) -> Result<Vec<u8>, CipherError> {
    if data.len() % BLOCK_BYTES != 0 {
        warn!(len = data.len(), "rejecting ciphertext with partial block");
        return Err(CipherError::InvalidLength { len: data.len() });
    }
    let reversed = Schedule::from_key(key).reversed();

    let mut out = Vec::with_capacity(data.len());
    for chunk in data.chunks_exact(BLOCK_BYTES) {
        let mut block = [0u8; BLOCK_BYTES];
        block.copy_from_slice(chunk);
        out.extend_from_slice(&decipher_block(&block, &reversed));
    }
    strip_padding(&mut out);
    debug!(
        blocks = data.len() / BLOCK_BYTES,
        plaintext = out.len(),
        "decrypted buffer"
    );
    Ok(out)
}
