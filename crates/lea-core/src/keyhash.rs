//! KeyHash: a 256-bit digest built from expand/compact/diffuse rounds.
//!
//! Each round interleaves the (wrapped) input with a transformed copy of
//! itself into 512 bits, folds adjacent bit pairs back down to 256 bits and then
//! diffuses the result:
//!
//! 1. rotate left by the population count,
//! 2. flip every other bit with a round-dependent phase,
//! 3. substitute every byte through the S-box,
//! 4. flip every bit whose index is a multiple of `PRIME2`.
//!
//! Round 0 honours the declared input length; later rounds always read the
//! full 32 bytes of the previous round's output.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{trace, trace_span};

use crate::bits::{Bits256, Bits512};
use crate::error::Error;
use crate::params::HashParams;
use crate::sbox::sbox_with;

/// Width of the hashing window in bytes.
pub const WINDOW_BYTES: usize = 32;

const EVEN_BITS: u64 = 0x5555_5555_5555_5555;
const ODD_BITS: u64 = 0xaaaa_aaaa_aaaa_aaaa;

/// A 256-bit digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 32]", into = "[u8; 32]")]
pub struct KeyHash(Bits256);

impl KeyHash {
    /// Underlying digest bits.
    pub fn bits(&self) -> &Bits256 {
        &self.0
    }

    /// Renders the digest as 64 uppercase hex digits, most significant 64-bit
    /// chunk (bits 192..256) first.
    pub fn hex_str(&self) -> String {
        let mut bytes = [0u8; 32];
        for (chunk, word) in bytes.chunks_exact_mut(8).zip(self.0.words().iter().rev()) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        hex::encode_upper(bytes)
    }

    /// Parses the output of [`hex_str`](Self::hex_str); case-insensitive.
    ///
    /// # Errors
    /// Returns [`Error::InvalidHexLength`] or [`Error::Hex`].
    pub fn from_hex(text: &str) -> Result<Self, Error> {
        let text = text.trim();
        if text.len() != 64 {
            return Err(Error::InvalidHexLength { len: text.len() });
        }
        let bytes = hex::decode(text)?;
        let mut words = [0u64; 4];
        for (word, chunk) in words.iter_mut().rev().zip(bytes.chunks_exact(8)) {
            let mut be = [0u8; 8];
            be.copy_from_slice(chunk);
            *word = u64::from_be_bytes(be);
        }
        Ok(Self(Bits256::from_words(words)))
    }

    /// Little-endian byte view of the digest.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_byte_array()
    }

    /// Rebuilds a digest from its byte view.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(Bits256::from_byte_array(bytes))
    }

    /// Number of differing bits between two digests.
    pub fn distance(&self, other: &Self) -> u32 {
        (self.0 ^ other.0).count_ones()
    }
}

impl From<Bits256> for KeyHash {
    fn from(bits: Bits256) -> Self {
        Self(bits)
    }
}

impl From<[u8; 32]> for KeyHash {
    fn from(bytes: [u8; 32]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<KeyHash> for [u8; 32] {
    fn from(key: KeyHash) -> Self {
        key.to_bytes()
    }
}

impl FromStr for KeyHash {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for KeyHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex_str())
    }
}

impl fmt::Debug for KeyHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyHash({})", self.hex_str())
    }
}

/// Hashes `input`, of which the first `input_byte_length` bytes are meaningful.
///
/// # Panics
/// Panics if `input_byte_length` is outside `1..=32`.
pub fn gen_keyhash(input: &Bits256, input_byte_length: usize) -> KeyHash {
    match try_gen_keyhash(input, input_byte_length) {
        Ok(digest) => digest,
        Err(err) => panic!("gen_keyhash: {err}"),
    }
}

/// Checked variant of [`gen_keyhash`].
///
/// # Errors
/// Returns [`Error::InvalidInputLength`] if `input_byte_length` is outside `1..=32`.
pub fn try_gen_keyhash(input: &Bits256, input_byte_length: usize) -> Result<KeyHash, Error> {
    gen_keyhash_with(&HashParams::STANDARD, input, input_byte_length)
}

/// Hashes with caller-supplied round constants.
///
/// # Errors
/// Returns an error if the parameters fail [`HashParams::validate`] or the
/// length is outside `1..=32`.
pub fn gen_keyhash_with(
    params: &HashParams,
    input: &Bits256,
    input_byte_length: usize,
) -> Result<KeyHash, Error> {
    params.validate()?;
    check_length(input_byte_length)?;
    let _span = trace_span!("gen_keyhash", input_byte_length, rounds = params.rounds).entered();

    let mut state = *input;
    let mut length = input_byte_length;
    for round in 0..params.rounds {
        state = run_round(params, &state, length, round);
        length = WINDOW_BYTES;
    }
    Ok(KeyHash(state))
}

/// Hashes a byte message of at most 32 bytes using its own length.
///
/// An empty message is hashed as a single zero byte.
///
/// # Errors
/// Returns [`Error::InputTooLong`] for messages longer than 32 bytes.
pub fn hash_message(message: &[u8]) -> Result<KeyHash, Error> {
    let bits = Bits256::try_from_le_bytes(message)?;
    try_gen_keyhash(&bits, message.len().max(1))
}

fn check_length(input_byte_length: usize) -> Result<(), Error> {
    if (1..=WINDOW_BYTES).contains(&input_byte_length) {
        Ok(())
    } else {
        Err(Error::InvalidInputLength {
            len: input_byte_length,
        })
    }
}

fn run_round(params: &HashParams, state: &Bits256, length: usize, round: usize) -> Bits256 {
    let expanded = expand(state, length, params.multiplier);
    let compacted = sequential_bit_compact(&expanded);

    let shift = compacted.count_ones() as usize % Bits256::BITS;
    let mut state = compacted.rotate_left(shift);

    mix_phase(&mut state, round + 1, params.flip_stride);
    substitute(&mut state, params.multiplier);
    flip_stride(&mut state, params.flip_stride);

    trace!(
        round,
        prime = params.round_prime(round),
        shift,
        ones = state.count_ones(),
        "keyhash round"
    );
    state
}

/// Interleaves the wrapped input with its transformed padding bytes.
///
/// Even output bits carry the wrapped input in reversed bit order, odd output
/// bits carry `!(byte * PRIME1)` of each wrapped byte.
///
/// # Panics
/// Panics if `input_byte_length` is outside `1..=32`.
pub fn bit_interleaving_expand(input: &Bits256, input_byte_length: usize) -> Bits512 {
    if let Err(err) = check_length(input_byte_length) {
        panic!("bit_interleaving_expand: {err}");
    }
    expand(input, input_byte_length, HashParams::STANDARD.multiplier)
}

fn expand(input: &Bits256, input_byte_length: usize, multiplier: u8) -> Bits512 {
    let mut wrapping = Bits256::zero();
    let mut padding = Bits256::zero();
    for byte_index in 0..WINDOW_BYTES {
        let byte = input.byte(byte_index % input_byte_length);
        wrapping.set_byte(byte_index, byte);
        padding.set_byte(byte_index, !byte.wrapping_mul(multiplier));
    }

    let mut expanded = Bits512::zero();
    for bit_index in 0..Bits512::BITS {
        let half = bit_index / 2;
        let value = if bit_index % 2 == 1 {
            padding.bit(half)
        } else {
            wrapping.bit(Bits256::BITS - 1 - half)
        };
        expanded.set_bit(bit_index, value);
    }
    expanded
}

/// Folds 512 bits to 256 by XOR-ing each adjacent pair.
pub fn sequential_bit_compact(input: &Bits512) -> Bits256 {
    let mut compacted = Bits256::zero();
    for i in 0..Bits256::BITS {
        compacted.set_bit(i, input.bit(2 * i) ^ input.bit(2 * i + 1));
    }
    compacted
}

/// XORs bit `j` with `(j + round * PRIME2) % 2`; `round` is 1-based.
pub fn mix(bits: &mut Bits256, round: usize) {
    mix_phase(bits, round, HashParams::STANDARD.flip_stride);
}

fn mix_phase(bits: &mut Bits256, round: usize, stride: usize) {
    // Odd phase flips even indices, even phase flips odd indices.
    let mask = if (round * stride) % 2 == 1 {
        EVEN_BITS
    } else {
        ODD_BITS
    };
    *bits ^= Bits256::from_words([mask; 4]);
}

/// Replaces every byte of the state with its S-box value.
pub fn apply_sbox(bits: &mut Bits256) {
    substitute(bits, HashParams::STANDARD.multiplier);
}

fn substitute(bits: &mut Bits256, multiplier: u8) {
    for j in 0..Bits256::BYTES {
        bits.set_byte(j, sbox_with(multiplier, bits.byte(j)));
    }
}

/// Flips every bit whose index is a multiple of `PRIME2`.
pub fn intermittent_bit_flip(bits: &mut Bits256) {
    flip_stride(bits, HashParams::STANDARD.flip_stride);
}

fn flip_stride(bits: &mut Bits256, stride: usize) {
    for i in (0..Bits256::BITS).step_by(stride) {
        bits.flip_bit(i);
    }
}
