//! Fixed-width bit arrays backed by `u64` words.
//!
//! Bit `i` lives in word `i / 64` at offset `i % 64`. The byte view follows the
//! little-endian layout of the words, so byte `j` covers bits `8j..8j + 8` with
//! bit `8j` as its least significant bit.

use core::fmt;
use core::ops::{BitAnd, BitAndAssign, BitXor, BitXorAssign, Not};

use crate::error::Error;

/// 256-bit array, the width of a digest and of a cipher key.
pub type Bits256 = BitArray<4>;

/// 512-bit array produced by the interleaving expansion.
pub type Bits512 = BitArray<8>;

/// Fixed-size bit array of `WORDS * 64` bits.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitArray<const WORDS: usize> {
    words: [u64; WORDS],
}

impl<const WORDS: usize> BitArray<WORDS> {
    /// Number of bits in the array.
    pub const BITS: usize = WORDS * 64;

    /// Number of bytes in the byte view.
    pub const BYTES: usize = WORDS * 8;

    /// Returns the all-zero array.
    pub const fn zero() -> Self {
        Self { words: [0u64; WORDS] }
    }

    /// Builds an array from raw words, least significant word first.
    pub const fn from_words(words: [u64; WORDS]) -> Self {
        Self { words }
    }

    /// Exposes the underlying words, least significant word first.
    pub fn words(&self) -> &[u64; WORDS] {
        &self.words
    }

    /// Loads up to `BYTES` bytes into the low end of the array.
    ///
    /// # Errors
    /// Returns [`Error::InputTooLong`] when `bytes` does not fit.
    pub fn try_from_le_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() > Self::BYTES {
            return Err(Error::InputTooLong {
                len: bytes.len(),
                max: Self::BYTES,
            });
        }
        let mut out = Self::zero();
        for (j, &b) in bytes.iter().enumerate() {
            out.set_byte(j, b);
        }
        Ok(out)
    }

    /// Loads bytes into the low end of the array, ignoring anything past `BYTES`.
    pub fn from_le_bytes_truncated(bytes: &[u8]) -> Self {
        let take = bytes.len().min(Self::BYTES);
        let mut out = Self::zero();
        for (j, &b) in bytes[..take].iter().enumerate() {
            out.set_byte(j, b);
        }
        out
    }

    /// Returns the byte view of the array.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.words.iter().flat_map(|w| w.to_le_bytes()).collect()
    }

    /// Reads bit `index`.
    ///
    /// # Panics
    /// Panics if `index >= BITS`.
    #[inline]
    pub fn bit(&self, index: usize) -> bool {
        assert!(index < Self::BITS, "bit index {index} out of range");
        (self.words[index / 64] >> (index % 64)) & 1 == 1
    }

    /// Writes bit `index`.
    ///
    /// # Panics
    /// Panics if `index >= BITS`.
    #[inline]
    pub fn set_bit(&mut self, index: usize, value: bool) {
        assert!(index < Self::BITS, "bit index {index} out of range");
        let mask = 1u64 << (index % 64);
        if value {
            self.words[index / 64] |= mask;
        } else {
            self.words[index / 64] &= !mask;
        }
    }

    /// Inverts bit `index`.
    ///
    /// # Panics
    /// Panics if `index >= BITS`.
    #[inline]
    pub fn flip_bit(&mut self, index: usize) {
        assert!(index < Self::BITS, "bit index {index} out of range");
        self.words[index / 64] ^= 1u64 << (index % 64);
    }

    /// Reads byte `index` of the byte view.
    ///
    /// # Panics
    /// Panics if `index >= BYTES`.
    #[inline]
    pub fn byte(&self, index: usize) -> u8 {
        assert!(index < Self::BYTES, "byte index {index} out of range");
        (self.words[index / 8] >> (8 * (index % 8))) as u8
    }

    /// Writes byte `index` of the byte view.
    ///
    /// # Panics
    /// Panics if `index >= BYTES`.
    #[inline]
    pub fn set_byte(&mut self, index: usize, value: u8) {
        assert!(index < Self::BYTES, "byte index {index} out of range");
        let shift = 8 * (index % 8);
        let word = &mut self.words[index / 8];
        *word = (*word & !(0xffu64 << shift)) | (u64::from(value) << shift);
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> u32 {
        self.words.iter().map(|w| w.count_ones()).sum()
    }

    /// Rotates towards higher indices: bit `i` moves to `(i + shift) % BITS`.
    ///
    /// `shift` is reduced modulo the width, so a full-width rotation is a no-op.
    pub fn rotate_left(&self, shift: usize) -> Self {
        let shift = shift % Self::BITS;
        let word_shift = shift / 64;
        let bit_shift = shift % 64;
        let mut out = [0u64; WORDS];
        for (i, slot) in out.iter_mut().enumerate() {
            let src = (i + WORDS - word_shift) % WORDS;
            let lo = self.words[src];
            *slot = if bit_shift == 0 {
                lo
            } else {
                let prev = self.words[(src + WORDS - 1) % WORDS];
                (lo << bit_shift) | (prev >> (64 - bit_shift))
            };
        }
        Self { words: out }
    }

    /// Rotates towards lower indices; inverse of [`rotate_left`](Self::rotate_left).
    pub fn rotate_right(&self, shift: usize) -> Self {
        let shift = shift % Self::BITS;
        self.rotate_left(Self::BITS - shift)
    }
}

impl Bits256 {
    /// Maps a string to a 256-bit array: its UTF-8 bytes, truncated to 32.
    pub fn bitify(text: &str) -> Self {
        Self::from_le_bytes_truncated(text.as_bytes())
    }

    /// Returns the byte view as a fixed array.
    pub fn to_byte_array(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        for (chunk, word) in out.chunks_exact_mut(8).zip(self.words.iter()) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        out
    }

    /// Builds an array from a fixed 32-byte view.
    pub fn from_byte_array(bytes: [u8; 32]) -> Self {
        Self::from_le_bytes_truncated(&bytes)
    }
}

impl<const WORDS: usize> Default for BitArray<WORDS> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const WORDS: usize> BitXor for BitArray<WORDS> {
    type Output = Self;

    fn bitxor(mut self, rhs: Self) -> Self {
        self ^= rhs;
        self
    }
}

impl<const WORDS: usize> BitXorAssign for BitArray<WORDS> {
    fn bitxor_assign(&mut self, rhs: Self) {
        for (d, s) in self.words.iter_mut().zip(rhs.words.iter()) {
            *d ^= *s;
        }
    }
}

impl<const WORDS: usize> BitAnd for BitArray<WORDS> {
    type Output = Self;

    fn bitand(mut self, rhs: Self) -> Self {
        self &= rhs;
        self
    }
}

impl<const WORDS: usize> BitAndAssign for BitArray<WORDS> {
    fn bitand_assign(&mut self, rhs: Self) {
        for (d, s) in self.words.iter_mut().zip(rhs.words.iter()) {
            *d &= *s;
        }
    }
}

impl<const WORDS: usize> Not for BitArray<WORDS> {
    type Output = Self;

    fn not(mut self) -> Self {
        for w in self.words.iter_mut() {
            *w = !*w;
        }
        self
    }
}

/// Prints the bits most significant first, like a binary literal.
impl<const WORDS: usize> fmt::Debug for BitArray<WORDS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for w in self.words.iter().rev() {
            write!(f, "{w:064b}")?;
        }
        Ok(())
    }
}
