//! Round constants for the KeyHash engine.

use crate::error::Error;

/// Constants driving the expand/compact rounds.
///
/// Passed by reference into the engine; [`HashParams::STANDARD`] is the only
/// parameter set that produces interoperable digests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HashParams {
    /// Per-round prime table, indexed by round.
    pub primes: [u32; 14],
    /// Number of expand/compact rounds.
    pub rounds: usize,
    /// Byte multiplier for padding bytes and the S-box (`PRIME1`).
    pub multiplier: u8,
    /// Stride of the intermittent bit flip and phase factor of the mix (`PRIME2`).
    pub flip_stride: usize,
}

impl HashParams {
    /// Standard constants: four rounds, `PRIME1 = 17`, `PRIME2 = 31`.
    pub const STANDARD: Self = Self {
        primes: [3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47],
        rounds: 4,
        multiplier: 17,
        flip_stride: 31,
    };

    /// Checks that the constants describe a runnable pipeline.
    ///
    /// # Errors
    /// Returns [`Error::InvalidRounds`] or [`Error::ZeroFlipStride`].
    pub fn validate(&self) -> Result<(), Error> {
        if self.rounds == 0 || self.rounds > self.primes.len() {
            return Err(Error::InvalidRounds {
                rounds: self.rounds,
                max: self.primes.len(),
            });
        }
        if self.flip_stride == 0 {
            return Err(Error::ZeroFlipStride);
        }
        Ok(())
    }

    /// Prime assigned to round `index` (0-based).
    pub fn round_prime(&self, index: usize) -> u32 {
        self.primes[index]
    }
}

impl Default for HashParams {
    fn default() -> Self {
        Self::STANDARD
    }
}
