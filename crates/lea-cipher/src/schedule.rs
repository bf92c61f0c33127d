//! Operation schedule derived from a 256-bit key.

use core::fmt;

use lea_core::{Bits256, KeyHash};
use serde::{Deserialize, Serialize};

/// Number of operations in a schedule.
pub const SCHEDULE_LEN: usize = 16;

/// One grid step: rotate a row, then rotate a column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Row index (0..16).
    pub row: u8,
    /// Left-rotate amount for the row (0..16).
    pub row_offset: u8,
    /// Column index (0..16).
    pub col: u8,
    /// Left-rotate amount for the column (0..16).
    pub col_offset: u8,
}

impl Operation {
    /// Splits a 16-bit chunk into nibbles, most significant first.
    pub const fn from_chunk(chunk: u16) -> Self {
        Self {
            row: ((chunk >> 12) & 0xf) as u8,
            row_offset: ((chunk >> 8) & 0xf) as u8,
            col: ((chunk >> 4) & 0xf) as u8,
            col_offset: (chunk & 0xf) as u8,
        }
    }

    /// Packs the operation back into its 16-bit chunk.
    pub const fn to_chunk(&self) -> u16 {
        ((self.row as u16 & 0xf) << 12)
            | ((self.row_offset as u16 & 0xf) << 8)
            | ((self.col as u16 & 0xf) << 4)
            | (self.col_offset as u16 & 0xf)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row {:>2} <<< {:>2}, col {:>2} <<< {:>2}",
            self.row, self.row_offset, self.col, self.col_offset
        )
    }
}

/// Ordered sequence of exactly sixteen operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule([Operation; SCHEDULE_LEN]);

impl Schedule {
    /// Wraps an explicit operation list.
    pub const fn new(operations: [Operation; SCHEDULE_LEN]) -> Self {
        Self(operations)
    }

    /// Forward schedule for a cipher key.
    pub fn from_key(key: &KeyHash) -> Self {
        get_operations(key.bits())
    }

    /// Returns the schedule in reverse application order.
    pub fn reversed(&self) -> Self {
        let mut operations = self.0;
        operations.reverse();
        Self(operations)
    }

    /// Operations in application order.
    pub fn operations(&self) -> &[Operation; SCHEDULE_LEN] {
        &self.0
    }

    /// Iterates in application order.
    pub fn iter(&self) -> core::slice::Iter<'_, Operation> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a Operation;
    type IntoIter = core::slice::Iter<'a, Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, op) in self.0.iter().enumerate() {
            writeln!(f, "{i:>2}: {op}")?;
        }
        Ok(())
    }
}

/// Carves sixteen 16-bit chunks from the key, scanning from bit 255 downward.
///
/// Chunk `i` covers bits `255 - 16i - 15 ..= 255 - 16i`, assembled most
/// significant bit first.
pub fn get_operations(key: &Bits256) -> Schedule {
    let operations = core::array::from_fn(|i| {
        let start = Bits256::BITS - 1 - i * 16;
        let chunk = (0..16).fold(0u16, |acc, j| {
            acc | (u16::from(key.bit(start - j)) << (15 - j))
        });
        Operation::from_chunk(chunk)
    });
    Schedule(operations)
}
