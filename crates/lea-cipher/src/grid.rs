//! 16×16-bit grid view of a 32-byte block.

use crate::Block;

/// Sixteen rows of sixteen bits. Row `i` holds bytes `2i` (low) and `2i + 1` (high).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid([u16; 16]);

impl Grid {
    /// Builds the grid by pairing bytes little-endian.
    pub fn from_block(block: &Block) -> Self {
        let mut rows = [0u16; 16];
        for (row, pair) in rows.iter_mut().zip(block.chunks_exact(2)) {
            *row = u16::from_le_bytes([pair[0], pair[1]]);
        }
        Self(rows)
    }

    /// Serializes rows back to bytes, low byte first.
    pub fn to_block(&self) -> Block {
        let mut block = [0u8; 32];
        for (pair, row) in block.chunks_exact_mut(2).zip(self.0.iter()) {
            pair.copy_from_slice(&row.to_le_bytes());
        }
        block
    }

    /// Returns row `index`.
    #[inline]
    pub fn row(&self, index: u8) -> u16 {
        self.0[usize::from(index)]
    }

    /// Rotates row `index` towards its high bits.
    #[inline]
    pub fn rotate_row_left(&mut self, index: u8, shift: u8) {
        let row = &mut self.0[usize::from(index)];
        *row = row.rotate_left(u32::from(shift));
    }

    /// Rotates row `index` towards its low bits.
    #[inline]
    pub fn rotate_row_right(&mut self, index: u8, shift: u8) {
        let row = &mut self.0[usize::from(index)];
        *row = row.rotate_right(u32::from(shift));
    }

    /// Gathers bit `index` of every row; row `r` supplies bit `r` of the result.
    pub fn column(&self, index: u8) -> u16 {
        assert!(index < 16, "column index {index} out of range");
        self.0
            .iter()
            .enumerate()
            .fold(0u16, |acc, (r, row)| acc | (((row >> index) & 1) << r))
    }

    /// Scatters `value` into bit `index` of every row.
    pub fn set_column(&mut self, index: u8, value: u16) {
        assert!(index < 16, "column index {index} out of range");
        let mask = 1u16 << index;
        for (r, row) in self.0.iter_mut().enumerate() {
            if (value >> r) & 1 == 1 {
                *row |= mask;
            } else {
                *row &= !mask;
            }
        }
    }

    /// Rotates column `index` towards higher rows.
    pub fn rotate_column_left(&mut self, index: u8, shift: u8) {
        let column = self.column(index).rotate_left(u32::from(shift));
        self.set_column(index, column);
    }

    /// Rotates column `index` towards lower rows.
    pub fn rotate_column_right(&mut self, index: u8, shift: u8) {
        let column = self.column(index).rotate_right(u32::from(shift));
        self.set_column(index, column);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting_block() -> Block {
        core::array::from_fn(|i| i as u8)
    }

    #[test]
    fn rows_pair_bytes_little_endian() {
        let grid = Grid::from_block(&counting_block());
        assert_eq!(grid.row(0), 0x0100);
        assert_eq!(grid.row(15), 0x1f1e);
        assert_eq!(grid.to_block(), counting_block());
    }

    #[test]
    fn column_reads_one_bit_per_row() {
        let mut block = [0u8; 32];
        // Row 3, bit 9 lives in the high byte of row 3.
        block[7] = 0b10;
        let grid = Grid::from_block(&block);
        assert_eq!(grid.column(9), 1 << 3);
        assert_eq!(grid.column(8), 0);
    }

    #[test]
    fn set_column_only_touches_that_bit() {
        let mut grid = Grid::from_block(&[0xff; 32]);
        grid.set_column(4, 0);
        for r in 0..16 {
            assert_eq!(grid.row(r), 0xffef);
        }
        grid.set_column(4, 0x8001);
        assert_eq!(grid.row(0), 0xffff);
        assert_eq!(grid.row(15), 0xffff);
        assert_eq!(grid.row(7), 0xffef);
    }

    #[test]
    fn row_rotation_wraps_in_sixteen_bits() {
        let mut grid = Grid::from_block(&[0u8; 32]);
        grid.set_column(15, 1);
        grid.rotate_row_left(0, 1);
        assert_eq!(grid.row(0), 1);
        grid.rotate_row_right(0, 1);
        assert_eq!(grid.row(0), 0x8000);
    }

    #[test]
    fn column_rotation_moves_bits_between_rows() {
        let mut grid = Grid::from_block(&[0u8; 32]);
        grid.set_column(2, 1 << 15);
        grid.rotate_column_left(2, 3);
        assert_eq!(grid.column(2), 1 << 2);
        assert_eq!(grid.row(2), 1 << 2);
        grid.rotate_column_right(2, 3);
        assert_eq!(grid.row(15), 1 << 2);
    }
}
