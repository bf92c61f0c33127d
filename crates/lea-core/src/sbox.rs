//! Byte substitution used by the KeyHash diffusion step.

/// Multiplier of the standard table (`PRIME1`).
pub const PRIME1: u8 = 17;

const fn fold(x: u32, multiplier: u32) -> u8 {
    let product = (x * multiplier) ^ (x * x);
    (product ^ (product >> 8) ^ (product >> 16) ^ (product >> 24)) as u8
}

const fn build_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = fold(i as u32, PRIME1 as u32);
        i += 1;
    }
    table
}

/// `(x * 17) ^ (x * x)` computed in 32 bits, folded to a byte by XOR of its four bytes.
const SBOX: [u8; 256] = build_table();

/// Substitutes a single byte.
#[inline]
pub fn sbox(byte: u8) -> u8 {
    SBOX[byte as usize]
}

/// Substitutes a single byte with a non-standard multiplier.
#[inline]
pub fn sbox_with(multiplier: u8, byte: u8) -> u8 {
    if multiplier == PRIME1 {
        sbox(byte)
    } else {
        fold(u32::from(byte), u32::from(multiplier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_formula() {
        for x in 0u32..256 {
            let wide = (x * 17) ^ (x * x);
            let expected = wide.to_le_bytes().iter().fold(0u8, |acc, b| acc ^ b);
            assert_eq!(sbox(x as u8), expected);
        }
    }

    #[test]
    fn known_entries() {
        assert_eq!(sbox(0), 0);
        // 17 ^ 1 = 16
        assert_eq!(sbox(1), 0x10);
        // 255 * 17 = 0x10ef, 255 * 255 = 0xfe01, xor = 0xeeee
        assert_eq!(sbox(255), 0x00);
    }

    #[test]
    fn custom_multiplier_bypasses_table() {
        for x in 0u8..=255 {
            assert_eq!(sbox_with(PRIME1, x), sbox(x));
        }
        // 2 * 3 ^ 2 * 2 = 6 ^ 4
        assert_eq!(sbox_with(3, 2), 2);
    }
}
