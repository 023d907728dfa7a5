//! Byte/bit decomposition
//!
//! The proving backend works over bit decompositions, so the reference
//! semantics are kept here: decomposition of a lane into eight bits must
//! fail loudly for anything that is not a byte.

use crate::error::CoreResult;

use super::validate::validate_byte;

/// Decompose a lane into eight bits, least significant first.
///
/// Fails for any lane value of 256 or more; 255 decomposes to all ones.
pub fn byte_to_bits(value: u64) -> CoreResult<[u8; 8]> {
    let byte = validate_byte(0, value)?;
    let mut bits = [0u8; 8];
    for (i, bit) in bits.iter_mut().enumerate() {
        *bit = (byte >> i) & 1;
    }
    Ok(bits)
}

/// Recompose eight bits, least significant first, into a byte lane.
#[must_use]
pub fn bits_to_byte(bits: &[u8; 8]) -> u64 {
    bits.iter()
        .enumerate()
        .fold(0u64, |acc, (i, &bit)| acc | (u64::from(bit & 1) << i))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_byte_decomposes_to_all_ones() {
        assert_eq!(byte_to_bits(255).expect("255 is a byte"), [1u8; 8]);
    }

    #[test]
    fn out_of_range_lane_is_rejected() {
        assert!(byte_to_bits(256).is_err());
        assert!(byte_to_bits(u64::MAX).is_err());
    }

    #[test]
    fn decompose_recompose_is_identity() {
        for value in [0u64, 1, 2, 42, 127, 128, 254, 255] {
            let bits = byte_to_bits(value).expect("byte");
            assert_eq!(bits_to_byte(&bits), value);
        }
    }
}
