//! Uniform step vector
//!
//! Every step kind reads and writes the same flat lane layout, so steps
//! can be chained without per-kind plumbing:
//!
//! ```text
//! [ data lanes; D ] ++ [ per-byte registers; D * (2H + 2) ] ++ [ aux ]
//! ```
//!
//! Data lanes hold one byte each (a lane value of 256 or more is a hard
//! failure, not a truncation). The register block carries the serialized
//! machine state after each byte. The aux lane counts completed steps.

use crate::bytes::{validate_byte, validate_bytes};
use crate::error::{CoreResult, StepError};
use crate::json::ParserState;

/// Flat lane buffer shared by every step in a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepVector<const H: usize> {
    data_bytes: usize,
    lanes: Vec<u64>,
}

impl<const H: usize> StepVector<H> {
    /// Lanes in the serialized machine state of one byte.
    pub const REGISTER_WIDTH: usize = ParserState::<H>::REGISTER_WIDTH;

    /// Total lane count for a given data length.
    #[must_use]
    pub fn width(data_bytes: usize) -> usize {
        data_bytes * (Self::REGISTER_WIDTH + 1) + 1
    }

    /// Build a fresh vector from a payload, zero-padding the data lanes
    /// up to `data_bytes` and zeroing all registers and the aux lane.
    pub fn from_payload(payload: &[u8], data_bytes: usize) -> CoreResult<Self> {
        if payload.len() > data_bytes {
            return Err(StepError::WidthMismatch {
                expected: data_bytes,
                actual: payload.len(),
            });
        }
        let mut lanes = vec![0u64; Self::width(data_bytes)];
        for (lane, &byte) in lanes.iter_mut().zip(payload) {
            *lane = u64::from(byte);
        }
        Ok(Self { data_bytes, lanes })
    }

    /// Adopt an existing lane buffer, validating the overall width and
    /// every data lane.
    pub fn from_lanes(lanes: Vec<u64>, data_bytes: usize) -> CoreResult<Self> {
        if lanes.len() != Self::width(data_bytes) {
            return Err(StepError::WidthMismatch {
                expected: Self::width(data_bytes),
                actual: lanes.len(),
            });
        }
        for (lane, &value) in lanes[..data_bytes].iter().enumerate() {
            validate_byte(lane, value)?;
        }
        Ok(Self { data_bytes, lanes })
    }

    /// Number of data lanes.
    #[must_use]
    pub fn data_bytes(&self) -> usize {
        self.data_bytes
    }

    /// The data lanes decoded back into bytes.
    pub fn data(&self) -> CoreResult<Vec<u8>> {
        validate_bytes(&self.lanes[..self.data_bytes])
    }

    /// Overwrite the data lanes with a same-length byte buffer.
    pub fn set_data(&mut self, data: &[u8]) -> CoreResult<()> {
        if data.len() != self.data_bytes {
            return Err(StepError::WidthMismatch {
                expected: self.data_bytes,
                actual: data.len(),
            });
        }
        for (lane, &byte) in self.lanes[..self.data_bytes].iter_mut().zip(data) {
            *lane = u64::from(byte);
        }
        Ok(())
    }

    /// Register block for byte `i`.
    #[must_use]
    pub fn registers_at(&self, i: usize) -> &[u64] {
        let start = self.data_bytes + i * Self::REGISTER_WIDTH;
        &self.lanes[start..start + Self::REGISTER_WIDTH]
    }

    /// Overwrite the leading lanes of byte `i`'s register block.
    ///
    /// Narrower machines leave the tail of the block zero; a machine
    /// wider than the block is a configuration error.
    pub fn set_registers_at(&mut self, i: usize, registers: &[u64]) -> CoreResult<()> {
        if registers.len() > Self::REGISTER_WIDTH {
            return Err(StepError::RegisterBlockTooNarrow {
                needed: registers.len(),
                actual: Self::REGISTER_WIDTH,
            });
        }
        let start = self.data_bytes + i * Self::REGISTER_WIDTH;
        self.lanes[start..start + registers.len()].copy_from_slice(registers);
        self.lanes[start + registers.len()..start + Self::REGISTER_WIDTH].fill(0);
        Ok(())
    }

    /// Completed-step counter in the aux lane.
    #[must_use]
    pub fn steps_completed(&self) -> u64 {
        *self.lanes.last().unwrap_or(&0)
    }

    /// Record one more completed step.
    pub fn bump(&mut self) {
        if let Some(aux) = self.lanes.last_mut() {
            *aux += 1;
        }
    }

    /// The raw lane buffer.
    #[must_use]
    pub fn lanes(&self) -> &[u64] {
        &self.lanes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_matches_the_layout() {
        // 4 data lanes, 2H + 2 = 6 registers each, 1 aux lane.
        assert_eq!(StepVector::<2>::width(4), 4 * 7 + 1);
    }

    #[test]
    fn payload_is_zero_padded() {
        let v = StepVector::<2>::from_payload(b"ab", 4).expect("fits");
        assert_eq!(v.data().expect("bytes"), b"ab\0\0");
        assert_eq!(v.steps_completed(), 0);
    }

    #[test]
    fn oversized_lane_is_rejected() {
        let mut lanes = vec![0u64; StepVector::<2>::width(4)];
        lanes[1] = 256;
        let err = StepVector::<2>::from_lanes(lanes, 4).unwrap_err();
        assert!(matches!(err, StepError::InvalidByte { lane: 1, value: 256 }));
    }

    #[test]
    fn register_blocks_are_disjoint() {
        let mut v = StepVector::<2>::from_payload(b"abcd", 4).expect("fits");
        v.set_registers_at(1, &[1, 2, 3, 4, 5, 6]).expect("width");
        assert_eq!(v.registers_at(1), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(v.registers_at(0), &[0; 6]);
        assert_eq!(v.registers_at(2), &[0; 6]);
    }
}
