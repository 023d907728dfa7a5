//! Byte-range validation for step-vector lanes
//!
//! Lanes are `u64` because the step vectors model field elements; every
//! lane that claims to be a byte has to prove it. A lane holding 256 or
//! more is a hard input-validation failure, not a clampable value.

use crate::error::{CoreResult, StepError};

/// Check that a single lane holds a byte.
#[inline]
pub fn validate_byte(lane: usize, value: u64) -> CoreResult<u8> {
    if value > u64::from(u8::MAX) {
        return Err(StepError::InvalidByte { lane, value });
    }
    Ok(value as u8)
}

/// Validate a whole data-lane block, materializing it as bytes.
pub fn validate_bytes(lanes: &[u64]) -> CoreResult<Vec<u8>> {
    let mut out = Vec::with_capacity(lanes.len());
    for (lane, &value) in lanes.iter().enumerate() {
        out.push(validate_byte(lane, value)?);
    }
    Ok(out)
}

/// Check that a lane holds a printable-or-control ASCII byte (< 128).
#[inline]
pub fn validate_ascii(lane: usize, value: u64) -> CoreResult<u8> {
    if value > 0x7f {
        return Err(StepError::InvalidByte { lane, value });
    }
    Ok(value as u8)
}

/// Inclusive range check used by the matchers.
#[inline]
#[must_use]
pub fn in_range(byte: u8, low: u8, high: u8) -> bool {
    byte >= low && byte <= high
}

/// ASCII digit check, the gate for entering number parsing.
#[inline]
#[must_use]
pub fn is_digit(byte: u8) -> bool {
    in_range(byte, b'0', b'9')
}

/// Bytes that keep an open number open: sign, decimal point, exponent.
#[inline]
#[must_use]
pub fn is_number_continuation(byte: u8) -> bool {
    matches!(byte, b'+' | b'-' | b'.' | b'e' | b'E')
}
