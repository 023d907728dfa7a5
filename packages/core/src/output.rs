//! Fixed-capacity extraction output
//!
//! Every extractor in the crate compacts its target region into one of
//! these: a buffer of instantiation-time capacity, value bytes
//! left-aligned, remainder always zero. Over-length capacity is the
//! expected case, not an error; a value longer than the capacity is.

use crate::error::{CoreResult, ExtractError};

/// A compacted, zero-padded value buffer of fixed capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionOutput {
    buf: Vec<u8>,
    len: usize,
}

impl ExtractionOutput {
    /// Compact `value` into a buffer of exactly `capacity` bytes.
    pub fn from_value(value: &[u8], capacity: usize) -> CoreResult<Self> {
        if value.len() > capacity {
            return Err(ExtractError::CapacityViolation {
                actual: value.len(),
                capacity,
            }
            .into());
        }
        let mut buf = vec![0u8; capacity];
        buf[..value.len()].copy_from_slice(value);
        Ok(Self {
            buf,
            len: value.len(),
        })
    }

    /// The whole fixed-capacity buffer, zero padding included.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Only the value bytes, padding stripped.
    #[must_use]
    pub fn value(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Real length of the extracted value.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the extracted value is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Declared capacity of the buffer.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Fold the value's ASCII digits into an integer, `acc * 10 +
    /// (byte - '0')` over the value bytes.
    ///
    /// Bare numbers may legitimately carry `.`, `-` or an exponent;
    /// those have no integer reading and fail instead of folding.
    pub fn decode_number(&self) -> CoreResult<u64> {
        self.value().iter().try_fold(0u64, |acc, &b| {
            if b.is_ascii_digit() {
                Ok(acc * 10 + u64::from(b - b'0'))
            } else {
                Err(ExtractError::NonDigitByte { byte: b }.into())
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StepError;

    #[test]
    fn decodes_plain_integers() {
        let out = ExtractionOutput::from_value(b"69", 4).expect("fits");
        assert_eq!(out.decode_number().expect("digits"), 69);
    }

    #[test]
    fn non_digit_value_bytes_refuse_to_decode() {
        let out = ExtractionOutput::from_value(b"1.5", 4).expect("fits");
        assert!(matches!(
            out.decode_number(),
            Err(StepError::Extract(ExtractError::NonDigitByte { byte: b'.' }))
        ));
        let out = ExtractionOutput::from_value(b"-5", 4).expect("fits");
        assert!(out.decode_number().is_err());
    }
}
