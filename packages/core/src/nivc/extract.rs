//! Terminal value extraction
//!
//! The last stage of a chain: collapse the surviving masked span into a
//! fixed-capacity output. Not a `Step`, because it produces a value
//! instead of another vector.

use crate::error::{CoreResult, ExtractError};
use crate::output::ExtractionOutput;

use super::vector::StepVector;

/// Compact the masked data lanes into an `ExtractionOutput`.
#[derive(Debug, Clone, Copy)]
pub struct JsonExtractValueStep {
    capacity: usize,
}

impl JsonExtractValueStep {
    /// Extractor with a fixed output capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Consume the chain's final vector and compact the surviving span.
    ///
    /// The span runs from the first nonzero lane to the last. Whitespace
    /// the subtree maskers legitimately kept around the value is
    /// trimmed, then a surrounding quote pair is stripped so string
    /// values come out bare.
    pub fn finish<const H: usize>(&self, vector: &StepVector<H>) -> CoreResult<ExtractionOutput> {
        let data = vector.data()?;

        let start = data
            .iter()
            .position(|&b| b != 0)
            .ok_or(ExtractError::EmptyMask)?;
        let end = data
            .iter()
            .rposition(|&b| b != 0)
            .unwrap_or(start);

        let mut value = &data[start..=end];
        while value.first().is_some_and(u8::is_ascii_whitespace) {
            value = &value[1..];
        }
        while value.last().is_some_and(u8::is_ascii_whitespace) {
            value = &value[..value.len() - 1];
        }
        if value.len() >= 2 && value.first() == Some(&b'"') && value.last() == Some(&b'"') {
            value = &value[1..value.len() - 1];
        }

        ExtractionOutput::from_value(value, self.capacity)
    }
}
