//! HTTP steps
//!
//! The HTTP stages of a chain: parse the message while locking its
//! start line, lock a header, then mask everything but the body so the
//! JSON stages can take over on the same vector.

use crate::error::{CoreResult, StepError};
use crate::http::machine::HttpState;
use crate::http::{lock_header, lock_start_line, mask_body};

use super::chain::Step;
use super::vector::StepVector;

/// Run the HTTP region machine over the data lanes and verify the
/// start line in the same pass.
#[derive(Debug, Clone)]
pub struct HttpParseAndLockStartLineStep {
    beginning: Vec<u8>,
    middle: Vec<u8>,
    final_part: Vec<u8>,
}

impl HttpParseAndLockStartLineStep {
    /// Lock step for the three start-line components.
    #[must_use]
    pub fn new(
        beginning: impl Into<Vec<u8>>,
        middle: impl Into<Vec<u8>>,
        final_part: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            beginning: beginning.into(),
            middle: middle.into(),
            final_part: final_part.into(),
        }
    }
}

impl<const H: usize> Step<H> for HttpParseAndLockStartLineStep {
    fn name(&self) -> &'static str {
        "http_parse_and_lock_start_line"
    }

    fn apply(&self, mut vector: StepVector<H>) -> CoreResult<StepVector<H>> {
        // The HTTP machine shares the register block the JSON machine
        // uses; the block must be able to hold it.
        if HttpState::REGISTER_COUNT > StepVector::<H>::REGISTER_WIDTH {
            return Err(StepError::RegisterBlockTooNarrow {
                needed: HttpState::REGISTER_COUNT,
                actual: StepVector::<H>::REGISTER_WIDTH,
            });
        }

        let data = vector.data()?;
        let mut state = HttpState::new();
        for (i, &byte) in data.iter().enumerate() {
            state.step(byte);
            vector.set_registers_at(i, &state.to_lanes())?;
        }

        lock_start_line(&data, &self.beginning, &self.middle, &self.final_part)?;
        vector.bump();
        Ok(vector)
    }
}

/// Verify a header name/value pair is present in the message.
#[derive(Debug, Clone)]
pub struct HttpLockHeaderStep {
    name: Vec<u8>,
    value: Vec<u8>,
}

impl HttpLockHeaderStep {
    /// Lock step for one header pair.
    #[must_use]
    pub fn new(name: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl<const H: usize> Step<H> for HttpLockHeaderStep {
    fn name(&self) -> &'static str {
        "http_lock_header"
    }

    fn apply(&self, mut vector: StepVector<H>) -> CoreResult<StepVector<H>> {
        let data = vector.data()?;
        lock_header(&data, &self.name, &self.value)?;
        vector.bump();
        Ok(vector)
    }
}

/// Mask the data lanes down to the message body.
///
/// Registers are left stale on purpose; a JSON parse step follows and
/// rewrites them for the masked buffer.
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpExtractBodyStep;

impl<const H: usize> Step<H> for HttpExtractBodyStep {
    fn name(&self) -> &'static str {
        "http_extract_body"
    }

    fn apply(&self, mut vector: StepVector<H>) -> CoreResult<StepVector<H>> {
        let data = vector.data()?;
        let mask = mask_body(&data)?;
        vector.set_data(&mask)?;
        vector.bump();
        Ok(vector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &[u8] =
        b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\r\n{\"ok\": 1}";

    fn fresh(data: &[u8]) -> StepVector<3> {
        StepVector::from_payload(data, data.len() + 8).expect("fits")
    }

    #[test]
    fn start_line_step_records_registers_and_locks() {
        let vector = fresh(RESPONSE);
        let step = HttpParseAndLockStartLineStep::new(&b"HTTP/1.1"[..], &b"200"[..], &b"OK"[..]);
        let vector = step.apply(vector).expect("lock");
        // After the 'H' of the version the machine is in the first
        // start-line component.
        assert_eq!(vector.registers_at(0)[0], 1);
        // After the space before the status code it is in the second.
        assert_eq!(vector.registers_at(8)[0], 2);
        assert_eq!(vector.steps_completed(), 1);
    }

    #[test]
    fn wrong_status_fails_the_start_line_step() {
        let vector = fresh(RESPONSE);
        let step = HttpParseAndLockStartLineStep::new(&b"HTTP/1.1"[..], &b"404"[..], &b"OK"[..]);
        assert!(step.apply(vector).is_err());
    }

    #[test]
    fn narrow_register_block_is_rejected() {
        // H = 1 gives 4 register lanes, fewer than the HTTP machine needs.
        let vector = StepVector::<1>::from_payload(RESPONSE, RESPONSE.len()).expect("fits");
        let step = HttpParseAndLockStartLineStep::new(&b"HTTP/1.1"[..], &b"200"[..], &b"OK"[..]);
        let err = step.apply(vector).unwrap_err();
        assert!(matches!(
            err,
            StepError::RegisterBlockTooNarrow { needed: 6, actual: 4 }
        ));
    }

    #[test]
    fn body_step_masks_the_headers_away() {
        let vector = fresh(RESPONSE);
        let vector = HttpExtractBodyStep.apply(vector).expect("body");
        let data = vector.data().expect("bytes");
        let survivors: Vec<u8> = data.into_iter().filter(|&b| b != 0).collect();
        assert_eq!(&survivors, br#"{"ok": 1}"#);
    }

    #[test]
    fn header_step_locks_and_bumps() {
        let vector = fresh(RESPONSE);
        let step = HttpLockHeaderStep::new(&b"Content-Type"[..], &b"application/json"[..]);
        let vector = step.apply(vector).expect("lock");
        assert_eq!(vector.steps_completed(), 1);
        assert!(HttpLockHeaderStep::new(&b"Content-Type"[..], &b"text/html"[..])
            .apply(vector)
            .is_err());
    }
}
