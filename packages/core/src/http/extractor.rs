//! Body location and extraction
//!
//! The body is everything after the first blank line. Finding it is a
//! substring scan, not a parse, so the double-CRLF search goes through
//! `memchr::memmem` and the parser machine is not involved.

use std::ops::Range;

use bytes::Bytes;
use memchr::memmem;

use crate::error::{CoreResult, LockError};
use crate::output::ExtractionOutput;

const BODY_DELIMITER: &[u8] = b"\r\n\r\n";

/// Byte range of the body inside `data`.
///
/// The range may be empty (a delimiter at the very end is a message
/// with no body, which is still a located body).
pub fn body_range(data: &[u8]) -> Result<Range<usize>, LockError> {
    memmem::find(data, BODY_DELIMITER)
        .map(|at| at + BODY_DELIMITER.len()..data.len())
        .ok_or(LockError::MissingBodyDelimiter)
}

/// Zero-copy body slice of a shared buffer.
pub fn body(data: &Bytes) -> Result<Bytes, LockError> {
    let range = body_range(data)?;
    Ok(data.slice(range))
}

/// Compact the body into a fixed-capacity output buffer.
pub fn extract_body(data: &[u8], capacity: usize) -> CoreResult<ExtractionOutput> {
    let range = body_range(data)?;
    ExtractionOutput::from_value(&data[range], capacity)
}

/// Mask `data` down to its body: header bytes zeroed, body bytes kept
/// in place.
pub fn mask_body(data: &[u8]) -> Result<Vec<u8>, LockError> {
    let range = body_range(data)?;
    let mut mask = vec![0u8; data.len()];
    mask[range.clone()].copy_from_slice(&data[range]);
    Ok(mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &[u8] =
        b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\r\n{\"ok\": 1}";

    #[test]
    fn body_starts_after_the_blank_line() {
        let range = body_range(RESPONSE).expect("delimiter present");
        assert_eq!(&RESPONSE[range], br#"{"ok": 1}"#);
    }

    #[test]
    fn shared_buffer_slicing_is_zero_copy() {
        let data = Bytes::from_static(RESPONSE);
        assert_eq!(body(&data).expect("delimiter present"), &br#"{"ok": 1}"#[..]);
    }

    #[test]
    fn over_capacity_output_is_zero_padded() {
        let out = extract_body(RESPONSE, 12).expect("extract");
        assert_eq!(out.value(), br#"{"ok": 1}"#);
        assert_eq!(out.as_bytes().len(), 12);
        assert_eq!(&out.as_bytes()[9..], &[0, 0, 0]);
    }

    #[test]
    fn under_capacity_is_a_violation() {
        assert!(extract_body(RESPONSE, 4).is_err());
    }

    #[test]
    fn missing_delimiter_is_an_error() {
        assert_eq!(
            body_range(b"HTTP/1.1 200 OK\r\n"),
            Err(LockError::MissingBodyDelimiter)
        );
    }

    #[test]
    fn mask_keeps_body_bytes_in_place() {
        let mask = mask_body(RESPONSE).expect("delimiter present");
        assert_eq!(mask.len(), RESPONSE.len());
        assert!(mask[..51].iter().all(|&b| b == 0));
        assert_eq!(&mask[51..], br#"{"ok": 1}"#);
    }
}
