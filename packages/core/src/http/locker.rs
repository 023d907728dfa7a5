//! Start-line and header locks
//!
//! A lock is a presence-and-position proof over an HTTP message: the
//! caller supplies the bytes it expects and the lock either holds or
//! fails hard. Start lines sit at a fixed offset, so they are compared
//! directly; headers can appear on any line, so they go through the
//! randomized window matcher anchored at line starts.

use crate::challenge::{windows_equal, Challenge};

use super::machine::HttpState;
use crate::error::LockError;

/// Verify the three space-separated components of the start line.
///
/// For a request these are method, target, and version; for a response,
/// version, status code, and reason phrase. The comparison is anchored:
/// `beginning` at offset 0, one space, `middle`, one space, `final`,
/// then CRLF. Any deviation names the component that broke.
pub fn lock_start_line(
    data: &[u8],
    beginning: &[u8],
    middle: &[u8],
    final_part: &[u8],
) -> Result<(), LockError> {
    let mut cursor = 0usize;
    expect(data, &mut cursor, beginning, "beginning")?;
    expect(data, &mut cursor, b" ", "beginning")?;
    expect(data, &mut cursor, middle, "middle")?;
    expect(data, &mut cursor, b" ", "middle")?;
    expect(data, &mut cursor, final_part, "final")?;
    expect(data, &mut cursor, b"\r\n", "final")?;
    Ok(())
}

fn expect(
    data: &[u8],
    cursor: &mut usize,
    wanted: &[u8],
    part: &'static str,
) -> Result<(), LockError> {
    let end = *cursor + wanted.len();
    if data.len() < end || &data[*cursor..end] != wanted {
        return Err(LockError::StartLineMismatch { part });
    }
    *cursor = end;
    Ok(())
}

/// Verify that some header line reads exactly `name: value`.
///
/// The needle `name: value\r\n` is compared at every line start in the
/// header section via the randomized matcher, with the machine
/// confirming the candidate position really begins a header name. The
/// value must be the whole rest of the line; a prefix does not lock.
pub fn lock_header(data: &[u8], name: &[u8], value: &[u8]) -> Result<(), LockError> {
    let mut needle = Vec::with_capacity(name.len() + value.len() + 4);
    needle.extend_from_slice(name);
    needle.extend_from_slice(b": ");
    needle.extend_from_slice(value);
    needle.extend_from_slice(b"\r\n");
    let challenge = Challenge::derive(&needle, data);

    let mut state = HttpState::new();
    for (i, &byte) in data.iter().enumerate() {
        // A name's first byte sits right after a line break; anywhere
        // later in the name a needle could lock on a name suffix.
        let line_start = state.header_index() != 0
            && state.in_field_name()
            && i > 0
            && data[i - 1] == b'\n';
        state.step(byte);
        if state.in_body() {
            break;
        }
        let candidate = line_start && i + needle.len() <= data.len();
        if candidate && windows_equal(&needle, &data[i..i + needle.len()], challenge) {
            return Ok(());
        }
    }
    Err(LockError::HeaderMismatch)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GET_REQUEST: &[u8] =
        b"GET /api HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n";

    #[test]
    fn start_line_locks_on_exact_parts() {
        assert!(lock_start_line(GET_REQUEST, b"GET", b"/api", b"HTTP/1.1").is_ok());
    }

    #[test]
    fn start_line_rejects_each_wrong_part() {
        assert_eq!(
            lock_start_line(GET_REQUEST, b"POST", b"/api", b"HTTP/1.1"),
            Err(LockError::StartLineMismatch { part: "beginning" })
        );
        assert_eq!(
            lock_start_line(GET_REQUEST, b"GET", b"/", b"HTTP/1.1"),
            Err(LockError::StartLineMismatch { part: "middle" })
        );
        assert_eq!(
            lock_start_line(GET_REQUEST, b"GET", b"/api", b"HTTP"),
            Err(LockError::StartLineMismatch { part: "final" })
        );
    }

    #[test]
    fn status_line_locks_like_a_request_line() {
        let response = b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n\r\nhi";
        assert!(lock_start_line(response, b"HTTP/1.1", b"200", b"OK").is_ok());
        assert!(lock_start_line(response, b"HTTP/1.1", b"404", b"OK").is_err());
    }

    #[test]
    fn header_locks_on_the_exact_pair() {
        assert!(lock_header(GET_REQUEST, b"Host", b"localhost").is_ok());
        assert!(lock_header(GET_REQUEST, b"Connection", b"close").is_ok());
    }

    #[test]
    fn header_rejects_wrong_name_value_and_prefix() {
        assert_eq!(
            lock_header(GET_REQUEST, b"Accept", b"localhost"),
            Err(LockError::HeaderMismatch)
        );
        assert_eq!(
            lock_header(GET_REQUEST, b"Host", b"venmo.com"),
            Err(LockError::HeaderMismatch)
        );
        // A value prefix leaves the CRLF misplaced, so it must not lock.
        assert_eq!(
            lock_header(GET_REQUEST, b"Host", b"local"),
            Err(LockError::HeaderMismatch)
        );
    }

    #[test]
    fn header_name_suffix_does_not_lock() {
        let message = b"GET / HTTP/1.1\r\nXHost: localhost\r\n\r\n";
        assert_eq!(
            lock_header(message, b"Host", b"localhost"),
            Err(LockError::HeaderMismatch)
        );
        assert!(lock_header(message, b"XHost", b"localhost").is_ok());
    }

    #[test]
    fn header_bytes_in_the_body_do_not_lock() {
        let sneaky = b"GET / HTTP/1.1\r\nA: b\r\n\r\nHost: localhost\r\n";
        assert_eq!(
            lock_header(sneaky, b"Host", b"localhost"),
            Err(LockError::HeaderMismatch)
        );
    }
}
