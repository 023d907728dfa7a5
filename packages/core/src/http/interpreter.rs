//! Request method recognition
//!
//! Maps the leading verb of a request line onto a small integer tag so
//! callers can branch on a number instead of re-comparing byte strings.

use crate::error::{LockError, StepError};

/// Request methods the engine recognizes, tagged for cheap branching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u64)]
pub enum Method {
    /// `GET`
    Get = 1,
    /// `POST`
    Post = 2,
    /// `PUT`
    Put = 3,
    /// `DELETE`
    Delete = 4,
    /// `HEAD`
    Head = 5,
    /// `OPTIONS`
    Options = 6,
    /// `PATCH`
    Patch = 7,
}

impl Method {
    /// The numeric tag of the method.
    #[must_use]
    pub fn tag(self) -> u64 {
        self as u64
    }
}

/// Recognize the verb that opens `data`.
///
/// The verb is everything up to the first space; an unknown or
/// unterminated verb fails the start line, not the process.
pub fn yield_method(data: &[u8]) -> Result<Method, StepError> {
    let end = data
        .iter()
        .position(|&b| b == b' ')
        .ok_or(LockError::StartLineMismatch { part: "beginning" })?;
    match &data[..end] {
        b"GET" => Ok(Method::Get),
        b"POST" => Ok(Method::Post),
        b"PUT" => Ok(Method::Put),
        b"DELETE" => Ok(Method::Delete),
        b"HEAD" => Ok(Method::Head),
        b"OPTIONS" => Ok(Method::Options),
        b"PATCH" => Ok(Method::Patch),
        _ => Err(LockError::StartLineMismatch { part: "beginning" }.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_yields_tag_one() {
        assert_eq!(yield_method(b"GET /api HTTP/1.1").expect("verb"), Method::Get);
        assert_eq!(Method::Get.tag(), 1);
    }

    #[test]
    fn post_yields_tag_two() {
        assert_eq!(Method::Post.tag(), 2);
        assert_eq!(yield_method(b"POST / HTTP/1.1").expect("verb"), Method::Post);
    }

    #[test]
    fn unknown_verb_is_a_start_line_mismatch() {
        assert!(yield_method(b"BREW /pot HTTP/1.1").is_err());
        assert!(yield_method(b"GET").is_err());
    }
}
