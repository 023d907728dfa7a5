//! Byte and bit primitives
//!
//! Leaf utilities shared by every layer: lane-to-byte validation, range
//! checks, and byte/bit decomposition with the reference failure
//! semantics (any lane value of 256 or more is malformed input).

mod bits;
mod validate;

pub use bits::{bits_to_byte, byte_to_bits};
pub use validate::{
    in_range, is_digit, is_number_continuation, validate_ascii, validate_byte, validate_bytes,
};
