//! Constraint-oriented locking and extraction over JSON and HTTP bytes
//!
//! This crate proves that a specific value sits at a specific semantic
//! location inside a byte buffer (an object key path, an array index, a
//! header name) without interpreting the rest of the buffer. Everything
//! is a single-pass byte fold with fixed sizes: nesting depth is a const
//! generic, output capacities are declared up front, and any input that
//! exceeds them is an error rather than a reallocation.
//!
//! The pieces:
//!
//! - [`json`]: bounded-stack structural machine, predicates, key
//!   matching, mask-then-compact extraction
//! - [`http`]: region machine, start-line and header locks, body
//!   extraction
//! - [`nivc`]: uniform step vectors and chained folding steps
//! - [`challenge`]: randomized window equality over a 61-bit field
//!
//! # Performance
//!
//! All entry points are O(n) in the input length with no allocation
//! proportional to nesting. The hot transition functions are branch
//! tables over single bytes.

pub mod bytes;
pub mod challenge;
pub mod error;
pub mod http;
pub mod json;
pub mod nivc;
pub mod output;

pub use challenge::{accumulate, windows_equal, Challenge, MODULUS};
pub use error::{CoreResult, ExtractError, LockError, ParserError, StepError};
pub use json::{extract_value, mask_value, ParserState, PathSegment};
pub use output::ExtractionOutput;
