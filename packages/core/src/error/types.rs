//! Engine Error Types
//!
//! Core error types for structural parsing, locking and masked extraction.

use thiserror::Error;

/// Structural parse failure.
///
/// Any of these makes the whole evaluation for the offending input
/// unrecoverable: a failed parse is the statement that the claimed
/// structural fact is false, so there is nothing to retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParserError {
    /// An opening brace or bracket arrived while every stack slot was
    /// already occupied.
    #[error("nesting depth exceeds the fixed stack capacity of {max_depth}")]
    StackOverflow {
        /// The fixed stack capacity that was exceeded
        max_depth: usize,
    },

    /// A closing brace or bracket arrived with nothing on the stack.
    #[error("closing delimiter 0x{byte:02x} read with an empty container stack")]
    StackUnderflow {
        /// The delimiter byte that caused the underflow
        byte: u8,
    },

    /// A closing delimiter did not match the container that is open.
    #[error("closing delimiter 0x{found:02x} does not match the open container")]
    MismatchedDelimiter {
        /// The delimiter byte that was read
        found: u8,
    },

    /// A delimiter that has no meaning outside a container (`:` or `,`)
    /// arrived at top level.
    #[error("delimiter 0x{byte:02x} is structurally impossible at top level")]
    UnexpectedDelimiter {
        /// The offending byte
        byte: u8,
    },
}

/// Failure of an HTTP start-line or header lock.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LockError {
    /// A start-line component did not match the locked bytes.
    #[error("start line mismatch in the {part} component")]
    StartLineMismatch {
        /// Which of the three components failed
        part: &'static str,
    },

    /// No header line matched the locked name/value pair.
    #[error("no header matched the locked name/value pair")]
    HeaderMismatch,

    /// The message contains no blank-line delimiter, so it has no body.
    #[error("message has no CRLF CRLF body delimiter")]
    MissingBodyDelimiter,
}

/// Failure while building a masked or compacted output buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The target value is longer than the declared output capacity.
    ///
    /// Recoverable only by re-instantiating with a larger capacity; the
    /// engine never resizes dynamically.
    #[error("value of {actual} bytes exceeds the declared capacity of {capacity}")]
    CapacityViolation {
        /// Real length of the target value
        actual: usize,
        /// Fixed capacity the caller declared
        capacity: usize,
    },

    /// Masking selected no bytes at all, so there is no value to compact.
    #[error("mask selected no bytes; the claimed location holds no value")]
    EmptyMask,

    /// A numeric decode met a byte outside the ASCII digit range.
    ///
    /// Decimals, signs and exponents are legal bare-number bytes but
    /// carry no integer interpretation.
    #[error("byte 0x{byte:02x} in the value is not an ASCII digit")]
    NonDigitByte {
        /// The offending value byte
        byte: u8,
    },
}

/// Failure inside the step-composition layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    /// A data lane held a value outside the byte range.
    #[error("lane {lane} holds {value}, which is not a byte")]
    InvalidByte {
        /// Lane index inside the step vector
        lane: usize,
        /// The out-of-range value
        value: u64,
    },

    /// A vector of the wrong total width was supplied.
    #[error("step vector is {actual} lanes wide, expected {expected}")]
    WidthMismatch {
        /// Width the configuration demands
        expected: usize,
        /// Width that was supplied
        actual: usize,
    },

    /// The per-byte register block is too narrow for the machine that
    /// wants to write into it.
    #[error("register block of {actual} lanes cannot hold {needed} machine registers")]
    RegisterBlockTooNarrow {
        /// Registers the machine serializes per byte
        needed: usize,
        /// Lanes available per byte
        actual: usize,
    },

    /// Structural parse failure inside a step.
    #[error(transparent)]
    Parser(#[from] ParserError),

    /// Lock failure inside a step.
    #[error(transparent)]
    Lock(#[from] LockError),

    /// Extraction failure inside a step.
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Result type for engine operations.
pub type CoreResult<T> = Result<T, StepError>;
