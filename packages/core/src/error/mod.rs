//! Error types for the locking and extraction engine
//!
//! Hard failures (malformed input, capacity violations, failed locks) are
//! typed errors; a key or header that simply does not match at a claimed
//! position is a boolean value, never an error, because callers routinely
//! test the should-not-match direction.

mod types;

pub use types::{CoreResult, ExtractError, LockError, ParserError, StepError};
