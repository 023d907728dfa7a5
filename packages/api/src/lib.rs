//! Selective-disclosure locking and extraction for JSON and HTTP
//!
//! The public face of the engine: lockfile schemas, parameter
//! resolution against a sample payload, and high-level pipelines that
//! pick a standard engine instantiation and run it.
//!
//! ```no_run
//! use weblock::{extract_json, JsonLockfile};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let lockfile: JsonLockfile =
//!     serde_json::from_str(r#"{ "keys": ["key2"], "value_type": "string" }"#)?;
//! let payload = br#"{"key1": 1, "key2": "def"}"#;
//! let value = extract_json(&lockfile, payload)?;
//! assert_eq!(value.value(), b"def");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod lockfile;
pub mod pipeline;

pub use config::{json_max_stack_height, JsonInstance};
pub use error::{ApiError, LockfileError};
pub use lockfile::{HttpData, JsonLockfile, Key, ValueType};
pub use pipeline::{
    extract_json, extract_json_chained, verify_and_extract, MAX_SUPPORTED_HEIGHT,
};

// Engine types callers need to hold results or build custom chains.
pub use weblock_core::{ExtractionOutput, PathSegment, StepError};
