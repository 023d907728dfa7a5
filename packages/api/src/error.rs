//! API error types

use thiserror::Error;

/// Failure while turning a lockfile and sample payload into concrete
/// engine parameters.
#[derive(Debug, Error)]
pub enum LockfileError {
    /// The lockfile or sample payload is not valid JSON.
    #[error("invalid lockfile or sample payload: {0}")]
    Schema(#[from] serde_json::Error),

    /// A locked key does not exist in the sample payload.
    #[error("key {key:?} is not present in the sample payload")]
    MissingKey {
        /// The absent key
        key: String,
    },

    /// A locked array index does not exist in the sample payload.
    #[error("index {index} is not present in the sample payload")]
    MissingIndex {
        /// The absent index
        index: usize,
    },

    /// The value at the end of the path has the wrong type.
    #[error("value at the locked path is not a {expected}")]
    ValueTypeMismatch {
        /// The type the lockfile declared
        expected: &'static str,
    },

    /// The sample payload nests deeper than any supported stack height.
    #[error("nesting depth {depth} exceeds the supported maximum of {max}")]
    UnsupportedDepth {
        /// Depth the sample requires
        depth: usize,
        /// Deepest supported instantiation
        max: usize,
    },
}

/// Any failure of the high-level entry points.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Parameter derivation failed.
    #[error(transparent)]
    Lockfile(#[from] LockfileError),

    /// The engine rejected the payload.
    #[error(transparent)]
    Engine(#[from] weblock_core::StepError),
}

impl From<weblock_core::LockError> for ApiError {
    fn from(err: weblock_core::LockError) -> Self {
        Self::Engine(err.into())
    }
}
