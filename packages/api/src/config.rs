//! Instantiation
//!
//! The engine works in fixed sizes, so before anything runs, a lockfile
//! plus a sample payload is turned into the concrete parameter set: the
//! stack height the sample needs, the per-segment keys and depths, and
//! the output capacity of the value at the end of the path. The walk
//! uses a full JSON parse of the sample; the engine itself never sees
//! the parsed tree.

use serde_json::Value;
use weblock_core::PathSegment;

use crate::error::LockfileError;
use crate::lockfile::{JsonLockfile, Key, ValueType};

/// Concrete parameters derived from a lockfile and a sample payload.
#[derive(Debug, Clone)]
pub struct JsonInstance {
    /// Deepest nesting the sample payload reaches.
    pub max_stack_height: usize,
    /// Path segments with their resolved depths, outermost first.
    pub segments: Vec<PathSegment>,
    /// Byte length of the value found in the sample.
    pub value_capacity: usize,
}

impl JsonInstance {
    /// Resolve `lockfile` against `sample`.
    ///
    /// Each path segment's depth is its position in the path: the
    /// lockfile addresses one container per level, so segment `i`
    /// operates on the frame at stack depth `i`. Missing keys, missing
    /// indices, and type mismatches all fail here rather than at run
    /// time.
    pub fn from_lockfile(lockfile: &JsonLockfile, sample: &[u8]) -> Result<Self, LockfileError> {
        let mut current: Value = serde_json::from_slice(sample)?;
        let mut segments = Vec::with_capacity(lockfile.keys().len());

        for (depth, key) in lockfile.keys().iter().enumerate() {
            current = match key {
                Key::String(key) => {
                    segments.push(PathSegment::Key {
                        key: key.as_bytes().to_vec(),
                        depth,
                    });
                    current
                        .get_mut(key)
                        .ok_or_else(|| LockfileError::MissingKey { key: key.clone() })?
                        .take()
                }
                Key::Num(index) => {
                    segments.push(PathSegment::Index {
                        index: *index as u64,
                        depth,
                    });
                    current
                        .get_mut(*index)
                        .ok_or(LockfileError::MissingIndex { index: *index })?
                        .take()
                }
            };
        }

        let value_capacity = match lockfile.value_type() {
            ValueType::Number => current
                .as_u64()
                .ok_or(LockfileError::ValueTypeMismatch { expected: "number" })?
                .to_string()
                .len(),
            ValueType::String => current
                .as_str()
                .ok_or(LockfileError::ValueTypeMismatch { expected: "string" })?
                .len(),
        };

        Ok(Self {
            max_stack_height: json_max_stack_height(sample),
            segments,
            value_capacity,
        })
    }
}

/// Deepest container nesting in `input`, ignoring delimiters inside
/// strings.
#[must_use]
pub fn json_max_stack_height(input: &[u8]) -> usize {
    let mut max = 0usize;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for &byte in input {
        if escaped {
            escaped = false;
            continue;
        }
        match byte {
            b'\\' if in_string => escaped = true,
            b'"' => in_string = !in_string,
            b'{' | b'[' if !in_string => {
                depth += 1;
                max = max.max(depth);
            }
            b'}' | b']' if !in_string => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    max
}
