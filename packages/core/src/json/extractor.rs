//! One-shot masking and extraction
//!
//! Runs the structural machine over the whole buffer once, carrying a
//! match flag per path segment, and emits a mask that is byte-identical
//! to the input on the selected value and zero elsewhere. Extraction
//! then compacts the surviving run.
//!
//! Match flags propagate: a key match observed at its starting byte
//! stays set until a comma at that key's depth (or shallower) starts the
//! next pair. Array segments need no propagation, their element index is
//! readable from the stack frame at every byte.

use crate::challenge::Challenge;
use crate::error::{CoreResult, ExtractError};
use crate::output::ExtractionOutput;

use super::interpreter::{
    inside_array_index_at, inside_array_subtree_at, inside_value_at, next_kv_pair_at_depth,
};
use super::matcher::key_match_at_depth;
use super::parser::ParserState;

/// One step of a value path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Descend through the object key `key`, whose enclosing object sits
    /// at stack depth `depth`.
    Key {
        /// Key bytes, without quotes
        key: Vec<u8>,
        /// Stack depth of the enclosing object
        depth: usize,
    },
    /// Descend into element `index` of the array at stack depth `depth`.
    Index {
        /// Zero-based element index
        index: u64,
        /// Stack depth of the enclosing array
        depth: usize,
    },
}

/// Mask `data` down to the value addressed by `path`.
///
/// The output has the same length as the input: selected bytes are
/// copied through, everything else is zero. A structural parse failure
/// anywhere in the buffer fails the whole call.
pub fn mask_value<const H: usize>(data: &[u8], path: &[PathSegment]) -> CoreResult<Vec<u8>> {
    let challenge = derive_path_challenge(data, path);
    let mut state = ParserState::<H>::new();
    let mut matched = vec![false; path.len()];
    let mut mask = vec![0u8; data.len()];

    let Some(last) = path.last() else {
        return Ok(mask);
    };

    for (i, &byte) in data.iter().enumerate() {
        state.step(byte)?;

        for (flag, segment) in matched.iter_mut().zip(path) {
            if let PathSegment::Key { key, depth } = segment {
                let is_match = key_match_at_depth(data, key, challenge, i, &state, *depth);
                *flag = (is_match || *flag) && !next_kv_pair_at_depth(&state, byte, *depth);
            }
        }

        let path_holds = matched.iter().zip(path).all(|(flag, segment)| match segment {
            PathSegment::Key { .. } => *flag,
            PathSegment::Index { index, depth } => {
                inside_array_subtree_at(&state, *index, *depth)
            }
        });

        let at_value = match last {
            PathSegment::Key { depth, .. } => inside_value_at(&state, *depth),
            PathSegment::Index { index, depth } => {
                inside_array_index_at(&state, *index, *depth)
            }
        };

        if path_holds && at_value {
            mask[i] = byte;
        }
    }

    Ok(mask)
}

/// Mask and compact in one call.
///
/// The value is the first contiguous nonzero run of the mask. String
/// values keep their opening quote in the mask (the machine is already
/// in-string when that byte lands) but not their closing one, so a
/// leading quote is stripped before compaction.
pub fn extract_value<const H: usize>(
    data: &[u8],
    path: &[PathSegment],
    capacity: usize,
) -> CoreResult<ExtractionOutput> {
    let mask = mask_value::<H>(data, path)?;

    let start = mask
        .iter()
        .position(|&b| b != 0)
        .ok_or(ExtractError::EmptyMask)?;
    let end = mask[start..]
        .iter()
        .position(|&b| b == 0)
        .map_or(mask.len(), |off| start + off);

    let mut value = &mask[start..end];
    if value.first() == Some(&b'"') {
        value = &value[1..];
    }
    ExtractionOutput::from_value(value, capacity)
}

fn derive_path_challenge(data: &[u8], path: &[PathSegment]) -> Challenge {
    let mut material = Vec::new();
    for segment in path {
        match segment {
            PathSegment::Key { key, .. } => material.extend_from_slice(key),
            PathSegment::Index { index, .. } => {
                material.extend_from_slice(&index.to_le_bytes());
            }
        }
    }
    Challenge::derive(&material, data)
}
