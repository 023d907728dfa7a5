//! JSON mask steps
//!
//! Each mask step narrows the data lanes to one subtree, reading the
//! registers a parse step left behind rather than re-parsing. An object
//! masker keeps everything under one key's value; an array masker keeps
//! one element. Chained maskers therefore walk a path one segment per
//! step, and registers stay valid throughout because masked bytes keep
//! their original positions.
//!
//! A byte survives only if its subtree predicate holds both before and
//! after the byte's own transition. This keeps the whole nested value
//! while excluding the boundary bytes on either side of it: the colon
//! that flips the frame into value phase (predicate false before) and
//! the delimiter that closes the enclosing container (false after).

use crate::challenge::Challenge;
use crate::error::CoreResult;
use crate::json::interpreter::{
    inside_array_subtree_at, inside_value_subtree_at, next_kv_pair_at_depth,
};
use crate::json::matcher::key_match_at_depth;
use crate::json::ParserState;

use super::chain::Step;
use super::vector::StepVector;

/// Keep the subtree under `key` in the object at stack depth `depth`.
#[derive(Debug, Clone)]
pub struct JsonMaskObjectStep {
    key: Vec<u8>,
    depth: usize,
}

impl JsonMaskObjectStep {
    /// Mask step for `key` whose enclosing object sits at `depth`.
    #[must_use]
    pub fn new(key: impl Into<Vec<u8>>, depth: usize) -> Self {
        Self {
            key: key.into(),
            depth,
        }
    }
}

fn state_before<const H: usize>(vector: &StepVector<H>, i: usize) -> CoreResult<ParserState<H>> {
    if i == 0 {
        Ok(ParserState::new())
    } else {
        ParserState::from_lanes(vector.registers_at(i - 1))
    }
}

impl<const H: usize> Step<H> for JsonMaskObjectStep {
    fn name(&self) -> &'static str {
        "json_mask_object"
    }

    fn apply(&self, mut vector: StepVector<H>) -> CoreResult<StepVector<H>> {
        let data = vector.data()?;
        let challenge = Challenge::derive(&self.key, &data);

        let mut matched = false;
        let mut mask = vec![0u8; data.len()];
        for (i, &byte) in data.iter().enumerate() {
            let before = state_before(&vector, i)?;
            let after = ParserState::<H>::from_lanes(vector.registers_at(i))?;
            let is_match =
                key_match_at_depth(&data, &self.key, challenge, i, &after, self.depth);
            matched = (is_match || matched) && !next_kv_pair_at_depth(&after, byte, self.depth);
            if matched
                && inside_value_subtree_at(&before, self.depth)
                && inside_value_subtree_at(&after, self.depth)
            {
                mask[i] = byte;
            }
        }

        vector.set_data(&mask)?;
        vector.bump();
        Ok(vector)
    }
}

/// Keep element `index` of the array at stack depth `depth`.
#[derive(Debug, Clone, Copy)]
pub struct JsonMaskArrayIndexStep {
    index: u64,
    depth: usize,
}

impl JsonMaskArrayIndexStep {
    /// Mask step for element `index` of the array at `depth`.
    #[must_use]
    pub fn new(index: u64, depth: usize) -> Self {
        Self { index, depth }
    }
}

impl<const H: usize> Step<H> for JsonMaskArrayIndexStep {
    fn name(&self) -> &'static str {
        "json_mask_array_index"
    }

    fn apply(&self, mut vector: StepVector<H>) -> CoreResult<StepVector<H>> {
        let data = vector.data()?;

        let mut mask = vec![0u8; data.len()];
        for (i, &byte) in data.iter().enumerate() {
            let before = state_before(&vector, i)?;
            let after = ParserState::<H>::from_lanes(vector.registers_at(i))?;
            if inside_array_subtree_at(&before, self.index, self.depth)
                && inside_array_subtree_at(&after, self.index, self.depth)
            {
                mask[i] = byte;
            }
        }

        vector.set_data(&mask)?;
        vector.bump();
        Ok(vector)
    }
}
