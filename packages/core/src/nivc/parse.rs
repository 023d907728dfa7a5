//! JSON parse step
//!
//! Folds the structural machine over the data lanes and records the
//! serialized state after every byte in that byte's register block.
//! Later mask steps read those registers instead of re-parsing.

use crate::error::CoreResult;
use crate::json::ParserState;

use super::chain::Step;
use super::vector::StepVector;

/// Populate the register block with per-byte structural state.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonParseStep;

impl<const H: usize> Step<H> for JsonParseStep {
    fn name(&self) -> &'static str {
        "json_parse"
    }

    fn apply(&self, mut vector: StepVector<H>) -> CoreResult<StepVector<H>> {
        let data = vector.data()?;
        let mut state = ParserState::<H>::new();
        for (i, &byte) in data.iter().enumerate() {
            state.step(byte)?;
            vector.set_registers_at(i, &state.to_lanes())?;
        }
        vector.bump();
        Ok(vector)
    }
}
