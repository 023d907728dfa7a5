//! Sequential step chaining
//!
//! Steps run strictly in order, each consuming the previous vector and
//! producing the next. The first failure aborts the chain; there is no
//! partial result to salvage because every later step's precondition is
//! the earlier step's postcondition.

use crate::error::CoreResult;

use super::vector::StepVector;

/// One folding stage over the shared step vector.
pub trait Step<const H: usize> {
    /// Stable name for diagnostics.
    fn name(&self) -> &'static str;

    /// Consume the incoming vector and produce the outgoing one.
    fn apply(&self, vector: StepVector<H>) -> CoreResult<StepVector<H>>;
}

/// An ordered pipeline of steps.
#[derive(Default)]
pub struct StepChain<const H: usize> {
    steps: Vec<Box<dyn Step<H>>>,
}

impl<const H: usize> StepChain<H> {
    /// An empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append a step.
    #[must_use]
    pub fn then(mut self, step: impl Step<H> + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Number of steps in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the chain has no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Fold the vector through every step in order.
    pub fn run(&self, mut vector: StepVector<H>) -> CoreResult<StepVector<H>> {
        for step in &self.steps {
            log::debug!(
                "step {} ({} completed before it)",
                step.name(),
                vector.steps_completed()
            );
            vector = step.apply(vector).inspect_err(|err| {
                log::debug!("step {} failed: {err}", step.name());
            })?;
        }
        Ok(vector)
    }
}
