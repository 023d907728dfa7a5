//! High-level pipelines
//!
//! The engine's stack height is a compile-time constant, so the public
//! entry points resolve the lockfile against the payload, pick the
//! smallest standard instantiation that fits, and dispatch into a
//! monomorphized run. Two JSON paths exist with identical results: the
//! one-shot extractor, and the step chain that mirrors how a proof
//! would compose.

use weblock_core::http::body_range;
use weblock_core::nivc::{
    HttpExtractBodyStep, HttpLockHeaderStep, HttpParseAndLockStartLineStep, JsonExtractValueStep,
    JsonMaskArrayIndexStep, JsonMaskObjectStep, JsonParseStep, StepChain, StepVector,
};
use weblock_core::{extract_value, CoreResult, ExtractionOutput, PathSegment};

use crate::config::JsonInstance;
use crate::error::{ApiError, LockfileError};
use crate::lockfile::{HttpData, JsonLockfile};

/// Deepest nesting any standard instantiation supports.
pub const MAX_SUPPORTED_HEIGHT: usize = 10;

/// Extract the locked value from a JSON payload in one pass.
pub fn extract_json(lockfile: &JsonLockfile, payload: &[u8]) -> Result<ExtractionOutput, ApiError> {
    let instance = JsonInstance::from_lockfile(lockfile, payload)?;
    log::debug!(
        "json extraction: {} segments, stack height {}, capacity {}",
        instance.segments.len(),
        instance.max_stack_height,
        instance.value_capacity
    );
    dispatch(instance.max_stack_height, &instance, payload, OneShot)
}

/// Extract the locked value by running the full step chain:
/// parse, one mask step per path segment, then compaction.
pub fn extract_json_chained(
    lockfile: &JsonLockfile,
    payload: &[u8],
) -> Result<ExtractionOutput, ApiError> {
    let instance = JsonInstance::from_lockfile(lockfile, payload)?;
    dispatch(instance.max_stack_height, &instance, payload, JsonChain)
}

/// Verify an HTTP message against its lock and extract the locked JSON
/// value from its body.
///
/// The chain is the whole pipeline in order: start-line lock, one
/// header lock per locked header, body masking, then the JSON stages
/// over the masked vector.
pub fn verify_and_extract(
    http: &HttpData,
    lockfile: &JsonLockfile,
    message: &[u8],
) -> Result<ExtractionOutput, ApiError> {
    let range = body_range(message)?;
    let instance = JsonInstance::from_lockfile(lockfile, &message[range])?;
    log::debug!(
        "http pipeline: {} locked headers, stack height {}",
        http.headers().len(),
        instance.max_stack_height
    );
    dispatch(
        instance.max_stack_height,
        &(http, &instance),
        message,
        HttpChain,
    )
}

/// Pick the smallest standard stack height that fits `height` and run
/// the monomorphized pipeline at it.
fn dispatch<C: ?Sized>(
    height: usize,
    config: &C,
    payload: &[u8],
    run: impl RunAt<C>,
) -> Result<ExtractionOutput, ApiError> {
    let out = match height {
        0..=2 => run.at::<2>(config, payload),
        3..=4 => run.at::<4>(config, payload),
        5..=6 => run.at::<6>(config, payload),
        7..=8 => run.at::<8>(config, payload),
        9..=10 => run.at::<10>(config, payload),
        depth => {
            return Err(LockfileError::UnsupportedDepth {
                depth,
                max: MAX_SUPPORTED_HEIGHT,
            }
            .into())
        }
    };
    Ok(out?)
}

/// A pipeline runnable at any const stack height.
trait RunAt<C: ?Sized> {
    fn at<const H: usize>(&self, config: &C, payload: &[u8]) -> CoreResult<ExtractionOutput>;
}

struct OneShot;
struct JsonChain;
struct HttpChain;

impl RunAt<JsonInstance> for OneShot {
    fn at<const H: usize>(
        &self,
        instance: &JsonInstance,
        payload: &[u8],
    ) -> CoreResult<ExtractionOutput> {
        extract_value::<H>(payload, &instance.segments, instance.value_capacity)
    }
}

impl RunAt<JsonInstance> for JsonChain {
    fn at<const H: usize>(
        &self,
        instance: &JsonInstance,
        payload: &[u8],
    ) -> CoreResult<ExtractionOutput> {
        let vector = StepVector::<H>::from_payload(payload, payload.len())?;
        let chain = mask_stages::<H>(StepChain::new().then(JsonParseStep), &instance.segments);
        let vector = chain.run(vector)?;
        JsonExtractValueStep::new(instance.value_capacity).finish(&vector)
    }
}

impl<'a> RunAt<(&'a HttpData, &'a JsonInstance)> for HttpChain {
    fn at<const H: usize>(
        &self,
        config: &(&'a HttpData, &'a JsonInstance),
        message: &[u8],
    ) -> CoreResult<ExtractionOutput> {
        let (http, instance) = *config;
        let (beginning, middle, final_part) = http.start_line();

        let mut chain = StepChain::new().then(HttpParseAndLockStartLineStep::new(
            beginning.as_bytes(),
            middle.as_bytes(),
            final_part.as_bytes(),
        ));
        for (name, value) in http.headers() {
            chain = chain.then(HttpLockHeaderStep::new(name.as_bytes(), value.as_bytes()));
        }
        chain = chain.then(HttpExtractBodyStep).then(JsonParseStep);
        chain = mask_stages::<H>(chain, &instance.segments);

        let vector = StepVector::<H>::from_payload(message, message.len())?;
        let vector = chain.run(vector)?;
        JsonExtractValueStep::new(instance.value_capacity).finish(&vector)
    }
}

fn mask_stages<const H: usize>(mut chain: StepChain<H>, segments: &[PathSegment]) -> StepChain<H> {
    for segment in segments {
        chain = match segment {
            PathSegment::Key { key, depth } => {
                chain.then(JsonMaskObjectStep::new(key.clone(), *depth))
            }
            PathSegment::Index { index, depth } => {
                chain.then(JsonMaskArrayIndexStep::new(*index, *depth))
            }
        };
    }
    chain
}
