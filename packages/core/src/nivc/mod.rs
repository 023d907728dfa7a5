//! Step composition
//!
//! Chains of uniform folding steps over a shared lane vector, so a
//! pipeline like "lock the response, take its body, walk a key path,
//! extract the value" is a sequence of small verifiable stages instead
//! of one monolithic pass.

pub mod chain;
pub mod extract;
pub mod http;
pub mod masker;
pub mod parse;
pub mod vector;

pub use chain::{Step, StepChain};
pub use extract::JsonExtractValueStep;
pub use http::{HttpExtractBodyStep, HttpLockHeaderStep, HttpParseAndLockStartLineStep};
pub use masker::{JsonMaskArrayIndexStep, JsonMaskObjectStep};
pub use parse::JsonParseStep;
pub use vector::StepVector;
