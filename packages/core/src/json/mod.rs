//! JSON structural engine
//!
//! Single-pass, byte-at-a-time machinery for proving facts about JSON
//! buffers: a bounded-stack structural parser, predicates over its
//! state, claimed-index key matching, and mask-then-compact value
//! extraction.

pub mod extractor;
pub mod interpreter;
pub mod matcher;
pub mod parser;

pub use extractor::{extract_value, mask_value, PathSegment};
pub use parser::{ContainerKind, ParserState, StackFrame};
