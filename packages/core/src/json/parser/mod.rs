//! Structural stack machine
//!
//! A bounded stack of container frames plus string/number parse flags,
//! advanced by exactly one transition per input byte. The final state
//! after the last byte is the authoritative structural summary of
//! everything consumed so far.

mod machine;
mod state;

pub use state::{ContainerKind, ParserState, StackFrame};
