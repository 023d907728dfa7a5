//! HTTP message locking
//!
//! Presence-and-position verification over HTTP/1.1 messages: a
//! per-byte region machine, anchored start-line locks, randomized
//! header locks, and body extraction.

pub mod extractor;
pub mod interpreter;
pub mod locker;
pub mod machine;

pub use extractor::{body, body_range, extract_body, mask_body};
pub use interpreter::{yield_method, Method};
pub use locker::{lock_header, lock_start_line};
pub use machine::HttpState;
