//! Read-only structural predicates
//!
//! Derived views over `(stack, parsing_string, parsing_number)`. None of
//! these mutate state and none of them fail: a predicate that does not
//! hold is `false`, never an error, because call sites routinely test
//! the should-not-hold direction.
//!
//! "Inside a key" versus "inside a value" is not a separate flag; it is
//! read off the phase bit of the relevant object frame, either at the
//! top of the stack or at a caller-specified depth for multi-level key
//! paths.

use super::parser::{ParserState, StackFrame};

/// Top-of-stack frame and the stack pointer (count of occupied slots).
///
/// An empty stack reports `(None, 0)`.
#[must_use]
pub fn top_of_stack<const H: usize>(state: &ParserState<H>) -> (Option<StackFrame>, usize) {
    (state.top().copied(), state.depth())
}

/// Whether the parser is positioned inside an object key.
#[must_use]
pub fn inside_key<const H: usize>(state: &ParserState<H>) -> bool {
    state
        .top()
        .is_some_and(|frame| frame.is_object() && frame.meta == 0)
        && state.parsing_string()
        && !state.parsing_number()
}

/// Whether the parser is inside the leaf bytes of an object value at the
/// top of the stack.
///
/// The string/number flags are XORed: exactly one of them is set while
/// consuming the bytes of a string or bare-number value, and neither is
/// set on the insignificant bytes around it.
#[must_use]
pub fn inside_value_at_top<const H: usize>(state: &ParserState<H>) -> bool {
    state.top().is_some_and(StackFrame::in_value_phase) && leaf_bytes(state)
}

/// `inside_value_at_top` evaluated against the frame at a fixed depth,
/// for key-path resolution through nested containers.
#[must_use]
pub fn inside_value_at<const H: usize>(state: &ParserState<H>, depth: usize) -> bool {
    state
        .frame_at(depth)
        .is_some_and(StackFrame::in_value_phase)
        && leaf_bytes(state)
}

/// Whether the parser is inside the leaf bytes of array element `index`
/// at the top of the stack.
#[must_use]
pub fn inside_array_index_at_top<const H: usize>(state: &ParserState<H>, index: u64) -> bool {
    state
        .top()
        .is_some_and(|frame| frame.is_array() && frame.meta == index)
        && leaf_bytes(state)
}

/// `inside_array_index_at_top` evaluated at a fixed depth.
#[must_use]
pub fn inside_array_index_at<const H: usize>(
    state: &ParserState<H>,
    index: u64,
    depth: usize,
) -> bool {
    state
        .frame_at(depth)
        .is_some_and(|frame| frame.is_array() && frame.meta == index)
        && leaf_bytes(state)
}

/// Whether the frame at `depth` is an object parsing a value, with no
/// leaf-byte gate.
///
/// This is the subtree form the maskers use: it stays true across every
/// byte of a nested container value, not just its leaf strings and
/// numbers.
#[must_use]
pub fn inside_value_subtree_at<const H: usize>(state: &ParserState<H>, depth: usize) -> bool {
    state
        .frame_at(depth)
        .is_some_and(StackFrame::in_value_phase)
}

/// Subtree form of the array-index predicate, for masking whole
/// elements.
#[must_use]
pub fn inside_array_subtree_at<const H: usize>(
    state: &ParserState<H>,
    index: u64,
    depth: usize,
) -> bool {
    state
        .frame_at(depth)
        .is_some_and(|frame| frame.is_array() && frame.meta == index)
}

/// Whether `byte` begins the next key/value pair at the top of the
/// stack: a comma read while the enclosing object is back in key phase.
#[must_use]
pub fn next_kv_pair<const H: usize>(state: &ParserState<H>, byte: u8) -> bool {
    byte == b','
        && state
            .top()
            .is_some_and(|frame| frame.is_object() && frame.meta == 0)
}

/// Whether `byte` begins a key/value pair at nesting depth `depth` or
/// shallower.
///
/// A comma at a depth strictly greater than `depth` does not count: a
/// new pair deep inside an unrelated subtree must not end the match
/// propagation of an outer key.
#[must_use]
pub fn next_kv_pair_at_depth<const H: usize>(
    state: &ParserState<H>,
    byte: u8,
    depth: usize,
) -> bool {
    byte == b',' && state.depth().saturating_sub(1) <= depth
}

#[inline]
fn leaf_bytes<const H: usize>(state: &ParserState<H>) -> bool {
    state.parsing_string() ^ state.parsing_number()
}
