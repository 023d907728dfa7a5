//! Key matching against a claimed location
//!
//! The matcher never searches. The caller claims an index and the
//! matcher verifies the claim: key bytes at that window, quote
//! delimiters on both sides, and the structural state agreeing that a
//! key is being parsed there. Window equality goes through the
//! randomized accumulator rather than a byte-wise compare.

use crate::challenge::{windows_equal, Challenge};

use super::interpreter::inside_key;
use super::parser::ParserState;

/// Verify that `key` occupies `data[claimed_index..claimed_index + len]`
/// as a quoted object key.
///
/// `parsing_key` is the structural agreement bit: the byte under
/// consideration must be inside a key per the state machine, otherwise a
/// value that happens to contain the same quoted bytes would match.
///
/// # Arguments
///
/// * `data` - the full input buffer, not just the candidate window
/// * `claimed_index` - index of the first key byte (not the opening quote)
#[must_use]
pub fn key_match(
    data: &[u8],
    key: &[u8],
    challenge: Challenge,
    claimed_index: usize,
    parsing_key: bool,
) -> bool {
    if !parsing_key || claimed_index == 0 || key.is_empty() {
        return false;
    }
    let end = claimed_index + key.len();
    if end >= data.len() {
        return false;
    }
    data[claimed_index - 1] == b'"'
        && data[end] == b'"'
        && windows_equal(key, &data[claimed_index..end], challenge)
}

/// `key_match` constrained to a fixed nesting depth.
///
/// The enclosing object of the key must be the frame at `depth`, i.e.
/// the stack pointer must sit exactly one past it. Without this, a key
/// with the right bytes at the wrong nesting level would satisfy the
/// claim.
#[must_use]
pub fn key_match_at_depth<const H: usize>(
    data: &[u8],
    key: &[u8],
    challenge: Challenge,
    claimed_index: usize,
    state: &ParserState<H>,
    depth: usize,
) -> bool {
    state.depth() == depth + 1
        && key_match(data, key, challenge, claimed_index, inside_key(state))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: &[u8] = br#"{"key1": "value"}"#;

    fn state_after<const H: usize>(prefix: usize) -> ParserState<H> {
        let mut state = ParserState::new();
        state.process(&DATA[..prefix]).expect("well-formed prefix");
        state
    }

    #[test]
    fn match_at_the_true_location() {
        let challenge = Challenge::derive(b"key1", DATA);
        // State after consuming the 'k' at index 2.
        let state = state_after::<2>(3);
        assert!(key_match_at_depth(DATA, b"key1", challenge, 2, &state, 0));
    }

    #[test]
    fn shifted_claim_is_rejected() {
        let challenge = Challenge::derive(b"key1", DATA);
        let state = state_after::<2>(4);
        assert!(!key_match_at_depth(DATA, b"key1", challenge, 3, &state, 0));
    }

    #[test]
    fn value_bytes_do_not_match_as_a_key() {
        let data = br#"{"a": "key1"}"#;
        let challenge = Challenge::derive(b"key1", data);
        let mut state = ParserState::<2>::new();
        state.process(&data[..8]).expect("well-formed prefix");
        // The window holds the right bytes but the state is in a value.
        assert!(!key_match_at_depth(data, b"key1", challenge, 7, &state, 0));
    }

    #[test]
    fn wrong_depth_is_rejected() {
        let data = br#"{"a": {"key1": 1}}"#;
        let challenge = Challenge::derive(b"key1", data);
        let mut state = ParserState::<3>::new();
        state.process(&data[..9]).expect("well-formed prefix");
        assert!(key_match_at_depth(data, b"key1", challenge, 8, &state, 1));
        assert!(!key_match_at_depth(data, b"key1", challenge, 8, &state, 0));
    }
}
