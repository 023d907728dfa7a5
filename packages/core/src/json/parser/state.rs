//! Parser state types and data structures
//!
//! This module contains the type definitions for the structural state
//! machine: the bounded container stack and the per-byte parse flags.

use arrayvec::ArrayVec;

use crate::error::{CoreResult, StepError};

/// Kind of container a stack frame tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// JSON object (enclosed in {})
    Object,
    /// JSON array (enclosed in [])
    Array,
}

impl ContainerKind {
    /// Numeric tag used in the serialized register form (`NONE` is 0).
    #[must_use]
    pub fn tag(self) -> u64 {
        match self {
            ContainerKind::Object => 1,
            ContainerKind::Array => 2,
        }
    }
}

/// One slot of the bounded nesting tracker.
///
/// `meta` is the frame's secondary counter: for objects it is the
/// key/value phase bit (0 = parsing a key, 1 = parsing that key's
/// value); for arrays it is the current element index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackFrame {
    /// Which container opened this frame
    pub kind: ContainerKind,
    /// Phase bit (objects) or element index (arrays)
    pub meta: u64,
}

impl StackFrame {
    /// A freshly opened object frame, in key phase.
    #[must_use]
    pub fn object() -> Self {
        Self {
            kind: ContainerKind::Object,
            meta: 0,
        }
    }

    /// A freshly opened array frame, at element index 0.
    #[must_use]
    pub fn array() -> Self {
        Self {
            kind: ContainerKind::Array,
            meta: 0,
        }
    }

    /// Whether this frame is an object.
    #[must_use]
    pub fn is_object(&self) -> bool {
        self.kind == ContainerKind::Object
    }

    /// Whether this frame is an array.
    #[must_use]
    pub fn is_array(&self) -> bool {
        self.kind == ContainerKind::Array
    }

    /// Whether this frame is an object currently parsing a value.
    #[must_use]
    pub fn in_value_phase(&self) -> bool {
        self.is_object() && self.meta == 1
    }
}

/// The structural state threaded through every byte step.
///
/// `MAX_STACK_HEIGHT` is an instantiation-time constant: pushing onto a
/// full stack or popping an empty one is malformed input, never a
/// reallocation. Created all-zero (top level, not in a string, not in a
/// number); mutated exactly once per input byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserState<const MAX_STACK_HEIGHT: usize> {
    pub(crate) stack: ArrayVec<StackFrame, MAX_STACK_HEIGHT>,
    pub(crate) parsing_string: bool,
    pub(crate) parsing_number: bool,
    pub(crate) escaped: bool,
}

impl<const MAX_STACK_HEIGHT: usize> ParserState<MAX_STACK_HEIGHT> {
    /// Number of `u64` lanes one serialized state occupies:
    /// `(kind, meta)` per slot plus the two parse flags.
    pub const REGISTER_WIDTH: usize = 2 * MAX_STACK_HEIGHT + 2;

    /// Initial state: empty stack, outside any string or number.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stack: ArrayVec::new(),
            parsing_string: false,
            parsing_number: false,
            escaped: false,
        }
    }

    /// Number of occupied stack slots (the stack pointer).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Top-of-stack frame, if any.
    #[must_use]
    pub fn top(&self) -> Option<&StackFrame> {
        self.stack.last()
    }

    /// Frame at a fixed depth (0 is the outermost container).
    #[must_use]
    pub fn frame_at(&self, depth: usize) -> Option<&StackFrame> {
        self.stack.get(depth)
    }

    /// Whether the state is inside an unescaped quoted region.
    #[must_use]
    pub fn parsing_string(&self) -> bool {
        self.parsing_string
    }

    /// Whether the state is inside a bare numeric value.
    #[must_use]
    pub fn parsing_number(&self) -> bool {
        self.parsing_number
    }

    /// Serialize into `REGISTER_WIDTH` lanes:
    /// `[kind0, meta0, .., kindN, metaN, parsing_string, parsing_number]`.
    /// Empty slots serialize as `(0, 0)`.
    ///
    /// The escape latch is deliberately not serialized: a parse pass
    /// always consumes its whole buffer, so the latch never has to cross
    /// a register-block boundary.
    #[must_use]
    pub fn to_lanes(&self) -> Vec<u64> {
        let mut lanes = Vec::with_capacity(Self::REGISTER_WIDTH);
        for slot in 0..MAX_STACK_HEIGHT {
            match self.stack.get(slot) {
                Some(frame) => {
                    lanes.push(frame.kind.tag());
                    lanes.push(frame.meta);
                }
                None => {
                    lanes.push(0);
                    lanes.push(0);
                }
            }
        }
        lanes.push(u64::from(self.parsing_string));
        lanes.push(u64::from(self.parsing_number));
        lanes
    }

    /// Rebuild a state from its serialized lane form.
    pub fn from_lanes(lanes: &[u64]) -> CoreResult<Self> {
        if lanes.len() != Self::REGISTER_WIDTH {
            return Err(StepError::WidthMismatch {
                expected: Self::REGISTER_WIDTH,
                actual: lanes.len(),
            });
        }
        let mut stack = ArrayVec::new();
        for slot in 0..MAX_STACK_HEIGHT {
            let kind = lanes[2 * slot];
            let meta = lanes[2 * slot + 1];
            let frame = match kind {
                0 => break,
                1 => StackFrame {
                    kind: ContainerKind::Object,
                    meta,
                },
                2 => StackFrame {
                    kind: ContainerKind::Array,
                    meta,
                },
                other => {
                    return Err(StepError::InvalidByte {
                        lane: 2 * slot,
                        value: other,
                    });
                }
            };
            stack.push(frame);
        }
        Ok(Self {
            stack,
            parsing_string: lanes[Self::REGISTER_WIDTH - 2] != 0,
            parsing_number: lanes[Self::REGISTER_WIDTH - 1] != 0,
            escaped: false,
        })
    }
}

impl<const MAX_STACK_HEIGHT: usize> Default for ParserState<MAX_STACK_HEIGHT> {
    fn default() -> Self {
        Self::new()
    }
}
