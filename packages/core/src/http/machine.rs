//! HTTP message state machine
//!
//! The HTTP counterpart of the JSON structural machine: one transition
//! per byte, driven by space, colon, CR and LF. It tracks which message
//! region the byte landed in (start line, header name, header value,
//! body) rather than any nesting structure, so its registers are a flat
//! tuple instead of a stack.

use crate::error::{CoreResult, StepError};

const CR: u8 = b'\r';
const LF: u8 = b'\n';

/// Per-byte HTTP region tracker.
///
/// `start_line_part` counts the space-separated start-line components
/// consumed so far: 1 while in the first, 3 in the last, 0 once the
/// start line is finished. `header_index` is 1-based and 0 outside the
/// header section. `line_status` counts the consecutive bytes of a
/// `\r\n\r\n` run; hitting 4 flips the machine into body mode for good.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HttpState {
    pub(crate) start_line_part: u64,
    pub(crate) header_index: u64,
    pub(crate) in_field_name: bool,
    pub(crate) in_field_value: bool,
    pub(crate) in_body: bool,
    pub(crate) line_status: u64,
}

impl HttpState {
    /// Lanes one serialized state occupies in a register block.
    pub const REGISTER_COUNT: usize = 6;

    /// Initial state: inside the first start-line component.
    #[must_use]
    pub fn new() -> Self {
        Self {
            start_line_part: 1,
            ..Self::default()
        }
    }

    /// Advance by one byte. Total: every byte has a transition.
    pub fn step(&mut self, byte: u8) {
        if self.in_body {
            return;
        }
        match byte {
            CR if self.line_status == 0 || self.line_status == 2 => {
                self.line_status += 1;
            }
            LF if self.line_status == 1 => {
                self.line_status = 2;
                self.end_of_line();
            }
            LF if self.line_status == 3 => {
                // The blank line. Everything from the next byte on is body.
                self.in_body = true;
                self.header_index = 0;
                self.in_field_name = false;
                self.in_field_value = false;
                self.line_status = 0;
            }
            b' ' if self.start_line_part != 0 => {
                self.start_line_part += 1;
                self.line_status = 0;
            }
            b':' if self.in_field_name => {
                self.in_field_name = false;
                self.in_field_value = true;
                self.line_status = 0;
            }
            _ => self.line_status = 0,
        }
    }

    fn end_of_line(&mut self) {
        if self.start_line_part != 0 {
            self.start_line_part = 0;
        }
        // The line that just ended was the start line or a header; either
        // way the next non-blank line is a header name.
        self.header_index += 1;
        self.in_field_name = true;
        self.in_field_value = false;
    }

    /// Fold a whole buffer through the machine.
    pub fn process(&mut self, data: &[u8]) {
        for &byte in data {
            self.step(byte);
        }
    }

    /// Whether the machine is still inside the start line.
    #[must_use]
    pub fn in_start_line(&self) -> bool {
        self.start_line_part != 0
    }

    /// 1-based index of the header line under the cursor, 0 elsewhere.
    #[must_use]
    pub fn header_index(&self) -> u64 {
        self.header_index
    }

    /// Whether the cursor is inside a header name.
    #[must_use]
    pub fn in_field_name(&self) -> bool {
        self.header_index != 0 && self.in_field_name
    }

    /// Whether the cursor is inside a header value.
    #[must_use]
    pub fn in_field_value(&self) -> bool {
        self.header_index != 0 && self.in_field_value
    }

    /// Whether the cursor is past the blank line.
    #[must_use]
    pub fn in_body(&self) -> bool {
        self.in_body
    }

    /// Serialize into `REGISTER_COUNT` lanes.
    #[must_use]
    pub fn to_lanes(&self) -> Vec<u64> {
        vec![
            self.start_line_part,
            self.header_index,
            u64::from(self.in_field_name),
            u64::from(self.in_field_value),
            u64::from(self.in_body),
            self.line_status,
        ]
    }

    /// Rebuild a state from its serialized lane form.
    pub fn from_lanes(lanes: &[u64]) -> CoreResult<Self> {
        if lanes.len() != Self::REGISTER_COUNT {
            return Err(StepError::WidthMismatch {
                expected: Self::REGISTER_COUNT,
                actual: lanes.len(),
            });
        }
        Ok(Self {
            start_line_part: lanes[0],
            header_index: lanes[1],
            in_field_name: lanes[2] != 0,
            in_field_value: lanes[3] != 0,
            in_body: lanes[4] != 0,
            line_status: lanes[5],
        })
    }
}
