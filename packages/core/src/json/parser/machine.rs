//! Per-byte transition function
//!
//! The single-pass structural fold: one deterministic transition per
//! input byte, no skipping, no lookahead. Everything downstream (the
//! predicates, the matchers, the maskers) is a read-only view over the
//! states this produces.

use crate::bytes::{is_digit, is_number_continuation};
use crate::error::ParserError;

use super::state::{ContainerKind, ParserState, StackFrame};

impl<const MAX_STACK_HEIGHT: usize> ParserState<MAX_STACK_HEIGHT> {
    /// Advance the state by one input byte.
    ///
    /// Pure in effect: the state after this call is a function of the
    /// state before it and `byte` alone. Stack overflow, underflow, and
    /// structurally impossible delimiters are hard errors; everything
    /// else the machine tolerates (notably, any non-digit byte, even a
    /// `$`, silently terminates a bare number, matching the reference
    /// behavior exactly).
    pub fn step(&mut self, byte: u8) -> Result<(), ParserError> {
        // A latched escape makes the current byte literal, whatever it is.
        if self.escaped {
            self.escaped = false;
            return Ok(());
        }

        // Inside a string every structural byte is inert content.
        if self.parsing_string {
            match byte {
                b'"' => self.parsing_string = false,
                b'\\' => self.escaped = true,
                _ => {}
            }
            return Ok(());
        }

        match byte {
            b'"' => {
                self.parsing_number = false;
                self.parsing_string = true;
            }
            b'{' => {
                self.parsing_number = false;
                self.push(StackFrame::object())?;
            }
            b'[' => {
                self.parsing_number = false;
                self.push(StackFrame::array())?;
            }
            b'}' => {
                self.parsing_number = false;
                self.pop(ContainerKind::Object, byte)?;
            }
            b']' => {
                self.parsing_number = false;
                self.pop(ContainerKind::Array, byte)?;
            }
            b':' => {
                self.parsing_number = false;
                match self.stack.last_mut() {
                    None => return Err(ParserError::UnexpectedDelimiter { byte }),
                    Some(frame) if frame.is_object() => frame.meta = 1,
                    // A colon with an array on top is inert, matching the
                    // reference machine's permissiveness.
                    Some(_) => {}
                }
            }
            b',' => {
                self.parsing_number = false;
                match self.stack.last_mut() {
                    None => return Err(ParserError::UnexpectedDelimiter { byte }),
                    Some(frame) => match frame.kind {
                        ContainerKind::Object => frame.meta = 0,
                        ContainerKind::Array => frame.meta += 1,
                    },
                }
            }
            b if is_digit(b) => self.parsing_number = true,
            b if is_number_continuation(b) && self.parsing_number => {}
            _ => self.parsing_number = false,
        }
        Ok(())
    }

    /// Fold a whole buffer through the machine, byte by byte.
    pub fn process(&mut self, data: &[u8]) -> Result<(), ParserError> {
        for (position, &byte) in data.iter().enumerate() {
            self.step(byte).inspect_err(|err| {
                log::debug!("structural parse failed at byte {position}: {err}");
            })?;
        }
        Ok(())
    }

    fn push(&mut self, frame: StackFrame) -> Result<(), ParserError> {
        self.stack.try_push(frame).map_err(|_| ParserError::StackOverflow {
            max_depth: MAX_STACK_HEIGHT,
        })
    }

    fn pop(&mut self, expected: ContainerKind, byte: u8) -> Result<(), ParserError> {
        let frame = self
            .stack
            .pop()
            .ok_or(ParserError::StackUnderflow { byte })?;
        if frame.kind != expected {
            return Err(ParserError::MismatchedDelimiter { found: byte });
        }
        Ok(())
    }
}
