//! Pooled text rendering of captured stacks

use super::stack::{Frame, Stack};
use std::fmt::Write as _;

/// Initial capacity of a fresh text buffer.
pub(crate) const TEXT_BUFFER_SIZE: usize = 1024;

/// Reusable text accumulator producing the canonical stack rendering:
/// `"function\n\tfile:line"` per frame, frames separated by a newline.
#[derive(Debug)]
pub struct Formatter {
    buf: String,
    non_empty: bool,
}

impl Formatter {
    pub(crate) fn new() -> Self {
        Self {
            buf: String::with_capacity(TEXT_BUFFER_SIZE),
            non_empty: false,
        }
    }

    /// Append one frame, prefixing a separating newline for every frame
    /// after the first.
    pub fn format_frame(&mut self, frame: &Frame) {
        if self.non_empty {
            self.buf.push('\n');
        }
        self.non_empty = true;
        self.buf.push_str(&frame.function);
        self.buf.push('\n');
        self.buf.push('\t');
        self.buf.push_str(&frame.file);
        self.buf.push(':');
        let _ = write!(self.buf, "{}", frame.line);
    }

    /// Drain the stack's remaining frames into the buffer.
    pub fn format_stack(&mut self, stack: &mut Stack) {
        while let Some(frame) = stack.next() {
            self.format_frame(&frame);
        }
    }

    /// Zero-copy view of the accumulated text. The reference must not be
    /// held across the formatter's return to its pool.
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Truncate to empty, keeping capacity.
    pub(crate) fn reset(&mut self) {
        self.buf.clear();
        self.non_empty = false;
    }
}
