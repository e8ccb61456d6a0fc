//! Pooled call-stack capture and rendering
//!
//! Capturing a stack on the logging hot path must not churn the heap, so
//! both the program-counter buffers ([`Stack`]) and the text buffers
//! ([`Formatter`]) are recycled through explicit [`Pools`] owned by the
//! component doing the capturing. Checked-out objects come wrapped in
//! RAII guards that reset and return them on every exit path.

pub mod formatter;
pub mod pool;
pub mod stack;

pub use formatter::Formatter;
pub use pool::Pool;
pub use stack::{Depth, Frame, Stack, MAX_DEPTH};

use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicU64, Ordering};

/// The stack and formatter pools for one capture site.
///
/// Constructed explicitly and injected into whatever performs captures
/// (the Logger owns one behind an `Arc`); never ambient global state, so
/// tests get isolated pools for free.
pub struct Pools {
    stacks: Pool<Stack>,
    formatters: Pool<Formatter>,
    captures: AtomicU64,
}

impl Pools {
    pub fn new() -> Self {
        Self {
            stacks: Pool::new(Stack::new),
            formatters: Pool::new(Formatter::new),
            captures: AtomicU64::new(0),
        }
    }

    /// Capture the current call stack, skipping `skip` caller frames, at
    /// the requested depth. The returned guard owns a pooled buffer and
    /// returns it on drop.
    pub fn capture(&self, skip: usize, depth: Depth) -> StackGuard<'_> {
        self.captures.fetch_add(1, Ordering::Relaxed);
        let mut stack = self.stacks.get();
        stack.capture(skip, depth);
        StackGuard {
            stack: Some(stack),
            pool: &self.stacks,
        }
    }

    /// Check out a pooled, empty formatter.
    pub fn formatter(&self) -> FormatterGuard<'_> {
        FormatterGuard {
            formatter: Some(self.formatters.get()),
            pool: &self.formatters,
        }
    }

    /// Capture, render, and release in one call, returning the stack as
    /// an owned string.
    pub fn take(&self, skip: usize) -> String {
        let mut stack = self.capture(skip + 1, Depth::Full);
        let mut formatter = self.formatter();
        formatter.format_stack(&mut stack);
        formatter.as_str().to_string()
    }

    /// Total captures performed through this pool set.
    pub fn captures(&self) -> u64 {
        self.captures.load(Ordering::Relaxed)
    }

    /// Idle stack buffers currently parked.
    pub fn idle_stacks(&self) -> usize {
        self.stacks.idle()
    }

    /// Idle formatter buffers currently parked.
    pub fn idle_formatters(&self) -> usize {
        self.formatters.idle()
    }
}

impl Default for Pools {
    fn default() -> Self {
        Self::new()
    }
}

/// Checked-out [`Stack`]; resets the buffer and returns it to its pool
/// on drop.
pub struct StackGuard<'a> {
    stack: Option<Stack>,
    pool: &'a Pool<Stack>,
}

impl Deref for StackGuard<'_> {
    type Target = Stack;

    fn deref(&self) -> &Stack {
        self.stack.as_ref().expect("stack taken only in drop")
    }
}

impl DerefMut for StackGuard<'_> {
    fn deref_mut(&mut self) -> &mut Stack {
        self.stack.as_mut().expect("stack taken only in drop")
    }
}

impl Drop for StackGuard<'_> {
    fn drop(&mut self) {
        if let Some(mut stack) = self.stack.take() {
            stack.reset();
            self.pool.put(stack);
        }
    }
}

/// Checked-out [`Formatter`]; resets the buffer and returns it to its
/// pool on drop.
pub struct FormatterGuard<'a> {
    formatter: Option<Formatter>,
    pool: &'a Pool<Formatter>,
}

impl Deref for FormatterGuard<'_> {
    type Target = Formatter;

    fn deref(&self) -> &Formatter {
        self.formatter.as_ref().expect("formatter taken only in drop")
    }
}

impl DerefMut for FormatterGuard<'_> {
    fn deref_mut(&mut self) -> &mut Formatter {
        self.formatter.as_mut().expect("formatter taken only in drop")
    }
}

impl Drop for FormatterGuard<'_> {
    fn drop(&mut self) {
        if let Some(mut formatter) = self.formatter.take() {
            formatter.reset();
            self.pool.put(formatter);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_recycles_buffer() {
        let pools = Pools::new();
        assert_eq!(pools.idle_stacks(), 0);

        {
            let mut stack = pools.capture(0, Depth::First);
            assert_eq!(stack.count(), 1);
            assert!(stack.next().is_some());
        }
        assert_eq!(pools.idle_stacks(), 1);

        // Reuse parks the same buffer again rather than growing the pool.
        {
            let _stack = pools.capture(0, Depth::Full);
            assert_eq!(pools.idle_stacks(), 0);
        }
        assert_eq!(pools.idle_stacks(), 1);
        assert_eq!(pools.captures(), 2);
    }

    #[test]
    fn test_formatter_reuse_has_no_residue() {
        let pools = Pools::new();

        {
            let mut stack = pools.capture(0, Depth::First);
            let mut formatter = pools.formatter();
            formatter.format_stack(&mut stack);
            assert!(!formatter.is_empty());
        }

        // A fresh checkout must start from a zero-length buffer.
        let formatter = pools.formatter();
        assert_eq!(formatter.len(), 0);
    }

    #[test]
    fn test_take_renders_current_stack() {
        let pools = Pools::new();
        let rendered = pools.take(0);
        assert!(!rendered.is_empty());
        assert!(rendered.contains("\n\t"));
        assert_eq!(pools.idle_stacks(), 1);
        assert_eq!(pools.idle_formatters(), 1);
    }

    #[test]
    fn test_concurrent_checkout() {
        use std::sync::Arc;

        let pools = Arc::new(Pools::new());
        let mut handles = Vec::new();
        for _ in 0..4 {
            let pools = Arc::clone(&pools);
            handles.push(std::thread::spawn(move || {
                for _ in 0..50 {
                    let mut stack = pools.capture(0, Depth::First);
                    let mut formatter = pools.formatter();
                    formatter.format_stack(&mut stack);
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(pools.captures(), 200);
        assert!(pools.idle_stacks() <= 4);
    }
}
