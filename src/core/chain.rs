//! Composable sink cores
//!
//! A [`Core`] is one link in the write-destination chain. Decorators wrap
//! an inner `Arc<dyn Core>` and forward the four-method contract,
//! augmenting it (buffered fields, sampling) without the logger knowing
//! which decorators are present. `with` must always hand back a new,
//! independent instance: two cores derived from the same parent never
//! observe each other's baked-in fields.

use super::entry::Entry;
use super::error::Result;
use super::field::Field;
use super::level::Level;
use std::sync::Arc;

/// Write destination contract for finished log events.
pub trait Core: Send + Sync {
    /// Cheap pre-flight gate: is this level worth building an event for?
    fn enabled(&self, level: Level) -> bool;

    /// A new core with `fields` permanently baked in, sharing the
    /// wrapped sink with `self`.
    fn with(&self, fields: Vec<Field>) -> Arc<dyn Core>;

    /// Will a write for this entry be accepted? Called once per event
    /// with the provisional entry, before enrichment and field assembly.
    fn check(&self, entry: &Entry) -> bool;

    /// Record the finished event. Field order is the caller's; cores
    /// must not reorder or deduplicate.
    fn write(&self, entry: &Entry, fields: &[Field]) -> Result<()>;

    /// Flush whatever the underlying sink buffers.
    fn sync(&self) -> Result<()>;
}

/// The positive outcome of a `check` round-trip: the enriched entry plus
/// the chain that agreed to take it. Consumed by the final write.
pub struct CheckedEntry {
    entry: Entry,
    core: Arc<dyn Core>,
}

impl CheckedEntry {
    pub fn new(entry: Entry, core: Arc<dyn Core>) -> Self {
        Self { entry, core }
    }

    pub fn entry(&self) -> &Entry {
        &self.entry
    }

    pub fn entry_mut(&mut self) -> &mut Entry {
        &mut self.entry
    }

    /// Dispatch the event with its fields through the accepting chain.
    pub fn write(self, fields: &[Field]) -> Result<()> {
        self.core.write(&self.entry, fields)
    }
}

/// A core that accepts nothing. Default target of the global logger and
/// a convenient base for benchmarks.
#[derive(Debug, Default)]
pub struct NopCore;

impl Core for NopCore {
    fn enabled(&self, _level: Level) -> bool {
        false
    }

    fn with(&self, _fields: Vec<Field>) -> Arc<dyn Core> {
        Arc::new(NopCore)
    }

    fn check(&self, _entry: &Entry) -> bool {
        false
    }

    fn write(&self, _entry: &Entry, _fields: &[Field]) -> Result<()> {
        Ok(())
    }

    fn sync(&self) -> Result<()> {
        Ok(())
    }
}

/// Decorator that accumulates baked-in fields and prepends them to every
/// write going through it.
///
/// The buffered fields are private to each instance: `with` copies them
/// into the derived core, and the two never alias. At write time the
/// buffer is concatenated ahead of the call-supplied fields, so baked-in
/// fields come first in the rendered output.
pub struct BufferedCore {
    inner: Arc<dyn Core>,
    fields: Vec<Field>,
}

impl BufferedCore {
    pub fn new(inner: Arc<dyn Core>) -> Self {
        Self {
            inner,
            fields: Vec::new(),
        }
    }

    pub fn with_fields(inner: Arc<dyn Core>, fields: Vec<Field>) -> Self {
        Self { inner, fields }
    }

    pub fn buffered(&self) -> &[Field] {
        &self.fields
    }
}

impl Core for BufferedCore {
    fn enabled(&self, level: Level) -> bool {
        self.inner.enabled(level)
    }

    fn with(&self, fields: Vec<Field>) -> Arc<dyn Core> {
        let mut buffered = self.fields.clone();
        buffered.extend(fields);
        Arc::new(BufferedCore {
            inner: Arc::clone(&self.inner),
            fields: buffered,
        })
    }

    fn check(&self, entry: &Entry) -> bool {
        self.inner.check(entry)
    }

    fn write(&self, entry: &Entry, fields: &[Field]) -> Result<()> {
        if self.fields.is_empty() {
            return self.inner.write(entry, fields);
        }
        let mut merged = Vec::with_capacity(self.fields.len() + fields.len());
        merged.extend_from_slice(&self.fields);
        merged.extend_from_slice(fields);
        self.inner.write(entry, &merged)
    }

    fn sync(&self) -> Result<()> {
        self.inner.sync()
    }
}
