//! In-memory core for tests and assertions
//!
//! `ObserverCore` records every written event into a shared store and
//! counts each contract method invocation, so tests can assert not just
//! what was written but how much work the pipeline performed (the
//! disabled-level fast path must show zero checks and zero writes).

use super::chain::Core;
use super::entry::Entry;
use super::error::Result;
use super::field::Field;
use super::level::Level;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// One event as seen by the observer.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedEntry {
    pub entry: Entry,
    pub fields: Vec<Field>,
}

/// Invocation counters shared by every `with`-derived observer.
#[derive(Debug, Default)]
pub struct ObserverCounters {
    enabled_calls: AtomicU64,
    check_calls: AtomicU64,
    write_calls: AtomicU64,
    sync_calls: AtomicU64,
}

impl ObserverCounters {
    pub fn enabled_calls(&self) -> u64 {
        self.enabled_calls.load(Ordering::Relaxed)
    }

    pub fn check_calls(&self) -> u64 {
        self.check_calls.load(Ordering::Relaxed)
    }

    pub fn write_calls(&self) -> u64 {
        self.write_calls.load(Ordering::Relaxed)
    }

    pub fn sync_calls(&self) -> u64 {
        self.sync_calls.load(Ordering::Relaxed)
    }
}

/// Level-gated core that captures writes instead of encoding them.
pub struct ObserverCore {
    enabler: Level,
    baked: Vec<Field>,
    logs: Arc<Mutex<Vec<LoggedEntry>>>,
    counters: Arc<ObserverCounters>,
}

impl ObserverCore {
    pub fn new(enabler: Level) -> Self {
        Self {
            enabler,
            baked: Vec::new(),
            logs: Arc::new(Mutex::new(Vec::new())),
            counters: Arc::new(ObserverCounters::default()),
        }
    }

    /// Shared store of written events. Derived cores (via `with`) write
    /// into the same store.
    pub fn logs(&self) -> Arc<Mutex<Vec<LoggedEntry>>> {
        Arc::clone(&self.logs)
    }

    pub fn counters(&self) -> Arc<ObserverCounters> {
        Arc::clone(&self.counters)
    }

    /// Snapshot of everything written so far.
    pub fn taken(&self) -> Vec<LoggedEntry> {
        self.logs.lock().clone()
    }
}

impl Core for ObserverCore {
    fn enabled(&self, level: Level) -> bool {
        self.counters.enabled_calls.fetch_add(1, Ordering::Relaxed);
        level >= self.enabler
    }

    fn with(&self, fields: Vec<Field>) -> Arc<dyn Core> {
        let mut baked = self.baked.clone();
        baked.extend(fields);
        Arc::new(ObserverCore {
            enabler: self.enabler,
            baked,
            logs: Arc::clone(&self.logs),
            counters: Arc::clone(&self.counters),
        })
    }

    fn check(&self, entry: &Entry) -> bool {
        self.counters.check_calls.fetch_add(1, Ordering::Relaxed);
        entry.level >= self.enabler
    }

    fn write(&self, entry: &Entry, fields: &[Field]) -> Result<()> {
        self.counters.write_calls.fetch_add(1, Ordering::Relaxed);
        let mut all = Vec::with_capacity(self.baked.len() + fields.len());
        all.extend_from_slice(&self.baked);
        all.extend_from_slice(fields);
        self.logs.lock().push(LoggedEntry {
            entry: entry.clone(),
            fields: all,
        });
        Ok(())
    }

    fn sync(&self) -> Result<()> {
        self.counters.sync_calls.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
