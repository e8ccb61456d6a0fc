//! Terminal sink core
//!
//! The end of every decorator chain: encodes accepted events and appends
//! them to the configured writers. `with` clones share the writer stack
//! behind an `Arc` while keeping their baked-in fields private, so
//! derived cores stay independent without duplicating file handles.

use crate::core::chain::Core;
use crate::core::entry::Entry;
use crate::core::error::{LogError, Result};
use crate::core::field::Field;
use crate::core::level::{Level, LevelEnabler};
use crate::sinks::encoder::Encoder;
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;

struct SinkShared {
    encoder: Encoder,
    writers: Mutex<Vec<Box<dyn Write + Send>>>,
    enabler: Arc<dyn LevelEnabler>,
}

pub struct SinkCore {
    shared: Arc<SinkShared>,
    fields: Vec<Field>,
}

impl SinkCore {
    pub fn new(
        encoder: Encoder,
        writers: Vec<Box<dyn Write + Send>>,
        enabler: impl LevelEnabler + 'static,
    ) -> Self {
        Self {
            shared: Arc::new(SinkShared {
                encoder,
                writers: Mutex::new(writers),
                enabler: Arc::new(enabler),
            }),
            fields: Vec::new(),
        }
    }
}

impl Core for SinkCore {
    fn enabled(&self, level: Level) -> bool {
        self.shared.enabler.enabled(level)
    }

    fn with(&self, fields: Vec<Field>) -> Arc<dyn Core> {
        let mut baked = self.fields.clone();
        baked.extend(fields);
        Arc::new(SinkCore {
            shared: Arc::clone(&self.shared),
            fields: baked,
        })
    }

    fn check(&self, entry: &Entry) -> bool {
        self.enabled(entry.level)
    }

    fn write(&self, entry: &Entry, fields: &[Field]) -> Result<()> {
        let line = if self.fields.is_empty() {
            self.shared.encoder.encode(entry, fields)
        } else {
            let mut merged = Vec::with_capacity(self.fields.len() + fields.len());
            merged.extend_from_slice(&self.fields);
            merged.extend_from_slice(fields);
            self.shared.encoder.encode(entry, &merged)
        };

        let mut writers = self.shared.writers.lock();
        for writer in writers.iter_mut() {
            writeln!(writer, "{}", line)?;
        }
        Ok(())
    }

    fn sync(&self) -> Result<()> {
        let mut writers = self.shared.writers.lock();
        for writer in writers.iter_mut() {
            writer
                .flush()
                .map_err(|err| LogError::Sync(err.to_string()))?;
        }
        Ok(())
    }
}
