//! Request-scoped context and field extraction
//!
//! A [`Context`] carries ambient request-scoped values (request id, tenant,
//! trace id) alongside a call. The pipeline never interprets it — a
//! [`ContextHandler`] projects individual values into log fields, and the
//! context is consulted for nothing else (no deadlines, no cancellation).

use super::field::{Field, FieldValue};
use super::record::Record;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Immutable-by-convention key/value bag passed to the `*_context` log
/// methods. Builder-style construction, cheap to clone per request.
#[derive(Debug, Clone, Default)]
pub struct Context {
    values: HashMap<String, FieldValue>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Extracts zero or more fields from a [`Context`] into a [`Record`].
///
/// Handlers run in registration order on every context-aware log call;
/// they must not block and have no error channel.
#[derive(Clone)]
pub struct ContextHandler {
    handler: Arc<dyn Fn(&Context, &mut Record) + Send + Sync>,
}

impl ContextHandler {
    pub fn new(handler: impl Fn(&Context, &mut Record) + Send + Sync + 'static) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Standard extractor: appends a field named `key` when the context
    /// holds a value under `key`.
    pub fn from_key(key: impl Into<String>) -> Self {
        let key = key.into();
        Self::from_key_as(key.clone(), key)
    }

    /// Like [`ContextHandler::from_key`], but the emitted field is renamed
    /// to `field_name`.
    pub fn from_key_as(key: impl Into<String>, field_name: impl Into<String>) -> Self {
        let key = key.into();
        let field_name = field_name.into();
        Self::new(move |ctx, record| {
            if let Some(value) = ctx.get(&key) {
                record.add_field(Field::new(field_name.clone(), value.clone()));
            }
        })
    }

    pub fn handle(&self, ctx: &Context, record: &mut Record) {
        (self.handler)(ctx, record);
    }
}

impl fmt::Debug for ContextHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextHandler").finish_non_exhaustive()
    }
}
