//! Logger construction options
//!
//! A [`LoggerOption`] is one named mutation applied, in order, to a
//! cloned logger by [`Logger::with_options`](super::logger::Logger::with_options).
//! The original logger is never touched.

use super::chain::Core;
use super::context::ContextHandler;
use super::level::LevelEnabler;
use super::logger::Logger;
use super::record::{args_to_fields, Arg};
use std::sync::Arc;

/// One deferred mutation of a logger under construction.
pub struct LoggerOption {
    apply: Box<dyn FnOnce(&mut Logger) + Send>,
}

impl LoggerOption {
    fn new(apply: impl FnOnce(&mut Logger) + Send + 'static) -> Self {
        Self {
            apply: Box::new(apply),
        }
    }

    pub(crate) fn apply(self, logger: &mut Logger) {
        (self.apply)(logger);
    }
}

/// Replace the core chain with an arbitrary transform of it. This is how
/// decorators are layered at construction time.
pub fn wrap_core(
    f: impl FnOnce(Arc<dyn Core>) -> Arc<dyn Core> + Send + 'static,
) -> LoggerOption {
    LoggerOption::new(move |logger| {
        logger.core = f(Arc::clone(&logger.core));
    })
}

/// Set the logger name recorded on every entry.
pub fn with_name(name: impl Into<String>) -> LoggerOption {
    let name = name.into();
    LoggerOption::new(move |logger| {
        logger.name = name;
    })
}

/// Enable or disable caller-location capture.
pub fn with_caller(enabled: bool) -> LoggerOption {
    LoggerOption::new(move |logger| {
        logger.add_caller = enabled;
    })
}

/// Shorthand for `with_caller(true)`.
pub fn add_caller() -> LoggerOption {
    with_caller(true)
}

/// Attach full stack traces to entries at or above the enabler's
/// threshold.
pub fn with_stack(enabler: impl LevelEnabler + 'static) -> LoggerOption {
    let enabler: Arc<dyn LevelEnabler> = Arc::new(enabler);
    LoggerOption::new(move |logger| {
        logger.stack_level = Some(enabler);
    })
}

/// Add to the number of caller frames skipped when resolving the call
/// site, for wrappers that interpose their own frames.
pub fn add_caller_skip(skip: usize) -> LoggerOption {
    LoggerOption::new(move |logger| {
        logger.caller_skip += skip;
    })
}

/// Enable or disable printf-style message formatting.
pub fn with_format(enabled: bool) -> LoggerOption {
    LoggerOption::new(move |logger| {
        logger.format_enabled = enabled;
    })
}

/// Replace the context handler list.
pub fn with_context_handlers(handlers: Vec<ContextHandler>) -> LoggerOption {
    LoggerOption::new(move |logger| {
        logger.context_handlers = handlers;
    })
}

/// Append to the context handler list, keeping existing handlers ahead.
pub fn add_context_handlers(handlers: Vec<ContextHandler>) -> LoggerOption {
    LoggerOption::new(move |logger| {
        logger.context_handlers.extend(handlers);
    })
}

/// Bake converted fields into the core chain at construction time.
pub fn with_fields(args: Vec<Arg>) -> LoggerOption {
    LoggerOption::new(move |logger| {
        if !args.is_empty() {
            logger.core = logger.core.with(args_to_fields(args));
        }
    })
}
