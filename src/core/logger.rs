//! Main logger implementation
//!
//! The logger is an immutable-by-convention value: every mutator returns
//! a new `Logger` and the original keeps working unchanged, so clones can
//! be handed across threads without coordination. A log call runs the
//! decision/enrichment pipeline: enabled gate, optional printf-style
//! message formatting, the `check` round-trip with the core chain, caller
//! and stack enrichment through the pooled capture subsystem, field
//! assembly, and the final write.

use super::chain::{CheckedEntry, Core};
use super::context::{Context, ContextHandler};
use super::entry::{Caller, Entry};
use super::error::Result;
use super::level::{Level, LevelEnabler};
use super::options::LoggerOption;
use super::record::{args_to_fields, Arg, Record};
use crate::stacktrace::{Depth, Pools};
use std::fmt;
use std::sync::Arc;

/// Pipeline-internal frames between a public level method and the stack
/// capture: the level method, `log_inner`, `check`, and `Pools::capture`.
/// Skipping them makes the reported caller the true external call site.
const CALLER_SKIP_OFFSET: usize = 4;

pub struct Logger {
    pub(crate) core: Arc<dyn Core>,
    pub(crate) name: String,
    pub(crate) add_caller: bool,
    pub(crate) stack_level: Option<Arc<dyn LevelEnabler>>,
    pub(crate) caller_skip: usize,
    pub(crate) format_enabled: bool,
    pub(crate) context_handlers: Vec<ContextHandler>,
    pub(crate) pools: Arc<Pools>,
}

impl Clone for Logger {
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
            name: self.name.clone(),
            add_caller: self.add_caller,
            stack_level: self.stack_level.clone(),
            caller_skip: self.caller_skip,
            format_enabled: self.format_enabled,
            // Fresh vector: two loggers never alias a handler list.
            context_handlers: self.context_handlers.clone(),
            pools: Arc::clone(&self.pools),
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("add_caller", &self.add_caller)
            .field("caller_skip", &self.caller_skip)
            .field("format_enabled", &self.format_enabled)
            .field("context_handlers", &self.context_handlers.len())
            .finish_non_exhaustive()
    }
}

impl Logger {
    pub fn new(core: Arc<dyn Core>) -> Self {
        Self {
            core,
            name: String::new(),
            add_caller: false,
            stack_level: None,
            caller_skip: 0,
            format_enabled: false,
            context_handlers: Vec::new(),
            pools: Arc::new(Pools::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn core(&self) -> &Arc<dyn Core> {
        &self.core
    }

    /// Whether a call at this level would do any work at all.
    pub fn enabled(&self, level: Level) -> bool {
        self.core.enabled(level)
    }

    /// A clone with the converted fields permanently baked into the
    /// core. With no arguments this is a plain clone.
    pub fn with(&self, args: Vec<Arg>) -> Logger {
        if args.is_empty() {
            return self.clone();
        }
        let mut log = self.clone();
        log.core = self.core.with(args_to_fields(args));
        log
    }

    /// Eagerly run every context handler against `ctx` and bake the
    /// produced fields in, so the returned logger no longer needs a
    /// context at call time.
    pub fn with_context(&self, ctx: &Context) -> Logger {
        if self.context_handlers.is_empty() {
            return self.clone();
        }
        let mut record = Record::with_capacity(self.context_handlers.len());
        for handler in &self.context_handlers {
            handler.handle(ctx, &mut record);
        }
        let mut log = self.clone();
        log.core = self.core.with(record.into_fields());
        log
    }

    /// Apply an ordered list of option mutations to a clone.
    pub fn with_options(&self, opts: Vec<LoggerOption>) -> Logger {
        if opts.is_empty() {
            return self.clone();
        }
        let mut log = self.clone();
        for opt in opts {
            opt.apply(&mut log);
        }
        log
    }

    /// A clone with printf-style message formatting switched on or off.
    pub fn with_format(&self, enabled: bool) -> Logger {
        if self.format_enabled == enabled {
            return self.clone();
        }
        let mut log = self.clone();
        log.format_enabled = enabled;
        log
    }

    pub fn log(&self, level: Level, msg: impl AsRef<str>, args: Vec<Arg>) {
        self.log_inner(None, level, msg.as_ref(), args);
    }

    pub fn log_context(&self, ctx: &Context, level: Level, msg: impl AsRef<str>, args: Vec<Arg>) {
        self.log_inner(Some(ctx), level, msg.as_ref(), args);
    }

    pub fn debug(&self, msg: impl AsRef<str>, args: Vec<Arg>) {
        self.log_inner(None, Level::Debug, msg.as_ref(), args);
    }

    pub fn debug_context(&self, ctx: &Context, msg: impl AsRef<str>, args: Vec<Arg>) {
        self.log_inner(Some(ctx), Level::Debug, msg.as_ref(), args);
    }

    pub fn info(&self, msg: impl AsRef<str>, args: Vec<Arg>) {
        self.log_inner(None, Level::Info, msg.as_ref(), args);
    }

    pub fn info_context(&self, ctx: &Context, msg: impl AsRef<str>, args: Vec<Arg>) {
        self.log_inner(Some(ctx), Level::Info, msg.as_ref(), args);
    }

    pub fn warn(&self, msg: impl AsRef<str>, args: Vec<Arg>) {
        self.log_inner(None, Level::Warn, msg.as_ref(), args);
    }

    pub fn warn_context(&self, ctx: &Context, msg: impl AsRef<str>, args: Vec<Arg>) {
        self.log_inner(Some(ctx), Level::Warn, msg.as_ref(), args);
    }

    pub fn error(&self, msg: impl AsRef<str>, args: Vec<Arg>) {
        self.log_inner(None, Level::Error, msg.as_ref(), args);
    }

    pub fn error_context(&self, ctx: &Context, msg: impl AsRef<str>, args: Vec<Arg>) {
        self.log_inner(Some(ctx), Level::Error, msg.as_ref(), args);
    }

    /// Flush the core chain; failures from the sink propagate.
    pub fn sync(&self) -> Result<()> {
        self.core.sync()
    }

    fn log_inner(&self, ctx: Option<&Context>, level: Level, msg: &str, args: Vec<Arg>) {
        // Cheapest possible exit: no formatting, no allocation, no
        // capture when the level is off.
        if !self.core.enabled(level) {
            return;
        }

        let (message, formatted) = self.format_message(msg, &args);
        let Some(checked) = self.check(level, message) else {
            return;
        };

        let mut converted = Vec::new();
        let mut capacity = self.context_handlers.len();
        if !formatted {
            converted = args_to_fields(args);
            capacity += converted.len();
        }

        let mut record = Record::with_capacity(capacity);
        if let Some(ctx) = ctx {
            for handler in &self.context_handlers {
                handler.handle(ctx, &mut record);
            }
        }
        record.add_fields(converted);

        if let Err(err) = checked.write(record.fields()) {
            eprintln!("[fieldlog] write failed: {}", err);
        }
    }

    /// Positional substitution of `args` into `%` placeholders.
    ///
    /// Applies only when format mode is on, no argument is a ready-made
    /// field, and the non-escaped placeholder count matches the argument
    /// count exactly; otherwise the message passes through untouched and
    /// the caller treats the args as key/value pairs.
    fn format_message(&self, msg: &str, args: &[Arg]) -> (String, bool) {
        if !self.format_enabled || args.is_empty() {
            return (msg.to_string(), false);
        }
        if args.iter().any(Arg::is_field) {
            return (msg.to_string(), false);
        }
        if count_placeholders(msg) != args.len() {
            return (msg.to_string(), false);
        }
        (substitute(msg, args), true)
    }

    fn check(&self, level: Level, message: String) -> Option<CheckedEntry> {
        let mut entry = Entry::new(self.name.clone(), level, message);
        if !self.core.check(&entry) {
            return None;
        }

        let add_stack = self
            .stack_level
            .as_ref()
            .is_some_and(|enabler| enabler.enabled(level));
        if !self.add_caller && !add_stack {
            return Some(CheckedEntry::new(entry, Arc::clone(&self.core)));
        }

        let depth = if add_stack { Depth::Full } else { Depth::First };
        let mut stack = self
            .pools
            .capture(self.caller_skip + CALLER_SKIP_OFFSET, depth);

        let first = stack.next();
        if self.add_caller {
            entry.caller = Some(
                first
                    .as_ref()
                    .map(Caller::from_frame)
                    .unwrap_or_default(),
            );
        }

        if add_stack {
            let mut formatter = self.pools.formatter();
            if let Some(frame) = &first {
                formatter.format_frame(frame);
            }
            formatter.format_stack(&mut stack);
            entry.stack = Some(formatter.as_str().to_string());
        }

        Some(CheckedEntry::new(entry, Arc::clone(&self.core)))
    }
}

/// Count `%` placeholders, treating `%%` as an escaped literal.
fn count_placeholders(msg: &str) -> usize {
    let bytes = msg.as_bytes();
    let mut count = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            if i + 1 < bytes.len() && bytes[i + 1] == b'%' {
                i += 2;
                continue;
            }
            count += 1;
        }
        i += 1;
    }
    count
}

/// Replace each placeholder with the display rendering of the matching
/// argument, in order. The caller guarantees counts match.
fn substitute(msg: &str, args: &[Arg]) -> String {
    let mut out = String::with_capacity(msg.len() + args.len() * 8);
    let mut args_iter = args.iter();
    let mut chars = msg.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '%' {
            out.push(ch);
            continue;
        }
        match chars.peek() {
            Some('%') => {
                chars.next();
                out.push('%');
            }
            _ => {
                // The verb character is consumed; the argument decides
                // its own rendering.
                chars.next();
                if let Some(arg) = args_iter.next() {
                    out.push_str(&arg.display());
                }
            }
        }
    }
    out
}
