//! # fieldlog
//!
//! A structured, field-based logging front end with composable sink
//! cores and pooled stack capture.
//!
//! ## Features
//!
//! - **Cheap disabled levels**: a call below the threshold costs one
//!   virtual dispatch — no formatting, no allocation, no capture
//! - **Typed fields**: heterogeneous arguments degrade gracefully to
//!   diagnostic fields; logging itself can never fail the caller
//! - **Composable cores**: buffering, sampling, and custom decorators
//!   wrap any terminal sink behind one four-method contract
//! - **Pooled stack capture**: caller and stack enrichment reuse
//!   growable buffers instead of allocating per call
//!
//! ## Quick start
//!
//! ```no_run
//! use fieldlog::prelude::*;
//!
//! let logger = fieldlog::default_logger(vec![]).expect("default config is buildable");
//! logger.info("server started", vec![
//!     Arg::from("port"),
//!     Arg::from(8080i64),
//! ]);
//! ```

pub mod core;
pub mod global;
pub mod macros;
pub mod sinks;
pub mod stacktrace;

pub mod prelude {
    pub use crate::core::{
        args_to_fields, default_logger, Arg, BufferedCore, Caller, CheckedEntry, Config, Context,
        ContextHandler, Core, CoreConfig, Entry, Field, FieldValue, Level, LevelEnabler,
        LevelEnablerFn, LogError, LoggedEntry, Logger, LoggerOption, NopCore, ObserverCore,
        Record, Result, SamplerCore, SamplingConfig,
    };
    pub use crate::sinks::{Encoder, EncoderConfig, SinkCore, TimestampFormat};
    pub use crate::stacktrace::{Depth, Frame, Pools};
}

pub use crate::core::{
    args_to_fields, default_logger, options, Arg, BufferedCore, Caller, CheckedEntry, Config,
    Context, ContextHandler, Core, CoreConfig, Entry, Field, FieldValue, Level, LevelEnabler,
    LevelEnablerFn, LogError, LoggedEntry, Logger, LoggerOption, NopCore, ObserverCore, Record,
    Result, SamplerCore, SamplerMetrics, SamplingConfig, BAD_KEY, NO_VALUE,
};
pub use crate::sinks::{open_writers, Encoder, EncoderConfig, SinkCore, TimestampFormat};
pub use crate::stacktrace::{Depth, Formatter, Frame, Pools, Stack, MAX_DEPTH};
