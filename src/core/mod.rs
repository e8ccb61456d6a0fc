//! Core pipeline types and traits

pub mod chain;
pub mod config;
pub mod context;
pub mod entry;
pub mod error;
pub mod field;
pub mod level;
pub mod logger;
pub mod observer;
pub mod options;
pub mod record;
pub mod sampler;

pub use chain::{BufferedCore, CheckedEntry, Core, NopCore};
pub use config::{default_logger, Config, CoreConfig};
pub use context::{Context, ContextHandler};
pub use entry::{Caller, Entry};
pub use error::{LogError, Result};
pub use field::{Field, FieldValue};
pub use level::{Level, LevelEnabler, LevelEnablerFn};
pub use logger::Logger;
pub use observer::{LoggedEntry, ObserverCore, ObserverCounters};
pub use options::LoggerOption;
pub use record::{args_to_fields, Arg, Record, BAD_KEY, NO_VALUE};
pub use sampler::{SamplerCore, SamplerMetrics, SamplingConfig};
