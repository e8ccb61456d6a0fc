//! Log level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug = 0,
    #[default]
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl Level {
    /// Lowercase name, as emitted by the JSON encoder.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }

    /// Uppercase name, as emitted by the console encoder.
    pub fn as_upper_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            Level::Debug => Blue,
            Level::Info => Green,
            Level::Warn => Yellow,
            Level::Error => Red,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_upper_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(Level::Debug),
            "INFO" => Ok(Level::Info),
            "WARN" | "WARNING" => Ok(Level::Warn),
            "ERROR" => Ok(Level::Error),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

/// Decides whether a given level is worth recording.
///
/// `Level` itself is the usual implementation: it enables everything at
/// or above its own severity. `LevelEnablerFn` wraps arbitrary predicates
/// for cases like "errors only in this subsystem".
pub trait LevelEnabler: Send + Sync {
    fn enabled(&self, level: Level) -> bool;
}

impl LevelEnabler for Level {
    fn enabled(&self, level: Level) -> bool {
        level >= *self
    }
}

impl<T: LevelEnabler + ?Sized> LevelEnabler for Arc<T> {
    fn enabled(&self, level: Level) -> bool {
        (**self).enabled(level)
    }
}

/// Adapter turning any predicate into a [`LevelEnabler`].
pub struct LevelEnablerFn<F>(pub F);

impl<F> LevelEnabler for LevelEnablerFn<F>
where
    F: Fn(Level) -> bool + Send + Sync,
{
    fn enabled(&self, level: Level) -> bool {
        (self.0)(level)
    }
}
