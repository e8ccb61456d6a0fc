//! Log event structure

use super::level::Level;
use crate::stacktrace::Frame;
use chrono::{DateTime, Utc};

/// Source location of the log call site.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Caller {
    /// Whether the capture resolved to a real program counter.
    pub defined: bool,
    pub pc: usize,
    pub file: String,
    pub line: u32,
    pub function: String,
}

impl Caller {
    pub fn from_frame(frame: &Frame) -> Self {
        Self {
            defined: frame.pc != 0,
            pc: frame.pc,
            file: frame.file.clone(),
            line: frame.line,
            function: frame.function.clone(),
        }
    }

    /// `file:line`, or `"undefined"` when the capture failed.
    pub fn location(&self) -> String {
        if !self.defined {
            return "undefined".to_string();
        }
        format!("{}:{}", self.file, self.line)
    }

    /// Like [`Caller::location`], trimmed to the final path component.
    pub fn short_location(&self) -> String {
        if !self.defined {
            return "undefined".to_string();
        }
        let file = self
            .file
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(self.file.as_str());
        format!("{}:{}", file, self.line)
    }
}

/// One log event, before fields are attached.
///
/// Built provisionally by the logger for the `check` round-trip; caller
/// and stack enrichment happen only after a core accepts it.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub name: String,
    pub time: DateTime<Utc>,
    pub level: Level,
    pub message: String,
    pub caller: Option<Caller>,
    pub stack: Option<String>,
}

impl Entry {
    pub fn new(name: impl Into<String>, level: Level, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            time: Utc::now(),
            level,
            message: message.into(),
            caller: None,
            stack: None,
        }
    }
}
