//! Event encoders for the terminal sink
//!
//! Two renderings: single-line JSON objects (JSONL, for aggregation
//! tools) and a tab-separated console layout. Field order is preserved
//! exactly as dispatched — baked-in fields arrive ahead of call fields
//! and stay that way in the output.

use crate::core::entry::Entry;
use crate::core::error::{LogError, Result};
use crate::core::field::{Field, FieldValue};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp rendering options for encoded entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// RFC 3339 with sub-second precision: `2025-01-08T10:30:45.123Z`
    #[default]
    Rfc3339,

    /// ISO 8601 with fixed millisecond precision.
    Iso8601,

    /// Unix timestamp in seconds.
    Unix,

    /// Unix timestamp in milliseconds.
    UnixMillis,

    /// Custom strftime format string.
    Custom(String),
}

impl TimestampFormat {
    /// Render as a JSON value: a string for the textual formats, a
    /// number for the Unix variants.
    pub fn format_value(&self, time: &DateTime<Utc>) -> serde_json::Value {
        match self {
            TimestampFormat::Unix => serde_json::Value::Number(time.timestamp().into()),
            TimestampFormat::UnixMillis => {
                serde_json::Value::Number(time.timestamp_millis().into())
            }
            _ => serde_json::Value::String(self.format_string(time)),
        }
    }

    pub fn format_string(&self, time: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Rfc3339 => time.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            TimestampFormat::Iso8601 => time.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Unix => time.timestamp().to_string(),
            TimestampFormat::UnixMillis => time.timestamp_millis().to_string(),
            TimestampFormat::Custom(fmt) => time.format(fmt).to_string(),
        }
    }
}

/// Key names and formatting switches shared by both encoders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    pub time_key: String,
    pub level_key: String,
    pub name_key: String,
    pub caller_key: String,
    pub message_key: String,
    pub stacktrace_key: String,
    pub time_format: TimestampFormat,
    /// Colorize console levels. Ignored by the JSON encoder.
    pub color: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            time_key: "ts".to_string(),
            level_key: "level".to_string(),
            name_key: "logger".to_string(),
            caller_key: "caller".to_string(),
            message_key: "msg".to_string(),
            stacktrace_key: "stacktrace".to_string(),
            time_format: TimestampFormat::default(),
            color: false,
        }
    }
}

/// A concrete event-to-text encoding.
#[derive(Debug, Clone)]
pub enum Encoder {
    Json(EncoderConfig),
    Console(EncoderConfig),
}

impl Encoder {
    /// Resolve an encoding by its configuration name. Unknown names are
    /// a configuration-time error, surfaced once.
    pub fn from_name(name: &str, config: EncoderConfig) -> Result<Self> {
        match name {
            "json" => Ok(Encoder::Json(config)),
            "console" => Ok(Encoder::Console(config)),
            other => Err(LogError::UnsupportedEncoding(other.to_string())),
        }
    }

    /// Render one event as a single line (the stack rendering may embed
    /// newlines in console mode; JSON stays one physical line).
    pub fn encode(&self, entry: &Entry, fields: &[Field]) -> String {
        match self {
            Encoder::Json(config) => encode_json(config, entry, fields),
            Encoder::Console(config) => encode_console(config, entry, fields),
        }
    }
}

fn encode_json(config: &EncoderConfig, entry: &Entry, fields: &[Field]) -> String {
    let mut map = serde_json::Map::new();
    map.insert(
        config.time_key.clone(),
        config.time_format.format_value(&entry.time),
    );
    map.insert(
        config.level_key.clone(),
        serde_json::Value::String(entry.level.as_str().to_string()),
    );
    if !entry.name.is_empty() {
        map.insert(
            config.name_key.clone(),
            serde_json::Value::String(entry.name.clone()),
        );
    }
    if let Some(caller) = entry.caller.as_ref().filter(|c| c.defined) {
        map.insert(
            config.caller_key.clone(),
            serde_json::Value::String(caller.short_location()),
        );
    }
    map.insert(
        config.message_key.clone(),
        serde_json::Value::String(entry.message.clone()),
    );
    for field in fields {
        if matches!(field.value, FieldValue::Skip) {
            continue;
        }
        map.insert(field.key.clone(), field.value.to_json());
    }
    if let Some(stack) = &entry.stack {
        map.insert(
            config.stacktrace_key.clone(),
            serde_json::Value::String(stack.clone()),
        );
    }
    serde_json::Value::Object(map).to_string()
}

fn encode_console(config: &EncoderConfig, entry: &Entry, fields: &[Field]) -> String {
    let mut line = String::with_capacity(64 + entry.message.len());
    line.push_str(&config.time_format.format_string(&entry.time));
    line.push('\t');
    line.push_str(&level_label(entry.level, config.color));
    if !entry.name.is_empty() {
        line.push('\t');
        line.push_str(&entry.name);
    }
    if let Some(caller) = entry.caller.as_ref().filter(|c| c.defined) {
        line.push('\t');
        line.push_str(&caller.short_location());
    }
    line.push('\t');
    line.push_str(&entry.message);

    let visible: Vec<&Field> = fields
        .iter()
        .filter(|f| !matches!(f.value, FieldValue::Skip))
        .collect();
    if !visible.is_empty() {
        let mut map = serde_json::Map::with_capacity(visible.len());
        for field in visible {
            map.insert(field.key.clone(), field.value.to_json());
        }
        line.push('\t');
        line.push_str(&serde_json::Value::Object(map).to_string());
    }

    if let Some(stack) = &entry.stack {
        line.push('\n');
        line.push_str(stack);
    }
    line
}

#[cfg(feature = "console")]
fn level_label(level: crate::core::level::Level, color: bool) -> String {
    use colored::Colorize;
    if color {
        level
            .as_upper_str()
            .color(level.color_code())
            .to_string()
    } else {
        level.as_upper_str().to_string()
    }
}

#[cfg(not(feature = "console"))]
fn level_label(level: crate::core::level::Level, _color: bool) -> String {
    level.as_upper_str().to_string()
}
