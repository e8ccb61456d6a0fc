//! Typed key/value fields attached to log events
//!
//! A [`Field`] is one immutable key/value pair. [`FieldValue`] is a closed
//! tagged union over the primitive kinds the pipeline understands, with an
//! `Object` fallback for anything serializable. Constructors never fail:
//! unserializable values degrade to `Null` rather than erroring, so field
//! construction can sit on the hot logging path without a failure channel.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::fmt;
use std::fmt::Write as _;
use std::time::Duration;

/// Value payload of a [`Field`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    Duration(Duration),
    Time(DateTime<Utc>),
    /// Opaque catch-all; structural encoding is deferred to the sink.
    Object(serde_json::Value),
    Null,
    /// Marker for fields the encoder must drop entirely.
    Skip,
    /// A named group of nested fields.
    Namespace(Vec<Field>),
}

impl FieldValue {
    /// Convert to `serde_json::Value` for the JSON encoder.
    ///
    /// Durations render as seconds, times as RFC 3339, binary as lowercase
    /// hex. `Skip` converts to `Null` here; encoders filter skip fields
    /// out before ever reaching this point.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Int(i) => serde_json::Value::Number((*i).into()),
            FieldValue::Uint(u) => serde_json::Value::Number((*u).into()),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            FieldValue::Str(s) => serde_json::Value::String(s.clone()),
            FieldValue::Bytes(b) => serde_json::Value::String(hex_string(b)),
            FieldValue::Duration(d) => serde_json::Number::from_f64(d.as_secs_f64())
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            FieldValue::Time(t) => {
                serde_json::Value::String(t.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            FieldValue::Object(v) => v.clone(),
            FieldValue::Null | FieldValue::Skip => serde_json::Value::Null,
            FieldValue::Namespace(fields) => {
                let mut map = serde_json::Map::with_capacity(fields.len());
                for f in fields {
                    if !matches!(f.value, FieldValue::Skip) {
                        map.insert(f.key.clone(), f.value.to_json());
                    }
                }
                serde_json::Value::Object(map)
            }
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Uint(u) => write!(f, "{}", u),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Str(s) => write!(f, "{}", s),
            FieldValue::Bytes(b) => write!(f, "{}", hex_string(b)),
            FieldValue::Duration(d) => write!(f, "{}s", d.as_secs_f64()),
            FieldValue::Time(t) => {
                write!(f, "{}", t.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            FieldValue::Object(v) => write!(f, "{}", v),
            FieldValue::Null | FieldValue::Skip => write!(f, "null"),
            FieldValue::Namespace(_) => write!(f, "{}", self.to_json()),
        }
    }
}

fn hex_string(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{:02x}", b);
    }
    s
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<i8> for FieldValue {
    fn from(v: i8) -> Self {
        FieldValue::Int(v as i64)
    }
}

impl From<i16> for FieldValue {
    fn from(v: i16) -> Self {
        FieldValue::Int(v as i64)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Int(v as i64)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<u8> for FieldValue {
    fn from(v: u8) -> Self {
        FieldValue::Uint(v as u64)
    }
}

impl From<u16> for FieldValue {
    fn from(v: u16) -> Self {
        FieldValue::Uint(v as u64)
    }
}

impl From<u32> for FieldValue {
    fn from(v: u32) -> Self {
        FieldValue::Uint(v as u64)
    }
}

impl From<u64> for FieldValue {
    fn from(v: u64) -> Self {
        FieldValue::Uint(v)
    }
}

impl From<usize> for FieldValue {
    fn from(v: usize) -> Self {
        FieldValue::Uint(v as u64)
    }
}

impl From<f32> for FieldValue {
    fn from(v: f32) -> Self {
        FieldValue::Float(v as f64)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Str(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Str(v)
    }
}

impl From<Duration> for FieldValue {
    fn from(v: Duration) -> Self {
        FieldValue::Duration(v)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(v: DateTime<Utc>) -> Self {
        FieldValue::Time(v)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(v: serde_json::Value) -> Self {
        FieldValue::Object(v)
    }
}

/// One typed key/value pair of a log event. Immutable once constructed;
/// equality is structural over key and value.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: String,
    pub value: FieldValue,
}

impl Field {
    pub fn new(key: impl Into<String>, value: FieldValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    /// A field the encoders drop entirely. Useful as the no-op arm of a
    /// conditional field expression.
    pub fn skip() -> Self {
        Self::new("", FieldValue::Skip)
    }

    pub fn bool(key: impl Into<String>, value: bool) -> Self {
        Self::new(key, FieldValue::Bool(value))
    }

    pub fn int(key: impl Into<String>, value: impl Into<i64>) -> Self {
        Self::new(key, FieldValue::Int(value.into()))
    }

    pub fn uint(key: impl Into<String>, value: impl Into<u64>) -> Self {
        Self::new(key, FieldValue::Uint(value.into()))
    }

    pub fn float(key: impl Into<String>, value: impl Into<f64>) -> Self {
        Self::new(key, FieldValue::Float(value.into()))
    }

    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, FieldValue::Str(value.into()))
    }

    /// Raw binary payload, rendered as lowercase hex by the encoders.
    pub fn binary(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self::new(key, FieldValue::Bytes(value.into()))
    }

    /// UTF-8 bytes logged as text without copying through `String` at the
    /// call site; invalid sequences are replaced lossily.
    pub fn byte_string(key: impl Into<String>, value: &[u8]) -> Self {
        Self::new(
            key,
            FieldValue::Str(String::from_utf8_lossy(value).into_owned()),
        )
    }

    pub fn duration(key: impl Into<String>, value: Duration) -> Self {
        Self::new(key, FieldValue::Duration(value))
    }

    pub fn time(key: impl Into<String>, value: DateTime<Utc>) -> Self {
        Self::new(key, FieldValue::Time(value))
    }

    /// Catch-all for any serializable value. Serialization failures
    /// degrade to `Null`; this constructor never errors.
    pub fn any(key: impl Into<String>, value: impl Serialize) -> Self {
        let json = serde_json::to_value(value).unwrap_or(serde_json::Value::Null);
        Self::new(key, FieldValue::Object(json))
    }

    /// A named group of nested fields.
    pub fn namespace(key: impl Into<String>, fields: Vec<Field>) -> Self {
        Self::new(key, FieldValue::Namespace(fields))
    }

    pub fn null(key: impl Into<String>) -> Self {
        Self::new(key, FieldValue::Null)
    }

    pub fn bool_opt(key: impl Into<String>, value: Option<bool>) -> Self {
        Self::new(key, value.map_or(FieldValue::Null, FieldValue::Bool))
    }

    pub fn int_opt(key: impl Into<String>, value: Option<i64>) -> Self {
        Self::new(key, value.map_or(FieldValue::Null, FieldValue::Int))
    }

    pub fn uint_opt(key: impl Into<String>, value: Option<u64>) -> Self {
        Self::new(key, value.map_or(FieldValue::Null, FieldValue::Uint))
    }

    pub fn float_opt(key: impl Into<String>, value: Option<f64>) -> Self {
        Self::new(key, value.map_or(FieldValue::Null, FieldValue::Float))
    }

    pub fn string_opt(key: impl Into<String>, value: Option<String>) -> Self {
        Self::new(key, value.map_or(FieldValue::Null, FieldValue::Str))
    }

    pub fn duration_opt(key: impl Into<String>, value: Option<Duration>) -> Self {
        Self::new(key, value.map_or(FieldValue::Null, FieldValue::Duration))
    }

    pub fn time_opt(key: impl Into<String>, value: Option<DateTime<Utc>>) -> Self {
        Self::new(key, value.map_or(FieldValue::Null, FieldValue::Time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_field_constructors() {
        assert_eq!(
            Field::bool("k", true),
            Field::new("k", FieldValue::Bool(true))
        );
        assert_eq!(Field::int("k", 1i32), Field::new("k", FieldValue::Int(1)));
        assert_eq!(
            Field::uint("k", 1u32),
            Field::new("k", FieldValue::Uint(1))
        );
        assert_eq!(
            Field::float("k", 1.5f32),
            Field::new("k", FieldValue::Float(1.5))
        );
        assert_eq!(
            Field::string("k", "hello"),
            Field::new("k", FieldValue::Str("hello".to_string()))
        );
        assert_eq!(
            Field::duration("k", Duration::from_secs(1)),
            Field::new("k", FieldValue::Duration(Duration::from_secs(1)))
        );
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(Field::int("k", 1), Field::int("k", 1));
        assert_ne!(Field::int("k", 1), Field::int("k", 2));
        assert_ne!(Field::int("a", 1), Field::int("b", 1));
        assert_ne!(Field::int("k", 1), Field::uint("k", 1u64));
    }

    #[test]
    fn test_opt_constructors() {
        assert_eq!(
            Field::bool_opt("k", Some(true)),
            Field::bool("k", true)
        );
        assert_eq!(
            Field::bool_opt("k", None),
            Field::new("k", FieldValue::Null)
        );
        assert_eq!(
            Field::string_opt("k", None),
            Field::new("k", FieldValue::Null)
        );
    }

    #[test]
    fn test_any_never_fails() {
        #[derive(Serialize)]
        struct User {
            name: &'static str,
            id: u32,
        }

        let field = Field::any("user", User { name: "alice", id: 7 });
        match &field.value {
            FieldValue::Object(v) => {
                assert_eq!(v["name"], "alice");
                assert_eq!(v["id"], 7);
            }
            other => panic!("expected object, got {:?}", other),
        }
    }

    #[test]
    fn test_to_json_duration_as_seconds() {
        let v = FieldValue::Duration(Duration::from_millis(1500)).to_json();
        assert_eq!(v, serde_json::json!(1.5));
    }

    #[test]
    fn test_to_json_time_rfc3339() {
        let t = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let v = FieldValue::Time(t).to_json();
        assert_eq!(v, serde_json::json!("2024-05-01T12:00:00Z"));
    }

    #[test]
    fn test_to_json_binary_hex() {
        let v = FieldValue::Bytes(vec![0xde, 0xad, 0xbe, 0xef]).to_json();
        assert_eq!(v, serde_json::json!("deadbeef"));
    }

    #[test]
    fn test_namespace_to_json_drops_skips() {
        let ns = Field::namespace(
            "db",
            vec![Field::string("host", "localhost"), Field::skip()],
        );
        let v = ns.value.to_json();
        assert_eq!(v, serde_json::json!({"host": "localhost"}));
    }

    #[test]
    fn test_byte_string_lossy() {
        let field = Field::byte_string("k", b"plain text");
        assert_eq!(field, Field::string("k", "plain text"));
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldValue::Int(42).to_string(), "42");
        assert_eq!(FieldValue::Str("x".into()).to_string(), "x");
        assert_eq!(FieldValue::Null.to_string(), "null");
        assert_eq!(
            FieldValue::Duration(Duration::from_secs(2)).to_string(),
            "2s"
        );
    }
}
