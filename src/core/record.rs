//! Per-call field accumulation and argument conversion
//!
//! A [`Record`] collects the ordered fields of a single log call before
//! dispatch. [`Arg`] is the heterogeneous argument type accepted by the
//! level methods; [`args_to_fields`] converts an argument list into fields
//! and is total — malformed input degrades to diagnostic marker fields
//! instead of an error.

use super::field::{Field, FieldValue};
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Reserved key for a value that appeared where a string key was expected.
pub const BAD_KEY: &str = "!BADKEY";

/// Reserved key for a trailing string key with no value after it.
pub const NO_VALUE: &str = "!NOVALUE";

/// One argument to a log call: a ready-made field, a candidate key, or a
/// bare value.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Field(Field),
    Str(String),
    Value(FieldValue),
}

impl Arg {
    /// Whether this argument is a ready-made [`Field`]. A single field
    /// among the arguments disables printf-style message formatting.
    pub fn is_field(&self) -> bool {
        matches!(self, Arg::Field(_))
    }

    /// Collapse into a field value for use in value position.
    pub(crate) fn into_value(self) -> FieldValue {
        match self {
            Arg::Value(v) => v,
            Arg::Str(s) => FieldValue::Str(s),
            // A field in value position keeps its content as a one-entry
            // object rather than losing its key.
            Arg::Field(f) => {
                let mut map = serde_json::Map::with_capacity(1);
                map.insert(f.key, f.value.to_json());
                FieldValue::Object(serde_json::Value::Object(map))
            }
        }
    }

    /// Render for printf-style positional substitution.
    pub(crate) fn display(&self) -> String {
        match self {
            Arg::Str(s) => s.clone(),
            Arg::Value(v) => v.to_string(),
            Arg::Field(f) => format!("{}={}", f.key, f.value),
        }
    }
}

impl From<Field> for Arg {
    fn from(f: Field) -> Self {
        Arg::Field(f)
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Str(s.to_string())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Str(s)
    }
}

impl From<FieldValue> for Arg {
    fn from(v: FieldValue) -> Self {
        Arg::Value(v)
    }
}

macro_rules! arg_from_value {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for Arg {
                fn from(v: $ty) -> Self {
                    Arg::Value(FieldValue::from(v))
                }
            }
        )+
    };
}

arg_from_value!(
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    usize,
    f32,
    f64,
    Duration,
    DateTime<Utc>,
    serde_json::Value,
);

/// Convert raw call arguments to fields.
///
/// Left-to-right: a `Field` passes through; a string pairs as a key with
/// the following argument, or lands under [`NO_VALUE`] when it is last;
/// anything else in key position lands under [`BAD_KEY`]. Never fails or
/// panics regardless of input shape.
pub fn args_to_fields(args: Vec<Arg>) -> Vec<Field> {
    let mut fields = Vec::with_capacity(args.len());
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg {
            Arg::Field(f) => fields.push(f),
            Arg::Str(key) => match args.next() {
                Some(value) => fields.push(Field::new(key, value.into_value())),
                None => fields.push(Field::string(NO_VALUE, key)),
            },
            bad => fields.push(Field::new(BAD_KEY, bad.into_value())),
        }
    }
    fields
}

/// Ordered, append-only field accumulator for a single log call.
///
/// Insertion order is preserved and keys are never deduplicated; the
/// record lives for one write and is discarded afterwards.
#[derive(Debug, Default)]
pub struct Record {
    fields: Vec<Field>,
}

impl Record {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    pub fn add_fields(&mut self, fields: impl IntoIterator<Item = Field>) {
        self.fields.extend(fields);
    }

    /// Convert raw arguments and append the resulting fields.
    pub fn add(&mut self, args: Vec<Arg>) {
        self.fields.extend(args_to_fields(args));
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<Field> {
        self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_to_fields_empty() {
        assert!(args_to_fields(vec![]).is_empty());
    }

    #[test]
    fn test_args_to_fields_fields_pass_through() {
        let fields = args_to_fields(vec![
            Arg::from(Field::int("a", 1)),
            Arg::from(Field::string("b", "two")),
        ]);
        assert_eq!(fields, vec![Field::int("a", 1), Field::string("b", "two")]);
    }

    #[test]
    fn test_args_to_fields_key_value_pairs() {
        let fields = args_to_fields(vec![
            Arg::from("user"),
            Arg::from("alice"),
            Arg::from("attempts"),
            Arg::from(3i64),
        ]);
        assert_eq!(
            fields,
            vec![
                Field::string("user", "alice"),
                Field::int("attempts", 3),
            ]
        );
    }

    #[test]
    fn test_args_to_fields_trailing_key() {
        let fields = args_to_fields(vec![Arg::from("user"), Arg::from("alice"), Arg::from("orphan")]);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1], Field::string(NO_VALUE, "orphan"));
    }

    #[test]
    fn test_args_to_fields_bad_key() {
        let fields = args_to_fields(vec![Arg::from(42i64), Arg::from("user"), Arg::from("alice")]);
        assert_eq!(
            fields,
            vec![
                Field::new(BAD_KEY, FieldValue::Int(42)),
                Field::string("user", "alice"),
            ]
        );
    }

    #[test]
    fn test_args_to_fields_mixed() {
        let fields = args_to_fields(vec![
            Arg::from(Field::bool("ok", true)),
            Arg::from("count"),
            Arg::from(2u64),
            Arg::from(false),
        ]);
        assert_eq!(
            fields,
            vec![
                Field::bool("ok", true),
                Field::uint("count", 2u64),
                Field::new(BAD_KEY, FieldValue::Bool(false)),
            ]
        );
    }

    #[test]
    fn test_args_to_fields_field_in_value_position() {
        let fields = args_to_fields(vec![
            Arg::from("wrapped"),
            Arg::from(Field::int("inner", 5)),
        ]);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].key, "wrapped");
        match &fields[0].value {
            FieldValue::Object(v) => assert_eq!(v["inner"], 5),
            other => panic!("expected object, got {:?}", other),
        }
    }

    #[test]
    fn test_record_preserves_order_and_duplicates() {
        let mut record = Record::with_capacity(3);
        record.add_field(Field::int("k", 1));
        record.add_field(Field::int("k", 2));
        record.add(vec![Arg::from("k"), Arg::from(3i64)]);
        assert_eq!(
            record.fields(),
            &[Field::int("k", 1), Field::int("k", 2), Field::int("k", 3)]
        );
    }
}
