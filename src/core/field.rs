//! Structured key/value fields attached to entries

use super::pool::Reset;
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

/// Value type for structured logging fields
#[derive(Debug, Clone, Default)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    #[default]
    Null,
    /// Anything else, rendered with its `Debug` form
    Other(Arc<dyn fmt::Debug + Send + Sync>),
}

impl FieldValue {
    /// Wrap an arbitrary value, rendered through `Debug` when written.
    pub fn debug<T>(value: T) -> Self
    where
        T: fmt::Debug + Send + Sync + 'static,
    {
        FieldValue::Other(Arc::new(value))
    }

    /// Append the textual form of this value to `buf`.
    pub fn write_to(&self, buf: &mut Vec<u8>) -> io::Result<()> {
        match self {
            FieldValue::String(s) => buf.extend_from_slice(s.as_bytes()),
            FieldValue::Int(i) => write!(buf, "{}", i)?,
            FieldValue::Uint(u) => write!(buf, "{}", u)?,
            FieldValue::Bool(true) => buf.extend_from_slice(b"true"),
            FieldValue::Bool(false) => buf.extend_from_slice(b"false"),
            FieldValue::Float(f) => write!(buf, "{}", f)?,
            FieldValue::Null => buf.extend_from_slice(b"null"),
            FieldValue::Other(v) => write!(buf, "{:?}", v)?,
        }
        Ok(())
    }

    /// Convert to serde_json::Value for JSON serialization
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            FieldValue::String(s) => serde_json::Value::String(s.clone()),
            FieldValue::Int(i) => serde_json::Value::Number((*i).into()),
            FieldValue::Uint(u) => serde_json::Value::Number((*u).into()),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Null => serde_json::Value::Null,
            FieldValue::Other(v) => serde_json::Value::String(format!("{:?}", v)),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => f.write_str(s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Uint(u) => write!(f, "{}", u),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => f.write_str("null"),
            FieldValue::Other(v) => write!(f, "{:?}", v),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<f32> for FieldValue {
    fn from(f: f32) -> Self {
        FieldValue::Float(f as f64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for FieldValue {
            fn from(i: $t) -> Self {
                FieldValue::Int(i as i64)
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for FieldValue {
            fn from(u: $t) -> Self {
                FieldValue::Uint(u as u64)
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);

/// One key/value pair of structured context.
///
/// Fields handed out by [`Logger::field`](crate::Logger::field) come from the
/// logger's field pool and go back to it when their entry is reclaimed.
#[derive(Debug, Clone, Default)]
pub struct Field {
    pub key: String,
    pub value: FieldValue,
}

impl Field {
    pub fn new(key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl Reset for Field {
    fn reset(&mut self) {
        self.key.clear();
        self.value = FieldValue::Null;
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}
