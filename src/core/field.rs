//! Argument values for key/value log lines
//!
//! A log call takes an ordered slice of [`Arg`]s. Each one is either a plain
//! [`FieldValue`] that takes part in key/value pairing, or a [`Marker`] asking
//! the formatter to insert a computed field (time, caller, app name).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Built-in markers recognized in an argument list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marker {
    /// Insert `time=<now>`
    Time,
    /// Insert `location=<caller>`
    Caller,
    /// Insert `app=<binary name>`
    App,
}

/// Value type for key/value fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::UInt(u) => write!(f, "{}", u),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

impl FieldValue {
    /// Capture any printable value through its `Display` output
    pub fn display<T: fmt::Display + ?Sized>(value: &T) -> Self {
        FieldValue::String(value.to_string())
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

impl From<&String> for FieldValue {
    fn from(s: &String) -> Self {
        FieldValue::String(s.clone())
    }
}

impl From<char> for FieldValue {
    fn from(c: char) -> Self {
        FieldValue::String(c.to_string())
    }
}

macro_rules! field_value_from {
    ($variant:ident, $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for FieldValue {
                fn from(v: $source) -> Self {
                    FieldValue::$variant(<$target>::from(v))
                }
            }
        )+
    };
}

field_value_from!(Int, i64: i8, i16, i32, i64);
field_value_from!(UInt, u64: u8, u16, u32, u64);
field_value_from!(Float, f64: f32, f64);

impl From<isize> for FieldValue {
    fn from(v: isize) -> Self {
        FieldValue::Int(v as i64)
    }
}

impl From<usize> for FieldValue {
    fn from(v: usize) -> Self {
        FieldValue::UInt(v as u64)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// One element of a log call's argument list
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Marker(Marker),
    Value(FieldValue),
}

impl Arg {
    /// The marker carried by this argument, if any
    pub fn marker(&self) -> Option<Marker> {
        match self {
            Arg::Marker(m) => Some(*m),
            Arg::Value(_) => None,
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Marker(m) => write!(f, "{:?}", m),
            Arg::Value(v) => write!(f, "{}", v),
        }
    }
}

impl From<Marker> for Arg {
    fn from(m: Marker) -> Self {
        Arg::Marker(m)
    }
}

impl From<FieldValue> for Arg {
    fn from(v: FieldValue) -> Self {
        Arg::Value(v)
    }
}

macro_rules! arg_from_value {
    ($($source:ty),+) => {
        $(
            impl From<$source> for Arg {
                fn from(v: $source) -> Self {
                    Arg::Value(FieldValue::from(v))
                }
            }
        )+
    };
}

arg_from_value!(
    String, &str, &String, char, bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32,
    f64
);

impl<T: Into<FieldValue>> From<Option<T>> for Arg {
    fn from(v: Option<T>) -> Self {
        Arg::Value(FieldValue::from(v))
    }
}
