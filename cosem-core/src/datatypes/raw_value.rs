//! Untyped native values fed into type inference
//!
//! A [`RawValue`] is what a caller hands to the generator before any DLMS
//! type has been chosen: plain numbers, text, dates, ordered lists and
//! ordered field/value records. Field order in a record is the order the
//! caller supplies; no sorting is performed.

use chrono::NaiveDateTime;
use std::fmt;

/// A native value prior to DLMS type tagging
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    DateTime(NaiveDateTime),
    List(Vec<RawValue>),
    Record(Vec<(String, RawValue)>),
}

impl RawValue {
    /// Build a record from named fields, preserving iteration order
    pub fn record<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, RawValue)>,
        K: Into<String>,
    {
        RawValue::Record(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Fallback conversion for values with no dedicated rule: their
    /// textual representation becomes a visible string
    pub fn from_display<T: fmt::Display>(value: T) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Bool(value)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        RawValue::Int(value as i64)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Int(value)
    }
}

impl From<u32> for RawValue {
    fn from(value: u32) -> Self {
        RawValue::Int(value as i64)
    }
}

impl From<u64> for RawValue {
    fn from(value: u64) -> Self {
        RawValue::UInt(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Float(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<NaiveDateTime> for RawValue {
    fn from(value: NaiveDateTime) -> Self {
        RawValue::DateTime(value)
    }
}

impl From<Vec<RawValue>> for RawValue {
    fn from(value: Vec<RawValue>) -> Self {
        RawValue::List(value)
    }
}
