//! Generic AMQP data model shared by the codec and the section types

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// A single AMQP 1.0 value.
///
/// This is the unit the shared codec reads and writes; every section body is
/// expressed as one of these before it touches the wire. Maps preserve entry
/// order, matching the wire layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// null
    Null,
    /// boolean
    Bool(bool),
    /// unsigned 8-bit integer
    Ubyte(u8),
    /// unsigned 16-bit integer
    Ushort(u16),
    /// unsigned 32-bit integer
    Uint(u32),
    /// unsigned 64-bit integer
    Ulong(u64),
    /// signed 8-bit integer
    Byte(i8),
    /// signed 16-bit integer
    Short(i16),
    /// signed 32-bit integer
    Int(i32),
    /// signed 64-bit integer
    Long(i64),
    /// 32-bit IEEE 754 float
    Float(f32),
    /// 64-bit IEEE 754 float
    Double(f64),
    /// milliseconds since the Unix epoch
    Timestamp(i64),
    /// RFC 4122 UUID
    Uuid([u8; 16]),
    /// opaque binary data
    Binary(Bytes),
    /// UTF-8 string
    String(String),
    /// symbolic value from a constrained domain
    Symbol(String),
    /// ordered sequence of values
    List(Vec<Value>),
    /// ordered key/value pairs
    Map(Vec<(Value, Value)>),
    /// a described value: descriptor code plus the value it describes
    Described(u64, Box<Value>),
}

impl Value {
    /// Create a symbol value
    pub fn symbol(s: impl Into<String>) -> Self {
        Value::Symbol(s.into())
    }

    /// Create a string value
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    /// Create a binary value from a byte slice
    pub fn binary(bytes: &[u8]) -> Self {
        Value::Binary(Bytes::copy_from_slice(bytes))
    }

    /// Check whether this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// View the value as a string slice, if it is a string or symbol
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) | Value::Symbol(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Uint(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Ulong(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(String::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Binary(Bytes::from(v))
    }
}

impl From<Bytes> for Value {
    fn from(v: Bytes) -> Self {
        Value::Binary(v)
    }
}
