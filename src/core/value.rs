// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! The dynamic value model for schema-driven messages.
//!
//! A message is a [`MessageValue::Struct`] mapping field names to values.
//! Nested definitions nest as structs, arrays as [`MessageValue::Array`],
//! with [`MessageValue::Bytes`] as the compact form for `uint8` arrays.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Map from field name to value, the shape of every message and nested struct.
pub type MessageMap = HashMap<String, MessageValue>;

/// A dynamically typed message value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageValue {
    /// Boolean value
    Bool(bool),
    /// Signed 8-bit integer
    Int8(i8),
    /// Signed 16-bit integer
    Int16(i16),
    /// Signed 32-bit integer
    Int32(i32),
    /// Signed 64-bit integer
    Int64(i64),
    /// Unsigned 8-bit integer
    UInt8(u8),
    /// Unsigned 16-bit integer
    UInt16(u16),
    /// Unsigned 32-bit integer
    UInt32(u32),
    /// Unsigned 64-bit integer
    UInt64(u64),
    /// 32-bit floating point
    Float32(f32),
    /// 64-bit floating point
    Float64(f64),
    /// UTF-8 string
    String(String),
    /// Raw byte buffer, the compact representation of a `uint8` array
    Bytes(Vec<u8>),
    /// Homogeneous array of values
    Array(Vec<MessageValue>),
    /// Nested struct keyed by field name
    Struct(MessageMap),
}

impl MessageValue {
    /// True if the value is any integer variant.
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            MessageValue::Int8(_)
                | MessageValue::Int16(_)
                | MessageValue::Int32(_)
                | MessageValue::Int64(_)
                | MessageValue::UInt8(_)
                | MessageValue::UInt16(_)
                | MessageValue::UInt32(_)
                | MessageValue::UInt64(_)
        )
    }

    /// Widen any integer variant to i64, if it fits.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            MessageValue::Int8(v) => Some(i64::from(*v)),
            MessageValue::Int16(v) => Some(i64::from(*v)),
            MessageValue::Int32(v) => Some(i64::from(*v)),
            MessageValue::Int64(v) => Some(*v),
            MessageValue::UInt8(v) => Some(i64::from(*v)),
            MessageValue::UInt16(v) => Some(i64::from(*v)),
            MessageValue::UInt32(v) => Some(i64::from(*v)),
            MessageValue::UInt64(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Widen any non-negative integer variant to u64.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            MessageValue::Int8(v) => u64::try_from(*v).ok(),
            MessageValue::Int16(v) => u64::try_from(*v).ok(),
            MessageValue::Int32(v) => u64::try_from(*v).ok(),
            MessageValue::Int64(v) => u64::try_from(*v).ok(),
            MessageValue::UInt8(v) => Some(u64::from(*v)),
            MessageValue::UInt16(v) => Some(u64::from(*v)),
            MessageValue::UInt32(v) => Some(u64::from(*v)),
            MessageValue::UInt64(v) => Some(*v),
            _ => None,
        }
    }

    /// Convert any numeric variant to f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MessageValue::Float32(v) => Some(f64::from(*v)),
            MessageValue::Float64(v) => Some(*v),
            MessageValue::Int8(v) => Some(f64::from(*v)),
            MessageValue::Int16(v) => Some(f64::from(*v)),
            MessageValue::Int32(v) => Some(f64::from(*v)),
            MessageValue::Int64(v) => Some(*v as f64),
            MessageValue::UInt8(v) => Some(f64::from(*v)),
            MessageValue::UInt16(v) => Some(f64::from(*v)),
            MessageValue::UInt32(v) => Some(f64::from(*v)),
            MessageValue::UInt64(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Get bool content, if this is a Bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            MessageValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Get string content, if this is a String.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MessageValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get byte content, if this is a Bytes.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            MessageValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Get array elements, if this is an Array.
    pub fn as_array(&self) -> Option<&[MessageValue]> {
        match self {
            MessageValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Get struct fields, if this is a Struct.
    pub fn as_struct(&self) -> Option<&MessageMap> {
        match self {
            MessageValue::Struct(map) => Some(map),
            _ => None,
        }
    }

    /// Name of the variant, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            MessageValue::Bool(_) => "bool",
            MessageValue::Int8(_) => "int8",
            MessageValue::Int16(_) => "int16",
            MessageValue::Int32(_) => "int32",
            MessageValue::Int64(_) => "int64",
            MessageValue::UInt8(_) => "uint8",
            MessageValue::UInt16(_) => "uint16",
            MessageValue::UInt32(_) => "uint32",
            MessageValue::UInt64(_) => "uint64",
            MessageValue::Float32(_) => "float32",
            MessageValue::Float64(_) => "float64",
            MessageValue::String(_) => "string",
            MessageValue::Bytes(_) => "bytes",
            MessageValue::Array(_) => "array",
            MessageValue::Struct(_) => "struct",
        }
    }
}

impl From<&str> for MessageValue {
    fn from(s: &str) -> Self {
        MessageValue::String(s.to_string())
    }
}

impl From<String> for MessageValue {
    fn from(s: String) -> Self {
        MessageValue::String(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_widening() {
        assert_eq!(MessageValue::Int8(-5).as_i64(), Some(-5));
        assert_eq!(MessageValue::UInt32(7).as_i64(), Some(7));
        assert_eq!(MessageValue::UInt64(u64::MAX).as_i64(), None);
        assert_eq!(MessageValue::Int16(-1).as_u64(), None);
        assert_eq!(MessageValue::UInt64(u64::MAX).as_u64(), Some(u64::MAX));
        assert_eq!(MessageValue::String("5".into()).as_i64(), None);
    }

    #[test]
    fn test_float_widening() {
        assert_eq!(MessageValue::Float32(1.5).as_f64(), Some(1.5));
        assert_eq!(MessageValue::Int32(-3).as_f64(), Some(-3.0));
        assert_eq!(MessageValue::Bool(true).as_f64(), None);
    }

    #[test]
    fn test_is_integer() {
        assert!(MessageValue::UInt8(0).is_integer());
        assert!(MessageValue::Int64(-1).is_integer());
        assert!(!MessageValue::Float64(1.0).is_integer());
        assert!(!MessageValue::Bool(false).is_integer());
    }

    #[test]
    fn test_accessors() {
        let s = MessageValue::from("hello");
        assert_eq!(s.as_str(), Some("hello"));
        assert_eq!(s.as_bool(), None);

        let b = MessageValue::Bytes(vec![1, 2, 3]);
        assert_eq!(b.as_bytes(), Some(&[1u8, 2, 3][..]));

        let a = MessageValue::Array(vec![MessageValue::Bool(true)]);
        assert_eq!(a.as_array().map(<[MessageValue]>::len), Some(1));

        let mut map = MessageMap::new();
        map.insert("x".to_string(), MessageValue::Float64(1.0));
        let st = MessageValue::Struct(map);
        assert!(st.as_struct().is_some());
        assert_eq!(st.type_name(), "struct");
    }

    #[test]
    fn test_serde_round_trip() {
        let mut map = MessageMap::new();
        map.insert("count".to_string(), MessageValue::UInt32(42));
        map.insert("label".to_string(), MessageValue::from("ok"));
        let value = MessageValue::Struct(map);

        let json = serde_json::to_string(&value).expect("serialize to JSON");
        let back: MessageValue = serde_json::from_str(&json).expect("parse JSON");
        // Untagged integers come back as the widest variant, so compare via JSON.
        let json2 = serde_json::to_string(&back).expect("serialize again");
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&json).expect("value"),
            serde_json::from_str::<serde_json::Value>(&json2).expect("value")
        );
    }
}
