// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Message schema data model.
//!
//! Schemas arrive pre-parsed as a flat list of [`MessageDefinition`]s whose
//! fields reference each other by type name. This module defines that shape
//! plus the primitive type table with CDR widths and alignments.

use serde::{Deserialize, Serialize};

use crate::core::{CodecError, MessageValue, Result};

/// The primitive wire types a field can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// Boolean, one byte on the wire
    Bool,
    /// Signed 8-bit integer
    Int8,
    /// Signed 16-bit integer
    Int16,
    /// Signed 32-bit integer
    Int32,
    /// Signed 64-bit integer
    Int64,
    /// Unsigned 8-bit integer
    UInt8,
    /// Unsigned 16-bit integer
    UInt16,
    /// Unsigned 32-bit integer
    UInt32,
    /// Unsigned 64-bit integer
    UInt64,
    /// 32-bit IEEE float
    Float32,
    /// 64-bit IEEE float
    Float64,
    /// Length-prefixed, NUL-terminated UTF-8 string
    String,
    /// Wide string. Recognized so schemas naming it parse, but rejected by
    /// the writer and reader.
    WString,
    /// Timestamp: signed 32-bit seconds plus unsigned 32-bit fraction
    Time,
    /// Duration, same wire shape as Time
    Duration,
}

impl PrimitiveKind {
    /// Resolve a schema type name to a primitive kind.
    pub fn try_from_str(name: &str) -> Option<Self> {
        match name {
            "bool" => Some(PrimitiveKind::Bool),
            "int8" => Some(PrimitiveKind::Int8),
            "int16" => Some(PrimitiveKind::Int16),
            "int32" => Some(PrimitiveKind::Int32),
            "int64" => Some(PrimitiveKind::Int64),
            "uint8" => Some(PrimitiveKind::UInt8),
            "uint16" => Some(PrimitiveKind::UInt16),
            "uint32" => Some(PrimitiveKind::UInt32),
            "uint64" => Some(PrimitiveKind::UInt64),
            "float32" => Some(PrimitiveKind::Float32),
            "float64" => Some(PrimitiveKind::Float64),
            "string" => Some(PrimitiveKind::String),
            "wstring" => Some(PrimitiveKind::WString),
            "time" => Some(PrimitiveKind::Time),
            "duration" => Some(PrimitiveKind::Duration),
            _ => None,
        }
    }

    /// CDR alignment requirement in bytes.
    pub fn alignment(self) -> usize {
        match self {
            PrimitiveKind::Bool | PrimitiveKind::Int8 | PrimitiveKind::UInt8 => 1,
            PrimitiveKind::Int16 | PrimitiveKind::UInt16 => 2,
            PrimitiveKind::Int32
            | PrimitiveKind::UInt32
            | PrimitiveKind::Float32
            | PrimitiveKind::String
            | PrimitiveKind::WString
            | PrimitiveKind::Time
            | PrimitiveKind::Duration => 4,
            PrimitiveKind::Int64 | PrimitiveKind::UInt64 | PrimitiveKind::Float64 => 8,
        }
    }

    /// Fixed wire width in bytes, or None for variable-length types.
    pub fn width(self) -> Option<usize> {
        match self {
            PrimitiveKind::Bool | PrimitiveKind::Int8 | PrimitiveKind::UInt8 => Some(1),
            PrimitiveKind::Int16 | PrimitiveKind::UInt16 => Some(2),
            PrimitiveKind::Int32 | PrimitiveKind::UInt32 | PrimitiveKind::Float32 => Some(4),
            PrimitiveKind::Int64 | PrimitiveKind::UInt64 | PrimitiveKind::Float64 => Some(8),
            // Two 4-byte halves
            PrimitiveKind::Time | PrimitiveKind::Duration => Some(8),
            PrimitiveKind::String | PrimitiveKind::WString => None,
        }
    }
}

/// A single field within a message definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Field name
    pub name: String,
    /// Type name: a primitive name or, when `is_complex`, another
    /// definition's name
    #[serde(rename = "type")]
    pub type_name: String,
    /// True for array fields
    #[serde(default)]
    pub is_array: bool,
    /// Declared element count for fixed-length arrays, None when dynamic
    #[serde(default)]
    pub array_length: Option<usize>,
    /// True if `type_name` refers to another definition
    #[serde(default)]
    pub is_complex: bool,
    /// Constant fields never appear on the wire
    #[serde(default)]
    pub is_constant: bool,
    /// Declared default, substituted when a message omits the field
    #[serde(default)]
    pub default_value: Option<MessageValue>,
}

impl Field {
    /// Create a scalar primitive field.
    pub fn primitive(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Field {
            name: name.into(),
            type_name: type_name.into(),
            is_array: false,
            array_length: None,
            is_complex: false,
            is_constant: false,
            default_value: None,
        }
    }

    /// Create a scalar field referencing another definition.
    pub fn complex(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Field {
            is_complex: true,
            ..Field::primitive(name, type_name)
        }
    }

    /// Mark the field as a dynamic-length array.
    pub fn array(mut self) -> Self {
        self.is_array = true;
        self.array_length = None;
        self
    }

    /// Mark the field as a fixed-length array of `len` elements.
    pub fn fixed_array(mut self, len: usize) -> Self {
        self.is_array = true;
        self.array_length = Some(len);
        self
    }

    /// Mark the field as a constant.
    pub fn constant(mut self, value: MessageValue) -> Self {
        self.is_constant = true;
        self.default_value = Some(value);
        self
    }

    /// Attach a default value.
    pub fn with_default(mut self, value: MessageValue) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Resolve the field's primitive kind. Only valid for non-complex fields.
    pub(crate) fn primitive_kind(&self) -> Result<PrimitiveKind> {
        PrimitiveKind::try_from_str(&self.type_name)
            .ok_or_else(|| CodecError::unknown_primitive(&self.type_name))
    }
}

/// A named message definition: an ordered list of fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageDefinition {
    /// Definition name, referenced by complex fields
    pub name: String,
    /// Fields in declaration order
    pub fields: Vec<Field>,
}

impl MessageDefinition {
    /// Create a definition from a name and field list.
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        MessageDefinition {
            name: name.into(),
            fields,
        }
    }

    /// True if any field occupies wire bytes. Definitions without wire
    /// fields serialize as a single placeholder byte.
    pub fn has_wire_fields(&self) -> bool {
        self.fields.iter().any(|f| !f.is_constant)
    }

    /// Iterate the fields that appear on the wire, skipping constants.
    pub fn wire_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| !f.is_constant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_kind_lookup() {
        assert_eq!(PrimitiveKind::try_from_str("uint16"), Some(PrimitiveKind::UInt16));
        assert_eq!(PrimitiveKind::try_from_str("time"), Some(PrimitiveKind::Time));
        assert_eq!(PrimitiveKind::try_from_str("wstring"), Some(PrimitiveKind::WString));
        assert_eq!(PrimitiveKind::try_from_str("float128"), None);
    }

    #[test]
    fn test_alignment_and_width_table() {
        assert_eq!(PrimitiveKind::Bool.width(), Some(1));
        assert_eq!(PrimitiveKind::Bool.alignment(), 1);
        assert_eq!(PrimitiveKind::Int16.alignment(), 2);
        assert_eq!(PrimitiveKind::Float64.alignment(), 8);
        assert_eq!(PrimitiveKind::Float64.width(), Some(8));
        // Strings are variable but their length prefix aligns to 4.
        assert_eq!(PrimitiveKind::String.width(), None);
        assert_eq!(PrimitiveKind::String.alignment(), 4);
        // Time is 8 bytes total but aligns on its 4-byte halves.
        assert_eq!(PrimitiveKind::Time.width(), Some(8));
        assert_eq!(PrimitiveKind::Time.alignment(), 4);
        assert_eq!(PrimitiveKind::Duration.alignment(), 4);
    }

    #[test]
    fn test_field_constructors() {
        let f = Field::primitive("x", "float64");
        assert!(!f.is_array && !f.is_complex && !f.is_constant);

        let arr = Field::primitive("values", "int32").array();
        assert!(arr.is_array);
        assert_eq!(arr.array_length, None);

        let fixed = Field::primitive("covariance", "float64").fixed_array(36);
        assert_eq!(fixed.array_length, Some(36));

        let nested = Field::complex("pose", "geometry_msgs/Pose");
        assert!(nested.is_complex);

        let c = Field::primitive("KIND", "uint8").constant(MessageValue::UInt8(1));
        assert!(c.is_constant);
        assert_eq!(c.default_value, Some(MessageValue::UInt8(1)));
    }

    #[test]
    fn test_primitive_kind_of_field() {
        assert_eq!(
            Field::primitive("x", "uint32").primitive_kind().expect("known"),
            PrimitiveKind::UInt32
        );
        let err = Field::primitive("x", "varint").primitive_kind().expect_err("unknown");
        assert!(matches!(err, CodecError::UnknownPrimitive { .. }));
    }

    #[test]
    fn test_wire_fields_skip_constants() {
        let def = MessageDefinition::new(
            "Status",
            vec![
                Field::primitive("OK", "uint8").constant(MessageValue::UInt8(0)),
                Field::primitive("code", "uint8"),
            ],
        );
        assert!(def.has_wire_fields());
        let names: Vec<&str> = def.wire_fields().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["code"]);

        let all_const = MessageDefinition::new(
            "Consts",
            vec![Field::primitive("A", "uint8").constant(MessageValue::UInt8(1))],
        );
        assert!(!all_const.has_wire_fields());

        let empty = MessageDefinition::new("Empty", vec![]);
        assert!(!empty.has_wire_fields());
    }

    #[test]
    fn test_field_deserializes_from_camel_case_json() {
        let json = r#"{
            "name": "readings",
            "type": "float32",
            "isArray": true,
            "arrayLength": 4
        }"#;
        let field: Field = serde_json::from_str(json).expect("parse field");
        assert_eq!(field.name, "readings");
        assert_eq!(field.type_name, "float32");
        assert!(field.is_array);
        assert_eq!(field.array_length, Some(4));
        assert!(!field.is_complex);
    }
}
