// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for cdrmsg.
//!
//! Two classes of failure exist:
//! - Schema failures: unresolvable roots, unknown type names. These can occur
//!   at construction or lazily while traversing a schema.
//! - Encoding failures: unsupported types, length mismatches, and buffer
//!   exhaustion raised while serializing or deserializing a value.

use std::fmt;

/// Errors that can occur while resolving schemas or coding messages.
#[derive(Debug, Clone)]
pub enum CodecError {
    /// The definition list passed at construction was empty
    EmptyDefinitionSet,

    /// No definition in the list qualifies as a serializable root
    NoRootDefinition,

    /// A complex field references a definition name that does not exist
    TypeNotFound {
        /// Referenced definition name
        type_name: String,
    },

    /// A field names a primitive type this codec does not know
    UnknownPrimitive {
        /// Primitive type name as written in the schema
        type_name: String,
    },

    /// A field names a type that is recognized but never supported
    UnsupportedType {
        /// Type name (e.g. "wstring")
        type_name: String,
    },

    /// A fixed-length array was supplied with the wrong number of elements
    ArrayLengthMismatch {
        /// Field name
        field: String,
        /// Declared array length
        expected: usize,
        /// Supplied element count
        actual: usize,
    },

    /// A value's shape does not match the field type it is written as
    TypeMismatch {
        /// Target type name
        expected: &'static str,
        /// Type name of the supplied value
        actual: String,
    },

    /// A numeric value does not fit the field's wire type
    ValueOutOfRange {
        /// Target type name
        target: &'static str,
        /// The offending value, formatted
        value: String,
    },

    /// A caller-supplied output buffer is smaller than the computed size
    OutputBufferTooSmall {
        /// Bytes the serialized message needs
        required: usize,
        /// Bytes the caller provided
        provided: usize,
    },

    /// Buffer too short for a requested read or write
    BufferTooShort {
        /// Requested bytes
        requested: usize,
        /// Available bytes
        available: usize,
        /// Cursor position when the error occurred
        position: usize,
    },

    /// A decoded string is not valid UTF-8
    InvalidUtf8 {
        /// Buffer position of the string contents
        position: usize,
    },
}

impl CodecError {
    /// Create a "type not found" error for an unresolved complex reference.
    pub fn type_not_found(type_name: impl Into<String>) -> Self {
        CodecError::TypeNotFound {
            type_name: type_name.into(),
        }
    }

    /// Create an "unknown primitive" error.
    pub fn unknown_primitive(type_name: impl Into<String>) -> Self {
        CodecError::UnknownPrimitive {
            type_name: type_name.into(),
        }
    }

    /// Create an "unsupported type" error.
    pub fn unsupported_type(type_name: impl Into<String>) -> Self {
        CodecError::UnsupportedType {
            type_name: type_name.into(),
        }
    }

    /// Create a fixed-length array mismatch error.
    pub fn array_length_mismatch(field: impl Into<String>, expected: usize, actual: usize) -> Self {
        CodecError::ArrayLengthMismatch {
            field: field.into(),
            expected,
            actual,
        }
    }

    /// Create a type mismatch error.
    pub fn type_mismatch(expected: &'static str, actual: impl Into<String>) -> Self {
        CodecError::TypeMismatch {
            expected,
            actual: actual.into(),
        }
    }

    /// Create a value out-of-range error.
    pub fn value_out_of_range(target: &'static str, value: impl Into<String>) -> Self {
        CodecError::ValueOutOfRange {
            target,
            value: value.into(),
        }
    }

    /// Create an output buffer too small error.
    pub fn output_buffer_too_small(required: usize, provided: usize) -> Self {
        CodecError::OutputBufferTooSmall { required, provided }
    }

    /// Create a buffer too short error.
    pub fn buffer_too_short(requested: usize, available: usize, position: usize) -> Self {
        CodecError::BufferTooShort {
            requested,
            available,
            position,
        }
    }

    /// True for errors in the schema class (resolution and type lookup).
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            CodecError::EmptyDefinitionSet
                | CodecError::NoRootDefinition
                | CodecError::TypeNotFound { .. }
                | CodecError::UnknownPrimitive { .. }
        )
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            CodecError::EmptyDefinitionSet | CodecError::NoRootDefinition => vec![],
            CodecError::TypeNotFound { type_name }
            | CodecError::UnknownPrimitive { type_name }
            | CodecError::UnsupportedType { type_name } => vec![("type", type_name.clone())],
            CodecError::ArrayLengthMismatch {
                field,
                expected,
                actual,
            } => vec![
                ("field", field.clone()),
                ("expected", expected.to_string()),
                ("actual", actual.to_string()),
            ],
            CodecError::TypeMismatch { expected, actual } => vec![
                ("expected", expected.to_string()),
                ("actual", actual.clone()),
            ],
            CodecError::ValueOutOfRange { target, value } => {
                vec![("target", target.to_string()), ("value", value.clone())]
            }
            CodecError::OutputBufferTooSmall { required, provided } => vec![
                ("required", required.to_string()),
                ("provided", provided.to_string()),
            ],
            CodecError::BufferTooShort {
                requested,
                available,
                position,
            } => vec![
                ("requested", requested.to_string()),
                ("available", available.to_string()),
                ("position", position.to_string()),
            ],
            CodecError::InvalidUtf8 { position } => vec![("position", position.to_string())],
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::EmptyDefinitionSet => {
                write!(f, "Cannot build a codec from an empty definition list")
            }
            CodecError::NoRootDefinition => {
                write!(f, "No definition with serializable fields to use as root")
            }
            CodecError::TypeNotFound { type_name } => {
                write!(f, "Type not found: '{type_name}'")
            }
            CodecError::UnknownPrimitive { type_name } => {
                write!(f, "Unknown primitive type: '{type_name}'")
            }
            CodecError::UnsupportedType { type_name } => {
                write!(f, "Unsupported type: '{type_name}'")
            }
            CodecError::ArrayLengthMismatch {
                field,
                expected,
                actual,
            } => write!(
                f,
                "Fixed-length array '{field}' declares {expected} elements but {actual} were supplied"
            ),
            CodecError::TypeMismatch { expected, actual } => {
                write!(f, "Type mismatch: expected {expected}, got {actual}")
            }
            CodecError::ValueOutOfRange { target, value } => {
                write!(f, "Value {value} does not fit in {target}")
            }
            CodecError::OutputBufferTooSmall { required, provided } => write!(
                f,
                "Output buffer too small: message needs {required} bytes but buffer holds {provided}"
            ),
            CodecError::BufferTooShort {
                requested,
                available,
                position,
            } => write!(
                f,
                "Buffer too short: requested {requested} bytes at position {position}, but only {available} bytes available"
            ),
            CodecError::InvalidUtf8 { position } => {
                write!(f, "Invalid UTF-8 in string at position {position}")
            }
        }
    }
}

impl std::error::Error for CodecError {}

/// Result type for cdrmsg operations.
pub type Result<T> = std::result::Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_not_found() {
        let err = CodecError::type_not_found("geometry_msgs/Pose");
        assert!(matches!(err, CodecError::TypeNotFound { .. }));
        assert!(err.is_schema_error());
        assert_eq!(err.to_string(), "Type not found: 'geometry_msgs/Pose'");
    }

    #[test]
    fn test_unknown_primitive() {
        let err = CodecError::unknown_primitive("float128");
        assert!(err.is_schema_error());
        assert_eq!(err.to_string(), "Unknown primitive type: 'float128'");
    }

    #[test]
    fn test_unsupported_type() {
        let err = CodecError::unsupported_type("wstring");
        assert!(!err.is_schema_error());
        assert_eq!(err.to_string(), "Unsupported type: 'wstring'");
    }

    #[test]
    fn test_array_length_mismatch() {
        let err = CodecError::array_length_mismatch("position", 3, 2);
        assert_eq!(
            err.to_string(),
            "Fixed-length array 'position' declares 3 elements but 2 were supplied"
        );
        let fields = err.log_fields();
        assert_eq!(fields[0], ("field", "position".to_string()));
        assert_eq!(fields[1], ("expected", "3".to_string()));
        assert_eq!(fields[2], ("actual", "2".to_string()));
    }

    #[test]
    fn test_buffer_too_short() {
        let err = CodecError::buffer_too_short(8, 3, 12);
        assert_eq!(
            err.to_string(),
            "Buffer too short: requested 8 bytes at position 12, but only 3 bytes available"
        );
    }

    #[test]
    fn test_output_buffer_too_small() {
        let err = CodecError::output_buffer_too_small(24, 16);
        assert_eq!(
            err.to_string(),
            "Output buffer too small: message needs 24 bytes but buffer holds 16"
        );
    }

    #[test]
    fn test_log_fields_type_mismatch() {
        let err = CodecError::type_mismatch("int32", "string");
        let fields = err.log_fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0], ("expected", "int32".to_string()));
        assert_eq!(fields[1], ("actual", "string".to_string()));
    }

    #[test]
    fn test_schema_error_classification() {
        assert!(CodecError::EmptyDefinitionSet.is_schema_error());
        assert!(CodecError::NoRootDefinition.is_schema_error());
        assert!(!CodecError::unsupported_type("wstring").is_schema_error());
        assert!(!CodecError::buffer_too_short(1, 0, 0).is_schema_error());
    }

    #[test]
    fn test_error_clone() {
        let err1 = CodecError::value_out_of_range("uint8", "300");
        let err2 = err1.clone();
        assert_eq!(err1.to_string(), err2.to_string());
    }
}
