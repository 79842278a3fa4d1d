// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Message serialization: walks a schema against a message and emits CDR
//! bytes through a [`CdrSink`].
//!
//! The walk mirrors [`SizeCalculator`] offset for offset. Missing fields
//! substitute their declared default, then zero or the empty string. Unlike
//! the calculator, the writer validates shapes: fixed-length arrays must
//! match their declaration and values must coerce into the field's wire type.
//!
//! [`SizeCalculator`]: crate::cdr::calculator::SizeCalculator

use crate::cdr::codec::TimeFormat;
use crate::cdr::sink::CdrSink;
use crate::core::{CodecError, MessageMap, MessageValue, Result};
use crate::schema::ast::{Field, MessageDefinition, PrimitiveKind};
use crate::schema::ResolvedSchema;

pub(crate) struct MessageWriter<'a> {
    schema: &'a ResolvedSchema,
    time_format: TimeFormat,
}

impl<'a> MessageWriter<'a> {
    pub fn new(schema: &'a ResolvedSchema, time_format: TimeFormat) -> Self {
        Self {
            schema,
            time_format,
        }
    }

    /// Serialize `message` against the schema root.
    pub fn write_message(&self, sink: &mut CdrSink<'_>, message: &MessageMap) -> Result<()> {
        self.definition(sink, self.schema.root(), Some(message))
    }

    fn definition(
        &self,
        sink: &mut CdrSink<'_>,
        def: &MessageDefinition,
        value: Option<&MessageMap>,
    ) -> Result<()> {
        if !def.has_wire_fields() {
            // Placeholder byte
            return sink.write_u8(0);
        }
        for field in def.wire_fields() {
            let field_value = value.and_then(|map| map.get(&field.name));
            self.field(sink, field, field_value)?;
        }
        Ok(())
    }

    fn field(
        &self,
        sink: &mut CdrSink<'_>,
        field: &Field,
        value: Option<&MessageValue>,
    ) -> Result<()> {
        let value = value.or(field.default_value.as_ref());

        if field.is_complex {
            return self.complex_field(sink, field, value);
        }

        let kind = field.primitive_kind()?;
        if kind == PrimitiveKind::WString {
            return Err(CodecError::unsupported_type(&field.type_name));
        }
        if field.is_array {
            self.primitive_array(sink, field, kind, value)
        } else {
            self.primitive_value(sink, kind, value)
        }
    }

    fn complex_field(
        &self,
        sink: &mut CdrSink<'_>,
        field: &Field,
        value: Option<&MessageValue>,
    ) -> Result<()> {
        let def = self.schema.lookup(&field.type_name)?;

        if !field.is_array {
            let map = match value {
                Some(v) => Some(as_struct(v)?),
                None => None,
            };
            return self.definition(sink, def, map);
        }

        let elements = match value {
            Some(MessageValue::Array(items)) => items.as_slice(),
            Some(other) => return Err(CodecError::type_mismatch("array", other.type_name())),
            None => &[],
        };
        let supplied = value.is_some().then(|| elements.len());
        let count = element_count(sink, field, supplied)?;
        for index in 0..count {
            let element = match elements.get(index) {
                Some(v) => Some(as_struct(v)?),
                None => None,
            };
            self.definition(sink, def, element)?;
        }
        Ok(())
    }

    fn primitive_array(
        &self,
        sink: &mut CdrSink<'_>,
        field: &Field,
        kind: PrimitiveKind,
        value: Option<&MessageValue>,
    ) -> Result<()> {
        // Compact form for uint8 arrays.
        if kind == PrimitiveKind::UInt8 {
            if let Some(MessageValue::Bytes(bytes)) = value {
                element_count(sink, field, Some(bytes.len()))?;
                return sink.write_bytes(bytes);
            }
        }

        let elements = match value {
            Some(MessageValue::Array(items)) => items.as_slice(),
            Some(other) => return Err(CodecError::type_mismatch("array", other.type_name())),
            None => &[],
        };
        let supplied = value.is_some().then(|| elements.len());
        let count = element_count(sink, field, supplied)?;

        // Element block alignment applies even when the array is empty,
        // matching the size calculation.
        if kind.width().is_some() {
            sink.align(kind.alignment())?;
        }
        for index in 0..count {
            self.primitive_value(sink, kind, elements.get(index))?;
        }
        Ok(())
    }

    fn primitive_value(
        &self,
        sink: &mut CdrSink<'_>,
        kind: PrimitiveKind,
        value: Option<&MessageValue>,
    ) -> Result<()> {
        match kind {
            PrimitiveKind::Bool => {
                let flag = value.map(coerce_bool).transpose()?.unwrap_or(false);
                sink.write_u8(u8::from(flag))
            }
            PrimitiveKind::Int8 => sink.write_i8(value.map(coerce_i8).transpose()?.unwrap_or(0)),
            PrimitiveKind::Int16 => sink.write_i16(value.map(coerce_i16).transpose()?.unwrap_or(0)),
            PrimitiveKind::Int32 => sink.write_i32(value.map(coerce_i32).transpose()?.unwrap_or(0)),
            PrimitiveKind::Int64 => sink.write_i64(value.map(coerce_i64).transpose()?.unwrap_or(0)),
            PrimitiveKind::UInt8 => sink.write_u8(value.map(coerce_u8).transpose()?.unwrap_or(0)),
            PrimitiveKind::UInt16 => {
                sink.write_u16(value.map(coerce_u16).transpose()?.unwrap_or(0))
            }
            PrimitiveKind::UInt32 => {
                sink.write_u32(value.map(coerce_u32).transpose()?.unwrap_or(0))
            }
            PrimitiveKind::UInt64 => {
                sink.write_u64(value.map(coerce_u64).transpose()?.unwrap_or(0))
            }
            PrimitiveKind::Float32 => {
                sink.write_f32(value.map(coerce_f32).transpose()?.unwrap_or(0.0))
            }
            PrimitiveKind::Float64 => {
                sink.write_f64(value.map(coerce_f64).transpose()?.unwrap_or(0.0))
            }
            PrimitiveKind::String => {
                let text = match value {
                    Some(v) => v
                        .as_str()
                        .ok_or_else(|| CodecError::type_mismatch("string", v.type_name()))?,
                    None => "",
                };
                sink.write_string(text)
            }
            PrimitiveKind::Time | PrimitiveKind::Duration => self.time_value(sink, value),
            PrimitiveKind::WString => Err(CodecError::unsupported_type("wstring")),
        }
    }

    /// Write a time or duration value: signed seconds then the unsigned
    /// fraction, each 4-byte aligned. The fraction is looked up under the
    /// configured field name only.
    fn time_value(&self, sink: &mut CdrSink<'_>, value: Option<&MessageValue>) -> Result<()> {
        let map = match value {
            Some(v) => Some(as_struct(v)?),
            None => None,
        };
        let sec = map
            .and_then(|m| m.get("sec"))
            .map(coerce_i32)
            .transpose()?
            .unwrap_or(0);
        let fraction = map
            .and_then(|m| m.get(self.time_format.fractional_field()))
            .map(coerce_u32)
            .transpose()?
            .unwrap_or(0);
        sink.write_i32(sec)?;
        sink.write_u32(fraction)
    }
}

/// Resolve an array field's element count, validating fixed declarations and
/// emitting the length prefix for dynamic ones.
fn element_count(sink: &mut CdrSink<'_>, field: &Field, supplied: Option<usize>) -> Result<usize> {
    match field.array_length {
        Some(declared) => match supplied {
            Some(actual) if actual != declared => Err(CodecError::array_length_mismatch(
                &field.name,
                declared,
                actual,
            )),
            _ => Ok(declared),
        },
        None => {
            let count = supplied.unwrap_or(0);
            sink.write_sequence_length(count)?;
            Ok(count)
        }
    }
}

fn as_struct(value: &MessageValue) -> Result<&MessageMap> {
    value
        .as_struct()
        .ok_or_else(|| CodecError::type_mismatch("struct", value.type_name()))
}

fn widen_signed(value: &MessageValue, target: &'static str) -> Result<i64> {
    match value.as_i64() {
        Some(wide) => Ok(wide),
        None if value.is_integer() => Err(CodecError::value_out_of_range(
            target,
            value.as_u64().unwrap_or_default().to_string(),
        )),
        None => Err(CodecError::type_mismatch(target, value.type_name())),
    }
}

fn widen_unsigned(value: &MessageValue, target: &'static str) -> Result<u64> {
    match value.as_u64() {
        Some(wide) => Ok(wide),
        None if value.is_integer() => Err(CodecError::value_out_of_range(
            target,
            value.as_i64().unwrap_or_default().to_string(),
        )),
        None => Err(CodecError::type_mismatch(target, value.type_name())),
    }
}

fn coerce_bool(value: &MessageValue) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| CodecError::type_mismatch("bool", value.type_name()))
}

fn coerce_i8(value: &MessageValue) -> Result<i8> {
    let wide = widen_signed(value, "int8")?;
    i8::try_from(wide).map_err(|_| CodecError::value_out_of_range("int8", wide.to_string()))
}

fn coerce_i16(value: &MessageValue) -> Result<i16> {
    let wide = widen_signed(value, "int16")?;
    i16::try_from(wide).map_err(|_| CodecError::value_out_of_range("int16", wide.to_string()))
}

fn coerce_i32(value: &MessageValue) -> Result<i32> {
    let wide = widen_signed(value, "int32")?;
    i32::try_from(wide).map_err(|_| CodecError::value_out_of_range("int32", wide.to_string()))
}

fn coerce_i64(value: &MessageValue) -> Result<i64> {
    widen_signed(value, "int64")
}

fn coerce_u8(value: &MessageValue) -> Result<u8> {
    let wide = widen_unsigned(value, "uint8")?;
    u8::try_from(wide).map_err(|_| CodecError::value_out_of_range("uint8", wide.to_string()))
}

fn coerce_u16(value: &MessageValue) -> Result<u16> {
    let wide = widen_unsigned(value, "uint16")?;
    u16::try_from(wide).map_err(|_| CodecError::value_out_of_range("uint16", wide.to_string()))
}

fn coerce_u32(value: &MessageValue) -> Result<u32> {
    let wide = widen_unsigned(value, "uint32")?;
    u32::try_from(wide).map_err(|_| CodecError::value_out_of_range("uint32", wide.to_string()))
}

fn coerce_u64(value: &MessageValue) -> Result<u64> {
    widen_unsigned(value, "uint64")
}

fn coerce_f32(value: &MessageValue) -> Result<f32> {
    value
        .as_f64()
        .map(|v| v as f32)
        .ok_or_else(|| CodecError::type_mismatch("float32", value.type_name()))
}

fn coerce_f64(value: &MessageValue) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| CodecError::type_mismatch("float64", value.type_name()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_integer_widening() {
        assert_eq!(
            coerce_i32(&MessageValue::UInt8(200)).expect("widen"),
            200i32
        );
        assert_eq!(coerce_u64(&MessageValue::Int8(5)).expect("widen"), 5u64);
    }

    #[test]
    fn test_coerce_out_of_range() {
        let err = coerce_u8(&MessageValue::Int32(300)).expect_err("overflow");
        assert!(matches!(err, CodecError::ValueOutOfRange { .. }));

        let err = coerce_u16(&MessageValue::Int32(-1)).expect_err("negative");
        assert!(matches!(err, CodecError::ValueOutOfRange { .. }));

        let err = coerce_i64(&MessageValue::UInt64(u64::MAX)).expect_err("overflow");
        assert!(matches!(err, CodecError::ValueOutOfRange { .. }));
    }

    #[test]
    fn test_coerce_type_mismatch() {
        let err = coerce_i32(&MessageValue::from("7")).expect_err("not numeric");
        assert!(matches!(err, CodecError::TypeMismatch { .. }));

        let err = coerce_f64(&MessageValue::Bool(true)).expect_err("not numeric");
        assert!(matches!(err, CodecError::TypeMismatch { .. }));
    }

    #[test]
    fn test_coerce_float_accepts_integers() {
        assert_eq!(coerce_f64(&MessageValue::Int32(-3)).expect("widen"), -3.0);
        assert_eq!(coerce_f32(&MessageValue::UInt8(2)).expect("widen"), 2.0);
    }
}
