// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Message deserialization: walks a schema over a [`CdrCursor`] and rebuilds
//! the structured value, inverse of the writer walk.

use crate::cdr::codec::TimeFormat;
use crate::cdr::cursor::CdrCursor;
use crate::core::{CodecError, MessageMap, MessageValue, Result};
use crate::schema::ast::{Field, MessageDefinition, PrimitiveKind};
use crate::schema::ResolvedSchema;

/// Upper bound on decoded array lengths, guarding against corrupt prefixes.
const MAX_ARRAY_LENGTH: usize = 10_000_000;

pub(crate) struct MessageReader<'a> {
    schema: &'a ResolvedSchema,
    time_format: TimeFormat,
}

impl<'a> MessageReader<'a> {
    pub fn new(schema: &'a ResolvedSchema, time_format: TimeFormat) -> Self {
        Self {
            schema,
            time_format,
        }
    }

    /// Decode one message from the cursor against the schema root.
    pub fn read_message(&self, cursor: &mut CdrCursor<'_>) -> Result<MessageMap> {
        self.definition(cursor, self.schema.root())
    }

    fn definition(
        &self,
        cursor: &mut CdrCursor<'_>,
        def: &MessageDefinition,
    ) -> Result<MessageMap> {
        if !def.has_wire_fields() {
            // Placeholder byte
            cursor.skip(1)?;
            return Ok(MessageMap::new());
        }
        let mut map = MessageMap::new();
        for field in def.wire_fields() {
            let value = self.field(cursor, field)?;
            map.insert(field.name.clone(), value);
        }
        Ok(map)
    }

    fn field(&self, cursor: &mut CdrCursor<'_>, field: &Field) -> Result<MessageValue> {
        if field.is_complex {
            let def = self.schema.lookup(&field.type_name)?;
            if field.is_array {
                let count = self.element_count(cursor, field)?;
                let mut elements = Vec::with_capacity(count.min(1024));
                for _ in 0..count {
                    elements.push(MessageValue::Struct(self.definition(cursor, def)?));
                }
                return Ok(MessageValue::Array(elements));
            }
            return Ok(MessageValue::Struct(self.definition(cursor, def)?));
        }

        let kind = field.primitive_kind()?;
        if kind == PrimitiveKind::WString {
            return Err(CodecError::unsupported_type(&field.type_name));
        }
        if field.is_array {
            self.primitive_array(cursor, field, kind)
        } else {
            self.primitive_value(cursor, kind)
        }
    }

    fn element_count(&self, cursor: &mut CdrCursor<'_>, field: &Field) -> Result<usize> {
        let count = match field.array_length {
            Some(declared) => declared,
            None => cursor.read_u32()? as usize,
        };
        if count > MAX_ARRAY_LENGTH {
            return Err(CodecError::buffer_too_short(
                count,
                cursor.remaining(),
                cursor.position(),
            ));
        }
        Ok(count)
    }

    fn primitive_array(
        &self,
        cursor: &mut CdrCursor<'_>,
        field: &Field,
        kind: PrimitiveKind,
    ) -> Result<MessageValue> {
        let count = self.element_count(cursor, field)?;

        // Element block alignment applies even when the array is empty,
        // matching the writer.
        if kind.width().is_some() {
            cursor.align(kind.alignment())?;
        }

        // uint8 arrays decode to the compact byte form.
        if kind == PrimitiveKind::UInt8 {
            return Ok(MessageValue::Bytes(cursor.read_bytes(count)?.to_vec()));
        }

        let mut elements = Vec::with_capacity(count.min(1024));
        for _ in 0..count {
            elements.push(self.primitive_value(cursor, kind)?);
        }
        Ok(MessageValue::Array(elements))
    }

    fn primitive_value(&self, cursor: &mut CdrCursor<'_>, kind: PrimitiveKind) -> Result<MessageValue> {
        let value = match kind {
            PrimitiveKind::Bool => MessageValue::Bool(cursor.read_u8()? != 0),
            PrimitiveKind::Int8 => MessageValue::Int8(cursor.read_i8()?),
            PrimitiveKind::Int16 => MessageValue::Int16(cursor.read_i16()?),
            PrimitiveKind::Int32 => MessageValue::Int32(cursor.read_i32()?),
            PrimitiveKind::Int64 => MessageValue::Int64(cursor.read_i64()?),
            PrimitiveKind::UInt8 => MessageValue::UInt8(cursor.read_u8()?),
            PrimitiveKind::UInt16 => MessageValue::UInt16(cursor.read_u16()?),
            PrimitiveKind::UInt32 => MessageValue::UInt32(cursor.read_u32()?),
            PrimitiveKind::UInt64 => MessageValue::UInt64(cursor.read_u64()?),
            PrimitiveKind::Float32 => MessageValue::Float32(cursor.read_f32()?),
            PrimitiveKind::Float64 => MessageValue::Float64(cursor.read_f64()?),
            PrimitiveKind::String => MessageValue::String(cursor.read_string()?),
            PrimitiveKind::Time | PrimitiveKind::Duration => self.time_value(cursor)?,
            PrimitiveKind::WString => return Err(CodecError::unsupported_type("wstring")),
        };
        Ok(value)
    }

    /// Read a time or duration value. Field names in the result follow the
    /// configured time format.
    fn time_value(&self, cursor: &mut CdrCursor<'_>) -> Result<MessageValue> {
        let sec = cursor.read_i32()?;
        let fraction = cursor.read_u32()?;
        let mut map = MessageMap::new();
        map.insert("sec".to_string(), MessageValue::Int32(sec));
        map.insert(
            self.time_format.fractional_field().to_string(),
            MessageValue::UInt32(fraction),
        );
        Ok(MessageValue::Struct(map))
    }
}
