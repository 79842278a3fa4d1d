// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Size calculation: walks a schema against a message and accumulates the
//! exact serialized byte count, including header, padding, and prefixes.

use crate::cdr::cursor::CDR_HEADER_SIZE;
use crate::core::{MessageMap, MessageValue, Result};
use crate::schema::ast::{Field, MessageDefinition, PrimitiveKind};
use crate::schema::ResolvedSchema;

/// Accumulates the serialized size of one message.
///
/// The walk is deliberately lenient: it never validates value shapes or
/// fixed-array lengths. Missing fields size as their defaults, missing
/// elements as zeroes or empty strings. Only schema resolution can fail
/// here; shape errors surface when the message is actually serialized.
pub(crate) struct SizeCalculator<'a> {
    schema: &'a ResolvedSchema,
    offset: usize,
}

impl<'a> SizeCalculator<'a> {
    pub fn new(schema: &'a ResolvedSchema) -> Self {
        Self {
            schema,
            offset: CDR_HEADER_SIZE,
        }
    }

    /// Compute the total serialized size of `message` in bytes.
    pub fn message_size(mut self, message: &MessageMap) -> Result<usize> {
        self.definition(self.schema.root(), Some(message))?;
        Ok(self.offset)
    }

    fn align(&mut self, size: usize) {
        let misalignment = (self.offset - CDR_HEADER_SIZE) % size;
        if misalignment > 0 {
            self.offset += size - misalignment;
        }
    }

    fn definition(&mut self, def: &MessageDefinition, value: Option<&MessageMap>) -> Result<()> {
        if !def.has_wire_fields() {
            // Placeholder byte
            self.offset += 1;
            return Ok(());
        }
        for field in def.wire_fields() {
            let field_value = value.and_then(|map| map.get(&field.name));
            self.field(field, field_value)?;
        }
        Ok(())
    }

    fn field(&mut self, field: &Field, value: Option<&MessageValue>) -> Result<()> {
        let value = value.or(field.default_value.as_ref());

        if field.is_complex {
            let def = self.schema.lookup(&field.type_name)?;
            if field.is_array {
                let elements = value.and_then(MessageValue::as_array).unwrap_or(&[]);
                let count = match field.array_length {
                    Some(declared) => declared,
                    None => {
                        self.align(4);
                        self.offset += 4;
                        elements.len()
                    }
                };
                for index in 0..count {
                    let element = elements.get(index).and_then(MessageValue::as_struct);
                    self.definition(def, element)?;
                }
            } else {
                self.definition(def, value.and_then(MessageValue::as_struct))?;
            }
            return Ok(());
        }

        let kind = field.primitive_kind()?;
        if field.is_array {
            self.primitive_array(field, kind, value);
        } else {
            self.primitive_scalar(kind, value);
        }
        Ok(())
    }

    fn primitive_scalar(&mut self, kind: PrimitiveKind, value: Option<&MessageValue>) {
        match kind.width() {
            Some(width) => {
                self.align(kind.alignment());
                self.offset += width;
            }
            None => {
                let text = value.and_then(MessageValue::as_str).unwrap_or("");
                self.string(text);
            }
        }
    }

    fn primitive_array(&mut self, field: &Field, kind: PrimitiveKind, value: Option<&MessageValue>) {
        let supplied = match value {
            Some(MessageValue::Bytes(bytes)) => bytes.len(),
            Some(MessageValue::Array(items)) => items.len(),
            _ => 0,
        };
        let count = match field.array_length {
            Some(declared) => declared,
            None => {
                self.align(4);
                self.offset += 4;
                supplied
            }
        };

        match kind.width() {
            Some(width) => {
                // Element block alignment applies even when the array is empty.
                self.align(kind.alignment());
                self.offset += width * count;
            }
            None => {
                let elements = value.and_then(MessageValue::as_array).unwrap_or(&[]);
                for index in 0..count {
                    let text = elements
                        .get(index)
                        .and_then(MessageValue::as_str)
                        .unwrap_or("");
                    self.string(text);
                }
            }
        }
    }

    fn string(&mut self, text: &str) {
        self.align(4);
        self.offset += 4 + text.len() + 1;
    }
}
