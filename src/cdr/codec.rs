// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! The message codec facade: size calculation, serialization, and
//! deserialization against one resolved schema.

use tracing::debug;

use crate::cdr::calculator::SizeCalculator;
use crate::cdr::cursor::CdrCursor;
use crate::cdr::reader::MessageReader;
use crate::cdr::sink::CdrSink;
use crate::cdr::writer::MessageWriter;
use crate::core::{CodecError, MessageMap, Result};
use crate::schema::{MessageDefinition, ResolvedSchema};

/// Naming convention for the fractional half of time and duration values.
///
/// Both formats produce identical wire bytes; they differ only in the field
/// name used on the value side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeFormat {
    /// `sec` / `nanosec`
    #[default]
    Nanosec,
    /// `sec` / `nsec`, the legacy convention
    Nsec,
}

impl TimeFormat {
    /// Name of the fractional field in time and duration structs.
    pub fn fractional_field(self) -> &'static str {
        match self {
            TimeFormat::Nanosec => "nanosec",
            TimeFormat::Nsec => "nsec",
        }
    }
}

/// Schema-driven CDR codec for one message type.
///
/// Construction resolves the definition list once: the first definition with
/// serializable fields (or no fields at all) becomes the root, the rest are
/// looked up by name when complex fields reference them. The codec holds no
/// mutable state, so one instance can serve readers and writers concurrently.
///
/// # Example
///
/// ```
/// use cdrmsg::{Field, MessageCodec, MessageDefinition, MessageMap, MessageValue};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let codec = MessageCodec::new(vec![MessageDefinition::new(
///     "Count",
///     vec![Field::primitive("value", "uint32")],
/// )])?;
///
/// let mut message = MessageMap::new();
/// message.insert("value".to_string(), MessageValue::UInt32(42));
///
/// let bytes = codec.serialize(&message)?;
/// assert_eq!(bytes, vec![0x00, 0x01, 0x00, 0x00, 0x2A, 0x00, 0x00, 0x00]);
/// assert_eq!(codec.deserialize(&bytes)?, message);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MessageCodec {
    schema: ResolvedSchema,
    time_format: TimeFormat,
}

impl MessageCodec {
    /// Build a codec with the default time format (`sec` / `nanosec`).
    pub fn new(definitions: Vec<MessageDefinition>) -> Result<Self> {
        Self::with_time_format(definitions, TimeFormat::default())
    }

    /// Build a codec with an explicit time format.
    pub fn with_time_format(
        definitions: Vec<MessageDefinition>,
        time_format: TimeFormat,
    ) -> Result<Self> {
        let schema = ResolvedSchema::resolve(definitions)?;
        debug!(root = %schema.root().name, "resolved message schema");
        Ok(Self {
            schema,
            time_format,
        })
    }

    /// Name of the root definition this codec serializes.
    pub fn root_name(&self) -> &str {
        &self.schema.root().name
    }

    /// The configured time format.
    pub fn time_format(&self) -> TimeFormat {
        self.time_format
    }

    /// Compute the exact serialized size of `message` in bytes, including
    /// the 4-byte encapsulation header.
    pub fn compute_size(&self, message: &MessageMap) -> Result<usize> {
        SizeCalculator::new(&self.schema).message_size(message)
    }

    /// Serialize `message` into a freshly allocated, exactly sized buffer.
    pub fn serialize(&self, message: &MessageMap) -> Result<Vec<u8>> {
        let size = self.compute_size(message)?;
        let mut buffer = vec![0u8; size];
        let mut sink = CdrSink::new(&mut buffer)?;
        MessageWriter::new(&self.schema, self.time_format).write_message(&mut sink, message)?;
        Ok(buffer)
    }

    /// Serialize `message` into a caller-provided buffer.
    ///
    /// Returns the number of bytes written. The buffer may be larger than
    /// the message; trailing bytes are untouched.
    pub fn serialize_into(&self, message: &MessageMap, buffer: &mut [u8]) -> Result<usize> {
        let size = self.compute_size(message)?;
        if buffer.len() < size {
            return Err(CodecError::output_buffer_too_small(size, buffer.len()));
        }
        let mut sink = CdrSink::new(&mut buffer[..size])?;
        MessageWriter::new(&self.schema, self.time_format).write_message(&mut sink, message)?;
        Ok(sink.position())
    }

    /// Deserialize a CDR-encoded message, header included.
    pub fn deserialize(&self, data: &[u8]) -> Result<MessageMap> {
        let mut cursor = CdrCursor::new(data)?;
        MessageReader::new(&self.schema, self.time_format).read_message(&mut cursor)
    }
}
