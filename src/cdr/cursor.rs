// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CDR cursor for reading encoded data with proper alignment.

use crate::core::{CodecError, Result};

/// Size of the CDR encapsulation header (4 bytes).
pub const CDR_HEADER_SIZE: usize = 4;

/// Cursor over CDR-encoded data.
///
/// Alignment is computed as `(offset - CDR_HEADER_SIZE) % size`: padding is
/// measured from the start of the serialized payload, never reset for nested
/// structs. Multi-byte reads honor the endianness flag in the header.
#[derive(Debug)]
pub struct CdrCursor<'a> {
    /// The data buffer, including the encapsulation header
    data: &'a [u8],
    /// Current read position
    offset: usize,
    /// Whether the data uses little endian encoding
    little_endian: bool,
}

impl<'a> CdrCursor<'a> {
    /// Create a cursor over CDR-encoded data.
    ///
    /// The buffer must start with the 4-byte encapsulation header. Byte 1
    /// carries the endianness flag (1 = little endian); the other three
    /// bytes are unused.
    pub fn new(data: &'a [u8]) -> Result<Self> {
        if data.len() < CDR_HEADER_SIZE {
            return Err(CodecError::buffer_too_short(CDR_HEADER_SIZE, data.len(), 0));
        }

        Ok(Self {
            data,
            offset: CDR_HEADER_SIZE,
            little_endian: data[1] == 1,
        })
    }

    /// Get the current position relative to the buffer start.
    #[inline]
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Get the remaining bytes available to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    /// Check if at end of buffer.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.data.len()
    }

    /// Align to the specified boundary, relative to the payload start.
    pub fn align(&mut self, size: usize) -> Result<()> {
        let misalignment = (self.offset - CDR_HEADER_SIZE) % size;
        if misalignment > 0 {
            let padding = size - misalignment;
            if padding > self.remaining() {
                return Err(CodecError::buffer_too_short(
                    padding,
                    self.remaining(),
                    self.offset,
                ));
            }
            self.offset += padding;
        }
        Ok(())
    }

    /// Consume `count` bytes, failing if the buffer is exhausted.
    fn take(&mut self, count: usize) -> Result<&'a [u8]> {
        if count > self.remaining() {
            return Err(CodecError::buffer_too_short(
                count,
                self.remaining(),
                self.offset,
            ));
        }
        let start = self.offset;
        self.offset += count;
        Ok(&self.data[start..self.offset])
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    /// Read a signed byte.
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    /// Read a u16 value.
    pub fn read_u16(&mut self) -> Result<u16> {
        self.align(2)?;
        let b = self.take(2)?;
        let bytes = [b[0], b[1]];
        Ok(if self.little_endian {
            u16::from_le_bytes(bytes)
        } else {
            u16::from_be_bytes(bytes)
        })
    }

    /// Read an i16 value.
    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(self.read_u16()? as i16)
    }

    /// Read a u32 value.
    pub fn read_u32(&mut self) -> Result<u32> {
        self.align(4)?;
        let b = self.take(4)?;
        let bytes = [b[0], b[1], b[2], b[3]];
        Ok(if self.little_endian {
            u32::from_le_bytes(bytes)
        } else {
            u32::from_be_bytes(bytes)
        })
    }

    /// Read an i32 value.
    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(self.read_u32()? as i32)
    }

    /// Read a u64 value.
    pub fn read_u64(&mut self) -> Result<u64> {
        self.align(8)?;
        let b = self.take(8)?;
        let bytes = [b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]];
        Ok(if self.little_endian {
            u64::from_le_bytes(bytes)
        } else {
            u64::from_be_bytes(bytes)
        })
    }

    /// Read an i64 value.
    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(self.read_u64()? as i64)
    }

    /// Read an f32 value.
    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    /// Read an f64 value.
    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_bits(self.read_u64()?))
    }

    /// Read a byte slice without alignment.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        self.take(count)
    }

    /// Read a length-prefixed, NUL-terminated UTF-8 string.
    ///
    /// The uint32 prefix counts the terminator. A prefix of 0 or 1 yields the
    /// empty string; a prefix of 0 carries no terminator byte at all.
    pub fn read_string(&mut self) -> Result<String> {
        let length = self.read_u32()? as usize;
        if length <= 1 {
            self.skip(length)?;
            return Ok(String::new());
        }
        let position = self.offset;
        let bytes = self.take(length - 1)?;
        let text = std::str::from_utf8(bytes)
            .map_err(|_| CodecError::InvalidUtf8 { position })?
            .to_string();
        // Terminator
        self.skip(1)?;
        Ok(text)
    }

    /// Skip bytes.
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.take(count).map(|_| ())
    }
}
