// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CDR sink for writing encoded data into a caller-provided buffer.

use crate::cdr::cursor::CDR_HEADER_SIZE;
use crate::core::{CodecError, Result};

/// Bounded writer over a pre-sized output buffer.
///
/// Always emits little-endian data. Alignment padding is written as zero
/// bytes, measured from the payload start the same way [`CdrCursor`] and
/// [`SizeCalculator`] measure it, so all three walk identical offsets.
///
/// [`CdrCursor`]: crate::cdr::cursor::CdrCursor
/// [`SizeCalculator`]: crate::cdr::calculator::SizeCalculator
#[derive(Debug)]
pub struct CdrSink<'a> {
    buffer: &'a mut [u8],
    offset: usize,
}

impl<'a> CdrSink<'a> {
    /// Create a sink and emit the encapsulation header `[0x00, 0x01, 0x00,
    /// 0x00]` (plain CDR, little endian).
    pub fn new(buffer: &'a mut [u8]) -> Result<Self> {
        if buffer.len() < CDR_HEADER_SIZE {
            return Err(CodecError::buffer_too_short(
                CDR_HEADER_SIZE,
                buffer.len(),
                0,
            ));
        }
        buffer[0] = 0x00;
        buffer[1] = 0x01;
        buffer[2] = 0x00;
        buffer[3] = 0x00;
        Ok(Self {
            buffer,
            offset: CDR_HEADER_SIZE,
        })
    }

    /// Bytes written so far, including the header.
    #[inline]
    pub fn position(&self) -> usize {
        self.offset
    }

    fn put(&mut self, bytes: &[u8]) -> Result<()> {
        let available = self.buffer.len().saturating_sub(self.offset);
        if bytes.len() > available {
            return Err(CodecError::buffer_too_short(
                bytes.len(),
                available,
                self.offset,
            ));
        }
        self.buffer[self.offset..self.offset + bytes.len()].copy_from_slice(bytes);
        self.offset += bytes.len();
        Ok(())
    }

    /// Pad with zero bytes to the given boundary, relative to the payload start.
    pub fn align(&mut self, size: usize) -> Result<()> {
        let misalignment = (self.offset - CDR_HEADER_SIZE) % size;
        if misalignment > 0 {
            let padding = size - misalignment;
            let available = self.buffer.len().saturating_sub(self.offset);
            if padding > available {
                return Err(CodecError::buffer_too_short(padding, available, self.offset));
            }
            self.buffer[self.offset..self.offset + padding].fill(0);
            self.offset += padding;
        }
        Ok(())
    }

    /// Write a single byte.
    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.put(&[value])
    }

    /// Write a signed byte.
    pub fn write_i8(&mut self, value: i8) -> Result<()> {
        self.write_u8(value as u8)
    }

    /// Write a u16 value.
    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        self.align(2)?;
        self.put(&value.to_le_bytes())
    }

    /// Write an i16 value.
    pub fn write_i16(&mut self, value: i16) -> Result<()> {
        self.write_u16(value as u16)
    }

    /// Write a u32 value.
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.align(4)?;
        self.put(&value.to_le_bytes())
    }

    /// Write an i32 value.
    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        self.write_u32(value as u32)
    }

    /// Write a u64 value.
    pub fn write_u64(&mut self, value: u64) -> Result<()> {
        self.align(8)?;
        self.put(&value.to_le_bytes())
    }

    /// Write an i64 value.
    pub fn write_i64(&mut self, value: i64) -> Result<()> {
        self.write_u64(value as u64)
    }

    /// Write an f32 value.
    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        self.write_u32(value.to_bits())
    }

    /// Write an f64 value.
    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        self.write_u64(value.to_bits())
    }

    /// Write raw bytes without alignment.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.put(bytes)
    }

    /// Write a dynamic array's uint32 length prefix.
    pub fn write_sequence_length(&mut self, length: usize) -> Result<()> {
        self.write_u32(length as u32)
    }

    /// Write a length-prefixed, NUL-terminated UTF-8 string.
    pub fn write_string(&mut self, value: &str) -> Result<()> {
        self.write_u32(value.len() as u32 + 1)?;
        self.put(value.as_bytes())?;
        self.write_u8(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emits_header() {
        let mut buffer = [0xAAu8; 4];
        let sink = CdrSink::new(&mut buffer).expect("sink");
        assert_eq!(sink.position(), 4);
        assert_eq!(buffer, [0x00, 0x01, 0x00, 0x00]);
    }

    #[test]
    fn test_rejects_buffer_smaller_than_header() {
        let mut buffer = [0u8; 3];
        let err = CdrSink::new(&mut buffer).expect_err("too small");
        assert!(matches!(err, CodecError::BufferTooShort { .. }));
    }

    #[test]
    fn test_aligned_scalar_writes() {
        let mut buffer = [0xFFu8; 12];
        let mut sink = CdrSink::new(&mut buffer).expect("sink");
        sink.write_u8(0x05).expect("u8");
        sink.write_u16(0x1234).expect("u16");
        sink.write_u32(0x89ABCDEF).expect("u32");
        assert_eq!(sink.position(), 12);
        assert_eq!(
            buffer,
            [0x00, 0x01, 0x00, 0x00, 0x05, 0x00, 0x34, 0x12, 0xEF, 0xCD, 0xAB, 0x89]
        );
    }

    #[test]
    fn test_padding_is_zeroed() {
        let mut buffer = [0xFFu8; 16];
        let mut sink = CdrSink::new(&mut buffer).expect("sink");
        sink.write_u8(1).expect("u8");
        sink.write_u64(2).expect("u64");
        // Seven padding bytes between the u8 and the u64.
        assert_eq!(&buffer[5..12], &[0u8; 7]);
        assert_eq!(&buffer[12..16], &2u32.to_le_bytes());
    }

    #[test]
    fn test_string_layout() {
        let mut buffer = [0u8; 11];
        let mut sink = CdrSink::new(&mut buffer).expect("sink");
        sink.write_string("ab").expect("string");
        assert_eq!(sink.position(), 11);
        assert_eq!(&buffer[4..8], &3u32.to_le_bytes());
        assert_eq!(&buffer[8..11], b"ab\0");
    }

    #[test]
    fn test_write_past_end() {
        let mut buffer = [0u8; 6];
        let mut sink = CdrSink::new(&mut buffer).expect("sink");
        let err = sink.write_u32(1).expect_err("too small");
        match err {
            CodecError::BufferTooShort {
                requested,
                available,
                position,
            } => {
                assert_eq!(requested, 4);
                assert_eq!(available, 2);
                assert_eq!(position, 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_float_round_trip_bits() {
        let mut buffer = [0u8; 20];
        let mut sink = CdrSink::new(&mut buffer).expect("sink");
        sink.write_f32(1.5).expect("f32");
        sink.write_f64(-0.25).expect("f64");
        assert_eq!(&buffer[4..8], &1.5f32.to_le_bytes());
        // Payload offset 4 pads to 8 before the f64.
        assert_eq!(&buffer[8..12], &[0u8; 4]);
        assert_eq!(&buffer[12..20], &(-0.25f64).to_le_bytes());
    }
}
