// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CDR wire format: cursor, sink, and the schema-driven walkers built on
//! top of them.

pub mod codec;
pub mod cursor;
pub mod sink;

mod calculator;
mod reader;
mod writer;

pub use codec::{MessageCodec, TimeFormat};
pub use cursor::{CdrCursor, CDR_HEADER_SIZE};
pub use sink::CdrSink;
