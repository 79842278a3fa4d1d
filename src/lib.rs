// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # cdrmsg
//!
//! Schema-driven CDR message serialization for robotics transports and log
//! storage.
//!
//! A [`MessageCodec`] is built once from a list of pre-parsed
//! [`MessageDefinition`]s and then serializes, deserializes, and sizes
//! messages against that schema:
//! - `core/` - Errors and the dynamic [`MessageValue`] model
//! - `schema/` - Definition data model and root resolution
//! - `cdr/` - The wire format: cursor, sink, and the schema walkers
//!
//! ## Example
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use cdrmsg::{Field, MessageCodec, MessageDefinition, MessageMap, MessageValue};
//!
//! let codec = MessageCodec::new(vec![MessageDefinition::new(
//!     "sensor_msgs/Temperature",
//!     vec![
//!         Field::primitive("temperature", "float64"),
//!         Field::primitive("variance", "float64"),
//!     ],
//! )])?;
//!
//! let mut message = MessageMap::new();
//! message.insert("temperature".to_string(), MessageValue::Float64(21.5));
//! message.insert("variance".to_string(), MessageValue::Float64(0.0));
//!
//! let bytes = codec.serialize(&message)?;
//! assert_eq!(bytes.len(), codec.compute_size(&message)?);
//! assert_eq!(codec.deserialize(&bytes)?, message);
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

// Re-export core types for convenience
pub use core::{CodecError, MessageMap, MessageValue, Result};

// Schema model and resolution
pub mod schema;

pub use schema::{Field, MessageDefinition, PrimitiveKind, ResolvedSchema};

// CDR wire format
pub mod cdr;

pub use cdr::{CdrCursor, CdrSink, MessageCodec, TimeFormat, CDR_HEADER_SIZE};
