// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types shared across the crate: errors and the dynamic value model.

pub mod error;
pub mod value;

pub use error::{CodecError, Result};
pub use value::{MessageMap, MessageValue};
