// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema model and resolution.

pub mod ast;
pub mod resolver;

pub use ast::{Field, MessageDefinition, PrimitiveKind};
pub use resolver::ResolvedSchema;
