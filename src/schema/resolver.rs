// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema resolution: root selection and name lookup.

use std::collections::HashMap;

use tracing::warn;

use crate::core::{CodecError, Result};
use crate::schema::ast::MessageDefinition;

/// A resolved schema: the root definition plus a name lookup table for
/// complex field references.
///
/// The root is the first definition that either has at least one non-constant
/// field or declares no fields at all. Definitions holding only constants are
/// preamble (constant blocks hoisted ahead of the message body) and are
/// skipped. A fieldless definition is a legal root and serializes as a single
/// placeholder byte.
#[derive(Debug, Clone)]
pub struct ResolvedSchema {
    root: MessageDefinition,
    by_name: HashMap<String, MessageDefinition>,
}

impl ResolvedSchema {
    /// Resolve a definition list into a schema with a chosen root.
    pub fn resolve(definitions: Vec<MessageDefinition>) -> Result<Self> {
        if definitions.is_empty() {
            return Err(CodecError::EmptyDefinitionSet);
        }

        let root = definitions
            .iter()
            .find(|def| def.fields.is_empty() || def.has_wire_fields())
            .cloned()
            .ok_or(CodecError::NoRootDefinition)?;

        let mut by_name = HashMap::with_capacity(definitions.len());
        for def in definitions {
            if let Some(previous) = by_name.insert(def.name.clone(), def) {
                warn!(name = %previous.name, "duplicate definition name, later entry wins");
            }
        }

        Ok(ResolvedSchema { root, by_name })
    }

    /// The root definition.
    pub fn root(&self) -> &MessageDefinition {
        &self.root
    }

    /// Look up a definition by name, failing with TypeNotFound.
    pub fn lookup(&self, name: &str) -> Result<&MessageDefinition> {
        self.by_name
            .get(name)
            .ok_or_else(|| CodecError::type_not_found(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MessageValue;
    use crate::schema::ast::Field;

    #[test]
    fn test_empty_definition_list_rejected() {
        let err = ResolvedSchema::resolve(vec![]).expect_err("empty list");
        assert!(matches!(err, CodecError::EmptyDefinitionSet));
    }

    #[test]
    fn test_root_is_first_definition() {
        let schema = ResolvedSchema::resolve(vec![
            MessageDefinition::new("First", vec![Field::primitive("a", "uint8")]),
            MessageDefinition::new("Second", vec![Field::primitive("b", "uint8")]),
        ])
        .expect("resolve");
        assert_eq!(schema.root().name, "First");
    }

    #[test]
    fn test_constant_only_preamble_skipped() {
        let schema = ResolvedSchema::resolve(vec![
            MessageDefinition::new(
                "Constants",
                vec![Field::primitive("DEBUG", "uint8").constant(MessageValue::UInt8(1))],
            ),
            MessageDefinition::new("Log", vec![Field::primitive("level", "uint8")]),
        ])
        .expect("resolve");
        assert_eq!(schema.root().name, "Log");
    }

    #[test]
    fn test_fieldless_definition_is_a_valid_root() {
        let schema = ResolvedSchema::resolve(vec![MessageDefinition::new("Empty", vec![])])
            .expect("resolve");
        assert_eq!(schema.root().name, "Empty");
        assert!(!schema.root().has_wire_fields());
    }

    #[test]
    fn test_only_constant_definitions_has_no_root() {
        let err = ResolvedSchema::resolve(vec![MessageDefinition::new(
            "Constants",
            vec![Field::primitive("A", "uint8").constant(MessageValue::UInt8(1))],
        )])
        .expect_err("no root");
        assert!(matches!(err, CodecError::NoRootDefinition));
    }

    #[test]
    fn test_lookup_by_name() {
        let schema = ResolvedSchema::resolve(vec![
            MessageDefinition::new("Outer", vec![Field::complex("inner", "Inner")]),
            MessageDefinition::new("Inner", vec![Field::primitive("x", "int32")]),
        ])
        .expect("resolve");
        assert_eq!(schema.lookup("Inner").expect("found").name, "Inner");
        let err = schema.lookup("Missing").expect_err("missing");
        assert!(matches!(err, CodecError::TypeNotFound { .. }));
    }

    #[test]
    fn test_duplicate_names_last_wins() {
        let schema = ResolvedSchema::resolve(vec![
            MessageDefinition::new("Root", vec![Field::complex("p", "Point")]),
            MessageDefinition::new("Point", vec![Field::primitive("x", "float32")]),
            MessageDefinition::new("Point", vec![Field::primitive("x", "float64")]),
        ])
        .expect("resolve");
        let point = schema.lookup("Point").expect("found");
        assert_eq!(point.fields[0].type_name, "float64");
    }
}
