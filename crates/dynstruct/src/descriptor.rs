// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field descriptors and the per-type field table.

use crate::coerce::PrimitiveType;
use crate::error::StructError;
use crate::struct_type::StructType;
use crate::value::Value;
use std::collections::HashMap;

/// Element type of a field: a primitive coercer or another struct type.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementType {
    Primitive(PrimitiveType),
    Struct(StructType),
}

impl ElementType {
    /// Display name of the element type.
    pub fn name(&self) -> &str {
        match self {
            Self::Primitive(kind) => kind.name(),
            Self::Struct(ty) => ty.name(),
        }
    }

    /// Default value for a field of this element type.
    ///
    /// Struct-typed fields default to null.
    pub fn default_value(&self) -> Value {
        match self {
            Self::Primitive(kind) => kind.default_value(),
            Self::Struct(_) => Value::Null,
        }
    }

    /// Coerce a value through this element type's coercion function.
    pub fn coerce(&self, value: Value) -> Result<Value, StructError> {
        match self {
            Self::Primitive(kind) => kind.coerce(value),
            Self::Struct(ty) => ty.coerce(value),
        }
    }

    /// Check if this is a primitive element type.
    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(_))
    }

    /// Check if this is a struct element type.
    pub fn is_struct(&self) -> bool {
        matches!(self, Self::Struct(_))
    }
}

impl From<PrimitiveType> for ElementType {
    fn from(kind: PrimitiveType) -> Self {
        Self::Primitive(kind)
    }
}

impl From<StructType> for ElementType {
    fn from(ty: StructType) -> Self {
        Self::Struct(ty)
    }
}

impl From<&StructType> for ElementType {
    fn from(ty: &StructType) -> Self {
        Self::Struct(ty.clone())
    }
}

/// Descriptor for one field slot: optional name, element type, readonly flag.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    name: Option<String>,
    element: ElementType,
    readonly: bool,
}

impl FieldDescriptor {
    /// Create a named field descriptor.
    pub fn named(name: impl Into<String>, element: impl Into<ElementType>) -> Self {
        Self {
            name: Some(name.into()),
            element: element.into(),
            readonly: false,
        }
    }

    /// Create a positional-only field descriptor.
    pub fn positional(element: impl Into<ElementType>) -> Self {
        Self {
            name: None,
            element: element.into(),
            readonly: false,
        }
    }

    /// Mark as readonly.
    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    /// Field name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Element type of the field.
    pub fn element(&self) -> &ElementType {
        &self.element
    }

    /// Whether the field rejects writes after construction.
    pub fn is_readonly(&self) -> bool {
        self.readonly
    }
}

/// Ordered, immutable field table of a defined struct type.
///
/// Base-type fields precede derived additions; overridden fields keep their
/// original slot. The name-to-index map is computed once at composition time.
#[derive(Debug, Clone, Default)]
pub struct FieldTable {
    fields: Vec<FieldDescriptor>,
    by_name: HashMap<String, usize>,
}

impl FieldTable {
    pub(crate) fn from_parts(fields: Vec<FieldDescriptor>, by_name: HashMap<String, usize>) -> Self {
        Self { fields, by_name }
    }

    /// Number of field slots.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the table has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Get a descriptor by slot index.
    pub fn get(&self, index: usize) -> Option<&FieldDescriptor> {
        self.fields.get(index)
    }

    /// Get a named field's slot index.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// All descriptors in slot order.
    pub fn descriptors(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Iterate over descriptors in slot order.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldDescriptor> {
        self.fields.iter()
    }

    pub(crate) fn name_map(&self) -> &HashMap<String, usize> {
        &self.by_name
    }

    /// Human-readable label for a slot: its name, or its index when unnamed.
    pub(crate) fn slot_label(&self, index: usize) -> String {
        match self.get(index).and_then(|d| d.name()) {
            Some(name) => name.to_string(),
            None => index.to_string(),
        }
    }
}
