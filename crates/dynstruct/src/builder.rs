// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builder API for struct types.

use crate::coerce::PrimitiveType;
use crate::descriptor::{ElementType, FieldDescriptor};
use crate::error::StructError;
use crate::instance::StructInstance;
use crate::struct_type::{MemberDescriptor, StructType};
use crate::value::Value;

/// Builder for declaring and defining a struct type in one expression.
///
/// ```rust
/// use dynstruct::{PrimitiveType, StructTypeBuilder};
///
/// let point = StructTypeBuilder::new("Point2D")
///     .field("x", PrimitiveType::Int32)
///     .field("y", PrimitiveType::Int32)
///     .build()?;
///
/// assert_eq!(point.field_table()?.len(), 2);
/// # Ok::<(), dynstruct::StructError>(())
/// ```
#[derive(Debug)]
pub struct StructTypeBuilder {
    name: String,
    base: Option<StructType>,
    fields: Vec<FieldDescriptor>,
    members: Vec<MemberDescriptor>,
}

impl StructTypeBuilder {
    /// Create a builder for a new root struct type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base: None,
            fields: Vec::new(),
            members: Vec::new(),
        }
    }

    /// Create a builder for a struct type extending `base`.
    ///
    /// The base must be defined by the time `build` runs.
    pub fn extending(name: impl Into<String>, base: &StructType) -> Self {
        Self {
            name: name.into(),
            base: Some(base.clone()),
            fields: Vec::new(),
            members: Vec::new(),
        }
    }

    /// Add a named primitive field.
    pub fn field(mut self, name: impl Into<String>, kind: PrimitiveType) -> Self {
        self.fields.push(FieldDescriptor::named(name, kind));
        self
    }

    /// Add a named readonly primitive field.
    pub fn readonly_field(mut self, name: impl Into<String>, kind: PrimitiveType) -> Self {
        self.fields
            .push(FieldDescriptor::named(name, kind).readonly());
        self
    }

    /// Add a string field.
    pub fn string_field(self, name: impl Into<String>) -> Self {
        self.field(name, PrimitiveType::String)
    }

    /// Add a named struct-typed field.
    pub fn struct_field(mut self, name: impl Into<String>, ty: &StructType) -> Self {
        self.fields.push(FieldDescriptor::named(name, ty));
        self
    }

    /// Add a positional-only field.
    pub fn positional_field(mut self, element: impl Into<ElementType>) -> Self {
        self.fields.push(FieldDescriptor::positional(element));
        self
    }

    /// Add a prebuilt field descriptor.
    pub fn descriptor(mut self, descriptor: FieldDescriptor) -> Self {
        self.fields.push(descriptor);
        self
    }

    /// Add a computed-getter member.
    pub fn getter(
        mut self,
        name: impl Into<String>,
        f: impl Fn(&StructInstance) -> Result<Value, StructError> + Send + Sync + 'static,
    ) -> Self {
        self.members.push(MemberDescriptor::getter(name, f));
        self
    }

    /// Add a method member.
    pub fn method(
        mut self,
        name: impl Into<String>,
        f: impl Fn(&StructInstance, &[Value]) -> Result<Value, StructError> + Send + Sync + 'static,
    ) -> Self {
        self.members.push(MemberDescriptor::method(name, f));
        self
    }

    /// Declare and define the struct type.
    pub fn build(self) -> Result<StructType, StructError> {
        StructType::make(self.name, self.base.as_ref(), self.fields, self.members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_basic() {
        let point = StructTypeBuilder::new("Point3D")
            .field("x", PrimitiveType::Float64)
            .field("y", PrimitiveType::Float64)
            .field("z", PrimitiveType::Float64)
            .build()
            .unwrap();

        assert_eq!(point.name(), "Point3D");
        let table = point.field_table().unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.index_of("z"), Some(2));
    }

    #[test]
    fn test_builder_extending() {
        let base = StructTypeBuilder::new("Point2D")
            .field("x", PrimitiveType::Int32)
            .field("y", PrimitiveType::Int32)
            .build()
            .unwrap();

        let derived = StructTypeBuilder::extending("Point3D", &base)
            .field("z", PrimitiveType::Int32)
            .build()
            .unwrap();

        assert!(derived.is_subtype_of(&base));
        assert_eq!(derived.field_table().unwrap().len(), 3);
    }

    #[test]
    fn test_builder_mixed_fields() {
        let point = StructTypeBuilder::new("Point2D")
            .field("x", PrimitiveType::Int32)
            .field("y", PrimitiveType::Int32)
            .build()
            .unwrap();

        let shape = StructTypeBuilder::new("Shape")
            .readonly_field("id", PrimitiveType::Uint32)
            .string_field("label")
            .struct_field("origin", &point)
            .positional_field(PrimitiveType::Float64)
            .build()
            .unwrap();

        let table = shape.field_table().unwrap();
        assert_eq!(table.len(), 4);
        assert!(table.get(0).map(|d| d.is_readonly()).unwrap_or(false));
        assert_eq!(table.get(2).map(|d| d.element().name()), Some("Point2D"));
        assert_eq!(table.get(3).and_then(|d| d.name()), None);
    }

    #[test]
    fn test_builder_members() {
        let ty = StructTypeBuilder::new("Counter")
            .field("count", PrimitiveType::Int32)
            .getter("doubled", |inst| {
                let count = inst.get_named("count")?.as_i32().unwrap_or(0);
                Ok(Value::I32(count * 2))
            })
            .method("add", |inst, args| {
                let delta = args.first().and_then(|v| v.as_i32()).unwrap_or(0);
                let count = inst.get_named("count")?.as_i32().unwrap_or(0);
                inst.set_named("count", Value::I32(count + delta))?;
                Ok(Value::Null)
            })
            .build()
            .unwrap();

        let counter = ty.construct(vec![Value::I32(5)]).unwrap();
        assert_eq!(counter.get_computed("doubled").unwrap(), Value::I32(10));

        counter.invoke("add", &[Value::I32(3)]).unwrap();
        assert_eq!(counter.get_named("count").unwrap(), Value::I32(8));
        assert_eq!(counter.get_computed("doubled").unwrap(), Value::I32(16));
    }

    #[test]
    fn test_builder_duplicate_fields_fail() {
        let err = StructTypeBuilder::new("Bad")
            .field("x", PrimitiveType::Int32)
            .field("x", PrimitiveType::Int32)
            .build()
            .unwrap_err();
        assert!(matches!(err, StructError::DuplicateField { .. }));
    }
}
