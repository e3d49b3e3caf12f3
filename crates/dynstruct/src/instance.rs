// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Struct instances: per-instance slot storage with coercing field access.
//!
//! An instance owns one value slot per field table entry. Positional and named
//! access resolve to the same cell (the name-to-index map is computed once at
//! type definition time), so a write through either path is observed by both.
//! Shape and dynamic type are fixed at construction; only non-readonly slot
//! contents can be reassigned.

use crate::descriptor::ElementType;
use crate::error::StructError;
use crate::struct_type::{Member, StructType};
use crate::value::Value;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

struct InstanceInner {
    ty: StructType,
    slots: RwLock<Vec<Value>>,
}

/// A struct instance handle.
///
/// Clones alias the same storage, mirroring reference semantics: a
/// struct-typed slot stores the handle itself, and reading it back yields the
/// identical instance.
#[derive(Clone)]
pub struct StructInstance {
    inner: Arc<InstanceInner>,
}

impl StructInstance {
    pub(crate) fn from_parts(ty: StructType, slots: Vec<Value>) -> Self {
        Self {
            inner: Arc::new(InstanceInner {
                ty,
                slots: RwLock::new(slots),
            }),
        }
    }

    /// The instance's struct type.
    pub fn struct_type(&self) -> &StructType {
        &self.inner.ty
    }

    /// Name of the instance's struct type.
    pub fn type_name(&self) -> &str {
        self.inner.ty.name()
    }

    /// Number of field slots.
    pub fn field_count(&self) -> usize {
        self.inner.slots.read().len()
    }

    /// Check whether this instance's type is `ty` or a descendant of it.
    pub fn is_instance_of(&self, ty: &StructType) -> bool {
        self.inner.ty.is_subtype_of(ty)
    }

    /// Check whether two handles alias the same instance.
    pub fn same_instance(&self, other: &StructInstance) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Read a slot by position.
    pub fn get(&self, index: usize) -> Result<Value, StructError> {
        self.inner
            .slots
            .read()
            .get(index)
            .cloned()
            .ok_or_else(|| StructError::FieldNotFound {
                field: index.to_string(),
            })
    }

    /// Read a slot by name.
    pub fn get_named(&self, name: &str) -> Result<Value, StructError> {
        let index = self.slot_index(name)?;
        self.get(index)
    }

    /// Write a slot by position.
    ///
    /// Primitive slots coerce the input; struct-typed slots require an
    /// instance of the declared type or a subtype. A failed write leaves the
    /// slot untouched.
    pub fn set(&self, index: usize, value: Value) -> Result<(), StructError> {
        let table = self.inner.ty.field_table()?;
        let descriptor = table.get(index).ok_or_else(|| StructError::FieldNotFound {
            field: index.to_string(),
        })?;
        if descriptor.is_readonly() {
            return Err(StructError::ReadonlyViolation {
                field: table.slot_label(index),
            });
        }

        let canonical = check_assignment(descriptor.element(), value)?;
        self.inner.slots.write()[index] = canonical;
        Ok(())
    }

    /// Write a slot by name.
    pub fn set_named(&self, name: &str, value: Value) -> Result<(), StructError> {
        let index = self.slot_index(name)?;
        self.set(index, value)
    }

    /// Invoke a method member by name.
    pub fn invoke(&self, name: &str, args: &[Value]) -> Result<Value, StructError> {
        match self.inner.ty.member(name) {
            Some(Member::Method(f)) => f(self, args),
            Some(Member::Getter(_)) => Err(StructError::InvalidArgument {
                message: format!("member `{}` is a computed getter, not a method", name),
            }),
            None => Err(StructError::FieldNotFound {
                field: name.to_string(),
            }),
        }
    }

    /// Evaluate a computed-getter member by name.
    pub fn get_computed(&self, name: &str) -> Result<Value, StructError> {
        match self.inner.ty.member(name) {
            Some(Member::Getter(f)) => f(self),
            Some(Member::Method(_)) => Err(StructError::InvalidArgument {
                message: format!("member `{}` is a method, not a computed getter", name),
            }),
            None => Err(StructError::FieldNotFound {
                field: name.to_string(),
            }),
        }
    }

    fn slot_index(&self, name: &str) -> Result<usize, StructError> {
        self.inner
            .ty
            .field_table()?
            .index_of(name)
            .ok_or_else(|| StructError::FieldNotFound {
                field: name.to_string(),
            })
    }
}

/// Canonicalize a value for a slot: coerce for primitive element types,
/// subtype-check for struct element types.
pub(crate) fn check_assignment(
    element: &ElementType,
    value: Value,
) -> Result<Value, StructError> {
    match element {
        ElementType::Struct(ty) => match value {
            Value::Struct(inst) if inst.is_instance_of(ty) => Ok(Value::Struct(inst)),
            other => Err(StructError::TypeMismatch {
                expected: format!("instance of {}", ty.name()),
                got: other.type_label(),
            }),
        },
        ElementType::Primitive(kind) => kind.coerce(value),
    }
}

/// Identity comparison, mirroring reference semantics.
impl PartialEq for StructInstance {
    fn eq(&self, other: &Self) -> bool {
        self.same_instance(other)
    }
}

impl fmt::Debug for StructInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructInstance")
            .field("type", &self.type_name())
            .field("slots", &*self.inner.slots.read())
            .finish()
    }
}

/// Diagnostic rendering: `struct Name { int32(10), int32(0), }`, all slots in
/// field table order, inherited first.
impl fmt::Display for StructInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "struct {} {{", self.type_name())?;
        if let Ok(table) = self.inner.ty.field_table() {
            let slots = self.inner.slots.read();
            for (descriptor, value) in table.iter().zip(slots.iter()) {
                write!(f, " {}({}),", descriptor.element().name(), value)?;
            }
        }
        write!(f, " }}")
    }
}
