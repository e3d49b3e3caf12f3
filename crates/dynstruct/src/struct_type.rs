// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Struct type handles: declaration, definition, construction.
//!
//! A `StructType` is a cheap shared handle. Declaration and definition are
//! separate steps so a type can appear as the element type of its own fields
//! (linked lists, trees) before its field table exists:
//!
//! ```rust
//! use dynstruct::{FieldDescriptor, StructType};
//!
//! let node = StructType::declare("Node");
//! node.define(vec![FieldDescriptor::named("next", &node)], vec![])?;
//!
//! let head = node.construct(vec![])?;
//! assert!(head.get_named("next")?.is_null());
//! # Ok::<(), dynstruct::StructError>(())
//! ```
//!
//! The definition is write-once; constructing, introspecting, or extending an
//! incomplete type is reported as `NotDefined`, a second `define` as
//! `AlreadyDefined`.

use crate::descriptor::{FieldDescriptor, FieldTable};
use crate::error::{OverrideConflict, StructError};
use crate::instance::{self, StructInstance};
use crate::registry;
use crate::value::{Record, Value};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Computed getter attached to a struct type.
pub type GetterFn = Arc<dyn Fn(&StructInstance) -> Result<Value, StructError> + Send + Sync>;

/// Method attached to a struct type.
pub type MethodFn = Arc<dyn Fn(&StructInstance, &[Value]) -> Result<Value, StructError> + Send + Sync>;

/// A non-field member of a struct type.
///
/// Members are dispatched by name through the ancestry chain (nearest
/// definition wins) and never occupy a field slot.
#[derive(Clone)]
pub enum Member {
    Getter(GetterFn),
    Method(MethodFn),
}

impl fmt::Debug for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Getter(_) => write!(f, "Member::Getter"),
            Self::Method(_) => write!(f, "Member::Method"),
        }
    }
}

/// Named member spec handed to `define`.
#[derive(Clone)]
pub struct MemberDescriptor {
    name: String,
    member: Member,
}

impl MemberDescriptor {
    /// Create a computed-getter member.
    pub fn getter(
        name: impl Into<String>,
        f: impl Fn(&StructInstance) -> Result<Value, StructError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            member: Member::Getter(Arc::new(f)),
        }
    }

    /// Create a method member.
    pub fn method(
        name: impl Into<String>,
        f: impl Fn(&StructInstance, &[Value]) -> Result<Value, StructError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            member: Member::Method(Arc::new(f)),
        }
    }

    /// Member name.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn into_parts(self) -> (String, Member) {
        (self.name, self.member)
    }
}

impl fmt::Debug for MemberDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberDescriptor")
            .field("name", &self.name)
            .field("member", &self.member)
            .finish()
    }
}

struct TypeDef {
    table: FieldTable,
    members: HashMap<String, Member>,
}

struct TypeCell {
    name: String,
    base: Option<StructType>,
    def: OnceLock<TypeDef>,
}

/// A named struct type: field table, default (null), coercion function.
///
/// Handles are cheap to clone and compare by identity; two independently
/// declared types are distinct even when their names match.
#[derive(Clone)]
pub struct StructType {
    inner: Arc<TypeCell>,
}

impl StructType {
    /// Declare a new root struct type.
    ///
    /// The returned handle is incomplete until `define` is called, but is
    /// already usable as the element type of a field.
    pub fn declare(name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(TypeCell {
                name: name.into(),
                base: None,
                def: OnceLock::new(),
            }),
        }
    }

    /// Declare a new struct type extending a defined base type.
    pub fn declare_extending(name: impl Into<String>, base: &StructType) -> Result<Self, StructError> {
        // an incomplete type cannot serve as a base
        base.field_table()?;
        Ok(Self {
            inner: Arc::new(TypeCell {
                name: name.into(),
                base: Some(base.clone()),
                def: OnceLock::new(),
            }),
        })
    }

    /// Combined declare + define.
    pub fn make(
        name: impl Into<String>,
        base: Option<&StructType>,
        fields: Vec<FieldDescriptor>,
        members: Vec<MemberDescriptor>,
    ) -> Result<Self, StructError> {
        let ty = match base {
            Some(base) => Self::declare_extending(name, base)?,
            None => Self::declare(name),
        };
        ty.define(fields, members)?;
        Ok(ty)
    }

    /// Finalize the type: compose the field table and attach members.
    ///
    /// Must be called exactly once per declared type.
    pub fn define(
        &self,
        fields: Vec<FieldDescriptor>,
        members: Vec<MemberDescriptor>,
    ) -> Result<(), StructError> {
        if self.is_defined() {
            return Err(StructError::AlreadyDefined {
                type_name: self.name().to_string(),
            });
        }

        let base_table = match &self.inner.base {
            Some(base) => Some(base.field_table()?),
            None => None,
        };

        // a field may not shadow an inherited member
        for spec in &fields {
            if let Some(name) = spec.name() {
                if self.inherited_member(name).is_some() {
                    return Err(StructError::IncompatibleOverride {
                        field: name.to_string(),
                        conflict: OverrideConflict::Kind,
                    });
                }
            }
        }

        let mut member_names: HashSet<String> = HashSet::new();
        for member in &members {
            let name = member.name();
            if !member_names.insert(name.to_string()) {
                return Err(StructError::DuplicateField {
                    name: name.to_string(),
                });
            }
            if fields.iter().any(|spec| spec.name() == Some(name)) {
                return Err(StructError::DuplicateField {
                    name: name.to_string(),
                });
            }
            // a member may not shadow an inherited field
            if base_table.map_or(false, |table| table.index_of(name).is_some()) {
                return Err(StructError::IncompatibleOverride {
                    field: name.to_string(),
                    conflict: OverrideConflict::Kind,
                });
            }
        }

        let table = registry::compose(base_table, fields)?;
        let members: HashMap<String, Member> = members
            .into_iter()
            .map(MemberDescriptor::into_parts)
            .collect();

        log::debug!(
            "defined struct type `{}`: {} fields, {} members",
            self.name(),
            table.len(),
            members.len()
        );

        self.inner
            .def
            .set(TypeDef { table, members })
            .map_err(|_| StructError::AlreadyDefined {
                type_name: self.name().to_string(),
            })
    }

    /// Type name.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Base type, if this type extends one.
    pub fn base(&self) -> Option<&StructType> {
        self.inner.base.as_ref()
    }

    /// Check whether `define` has completed.
    pub fn is_defined(&self) -> bool {
        self.inner.def.get().is_some()
    }

    /// The type's ordered field table.
    pub fn field_table(&self) -> Result<&FieldTable, StructError> {
        self.inner
            .def
            .get()
            .map(|def| &def.table)
            .ok_or_else(|| StructError::NotDefined {
                type_name: self.inner.name.clone(),
            })
    }

    /// Check whether this type is `other` or a descendant of it.
    pub fn is_subtype_of(&self, other: &StructType) -> bool {
        let mut current = self;
        loop {
            if Arc::ptr_eq(&current.inner, &other.inner) {
                return true;
            }
            match &current.inner.base {
                Some(base) => current = base,
                None => return false,
            }
        }
    }

    /// Look up a member by name through the ancestry chain.
    pub fn member(&self, name: &str) -> Option<Member> {
        let mut current = self;
        loop {
            if let Some(def) = current.inner.def.get() {
                if let Some(member) = def.members.get(name) {
                    return Some(member.clone());
                }
            }
            match &current.inner.base {
                Some(base) => current = base,
                None => return None,
            }
        }
    }

    fn inherited_member(&self, name: &str) -> Option<Member> {
        self.inner.base.as_ref().and_then(|base| base.member(name))
    }

    /// Construct an instance from positional values.
    ///
    /// Missing trailing values take the field defaults. Struct-typed slots
    /// require an instance of the declared type or a subtype; primitive slots
    /// coerce. All slots are validated before the instance exists.
    pub fn construct(&self, values: Vec<Value>) -> Result<StructInstance, StructError> {
        let table = self.field_table()?;
        if values.len() > table.len() {
            return Err(StructError::InvalidArgument {
                message: format!(
                    "{} takes at most {} values, got {}",
                    self.name(),
                    table.len(),
                    values.len()
                ),
            });
        }

        let mut slots = Vec::with_capacity(table.len());
        let mut inputs = values.into_iter();
        for descriptor in table.iter() {
            let slot = match inputs.next() {
                Some(raw) => instance::check_assignment(descriptor.element(), raw)?,
                None => descriptor.element().default_value(),
            };
            slots.push(slot);
        }

        log::trace!("constructed instance of `{}`", self.name());
        Ok(StructInstance::from_parts(self.clone(), slots))
    }

    /// Build an instance from a plain keyed record.
    ///
    /// Every named slot must have its key present; present values run through
    /// the slot's coercion function (struct-typed slots accept an instance,
    /// null, or a nested record built recursively). Positional-only slots are
    /// not addressable from a record and take their defaults.
    pub fn from_object(&self, record: &Record) -> Result<StructInstance, StructError> {
        let table = self.field_table()?;
        let mut slots = Vec::with_capacity(table.len());
        for descriptor in table.iter() {
            let slot = match descriptor.name() {
                Some(name) => match record.get(name) {
                    Some(value) => descriptor.element().coerce(value.clone())?,
                    None => {
                        return Err(StructError::MissingField {
                            field: name.to_string(),
                        })
                    }
                },
                None => descriptor.element().default_value(),
            };
            slots.push(slot);
        }

        Ok(StructInstance::from_parts(self.clone(), slots))
    }

    /// The type's coercion function.
    ///
    /// Accepts an existing instance of this type or a subtype unchanged, null
    /// as null, and a plain record through `from_object`.
    pub fn coerce(&self, value: Value) -> Result<Value, StructError> {
        match value {
            Value::Struct(inst) if inst.is_instance_of(self) => Ok(Value::Struct(inst)),
            Value::Null => Ok(Value::Null),
            Value::Record(record) => Ok(Value::Struct(self.from_object(&record)?)),
            other => Err(StructError::TypeMismatch {
                expected: self.name().to_string(),
                got: other.type_label(),
            }),
        }
    }
}

/// Identity comparison: a handle equals itself and its clones only.
impl PartialEq for StructType {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for StructType {}

impl fmt::Debug for StructType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructType")
            .field("name", &self.inner.name)
            .field("defined", &self.is_defined())
            .finish()
    }
}

impl fmt::Display for StructType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner.name)
    }
}
