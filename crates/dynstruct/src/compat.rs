// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Override compatibility rules for inherited fields.
//!
//! A derived type may redeclare an inherited named field only when the broad
//! kind (primitive vs. struct) is unchanged, a primitive element type is
//! exactly the inherited one, a struct element type narrows to the inherited
//! type or a subtype of it, and the readonly flag is preserved in both
//! directions.

use crate::descriptor::{ElementType, FieldDescriptor};
use crate::error::{OverrideConflict, StructError};

/// Validate a candidate override of an inherited field descriptor.
pub(crate) fn check_override(
    name: &str,
    inherited: &FieldDescriptor,
    candidate: &FieldDescriptor,
) -> Result<(), StructError> {
    match override_conflict(inherited, candidate) {
        None => Ok(()),
        Some(conflict) => Err(StructError::IncompatibleOverride {
            field: name.to_string(),
            conflict,
        }),
    }
}

fn override_conflict(
    inherited: &FieldDescriptor,
    candidate: &FieldDescriptor,
) -> Option<OverrideConflict> {
    match (inherited.element(), candidate.element()) {
        (ElementType::Primitive(original), ElementType::Primitive(replacement)) => {
            if original != replacement {
                return Some(OverrideConflict::Primitive);
            }
        }
        (ElementType::Struct(original), ElementType::Struct(replacement)) => {
            if !replacement.is_subtype_of(original) {
                return Some(OverrideConflict::Struct);
            }
        }
        _ => return Some(OverrideConflict::Kind),
    }

    if inherited.is_readonly() != candidate.is_readonly() {
        return Some(OverrideConflict::Readonly);
    }

    None
}
