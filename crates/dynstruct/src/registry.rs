// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field table composition.
//!
//! Assembles a derived type's ordered field table from its base table plus the
//! newly declared field specs. Named specs matching an inherited slot are
//! overrides: they are validated and replace the slot in place, keeping its
//! original position. Everything else appends in declaration order.

use crate::compat;
use crate::descriptor::{FieldDescriptor, FieldTable};
use crate::error::StructError;
use std::collections::{HashMap, HashSet};

/// Compose a field table from an optional base table and new field specs.
pub(crate) fn compose(
    base: Option<&FieldTable>,
    specs: Vec<FieldDescriptor>,
) -> Result<FieldTable, StructError> {
    let mut fields: Vec<FieldDescriptor> = base
        .map(|table| table.descriptors().to_vec())
        .unwrap_or_default();
    let mut by_name: HashMap<String, usize> = base
        .map(|table| table.name_map().clone())
        .unwrap_or_default();
    let inherited_len = fields.len();
    let mut overridden: HashSet<String> = HashSet::new();

    for spec in specs {
        let name = spec.name().map(str::to_owned);
        match name {
            Some(name) => {
                if is_reserved_name(&name) {
                    return Err(StructError::ReservedName { name });
                }
                match by_name.get(&name).copied() {
                    Some(slot) if slot < inherited_len && !overridden.contains(&name) => {
                        compat::check_override(&name, &fields[slot], &spec)?;
                        log::debug!("field `{}` overridden in place at slot {}", name, slot);
                        fields[slot] = spec;
                        overridden.insert(name);
                    }
                    Some(_) => return Err(StructError::DuplicateField { name }),
                    None => {
                        by_name.insert(name, fields.len());
                        fields.push(spec);
                    }
                }
            }
            // positional-only fields always append and can never be overridden
            None => fields.push(spec),
        }
    }

    Ok(FieldTable::from_parts(fields, by_name))
}

/// Names that look like non-negative integers are reserved for positional
/// indexing.
fn is_reserved_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit())
}
