// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Runtime struct types
//!
//! Definition and instantiation of fixed-shape record types at runtime:
//! named/positional fields with declared element types, automatic value
//! coercion on write, readonly enforcement, and structural subtyping with
//! validated field overrides.
//!
//! # Features
//!
//! - **PrimitiveType**: total numeric coercers (fixed-width wrap, never fail),
//!   string, opaque object, and pass-through `any`
//! - **StructType**: immutable ordered field table, inheritance composition,
//!   two-phase declare/define for self-referential types
//! - **StructInstance**: positional and named access to the same slots,
//!   coercion and subtype checks on every write
//! - **Builder API**: fluent interface for declaring types
//!
//! # Example
//!
//! ```rust
//! use dynstruct::{PrimitiveType, Record, StructTypeBuilder, Value};
//!
//! // Define a type at runtime
//! let point = StructTypeBuilder::new("Point2D")
//!     .field("x", PrimitiveType::Int32)
//!     .field("y", PrimitiveType::Int32)
//!     .build()?;
//!
//! // Construct positionally; missing values take the field defaults
//! let p = point.construct(vec![Value::from(10)])?;
//! assert_eq!(p.get_named("x")?, Value::I32(10));
//! assert_eq!(p.get(1)?, Value::I32(0));
//!
//! // Writes coerce: strings parse, out-of-range numerics wrap
//! p.set_named("y", Value::from("20.5"))?;
//! assert_eq!(p.get_named("y")?, Value::I32(20));
//!
//! // Or build from a plain keyed record
//! let q = point.from_object(&Record::new().with("x", 1i32).with("y", 2i32))?;
//! assert_eq!(q.to_string(), "struct Point2D { int32(1), int32(2), }");
//! # Ok::<(), dynstruct::StructError>(())
//! ```

mod builder;
mod coerce;
mod compat;
mod descriptor;
mod error;
mod instance;
mod registry;
mod struct_type;
mod value;

pub use builder::StructTypeBuilder;
pub use coerce::PrimitiveType;
pub use descriptor::{ElementType, FieldDescriptor, FieldTable};
pub use error::{OverrideConflict, StructError};
pub use instance::StructInstance;
pub use struct_type::{GetterFn, Member, MemberDescriptor, MethodFn, StructType};
pub use value::{OpaqueObject, Record, Value};
