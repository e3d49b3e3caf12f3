// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Basic construction, coercion, and member dispatch.

use dynstruct::{PrimitiveType, Record, StructError, StructTypeBuilder, Value};

fn point2d() -> dynstruct::StructType {
    StructTypeBuilder::new("Point2D")
        .field("x", PrimitiveType::Int32)
        .field("y", PrimitiveType::Int32)
        .build()
        .expect("define Point2D")
}

#[test]
fn defaults_and_positional_access() {
    let point = point2d();
    let start = point.construct(vec![Value::I32(10)]).unwrap();

    assert_eq!(start.get_named("x").unwrap(), Value::I32(10));
    assert_eq!(start.get(0).unwrap(), Value::I32(10));
    assert_eq!(start.get_named("y").unwrap(), Value::I32(0));
    assert_eq!(start.get(1).unwrap(), Value::I32(0));
}

#[test]
fn struct_fields_default_to_null_and_alias_on_write() {
    let point = point2d();
    let line = StructTypeBuilder::new("Line")
        .struct_field("start", &point)
        .struct_field("end", &point)
        .build()
        .unwrap();

    let start = point.construct(vec![Value::I32(10)]).unwrap();
    let l = line.construct(vec![Value::Struct(start.clone())]).unwrap();

    assert!(l
        .get_named("start")
        .unwrap()
        .as_struct()
        .unwrap()
        .same_instance(&start));
    assert_eq!(l.get_named("end").unwrap(), Value::Null);
    assert_eq!(l.get(1).unwrap(), Value::Null);

    let end = point.construct(vec![]).unwrap();
    l.set_named("end", Value::Struct(end.clone())).unwrap();
    assert!(l.get(1).unwrap().as_struct().unwrap().same_instance(&end));

    // writing through the positional path replaces the same cell
    let other = point.construct(vec![]).unwrap();
    l.set(1, Value::Struct(other.clone())).unwrap();
    let stored = l.get_named("end").unwrap();
    assert!(!stored.as_struct().unwrap().same_instance(&end));
    assert!(stored.as_struct().unwrap().same_instance(&other));
}

#[test]
fn from_object_coerces_field_values() {
    let point = point2d();
    let p = point
        .from_object(&Record::new().with("x", "10").with("y", 20.5f64))
        .unwrap();

    assert_eq!(p.get_named("x").unwrap(), Value::I32(10));
    assert_eq!(p.get_named("y").unwrap(), Value::I32(20));
}

#[test]
fn duplicate_names_are_rejected() {
    // repeated named field
    let err = StructTypeBuilder::new("Type")
        .field("member", PrimitiveType::Int32)
        .field("member", PrimitiveType::Int32)
        .build()
        .unwrap_err();
    assert!(matches!(err, StructError::DuplicateField { .. }));

    // field repeated as member
    let err = StructTypeBuilder::new("Type")
        .field("member", PrimitiveType::Int32)
        .getter("member", |_| Ok(Value::Null))
        .build()
        .unwrap_err();
    assert!(matches!(err, StructError::DuplicateField { .. }));

    // member repeated as member
    let err = StructTypeBuilder::new("Type")
        .getter("member", |_| Ok(Value::Null))
        .method("member", |_, _| Ok(Value::Null))
        .build()
        .unwrap_err();
    assert!(matches!(err, StructError::DuplicateField { .. }));
}

#[test]
fn reserved_names_are_rejected() {
    let err = StructTypeBuilder::new("Type")
        .field("0", PrimitiveType::Int32)
        .build()
        .unwrap_err();
    assert!(matches!(err, StructError::ReservedName { .. }));
}

#[test]
fn to_string_renders_all_slots() {
    let point = point2d();
    let start = point.construct(vec![Value::I32(10)]).unwrap();
    assert_eq!(start.to_string(), "struct Point2D { int32(10), int32(0), }");

    let line = StructTypeBuilder::new("Line")
        .struct_field("start", &point)
        .struct_field("end", &point)
        .build()
        .unwrap();
    let l = line.construct(vec![Value::Struct(start)]).unwrap();
    assert_eq!(
        l.to_string(),
        "struct Line { Point2D(struct Point2D { int32(10), int32(0), }), Point2D(null), }"
    );
}
