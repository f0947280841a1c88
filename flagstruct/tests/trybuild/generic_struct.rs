//! Trybuild fixture verifying the derive forwards generics, lifetimes, and
//! where clauses.

use std::fmt::Debug;

use flagstruct::{FlagStruct, Reflect, Shape};

#[derive(FlagStruct)]
struct Borrowed<'a, T>
where
    T: Debug,
{
    #[flag = "name,A name"]
    pub name: String,
    pub label: &'a str,
    pub extra: T,
}

#[derive(FlagStruct)]
struct Positional(#[flag = "first"] pub i64, pub bool);

fn field_count<R: Reflect>(record: &mut R) -> usize {
    match record.reflect_mut() {
        Shape::Record { fields, .. } => fields.len(),
        Shape::Scalar { .. } => 0,
    }
}

fn main() {
    let mut borrowed = Borrowed {
        name: String::new(),
        label: "label",
        extra: vec![1_u8],
    };
    assert_eq!(field_count(&mut borrowed), 3);
    assert_eq!(field_count(&mut Positional(1, true)), 2);
    assert_eq!(borrowed.label, "label");
    assert_eq!(borrowed.extra.len(), 1);
}
