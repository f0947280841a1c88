//! Unit tests for error classification and messages.

use clap::{Command, error::ErrorKind};
use rstest::rstest;

use super::{FlagStructError, is_display_request};
use crate::flag_set::FlagSetError;
use crate::value::{Kind, ValueError};

fn build_error(kind: ErrorKind) -> clap::Error {
    Command::new("demo").error(kind, "demo output")
}

#[rstest]
#[case(ErrorKind::DisplayHelp)]
#[case(ErrorKind::DisplayVersion)]
fn recognises_display_requests(#[case] kind: ErrorKind) {
    let err = build_error(kind);
    assert!(is_display_request(&err));
    let wrapped = FlagStructError::from(err);
    assert!(wrapped.as_display_request().is_some());
}

#[rstest]
#[case(ErrorKind::UnknownArgument)]
#[case(ErrorKind::InvalidValue)]
fn rejects_regular_errors(#[case] kind: ErrorKind) {
    let err = build_error(kind);
    assert!(!is_display_request(&err));
    let wrapped = FlagStructError::from(err);
    assert!(wrapped.as_display_request().is_none());
}

#[rstest]
fn registration_errors_are_not_display_requests() {
    let err = FlagStructError::NoFlaggableFields { type_name: "Empty" };
    assert!(err.as_display_request().is_none());
}

#[rstest]
#[case::not_a_record(
    FlagStructError::NotARecord { type_name: "i32" },
    "cannot register flags on i32: value is not a record"
)]
#[case::no_fields(
    FlagStructError::NoFlaggableFields { type_name: "demo::Empty" },
    "demo::Empty contains no flaggable fields"
)]
#[case::unsupported(
    FlagStructError::UnsupportedType { field: "tags", type_name: "Vec<String>" },
    "field tags of type Vec<String> does not implement FlagValue"
)]
#[case::duplicate(
    FlagStructError::from(FlagSetError::DuplicateName { name: "in".into() }),
    "flag redefined: in"
)]
#[case::default_parse(
    FlagStructError::DefaultParse {
        name: "n".into(),
        text: "abc".into(),
        source: ValueError::Syntax { kind: Kind::Int },
    },
    "invalid default \"abc\" for flag \"n\": invalid int syntax"
)]
fn formats_messages(#[case] err: FlagStructError, #[case] expected: &str) {
    assert_eq!(err.to_string(), expected);
}
