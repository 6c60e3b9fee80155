//! Unit tests for error handling.
//!
//! This module contains tests for error names, messages and tips.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip, MismatchKind, SubscriptFault};
use crate::Position;
use std::rc::Rc;

fn at_start(error_impl: ErrorImpl) -> Error {
    Error::new(error_impl, Position(0, Rc::new("test.boum".to_string())))
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        Position(10, Rc::new("test.boum".to_string())),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().0, 10);
}

#[test]
fn test_undeclared_name_message() {
    let error = at_start(ErrorImpl::UndeclaredName {
        name: "foo".to_string(),
    });

    assert_eq!(error.get_error_name(), "UndeclaredName");
    assert_eq!(error.to_string(), "identifier `foo` has not been declared");
}

#[test]
fn test_duplicate_declaration_message() {
    let error = at_start(ErrorImpl::DuplicateDeclaration {
        name: "x".to_string(),
    });

    assert_eq!(error.get_error_name(), "DuplicateDeclaration");
    assert!(error.to_string().contains("already declared in this scope"));
}

#[test]
fn test_arity_message() {
    let error = at_start(ErrorImpl::ArityMismatch {
        function: "add".to_string(),
        expected: 2,
        received: 1,
    });

    assert_eq!(
        error.to_string(),
        "function `add` expects 2 arguments but got 1"
    );
}

#[test]
fn test_argument_type_message() {
    let error = at_start(ErrorImpl::ArgumentTypeMismatch {
        function: "f".to_string(),
        index: 2,
        expected: "num".to_string(),
        received: "str".to_string(),
    });

    assert_eq!(
        error.to_string(),
        "argument 2 of `f` expects type `num` but got `str`"
    );
}

#[test]
fn test_type_mismatch_names_operator() {
    let error = at_start(ErrorImpl::TypeMismatch {
        kind: MismatchKind::Binary("+".to_string()),
        expected: "num".to_string(),
        received: "str".to_string(),
    });

    assert_eq!(
        error.to_string(),
        "type mismatch in operator `+`: expected `num`, received `str`"
    );
}

#[test]
fn test_subscript_faults() {
    let not_array = at_start(ErrorImpl::InvalidSubscript {
        fault: SubscriptFault::NotAnArray,
        received: "num".to_string(),
    });
    let bad_index = at_start(ErrorImpl::InvalidSubscript {
        fault: SubscriptFault::NonNumericIndex,
        received: "str".to_string(),
    });

    assert!(not_array.to_string().starts_with("only arrays can be subscripted"));
    assert!(bad_index.to_string().starts_with("array index must be a number"));
}

#[test]
fn test_missing_required_return_message() {
    let error = at_start(ErrorImpl::MissingRequiredReturn {
        function: "f".to_string(),
        return_type: "num".to_string(),
    });

    assert_eq!(error.get_error_name(), "MissingRequiredReturn");
    assert!(error.to_string().contains("must return a `num`"));
}

#[test]
fn test_fixed_messages() {
    assert_eq!(
        at_start(ErrorImpl::EmptyArrayLiteral).to_string(),
        "empty arrays are not allowed"
    );
    assert_eq!(
        at_start(ErrorImpl::ReturnOutsideFunction).to_string(),
        "return statement not inside a function"
    );
}

#[test]
fn test_error_tip_none() {
    let error = at_start(ErrorImpl::UnrecognisedToken {
        token: "@".to_string(),
    });

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = at_start(ErrorImpl::UnexpectedToken {
        token: ")".to_string(),
    });

    match error.get_tip() {
        ErrorTip::Suggestion(_) => (),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}
