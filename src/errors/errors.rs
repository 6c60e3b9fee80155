use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{internal_error}")]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::UnknownType { .. } => "UnknownType",
            ErrorImpl::MalformedTree { .. } => "MalformedTree",
            ErrorImpl::UnknownOutputType { .. } => "UnknownOutputType",
            ErrorImpl::UndeclaredName { .. } => "UndeclaredName",
            ErrorImpl::DuplicateDeclaration { .. } => "DuplicateDeclaration",
            ErrorImpl::DuplicateFunction { .. } => "DuplicateFunction",
            ErrorImpl::UndeclaredFunction { .. } => "UndeclaredFunction",
            ErrorImpl::ArityMismatch { .. } => "ArityMismatch",
            ErrorImpl::ArgumentTypeMismatch { .. } => "ArgumentTypeMismatch",
            ErrorImpl::TypeMismatch { .. } => "TypeMismatch",
            ErrorImpl::InvalidSubscript { .. } => "InvalidSubscript",
            ErrorImpl::EmptyArrayLiteral => "EmptyArrayLiteral",
            ErrorImpl::HeterogeneousArray { .. } => "HeterogeneousArray",
            ErrorImpl::ReturnOutsideFunction => "ReturnOutsideFunction",
            ErrorImpl::MissingRequiredReturn { .. } => "MissingRequiredReturn",
            ErrorImpl::VoidReturnsValue => "VoidReturnsValue",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it outside the representable range?",
                token
            )),
            ErrorImpl::UnknownType { type_ } => ErrorTip::Suggestion(format!(
                "Unknown type `{}`, expected one of num, str, bool, void, any",
                type_
            )),
            ErrorImpl::MalformedTree { .. } => ErrorTip::None,
            ErrorImpl::UnknownOutputType { .. } => ErrorTip::Suggestion(String::from(
                "Output type must be one of parsed, analyzed, optimized, js",
            )),
            ErrorImpl::UndeclaredName { name } => {
                ErrorTip::Suggestion(format!("Declare `{}` with `let` before using it", name))
            }
            ErrorImpl::DuplicateDeclaration { name } => ErrorTip::Suggestion(format!(
                "Assign to `{}` instead of declaring it again",
                name
            )),
            ErrorImpl::DuplicateFunction { function } => {
                ErrorTip::Suggestion(format!("Rename one of the `{}` functions", function))
            }
            ErrorImpl::UndeclaredFunction { function } => ErrorTip::Suggestion(format!(
                "Functions must be declared before they are called, `{}` was not",
                function
            )),
            ErrorImpl::ArityMismatch {
                expected, received, ..
            } => ErrorTip::Suggestion(format!(
                "Expected {} arguments, received {}",
                expected, received
            )),
            ErrorImpl::ArgumentTypeMismatch {
                expected, received, ..
            } => ErrorTip::Suggestion(format!(
                "Expected argument type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::TypeMismatch {
                expected, received, ..
            } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::InvalidSubscript { .. } => ErrorTip::None,
            ErrorImpl::EmptyArrayLiteral => ErrorTip::Suggestion(String::from(
                "Array literals need at least one element to infer their type",
            )),
            ErrorImpl::HeterogeneousArray { expected, .. } => ErrorTip::Suggestion(format!(
                "Every element must have the type of the first, `{}`",
                expected
            )),
            ErrorImpl::ReturnOutsideFunction => ErrorTip::None,
            ErrorImpl::MissingRequiredReturn { return_type, .. } => ErrorTip::Suggestion(
                format!("Add a `return` of type `{}` to the function body", return_type),
            ),
            ErrorImpl::VoidReturnsValue => ErrorTip::Suggestion(String::from(
                "Remove the value or declare a return type with `->`",
            )),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

/// Which rule a `TypeMismatch` was raised by.
#[derive(Debug, Clone, PartialEq)]
pub enum MismatchKind {
    Binary(String),
    Unary(String),
    Exponent,
    Return,
    Assignment,
    Condition,
}

impl Display for MismatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MismatchKind::Binary(op) => write!(f, "operator `{}`", op),
            MismatchKind::Unary(op) => write!(f, "unary operator `{}`", op),
            MismatchKind::Exponent => write!(f, "operator `**`"),
            MismatchKind::Return => write!(f, "return type"),
            MismatchKind::Assignment => write!(f, "assignment"),
            MismatchKind::Condition => write!(f, "loop condition"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SubscriptFault {
    NotAnArray,
    NonNumericIndex,
}

impl Display for SubscriptFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubscriptFault::NotAnArray => write!(f, "only arrays can be subscripted"),
            SubscriptFault::NonNumericIndex => write!(f, "array index must be a number"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("unknown type `{type_}`")]
    UnknownType { type_: String },
    #[error("malformed syntax tree at `{rule}` node")]
    MalformedTree { rule: String },
    #[error("unknown output type `{requested}`")]
    UnknownOutputType { requested: String },

    #[error("identifier `{name}` has not been declared")]
    UndeclaredName { name: String },
    #[error("variable `{name}` already declared in this scope")]
    DuplicateDeclaration { name: String },
    #[error("function `{function}` already declared")]
    DuplicateFunction { function: String },
    #[error("function `{function}` not declared")]
    UndeclaredFunction { function: String },
    #[error("function `{function}` expects {expected} arguments but got {received}")]
    ArityMismatch {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("argument {index} of `{function}` expects type `{expected}` but got `{received}`")]
    ArgumentTypeMismatch {
        function: String,
        index: usize,
        expected: String,
        received: String,
    },
    #[error("type mismatch in {kind}: expected `{expected}`, received `{received}`")]
    TypeMismatch {
        kind: MismatchKind,
        expected: String,
        received: String,
    },
    #[error("{fault}, received `{received}`")]
    InvalidSubscript {
        fault: SubscriptFault,
        received: String,
    },
    #[error("empty arrays are not allowed")]
    EmptyArrayLiteral,
    #[error("array elements must share one type: expected `{expected}`, received `{received}`")]
    HeterogeneousArray { expected: String, received: String },
    #[error("return statement not inside a function")]
    ReturnOutsideFunction,
    #[error("function `{function}` must return a `{return_type}`")]
    MissingRequiredReturn {
        function: String,
        return_type: String,
    },
    #[error("a void function cannot return a value")]
    VoidReturnsValue,
}
