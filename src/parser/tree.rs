//! Concrete syntax tree produced by the parser.
//!
//! Each node records the grammar rule it matched, the raw source text it
//! covers, and its ordered children. Punctuation is dropped; operators are
//! kept as `Op` leaves so the analyzer sees exactly one child per
//! meaningful part of the rule.

use std::fmt::Display;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Span,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Program,
    Block,

    PrintStmt,
    VarDec,
    AssignStmt,
    WhileStmt,
    FunDec,
    Params,
    Param,
    ReturnStmt,
    CallStmt,

    Type,
    ArrayType,

    Binary,
    Unary,
    Call,
    ArrayLit,
    Subscript,

    Id,
    Op,
    Num,
    Str,
    True,
    False,
}

impl Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxNode {
    pub rule: Rule,
    pub text: String,
    pub span: Span,
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    pub fn new(rule: Rule, text: String, span: Span, children: Vec<SyntaxNode>) -> Self {
        SyntaxNode {
            rule,
            text,
            span,
            children,
        }
    }

    /// The `index`th child, or a `MalformedTree` error naming this rule.
    pub fn child(&self, index: usize) -> Result<&SyntaxNode, Error> {
        self.children.get(index).ok_or_else(|| self.malformed())
    }

    pub fn malformed(&self) -> Error {
        Error::new(
            ErrorImpl::MalformedTree {
                rule: self.rule.to_string(),
            },
            self.span.start.clone(),
        )
    }
}
