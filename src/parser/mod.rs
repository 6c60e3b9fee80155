//! Parser module for building the concrete syntax tree.
//!
//! This module contains the parser that transforms a stream of tokens
//! into a tree of `SyntaxNode`s. It uses a Pratt parser for expressions
//! with proper operator precedence and handles:
//!
//! - Statement parsing (declarations, assignments, functions, loops)
//! - Expression parsing (binary ops, prefix ops, calls, subscripts, literals)
//! - Type parsing for parameter and return annotations
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod tree;
pub mod types;
