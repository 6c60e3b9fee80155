//! JavaScript code generation module.
//!
//! This module turns the typed (and usually optimized) AST into JavaScript
//! source text:
//!
//! - `generator`: The Generator context (rename table, output, indentation)
//! - `stmt`: Statement emission
//! - `expr`: Expression and literal emission

pub mod expr;
pub mod generator;
pub mod stmt;
