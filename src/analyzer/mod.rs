//! Semantic analysis: scoping and type checking.
//!
//! Turns the parser's concrete syntax tree into the typed AST consumed by
//! the optimizer and generator.

pub mod analyzer;
pub mod environment;

#[cfg(test)]
mod tests;
