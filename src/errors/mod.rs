//! Error types and error handling for the compiler.
//!
//! This module defines the single error type shared by every stage of the
//! pipeline. It includes:
//!
//! - Error structures with source position information
//! - The semantic error taxonomy raised by the analyzer
//! - Front-end errors raised by the lexer and parser
//! - Helpful error messages and suggestions

pub mod errors;

#[cfg(test)]
mod tests;
