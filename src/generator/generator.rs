//! Main generator module.
//!
//! This module contains the Generator structure, which holds the state of one
//! JavaScript emission pass: the rename table for declared variables and the
//! lines emitted so far.

use std::collections::HashMap;

use tracing::trace;

use crate::ast::ast::Program;

use super::stmt::gen_statement;

/// State of a single `generate` call.
///
/// Every `let` receives a fresh name `<name>_<N>`, where `N` counts the
/// declarations of `<name>` seen so far across the whole program. Scopes
/// play no part in the numbering.
#[derive(Debug, Default)]
pub struct Generator {
    /// Declarations seen per source name
    name_counts: HashMap<String, usize>,
    /// Original name to its most recent generated name
    name_map: HashMap<String, String>,
    /// Emitted lines, already indented
    output: Vec<String>,
    /// Current nesting depth of function and loop bodies
    indent: usize,
}

impl Generator {
    pub fn new() -> Self {
        Generator::default()
    }

    /// Allocates the next generated name for `name` and makes it the one
    /// later reads resolve to.
    pub fn rename(&mut self, name: &str) -> String {
        let count = self.name_counts.entry(name.to_string()).or_insert(0);
        *count += 1;

        let unique = format!("{}_{}", name, count);
        trace!(from = name, to = %unique, "renamed");
        self.name_map.insert(name.to_string(), unique.clone());
        unique
    }

    /// The generated name for `name`, or `name` itself if it was never declared
    /// with `let`.
    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.name_map.get(name).map(String::as_str).unwrap_or(name)
    }

    pub fn emit(&mut self, line: String) {
        self.output.push(format!("{}{}", "  ".repeat(self.indent), line));
    }

    /// Emits `body` one level deeper than the current line.
    pub fn indented(&mut self, body: impl FnOnce(&mut Self)) {
        self.indent += 1;
        body(self);
        self.indent -= 1;
    }

    pub fn finish(self) -> String {
        self.output.join("\n")
    }
}

/// Generates JavaScript for a typed program.
pub fn generate(program: &Program) -> String {
    let mut generator = Generator::new();

    for statement in &program.statements {
        gen_statement(&mut generator, statement);
    }

    generator.finish()
}
