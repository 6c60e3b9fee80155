use std::collections::HashMap;

use crate::{
    ast::expressions::Variable,
    errors::errors::{Error, ErrorImpl},
    Position,
};

/// One lexical scope frame.
#[derive(Debug, Default)]
pub struct Environment {
    pub variable_lookup: HashMap<String, Variable>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            variable_lookup: HashMap::new(),
        }
    }

    /// Binds `variable` in this frame. A name may be bound once per frame.
    pub fn declare_variable(&mut self, variable: Variable, position: Position) -> Result<(), Error> {
        if self.variable_lookup.contains_key(&variable.name) {
            Err(Error::new(
                ErrorImpl::DuplicateDeclaration {
                    name: variable.name,
                },
                position,
            ))
        } else {
            self.variable_lookup.insert(variable.name.clone(), variable);
            Ok(())
        }
    }

    pub fn get_variable(&self, name: &str) -> Option<&Variable> {
        self.variable_lookup.get(name)
    }
}
