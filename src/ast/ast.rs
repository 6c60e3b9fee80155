use super::statements::Stmt;

/// Root of a typed tree. The analyzer builds it, the optimizer rebuilds it,
/// and the generator reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn new(statements: Vec<Stmt>) -> Self {
        Program { statements }
    }
}
