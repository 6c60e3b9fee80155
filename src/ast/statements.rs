//! Typed statement nodes.

use super::{
    expressions::{Call, Expr, Variable},
    types::Type,
};

#[derive(Debug, Clone, PartialEq)]
pub struct PrintStmt {
    pub argument: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDec {
    pub variable: Variable,
    pub initializer: Expr,
}

/// `target` is either an `Expr::Variable` or an `Expr::Subscript`.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignStmt {
    pub target: Expr,
    pub source: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub test: Expr,
    pub body: Vec<Stmt>,
}

/// A function signature, as stored in the function table.
#[derive(Debug, Clone, PartialEq)]
pub struct Fun {
    pub name: String,
    pub params: Vec<Variable>,
    pub return_type: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunDec {
    pub fun: Fun,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub expression: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Print(PrintStmt),
    VarDec(VarDec),
    Assign(AssignStmt),
    While(WhileStmt),
    FunDec(FunDec),
    Return(ReturnStmt),
    /// A call whose result is discarded
    Call(Call),
}
