/// AST (Abstract Syntax Tree) module
/// Contains the typed tree shared by the analyzer, optimizer and generator
///
/// Submodules:
/// - ast: The `Program` root
/// - expressions: Literals, variables and the closed `Expr` sum
/// - statements: The closed `Stmt` sum and function signatures
/// - types: Type descriptors
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
