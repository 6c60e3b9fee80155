//! Static semantic analysis.
//!
//! Walks a [`SyntaxNode`] tree, resolves names against a stack of scope
//! frames and a flat function table, type checks every expression and
//! builds the typed [`Program`]. The first violation aborts the walk.

use std::collections::HashMap;

use tracing::trace;

use crate::{
    ast::{
        ast::Program,
        expressions::{
            ArrayExp, BinaryExp, BinaryOp, Call, Expr, Literal, SubscriptExp, UnaryExp, UnaryOp,
            Variable,
        },
        statements::{AssignStmt, Fun, FunDec, PrintStmt, ReturnStmt, Stmt, VarDec, WhileStmt},
        types::{BasicType, Type},
    },
    errors::errors::{Error, ErrorImpl, MismatchKind, SubscriptFault},
    parser::tree::{Rule, SyntaxNode},
    Position,
};

use super::environment::Environment;

pub struct Analyzer {
    /// Innermost frame last; the first frame is the global scope
    environments: Vec<Environment>,
    functions: HashMap<String, Fun>,
    /// Declared return types of the functions being analyzed
    return_types: Vec<Type>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    pub fn new() -> Self {
        Analyzer {
            environments: vec![Environment::new()],
            functions: HashMap::new(),
            return_types: vec![],
        }
    }

    /// Runs `f` inside a fresh scope frame. The frame is popped whether or not
    /// `f` succeeds.
    pub fn with_scope<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, Error>,
    ) -> Result<T, Error> {
        self.environments.push(Environment::new());
        trace!(depth = self.environments.len(), "entered scope");

        let result = f(self);

        self.environments.pop();
        trace!(depth = self.environments.len(), "left scope");
        result
    }

    /// Runs `f` with `return_type` as the innermost function's return type.
    pub fn with_function<T>(
        &mut self,
        return_type: Type,
        f: impl FnOnce(&mut Self) -> Result<T, Error>,
    ) -> Result<T, Error> {
        self.return_types.push(return_type);
        let result = f(self);
        self.return_types.pop();
        result
    }

    pub fn scope_depth(&self) -> usize {
        self.environments.len()
    }

    pub fn declare_variable(&mut self, variable: Variable, position: Position) -> Result<(), Error> {
        trace!(name = %variable.name, ty = %variable.ty, "declared");
        match self.environments.last_mut() {
            Some(environment) => environment.declare_variable(variable, position),
            None => Err(Error::new(
                ErrorImpl::MalformedTree {
                    rule: Rule::Program.to_string(),
                },
                position,
            )),
        }
    }

    /// Looks `name` up from the innermost frame outwards.
    pub fn lookup_variable(&self, name: &str, position: Position) -> Result<Variable, Error> {
        self.environments
            .iter()
            .rev()
            .find_map(|environment| environment.get_variable(name))
            .cloned()
            .ok_or_else(|| {
                Error::new(
                    ErrorImpl::UndeclaredName {
                        name: name.to_string(),
                    },
                    position,
                )
            })
    }

    pub fn analyze_program(&mut self, node: &SyntaxNode) -> Result<Program, Error> {
        if node.rule != Rule::Program {
            return Err(node.malformed());
        }

        let statements = self.analyze_stmts(&node.children)?;
        Ok(Program::new(statements))
    }

    fn analyze_stmts(&mut self, nodes: &[SyntaxNode]) -> Result<Vec<Stmt>, Error> {
        nodes.iter().map(|node| self.analyze_stmt(node)).collect()
    }

    /// Statements of a `Block` node, in the current scope.
    fn analyze_block(&mut self, node: &SyntaxNode) -> Result<Vec<Stmt>, Error> {
        if node.rule != Rule::Block {
            return Err(node.malformed());
        }
        self.analyze_stmts(&node.children)
    }

    pub fn analyze_stmt(&mut self, node: &SyntaxNode) -> Result<Stmt, Error> {
        match node.rule {
            Rule::PrintStmt => {
                let argument = self.analyze_expr(node.child(0)?)?;
                Ok(Stmt::Print(PrintStmt { argument }))
            }
            Rule::VarDec => self.analyze_var_dec(node),
            Rule::AssignStmt => self.analyze_assignment(node),
            Rule::WhileStmt => self.analyze_while(node),
            Rule::FunDec => self.analyze_fun_dec(node),
            Rule::ReturnStmt => self.analyze_return(node),
            Rule::CallStmt => {
                let call = node.child(0)?;
                if call.rule != Rule::Call {
                    return Err(call.malformed());
                }
                Ok(Stmt::Call(self.analyze_call(call)?))
            }
            _ => Err(node.malformed()),
        }
    }

    fn analyze_var_dec(&mut self, node: &SyntaxNode) -> Result<Stmt, Error> {
        let name = identifier(node.child(0)?)?;

        // The initializer cannot see the name it initializes
        let initializer = self.analyze_expr(node.child(1)?)?;
        let variable = Variable {
            name: name.text.clone(),
            ty: initializer.ty(),
        };
        self.declare_variable(variable.clone(), name.span.start.clone())?;

        Ok(Stmt::VarDec(VarDec {
            variable,
            initializer,
        }))
    }

    fn analyze_assignment(&mut self, node: &SyntaxNode) -> Result<Stmt, Error> {
        let target_node = node.child(0)?;
        let target = match target_node.rule {
            Rule::Id | Rule::Subscript => self.analyze_expr(target_node)?,
            _ => return Err(target_node.malformed()),
        };

        let source_node = node.child(1)?;
        let source = self.analyze_expr(source_node)?;
        expect_type(
            MismatchKind::Assignment,
            &target.ty(),
            &source.ty(),
            &source_node.span.start,
        )?;

        Ok(Stmt::Assign(AssignStmt { target, source }))
    }

    fn analyze_while(&mut self, node: &SyntaxNode) -> Result<Stmt, Error> {
        let test_node = node.child(0)?;
        let test = self.analyze_expr(test_node)?;
        expect_type(
            MismatchKind::Condition,
            &Type::BOOL,
            &test.ty(),
            &test_node.span.start,
        )?;

        let block = node.child(1)?;
        let body = self.with_scope(|analyzer| analyzer.analyze_block(block))?;

        Ok(Stmt::While(WhileStmt { test, body }))
    }

    fn analyze_fun_dec(&mut self, node: &SyntaxNode) -> Result<Stmt, Error> {
        let name = identifier(node.child(0)?)?;
        if self.functions.contains_key(&name.text) {
            return Err(Error::new(
                ErrorImpl::DuplicateFunction {
                    function: name.text.clone(),
                },
                name.span.start.clone(),
            ));
        }

        let params_node = node.child(1)?;
        if params_node.rule != Rule::Params {
            return Err(params_node.malformed());
        }

        let mut params = vec![];
        let mut param_positions = vec![];
        for param in &params_node.children {
            if param.rule != Rule::Param {
                return Err(param.malformed());
            }
            let param_name = identifier(param.child(0)?)?;
            params.push(Variable {
                name: param_name.text.clone(),
                ty: resolve_type(param.child(1)?)?,
            });
            param_positions.push(param_name.span.start.clone());
        }

        let (return_type, block) = match node.children.len() {
            3 => (Type::VOID, node.child(2)?),
            4 => (resolve_type(node.child(2)?)?, node.child(3)?),
            _ => return Err(node.malformed()),
        };

        let fun = Fun {
            name: name.text.clone(),
            params,
            return_type,
        };
        // Registered before the body so the function can call itself
        self.functions.insert(fun.name.clone(), fun.clone());
        trace!(function = %fun.name, "declared function");

        let body = self.with_scope(|analyzer| {
            for (param, position) in fun.params.iter().zip(param_positions) {
                analyzer.declare_variable(param.clone(), position)?;
            }

            analyzer.with_function(fun.return_type.clone(), |analyzer| {
                analyzer.analyze_block(block)
            })
        })?;

        if fun.return_type != Type::VOID && !contains_return(&body) {
            return Err(Error::new(
                ErrorImpl::MissingRequiredReturn {
                    function: fun.name.clone(),
                    return_type: fun.return_type.to_string(),
                },
                name.span.start.clone(),
            ));
        }

        Ok(Stmt::FunDec(FunDec { fun, body }))
    }

    fn analyze_return(&mut self, node: &SyntaxNode) -> Result<Stmt, Error> {
        let position = node.span.start.clone();
        let expected = self
            .return_types
            .last()
            .cloned()
            .ok_or_else(|| Error::new(ErrorImpl::ReturnOutsideFunction, position.clone()))?;

        let expression = match node.children.first() {
            Some(child) => Some(self.analyze_expr(child)?),
            None => None,
        };

        match (&expected, &expression) {
            (Type::Basic(BasicType::Void), Some(_)) => {
                return Err(Error::new(ErrorImpl::VoidReturnsValue, position));
            }
            (Type::Basic(BasicType::Void), None) => {}
            (_, None) => {
                return Err(mismatch(MismatchKind::Return, &expected, &Type::VOID, &position));
            }
            (_, Some(value)) => {
                expect_type(MismatchKind::Return, &expected, &value.ty(), &position)?;
            }
        }

        Ok(Stmt::Return(ReturnStmt { expression }))
    }

    pub fn analyze_expr(&mut self, node: &SyntaxNode) -> Result<Expr, Error> {
        match node.rule {
            Rule::Num => Ok(Expr::Literal(parse_number(node)?)),
            Rule::Str => Ok(Expr::Literal(Literal::Str(node.text.clone()))),
            Rule::True => Ok(Expr::Literal(Literal::Bool(true))),
            Rule::False => Ok(Expr::Literal(Literal::Bool(false))),
            Rule::Id => Ok(Expr::Variable(
                self.lookup_variable(&node.text, node.span.start.clone())?,
            )),
            Rule::Binary => self.analyze_binary(node),
            Rule::Unary => self.analyze_unary(node),
            Rule::ArrayLit => self.analyze_array(node),
            Rule::Subscript => self.analyze_subscript(node),
            Rule::Call => Ok(Expr::Call(self.analyze_call(node)?)),
            _ => Err(node.malformed()),
        }
    }

    fn analyze_binary(&mut self, node: &SyntaxNode) -> Result<Expr, Error> {
        let left = self.analyze_expr(node.child(0)?)?;
        let op_node = node.child(1)?;
        let right = self.analyze_expr(node.child(2)?)?;

        let op = BinaryOp::from_symbol(&op_node.text).ok_or_else(|| op_node.malformed())?;
        let position = &op_node.span.start;
        let (left_type, right_type) = (left.ty(), right.ty());

        let ty = match op {
            _ if op.is_relational() => {
                expect_type(binary_kind(op), &left_type, &right_type, position)?;
                Type::BOOL
            }
            BinaryOp::Add | BinaryOp::Subtract | BinaryOp::Coalesce => {
                expect_type(binary_kind(op), &left_type, &right_type, position)?;
                left_type
            }
            BinaryOp::Multiply | BinaryOp::Divide | BinaryOp::Modulo => {
                expect_type(binary_kind(op), &Type::NUM, &left_type, position)?;
                expect_type(binary_kind(op), &Type::NUM, &right_type, position)?;
                Type::NUM
            }
            BinaryOp::Power => {
                expect_type(MismatchKind::Exponent, &Type::NUM, &left_type, position)?;
                expect_type(MismatchKind::Exponent, &Type::NUM, &right_type, position)?;
                Type::NUM
            }
            _ => return Err(op_node.malformed()),
        };

        Ok(Expr::Binary(BinaryExp {
            op,
            left: Box::new(left),
            right: Box::new(right),
            ty,
        }))
    }

    fn analyze_unary(&mut self, node: &SyntaxNode) -> Result<Expr, Error> {
        let op_node = node.child(0)?;
        let operand = self.analyze_expr(node.child(1)?)?;

        let op = UnaryOp::from_symbol(&op_node.text).ok_or_else(|| op_node.malformed())?;
        let ty = match op {
            UnaryOp::Negate => Type::NUM,
            UnaryOp::Not => Type::BOOL,
        };
        expect_type(
            MismatchKind::Unary(op.as_str().to_string()),
            &ty,
            &operand.ty(),
            &op_node.span.start,
        )?;

        Ok(Expr::Unary(UnaryExp {
            op,
            operand: Box::new(operand),
            ty,
        }))
    }

    fn analyze_array(&mut self, node: &SyntaxNode) -> Result<Expr, Error> {
        let elements = node
            .children
            .iter()
            .map(|child| self.analyze_expr(child))
            .collect::<Result<Vec<_>, _>>()?;

        let element_type = match elements.first() {
            Some(first) => first.ty(),
            None => return Err(Error::new(ErrorImpl::EmptyArrayLiteral, node.span.start.clone())),
        };

        for (element, child) in elements.iter().zip(&node.children).skip(1) {
            let ty = element.ty();
            if ty != element_type {
                return Err(Error::new(
                    ErrorImpl::HeterogeneousArray {
                        expected: element_type.to_string(),
                        received: ty.to_string(),
                    },
                    child.span.start.clone(),
                ));
            }
        }

        Ok(Expr::Array(ArrayExp {
            elements,
            ty: Type::array_of(element_type),
        }))
    }

    fn analyze_subscript(&mut self, node: &SyntaxNode) -> Result<Expr, Error> {
        let array_node = node.child(0)?;
        let index_node = node.child(1)?;
        let array = self.analyze_expr(array_node)?;
        let index = self.analyze_expr(index_node)?;

        let array_type = array.ty();
        let ty = match array_type.element() {
            Some(element) => element.clone(),
            None => {
                return Err(Error::new(
                    ErrorImpl::InvalidSubscript {
                        fault: SubscriptFault::NotAnArray,
                        received: array_type.to_string(),
                    },
                    array_node.span.start.clone(),
                ))
            }
        };

        let index_type = index.ty();
        if index_type != Type::NUM {
            return Err(Error::new(
                ErrorImpl::InvalidSubscript {
                    fault: SubscriptFault::NonNumericIndex,
                    received: index_type.to_string(),
                },
                index_node.span.start.clone(),
            ));
        }

        Ok(Expr::Subscript(SubscriptExp {
            array: Box::new(array),
            index: Box::new(index),
            ty,
        }))
    }

    fn analyze_call(&mut self, node: &SyntaxNode) -> Result<Call, Error> {
        let name = identifier(node.child(0)?)?;
        let fun = self.functions.get(&name.text).cloned().ok_or_else(|| {
            Error::new(
                ErrorImpl::UndeclaredFunction {
                    function: name.text.clone(),
                },
                name.span.start.clone(),
            )
        })?;

        let arg_nodes = &node.children[1..];
        if arg_nodes.len() != fun.params.len() {
            return Err(Error::new(
                ErrorImpl::ArityMismatch {
                    function: fun.name.clone(),
                    expected: fun.params.len(),
                    received: arg_nodes.len(),
                },
                name.span.start.clone(),
            ));
        }

        let mut args = vec![];
        for (index, (arg_node, param)) in arg_nodes.iter().zip(&fun.params).enumerate() {
            let arg = self.analyze_expr(arg_node)?;
            let ty = arg.ty();
            if ty != param.ty {
                return Err(Error::new(
                    ErrorImpl::ArgumentTypeMismatch {
                        function: fun.name.clone(),
                        index: index + 1,
                        expected: param.ty.to_string(),
                        received: ty.to_string(),
                    },
                    arg_node.span.start.clone(),
                ));
            }
            args.push(arg);
        }

        Ok(Call {
            name: fun.name,
            args,
            ty: fun.return_type,
        })
    }
}

/// Analyzes a parse tree into a typed [`Program`].
pub fn analyze(tree: &SyntaxNode) -> Result<Program, Error> {
    Analyzer::new().analyze_program(tree)
}

fn identifier(node: &SyntaxNode) -> Result<&SyntaxNode, Error> {
    if node.rule == Rule::Id {
        Ok(node)
    } else {
        Err(node.malformed())
    }
}

fn binary_kind(op: BinaryOp) -> MismatchKind {
    MismatchKind::Binary(op.as_str().to_string())
}

fn mismatch(kind: MismatchKind, expected: &Type, received: &Type, position: &Position) -> Error {
    Error::new(
        ErrorImpl::TypeMismatch {
            kind,
            expected: expected.to_string(),
            received: received.to_string(),
        },
        position.clone(),
    )
}

fn expect_type(
    kind: MismatchKind,
    expected: &Type,
    received: &Type,
    position: &Position,
) -> Result<(), Error> {
    if expected == received {
        Ok(())
    } else {
        Err(mismatch(kind, expected, received, position))
    }
}

/// Resolves a `Type` / `ArrayType` annotation.
pub fn resolve_type(node: &SyntaxNode) -> Result<Type, Error> {
    match node.rule {
        Rule::Type => BasicType::from_name(&node.text)
            .map(Type::Basic)
            .ok_or_else(|| {
                Error::new(
                    ErrorImpl::UnknownType {
                        type_: node.text.clone(),
                    },
                    node.span.start.clone(),
                )
            }),
        Rule::ArrayType => Ok(Type::array_of(resolve_type(node.child(0)?)?)),
        _ => Err(node.malformed()),
    }
}

/// A `return` among `body` or inside one of its loops. Nested functions answer
/// for their own returns.
fn contains_return(body: &[Stmt]) -> bool {
    body.iter().any(|stmt| match stmt {
        Stmt::Return(_) => true,
        Stmt::While(while_stmt) => contains_return(&while_stmt.body),
        _ => false,
    })
}

/// `12`, `3.5`, `1.2e+5` become numbers, `12n` an extended-precision integer.
fn parse_number(node: &SyntaxNode) -> Result<Literal, Error> {
    let error = || {
        Error::new(
            ErrorImpl::NumberParseError {
                token: node.text.clone(),
            },
            node.span.start.clone(),
        )
    };

    match node.text.strip_suffix('n') {
        Some(digits) => digits.parse::<i128>().map(Literal::BigInt).map_err(|_| error()),
        None => node.text.parse::<f64>().map(Literal::Number).map_err(|_| error()),
    }
}
