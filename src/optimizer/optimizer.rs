//! Constant folding over the typed AST.
//!
//! One bottom-up pass: operands are optimized first, then the node itself is
//! folded or rebuilt. The pass never fails; anything it cannot fold is kept.

use tracing::trace;

use crate::ast::{
    ast::Program,
    expressions::{
        ArrayExp, BinaryExp, BinaryOp, Call, Expr, Literal, SubscriptExp, UnaryExp, UnaryOp,
    },
    statements::{AssignStmt, FunDec, PrintStmt, ReturnStmt, Stmt, VarDec, WhileStmt},
};

pub fn optimize(program: Program) -> Program {
    Program::new(optimize_stmts(program.statements))
}

fn optimize_stmts(statements: Vec<Stmt>) -> Vec<Stmt> {
    statements.into_iter().map(optimize_stmt).collect()
}

pub fn optimize_stmt(stmt: Stmt) -> Stmt {
    match stmt {
        Stmt::Print(print) => Stmt::Print(PrintStmt {
            argument: optimize_expr(print.argument),
        }),
        Stmt::VarDec(dec) => Stmt::VarDec(VarDec {
            variable: dec.variable,
            initializer: optimize_expr(dec.initializer),
        }),
        Stmt::Assign(assign) => Stmt::Assign(AssignStmt {
            target: optimize_expr(assign.target),
            source: optimize_expr(assign.source),
        }),
        Stmt::While(while_stmt) => Stmt::While(WhileStmt {
            test: optimize_expr(while_stmt.test),
            body: optimize_stmts(while_stmt.body),
        }),
        Stmt::FunDec(fun_dec) => Stmt::FunDec(FunDec {
            fun: fun_dec.fun,
            body: optimize_stmts(fun_dec.body),
        }),
        Stmt::Return(ret) => Stmt::Return(ReturnStmt {
            expression: ret.expression.map(optimize_expr),
        }),
        Stmt::Call(call) => Stmt::Call(optimize_call(call)),
    }
}

pub fn optimize_expr(expr: Expr) -> Expr {
    match expr {
        Expr::Literal(_) | Expr::Variable(_) => expr,
        Expr::Binary(binary) => optimize_binary(binary),
        Expr::Unary(unary) => optimize_unary(unary),
        Expr::Array(array) => Expr::Array(ArrayExp {
            elements: array.elements.into_iter().map(optimize_expr).collect(),
            ty: array.ty,
        }),
        Expr::Subscript(subscript) => Expr::Subscript(SubscriptExp {
            array: Box::new(optimize_expr(*subscript.array)),
            index: Box::new(optimize_expr(*subscript.index)),
            ty: subscript.ty,
        }),
        Expr::Call(call) => Expr::Call(optimize_call(call)),
    }
}

fn optimize_call(call: Call) -> Call {
    Call {
        name: call.name,
        args: call.args.into_iter().map(optimize_expr).collect(),
        ty: call.ty,
    }
}

fn optimize_binary(binary: BinaryExp) -> Expr {
    let BinaryExp {
        op,
        left,
        right,
        ty,
    } = binary;
    let left = optimize_expr(*left);
    let right = optimize_expr(*right);

    if let (Expr::Literal(l), Expr::Literal(r)) = (&left, &right) {
        if let Some(folded) = fold_arithmetic(op, l, r) {
            trace!(op = op.as_str(), ?folded, "folded binary");
            return Expr::Literal(folded);
        }
    }

    let zero_left = matches!(&left, Expr::Literal(literal) if literal.is_zero());
    let nullish_left = matches!(left, Expr::Literal(Literal::Null | Literal::Undefined));

    match op {
        BinaryOp::Subtract if zero_left => Expr::unary(UnaryOp::Negate, right, ty),
        BinaryOp::Coalesce if nullish_left => right,
        _ => Expr::binary(op, left, right, ty),
    }
}

fn optimize_unary(unary: UnaryExp) -> Expr {
    let UnaryExp { op, operand, ty } = unary;
    let operand = optimize_expr(*operand);

    if op == UnaryOp::Negate {
        let negated = match &operand {
            Expr::Literal(Literal::Number(value)) => Some(Literal::Number(-value)),
            Expr::Literal(Literal::BigInt(value)) => value.checked_neg().map(Literal::BigInt),
            _ => None,
        };
        if let Some(negated) = negated {
            return Expr::Literal(negated);
        }
    }

    Expr::unary(op, operand, ty)
}

/// `+ - * /` over two numeric literals. Two BigInts stay a BigInt; any other
/// pairing is computed in floating point. `None` when the operator does not
/// fold or BigInt arithmetic overflows or divides by zero.
fn fold_arithmetic(op: BinaryOp, left: &Literal, right: &Literal) -> Option<Literal> {
    match (left, right) {
        (Literal::BigInt(l), Literal::BigInt(r)) => {
            let value = match op {
                BinaryOp::Add => l.checked_add(*r),
                BinaryOp::Subtract => l.checked_sub(*r),
                BinaryOp::Multiply => l.checked_mul(*r),
                BinaryOp::Divide => l.checked_div(*r),
                _ => None,
            };
            value.map(Literal::BigInt)
        }
        _ => {
            let (l, r) = (as_float(left)?, as_float(right)?);
            let value = match op {
                BinaryOp::Add => l + r,
                BinaryOp::Subtract => l - r,
                BinaryOp::Multiply => l * r,
                BinaryOp::Divide => l / r,
                _ => return None,
            };
            Some(Literal::Number(value))
        }
    }
}

fn as_float(literal: &Literal) -> Option<f64> {
    match literal {
        Literal::Number(value) => Some(*value),
        Literal::BigInt(value) => Some(*value as f64),
        _ => None,
    }
}
