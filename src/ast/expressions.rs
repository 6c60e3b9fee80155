//! Typed expression nodes.
//!
//! `Expr` is a closed sum: every stage after the analyzer matches on it
//! exhaustively. Each variant knows its static type through [`Expr::ty`].

use super::types::Type;

/// A literal value already reduced to its runtime representation.
///
/// Numbers compare by bit pattern with every `NaN` equal to every other, so a
/// folded `0 / 0` equals itself and `0` differs from `-0`.
#[derive(Debug, Clone)]
pub enum Literal {
    Number(f64),
    /// Extended-precision integer, written `12n` in source.
    BigInt(i128),
    Str(String),
    Bool(bool),
    Null,
    Undefined,
}

impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Literal::Number(left), Literal::Number(right)) => {
                left.to_bits() == right.to_bits() || (left.is_nan() && right.is_nan())
            }
            (Literal::BigInt(left), Literal::BigInt(right)) => left == right,
            (Literal::Str(left), Literal::Str(right)) => left == right,
            (Literal::Bool(left), Literal::Bool(right)) => left == right,
            (Literal::Null, Literal::Null) | (Literal::Undefined, Literal::Undefined) => true,
            _ => false,
        }
    }
}

impl Literal {
    pub fn ty(&self) -> Type {
        match self {
            Literal::Number(_) | Literal::BigInt(_) => Type::NUM,
            Literal::Str(_) => Type::STR,
            Literal::Bool(_) => Type::BOOL,
            Literal::Null | Literal::Undefined => Type::ANY,
        }
    }

    /// Numeric zero of either representation.
    pub fn is_zero(&self) -> bool {
        match self {
            Literal::Number(value) => *value == 0.0,
            Literal::BigInt(value) => *value == 0,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub ty: Type,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Equals,
    NotEquals,
    Less,
    LessEquals,
    Greater,
    GreaterEquals,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
    /// `??`, produced only by hand-built trees
    Coalesce,
}

impl BinaryOp {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "==" => BinaryOp::Equals,
            "!=" => BinaryOp::NotEquals,
            "<" => BinaryOp::Less,
            "<=" => BinaryOp::LessEquals,
            ">" => BinaryOp::Greater,
            ">=" => BinaryOp::GreaterEquals,
            "+" => BinaryOp::Add,
            "-" => BinaryOp::Subtract,
            "*" => BinaryOp::Multiply,
            "/" => BinaryOp::Divide,
            "%" => BinaryOp::Modulo,
            "**" => BinaryOp::Power,
            "??" => BinaryOp::Coalesce,
            _ => return None,
        };
        Some(op)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Equals => "==",
            BinaryOp::NotEquals => "!=",
            BinaryOp::Less => "<",
            BinaryOp::LessEquals => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEquals => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
            BinaryOp::Power => "**",
            BinaryOp::Coalesce => "??",
        }
    }

    pub fn is_relational(&self) -> bool {
        matches!(
            self,
            BinaryOp::Equals
                | BinaryOp::NotEquals
                | BinaryOp::Less
                | BinaryOp::LessEquals
                | BinaryOp::Greater
                | BinaryOp::GreaterEquals
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Negate,
    Not,
}

impl UnaryOp {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "-" => Some(UnaryOp::Negate),
            "!" => Some(UnaryOp::Not),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Negate => "-",
            UnaryOp::Not => "!",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExp {
    pub op: BinaryOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExp {
    pub op: UnaryOp,
    pub operand: Box<Expr>,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayExp {
    pub elements: Vec<Expr>,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptExp {
    pub array: Box<Expr>,
    pub index: Box<Expr>,
    /// Element type of `array`
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub name: String,
    pub args: Vec<Expr>,
    /// The callee's declared return type
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Variable(Variable),
    Binary(BinaryExp),
    Unary(UnaryExp),
    Array(ArrayExp),
    Subscript(SubscriptExp),
    Call(Call),
}

impl Expr {
    pub fn ty(&self) -> Type {
        match self {
            Expr::Literal(literal) => literal.ty(),
            Expr::Variable(variable) => variable.ty.clone(),
            Expr::Binary(binary) => binary.ty.clone(),
            Expr::Unary(unary) => unary.ty.clone(),
            Expr::Array(array) => array.ty.clone(),
            Expr::Subscript(subscript) => subscript.ty.clone(),
            Expr::Call(call) => call.ty.clone(),
        }
    }

    pub fn number(value: f64) -> Self {
        Expr::Literal(Literal::Number(value))
    }

    pub fn variable(name: &str, ty: Type) -> Self {
        Expr::Variable(Variable {
            name: name.to_string(),
            ty,
        })
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr, ty: Type) -> Self {
        Expr::Binary(BinaryExp {
            op,
            left: Box::new(left),
            right: Box::new(right),
            ty,
        })
    }

    pub fn unary(op: UnaryOp, operand: Expr, ty: Type) -> Self {
        Expr::Unary(UnaryExp {
            op,
            operand: Box::new(operand),
            ty,
        })
    }
}
