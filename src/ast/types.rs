//! Type descriptors for the typed AST.
//!
//! Every expression the analyzer produces carries one of these. Two types
//! are the same type exactly when they are structurally equal, so `num[][]`
//! only matches another `num[][]`.

use std::fmt::Display;

/// The named scalar types of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasicType {
    Num,
    Str,
    Bool,
    Void,
    Any,
}

impl BasicType {
    pub fn name(&self) -> &'static str {
        match self {
            BasicType::Num => "num",
            BasicType::Str => "str",
            BasicType::Bool => "bool",
            BasicType::Void => "void",
            BasicType::Any => "any",
        }
    }

    /// Resolves a type name written in source.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "num" => Some(BasicType::Num),
            "str" => Some(BasicType::Str),
            "bool" => Some(BasicType::Bool),
            "void" => Some(BasicType::Void),
            "any" => Some(BasicType::Any),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Basic(BasicType),
    Array(Box<Type>),
}

impl Type {
    pub const NUM: Type = Type::Basic(BasicType::Num);
    pub const STR: Type = Type::Basic(BasicType::Str);
    pub const BOOL: Type = Type::Basic(BasicType::Bool);
    pub const VOID: Type = Type::Basic(BasicType::Void);
    pub const ANY: Type = Type::Basic(BasicType::Any);

    pub fn array_of(element: Type) -> Type {
        Type::Array(Box::new(element))
    }

    /// Element type if this is an array type.
    pub fn element(&self) -> Option<&Type> {
        match self {
            Type::Array(element) => Some(element),
            Type::Basic(_) => None,
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Basic(basic) => write!(f, "{}", basic.name()),
            Type::Array(element) => write!(f, "{}[]", element),
        }
    }
}
