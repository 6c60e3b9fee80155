//! Type parsing implementation.
//!
//! This module handles parsing of type annotations. It supports:
//!
//! - Named types (`num`, `str`, `bool`, `void`, `any`)
//! - Array types (`num[]`, `str[][]`)
//!
//! Similar to expression parsing, it uses NUD/LED handlers with
//! binding powers. Whether a name denotes a real type is decided by the
//! analyzer, so any identifier is accepted here.

use std::collections::HashMap;

use crate::{errors::errors::Error, lexer::tokens::TokenKind};

use super::{
    lookups::BindingPower,
    parser::Parser,
    tree::{Rule, SyntaxNode},
};

/// Type alias for type null denotation handler functions.
pub type TypeNUDHandler = fn(&mut Parser) -> Result<SyntaxNode, Error>;

/// Type alias for type left denotation handler functions.
pub type TypeLEDHandler = fn(&mut Parser, SyntaxNode, BindingPower) -> Result<SyntaxNode, Error>;

/// Type alias for type NUD lookup table.
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

/// Type alias for type LED lookup table.
pub type TypeLEDLookup = HashMap<TokenKind, TypeLEDHandler>;

/// Type alias for type binding power lookup table.
pub type TypeBPLookup = HashMap<TokenKind, BindingPower>;

/// Initializes the type parsing lookup tables.
pub fn create_token_type_lookups(parser: &mut Parser) {
    parser.type_nud(TokenKind::Identifier, parse_named_type);
    parser.type_led(TokenKind::OpenBracket, BindingPower::Call, parse_array_type);
}

pub fn parse_named_type(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let token = parser.expect(TokenKind::Identifier)?;
    Ok(parser.leaf(Rule::Type, &token))
}

pub fn parse_array_type(
    parser: &mut Parser,
    left: SyntaxNode,
    _bp: BindingPower,
) -> Result<SyntaxNode, Error> {
    parser.expect(TokenKind::OpenBracket)?;
    parser.expect(TokenKind::CloseBracket)?;

    let start = left.span.start.clone();
    Ok(parser.finish_node(Rule::ArrayType, start, vec![left]))
}

pub fn parse_type(parser: &mut Parser, bp: BindingPower) -> Result<SyntaxNode, Error> {
    let nud = parser
        .get_type_nud_handler(parser.current_token_kind())
        .ok_or_else(|| parser.unexpected())?;
    let mut left = nud(parser)?;

    while parser.get_type_binding_power(parser.current_token_kind()) > bp {
        let kind = parser.current_token_kind();
        let led = parser
            .get_type_led_handler(kind)
            .ok_or_else(|| parser.unexpected())?;

        let binding_power = parser.get_type_binding_power(kind);
        left = led(parser, left, binding_power)?;
    }

    Ok(left)
}
