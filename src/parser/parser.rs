//! Token cursor and handler tables for the boum Pratt parser.
//!
//! `parse` turns the token stream into a `Program` node of the concrete
//! syntax tree. Statements dispatch on their leading token, expressions and
//! type annotations on NUD/LED tables keyed by `TokenKind`.

use std::{collections::HashMap, rc::Rc};

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position, Span, MK_TOKEN,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
    tree::{Rule, SyntaxNode},
    types::{
        create_token_type_lookups, TypeBPLookup, TypeLEDHandler, TypeLEDLookup, TypeNUDHandler,
        TypeNUDLookup,
    },
};

/// Cursor over a token stream plus the handler tables that drive it.
///
/// Interior nodes copy the slice of `source` they cover, so the parser keeps
/// its own copy of the text.
pub struct Parser {
    /// Always terminated by `EOF`
    tokens: Vec<Token>,
    pos: usize,
    source: String,
    stmt_lookup: StmtLookup,
    nud_lookup: NUDLookup,
    led_lookup: LEDLookup,
    binding_power_lookup: BPLookup,
    type_nud_lookup: TypeNUDLookup,
    type_led_lookup: TypeLEDLookup,
    type_binding_power_lookup: TypeBPLookup,
}

impl Parser {
    /// Creates a parser with empty handler tables.
    ///
    /// # Arguments
    ///
    /// * `tokens` - Output of `tokenize`; an `EOF` token is appended when missing
    /// * `source` - Text the tokens were cut from, sliced into interior nodes
    ///
    /// # Returns
    ///
    /// A parser positioned on the first token. Handlers are registered by
    /// `create_token_lookups` and `create_token_type_lookups`.
    pub fn new(mut tokens: Vec<Token>, source: &str) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let end = tokens
                .last()
                .map(|token| token.span.end.clone())
                .unwrap_or_else(Position::null);
            tokens.push(MK_TOKEN!(
                TokenKind::EOF,
                String::from("EOF"),
                Span {
                    start: end.clone(),
                    end
                }
            ));
        }

        Parser {
            tokens,
            pos: 0,
            source: source.to_string(),
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            type_nud_lookup: HashMap::new(),
            type_led_lookup: HashMap::new(),
            type_binding_power_lookup: HashMap::new(),
        }
    }

    /// Returns the token under the cursor without consuming it.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Returns the kind of the token under the cursor.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Consumes the current token and returns it.
    ///
    /// The cursor stops on the trailing `EOF`, so calling this at the end of
    /// input keeps returning `EOF`.
    pub fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Consumes a token of `expected_kind` or fails.
    ///
    /// # Arguments
    ///
    /// * `expected_kind` - Kind the current token must have
    /// * `error` - Error to report on mismatch; `None` reports `UnexpectedToken`
    ///
    /// # Returns
    ///
    /// The consumed token, or the error without moving the cursor.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        if self.current_token_kind() != expected_kind {
            match error {
                Some(error) => Err(error),
                None => Err(self.unexpected()),
            }
        } else {
            Ok(self.advance())
        }
    }

    /// Consumes a token of `expected_kind`, reporting `UnexpectedToken` otherwise.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// An `UnexpectedToken` error pointing at the current token.
    pub fn unexpected(&self) -> Error {
        Error::new(
            ErrorImpl::UnexpectedToken {
                token: self.current_token().value.clone(),
            },
            self.get_position(),
        )
    }

    /// An `UnexpectedTokenDetailed` error pointing at the current token.
    pub fn unexpected_detailed(&self, message: &str) -> Error {
        Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: self.current_token().value.clone(),
                message: String::from(message),
            },
            self.get_position(),
        )
    }

    /// Whether anything other than `EOF` remains.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// Statement handler for a leading token, if one is registered.
    pub fn get_stmt_handler(&self, kind: TokenKind) -> Option<StmtHandler> {
        self.stmt_lookup.get(&kind).copied()
    }

    /// Prefix handler for `kind`. `None` means `kind` cannot start an expression.
    pub fn get_nud_handler(&self, kind: TokenKind) -> Option<NUDHandler> {
        self.nud_lookup.get(&kind).copied()
    }

    /// Infix or postfix handler for `kind`.
    pub fn get_led_handler(&self, kind: TokenKind) -> Option<LEDHandler> {
        self.led_lookup.get(&kind).copied()
    }

    /// Binding power of `kind` as an infix/postfix operator.
    pub fn get_binding_power(&self, kind: TokenKind) -> BindingPower {
        self.binding_power_lookup
            .get(&kind)
            .copied()
            .unwrap_or(BindingPower::Default)
    }

    pub fn get_type_nud_handler(&self, kind: TokenKind) -> Option<TypeNUDHandler> {
        self.type_nud_lookup.get(&kind).copied()
    }

    pub fn get_type_led_handler(&self, kind: TokenKind) -> Option<TypeLEDHandler> {
        self.type_led_lookup.get(&kind).copied()
    }

    /// Binding power of `kind` inside a type annotation, `Default` when unknown.
    pub fn get_type_binding_power(&self, kind: TokenKind) -> BindingPower {
        self.type_binding_power_lookup
            .get(&kind)
            .copied()
            .unwrap_or(BindingPower::Default)
    }

    /// Infix or postfix handler; `binding_power` decides how tightly it binds.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Prefix handler. Leaves the binding power table alone: `-` is both a
    /// prefix and an additive infix operator.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers the handler for statements starting with `kind`.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Postfix handler inside a type annotation, e.g. `[]`.
    pub fn type_led(
        &mut self,
        kind: TokenKind,
        binding_power: BindingPower,
        led_fn: TypeLEDHandler,
    ) {
        self.type_binding_power_lookup.insert(kind, binding_power);
        self.type_led_lookup.insert(kind, led_fn);
    }

    /// Registers the handler for a type annotation starting with `kind`.
    pub fn type_nud(&mut self, kind: TokenKind, nud_fn: TypeNUDHandler) {
        self.type_nud_lookup.insert(kind, nud_fn);
    }

    /// Start position of the token under the cursor.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start.clone()
    }

    /// End of the most recently consumed token.
    fn previous_end(&self) -> Position {
        if self.pos == 0 {
            return self.get_position();
        }
        self.tokens[self.pos - 1].span.end.clone()
    }

    /// Builds an interior node spanning from `start` to the last consumed token.
    ///
    /// # Arguments
    ///
    /// * `rule` - Grammar rule of the node
    /// * `start` - Where the construct began, usually its first token's start
    /// * `children` - Child nodes in source order
    ///
    /// # Returns
    ///
    /// A node whose `text` is the source slice it covers.
    pub fn finish_node(&self, rule: Rule, start: Position, children: Vec<SyntaxNode>) -> SyntaxNode {
        let end = self.previous_end();
        let from = (start.0 as usize).min(self.source.len());
        let to = (end.0 as usize).clamp(from, self.source.len());
        let text = self.source.get(from..to).unwrap_or_default().to_string();

        SyntaxNode::new(rule, text, Span { start, end }, children)
    }

    /// Builds a leaf node from a single token.
    pub fn leaf(&self, rule: Rule, token: &Token) -> SyntaxNode {
        SyntaxNode::new(rule, token.value.clone(), token.span.clone(), vec![])
    }
}

/// Parses a token stream into a concrete syntax tree.
///
/// # Arguments
///
/// * `tokens` - Tokens produced by `tokenize`
/// * `source` - The text they were produced from
///
/// # Returns
///
/// One `Program` node holding every statement up to `EOF`, or the first
/// syntax error encountered.
pub fn parse(tokens: Vec<Token>, source: &str) -> Result<SyntaxNode, Error> {
    let mut parser = Parser::new(tokens, source);
    create_token_lookups(&mut parser);
    create_token_type_lookups(&mut parser);

    let start = parser.get_position();
    let file = Rc::clone(&start.1);
    let mut body = vec![];

    while parser.has_tokens() {
        body.push(parse_stmt(&mut parser)?);
    }

    let program = parser.finish_node(Rule::Program, Position(0, file), body);
    Ok(program)
}
