use crate::{errors::errors::{Error, ErrorImpl}, lexer::tokens::TokenKind};

use super::{lookups::BindingPower, parser::Parser, tree::{Rule, SyntaxNode}};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<SyntaxNode, Error> {
    // First parse NUD
    let nud = parser.get_nud_handler(parser.current_token_kind()).ok_or_else(|| parser.unexpected())?;
    let mut left = nud(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    while parser.get_binding_power(parser.current_token_kind()) > bp {
        let token_kind = parser.current_token_kind();
        let led = parser.get_led_handler(token_kind).ok_or_else(|| parser.unexpected())?;
        let binding_power = parser.get_binding_power(token_kind);

        left = led(parser, left, binding_power)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let rule = match parser.current_token_kind() {
        TokenKind::Number => Rule::Num,
        TokenKind::Identifier => Rule::Id,
        TokenKind::String => Rule::Str,
        TokenKind::True => Rule::True,
        TokenKind::False => Rule::False,
        _ => return Err(parser.unexpected()),
    };

    let token = parser.advance();
    Ok(parser.leaf(rule, &token))
}

pub fn parse_binary_expr(parser: &mut Parser, left: SyntaxNode, bp: BindingPower) -> Result<SyntaxNode, Error> {
    let operator_token = parser.advance();
    let operator = parser.leaf(Rule::Op, &operator_token);

    let right = parse_expr(parser, bp)?;

    let start = left.span.start.clone();
    Ok(parser.finish_node(Rule::Binary, start, vec![left, operator, right]))
}

/// Comparisons do not associate: `a < b < c` is rejected rather than read as
/// `(a < b) < c`.
pub fn parse_relational_expr(parser: &mut Parser, left: SyntaxNode, bp: BindingPower) -> Result<SyntaxNode, Error> {
    let node = parse_binary_expr(parser, left, bp)?;

    if parser.current_token_kind().is_relational() {
        return Err(parser.unexpected_detailed("comparison operators cannot be chained"));
    }

    Ok(node)
}

/// `**` groups to the right, and its right operand may itself start with a
/// prefix operator (`2 ** -1`).
pub fn parse_exponent_expr(parser: &mut Parser, left: SyntaxNode, _bp: BindingPower) -> Result<SyntaxNode, Error> {
    parse_binary_expr(parser, left, BindingPower::Unary)
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let operator_token = parser.advance();
    let operator = parser.leaf(Rule::Op, &operator_token);
    let operand = parse_expr(parser, BindingPower::Unary)?;

    Ok(parser.finish_node(Rule::Unary, operator_token.span.start.clone(), vec![operator, operand]))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

/// Parses a comma separated list of expressions up to (and including) `close`.
/// Trailing and doubled commas are rejected.
pub fn parse_expr_list(parser: &mut Parser, close: TokenKind) -> Result<Vec<SyntaxNode>, Error> {
    let mut items = vec![];

    if parser.current_token_kind() != close {
        loop {
            items.push(parse_expr(parser, BindingPower::Default)?);

            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }
    }

    parser.expect(close)?;
    Ok(items)
}

pub fn parse_call_expr(parser: &mut Parser, left: SyntaxNode, _bp: BindingPower) -> Result<SyntaxNode, Error> {
    if left.rule != Rule::Id {
        return Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: parser.current_token().value.clone(),
                message: String::from("only named functions can be called"),
            },
            parser.get_position(),
        ));
    }

    parser.advance();
    let arguments = parse_expr_list(parser, TokenKind::CloseParen)?;

    let start = left.span.start.clone();
    let mut children = vec![left];
    children.extend(arguments);

    Ok(parser.finish_node(Rule::Call, start, children))
}

pub fn parse_subscript_expr(parser: &mut Parser, left: SyntaxNode, _bp: BindingPower) -> Result<SyntaxNode, Error> {
    parser.advance();
    let index = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseBracket)?;

    let start = left.span.start.clone();
    Ok(parser.finish_node(Rule::Subscript, start, vec![left, index]))
}

pub fn parse_array_expr(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let start = parser.advance().span.start;
    let elements = parse_expr_list(parser, TokenKind::CloseBracket)?;

    Ok(parser.finish_node(Rule::ArrayLit, start, elements))
}
