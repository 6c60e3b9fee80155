use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::{
    parser::Parser,
    tree::{Rule, SyntaxNode},
    types::parse_type,
};

/// Parses one statement. Anything not introduced by a keyword must be an
/// assignment or a call.
pub fn parse_stmt(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    if let Some(handler) = parser.get_stmt_handler(parser.current_token_kind()) {
        return handler(parser);
    }

    let expr = parse_expr(parser, BindingPower::Default)?;
    let start = expr.span.start.clone();

    if parser.current_token_kind() == TokenKind::Assignment {
        if !matches!(expr.rule, Rule::Id | Rule::Subscript) {
            return Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: expr.text.clone(),
                    message: String::from("only variables and array elements can be assigned to"),
                },
                start,
            ));
        }

        parser.advance();
        let source = parse_expr(parser, BindingPower::Default)?;
        parser.expect(TokenKind::Semicolon)?;

        return Ok(parser.finish_node(Rule::AssignStmt, start, vec![expr, source]));
    }

    if expr.rule != Rule::Call {
        return Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: expr.text.clone(),
                message: String::from("expected an assignment or a function call"),
            },
            start,
        ));
    }

    parser.expect(TokenKind::Semicolon)?;
    Ok(parser.finish_node(Rule::CallStmt, start, vec![expr]))
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let start = parser.advance().span.start;

    let error = parser.unexpected_detailed("expected identifier during variable declaration");
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?;
    let name = parser.leaf(Rule::Id, &name);

    parser.expect(TokenKind::Assignment)?;
    let initializer = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(parser.finish_node(Rule::VarDec, start, vec![name, initializer]))
}

pub fn parse_print_stmt(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let start = parser.advance().span.start;

    parser.expect(TokenKind::OpenParen)?;
    let argument = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(parser.finish_node(Rule::PrintStmt, start, vec![argument]))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let start = parser.advance().span.start;

    let test = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Colon)?;
    let body = parse_block(parser)?;

    Ok(parser.finish_node(Rule::WhileStmt, start, vec![test, body]))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let start = parser.advance().span.start;

    let mut children = vec![];
    if parser.current_token_kind() != TokenKind::Semicolon {
        children.push(parse_expr(parser, BindingPower::Default)?);
    }
    parser.expect(TokenKind::Semicolon)?;

    Ok(parser.finish_node(Rule::ReturnStmt, start, children))
}

/// `( stmt* )`
pub fn parse_block(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let start = parser.expect(TokenKind::OpenParen)?.span.start;

    let mut statements = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseParen {
        if !parser.has_tokens() {
            return Err(parser.unexpected_detailed("expected `)` to close the block"));
        }
        statements.push(parse_stmt(parser)?);
    }

    parser.expect(TokenKind::CloseParen)?;

    Ok(parser.finish_node(Rule::Block, start, statements))
}

pub fn parse_fn_decl_stmt(parser: &mut Parser) -> Result<SyntaxNode, Error> {
    let start = parser.advance().span.start;

    let name = parser.expect(TokenKind::Identifier)?;
    let name = parser.leaf(Rule::Id, &name);

    let params_start = parser.expect(TokenKind::OpenParen)?.span.start;
    let mut parameters = Vec::new();

    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            let param_name = parser.expect(TokenKind::Identifier)?;
            let param_id = parser.leaf(Rule::Id, &param_name);
            parser.expect(TokenKind::Colon)?;
            let param_type = parse_type(parser, BindingPower::Default)?;

            parameters.push(parser.finish_node(
                Rule::Param,
                param_name.span.start.clone(),
                vec![param_id, param_type],
            ));

            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    let params = parser.finish_node(Rule::Params, params_start, parameters);

    let mut children = vec![name, params];
    if parser.current_token_kind() == TokenKind::Arrow {
        parser.advance();
        children.push(parse_type(parser, BindingPower::Default)?);
    }

    parser.expect(TokenKind::Colon)?;
    children.push(parse_block(parser)?);

    Ok(parser.finish_node(Rule::FunDec, start, children))
}
