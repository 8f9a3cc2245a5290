mod cursor;
mod parse_error;

use crate::ast::*;
use crate::lexer::TokenKind;
use cursor::Cursor;
pub use parse_error::{InnerParseError, ParseError, Result};
use tracing::trace;

impl TryFrom<TokenKind> for AstBinaryOp {
    type Error = TokenKind;
    fn try_from(value: TokenKind) -> std::result::Result<Self, TokenKind> {
        match value {
            TokenKind::Equal => Ok(Self::Equal),
            TokenKind::NotEqual => Ok(Self::NotEqual),
            TokenKind::Plus => Ok(Self::Add),
            TokenKind::Minus => Ok(Self::Subtract),
            TokenKind::Star => Ok(Self::Multiply),
            TokenKind::Slash => Ok(Self::Divide),
            _ => Err(value),
        }
    }
}

fn parse_identifier(cursor: &mut Cursor) -> Result<Identifier> {
    if cursor.peek_is(TokenKind::Identifier) {
        cursor.bump().map(|token| token.text)
    } else {
        let got = cursor.peek().clone();
        Err(cursor.error(InnerParseError::ExpectedIdentifierButGot(got)))
    }
}

/// Comma separated list of items; the opening parenthesis is already consumed
/// and the closing one is left for the caller.
fn parse_list<T>(
    cursor: &mut Cursor,
    parse_item: impl Fn(&mut Cursor) -> Result<T>,
) -> Result<Vec<T>> {
    let mut items = Vec::new();
    if cursor.peek_is(TokenKind::RightParen) {
        return Ok(items);
    }

    items.push(parse_item(cursor)?);
    while cursor.bump_if(TokenKind::Comma)? {
        items.push(parse_item(cursor)?);
    }
    Ok(items)
}

fn parse_arguments(cursor: &mut Cursor) -> Result<Vec<AstExp>> {
    parse_list(cursor, parse_exp)
}

fn parse_params(cursor: &mut Cursor) -> Result<Vec<Identifier>> {
    parse_list(cursor, parse_identifier)
}

fn parse_number(cursor: &mut Cursor) -> Result<AstExp> {
    let token = cursor.bump()?;
    token
        .text
        .parse()
        .map(AstExp::Number)
        .map_err(|_| cursor.error(InnerParseError::BadNumber(token.text.clone())))
}

fn parse_factor_call(cursor: &mut Cursor, name: Identifier) -> Result<AstExp> {
    cursor.expect(TokenKind::LeftParen)?;
    let arguments = parse_arguments(cursor)?;
    cursor.expect(TokenKind::RightParen)?;
    Ok(AstExp::Call(name, arguments))
}

fn parse_factor_identifier(cursor: &mut Cursor) -> Result<AstExp> {
    let name = parse_identifier(cursor)?;
    if cursor.peek_is(TokenKind::LeftParen) {
        parse_factor_call(cursor, name)
    } else {
        Ok(AstExp::Var(name))
    }
}

fn parse_factor_subexp(cursor: &mut Cursor) -> Result<AstExp> {
    cursor.expect(TokenKind::LeftParen)?;
    let exp = parse_exp(cursor)?;
    cursor.expect(TokenKind::RightParen)?;
    Ok(exp)
}

fn parse_factor(cursor: &mut Cursor) -> Result<AstExp> {
    match cursor.peek().kind {
        TokenKind::Identifier => parse_factor_identifier(cursor),
        TokenKind::Number => parse_number(cursor),
        TokenKind::LeftParen => parse_factor_subexp(cursor),
        _ => {
            let got = cursor.peek().clone();
            Err(cursor.error(InnerParseError::BadFactor(got)))
        }
    }
}

fn parse_unary(cursor: &mut Cursor) -> Result<AstExp> {
    if cursor.bump_if(TokenKind::Not)? {
        let operand = parse_unary(cursor)?;
        Ok(AstExp::not(operand))
    } else {
        parse_factor(cursor)
    }
}

/// One left-associative precedence tier: `operand (op operand)*`.
fn parse_binary_tier(
    cursor: &mut Cursor,
    is_operator: fn(TokenKind) -> bool,
    parse_operand: fn(&mut Cursor) -> Result<AstExp>,
) -> Result<AstExp> {
    let mut left = parse_operand(cursor)?;

    while is_operator(cursor.peek().kind) {
        let token = cursor.bump()?;
        let Ok(op) = AstBinaryOp::try_from(token.kind) else {
            unreachable!("tier operators are binary operators")
        };
        let right = parse_operand(cursor)?;
        left = AstExp::binary(op, left, right);
    }

    Ok(left)
}

fn parse_product(cursor: &mut Cursor) -> Result<AstExp> {
    parse_binary_tier(cursor, TokenKind::is_multiplicative, parse_unary)
}

fn parse_sum(cursor: &mut Cursor) -> Result<AstExp> {
    parse_binary_tier(cursor, TokenKind::is_additive, parse_product)
}

fn parse_comparison(cursor: &mut Cursor) -> Result<AstExp> {
    parse_binary_tier(cursor, TokenKind::is_comparison, parse_sum)
}

fn parse_exp(cursor: &mut Cursor) -> Result<AstExp> {
    parse_comparison(cursor)
}

fn parse_return(cursor: &mut Cursor) -> Result<AstStatement> {
    cursor.expect(TokenKind::Return)?;
    let exp = parse_exp(cursor)?;
    cursor.expect(TokenKind::Semicolon)?;
    Ok(AstStatement::Return(exp))
}

fn parse_if(cursor: &mut Cursor) -> Result<AstStatement> {
    cursor.expect(TokenKind::If)?;
    cursor.expect(TokenKind::LeftParen)?;
    let condition = parse_exp(cursor)?;
    cursor.expect(TokenKind::RightParen)?;
    let then = parse_statement(cursor)?;

    if cursor.bump_if(TokenKind::Else)? {
        let els = parse_statement(cursor)?;
        Ok(AstStatement::if_else(condition, then, els))
    } else {
        Ok(AstStatement::if_then(condition, then))
    }
}

fn parse_while(cursor: &mut Cursor) -> Result<AstStatement> {
    cursor.expect(TokenKind::While)?;
    cursor.expect(TokenKind::LeftParen)?;
    let condition = parse_exp(cursor)?;
    cursor.expect(TokenKind::RightParen)?;
    let body = parse_block(cursor)?;
    Ok(AstStatement::While { condition, body })
}

fn parse_var(cursor: &mut Cursor) -> Result<AstStatement> {
    cursor.expect(TokenKind::Var)?;
    let name = parse_identifier(cursor)?;
    cursor.expect(TokenKind::Assign)?;
    let init = parse_exp(cursor)?;
    cursor.expect(TokenKind::Semicolon)?;
    Ok(AstStatement::Var { name, init })
}

fn parse_assign(cursor: &mut Cursor) -> Result<AstStatement> {
    let name = parse_identifier(cursor)?;
    cursor.expect(TokenKind::Assign)?;
    let value = parse_exp(cursor)?;
    cursor.expect(TokenKind::Semicolon)?;
    Ok(AstStatement::Assign { name, value })
}

fn parse_block(cursor: &mut Cursor) -> Result<AstBlock> {
    let mut statements = Vec::new();

    cursor.expect(TokenKind::LeftBrace)?;
    while !cursor.bump_if(TokenKind::RightBrace)? {
        statements.push(parse_statement(cursor)?);
    }

    Ok(AstBlock::new(statements))
}

fn parse_function(cursor: &mut Cursor) -> Result<AstStatement> {
    cursor.expect(TokenKind::Function)?;
    let name = parse_identifier(cursor)?;
    if cursor.in_function() {
        return Err(cursor.error(InnerParseError::NestedFunction(name)));
    }

    cursor.expect(TokenKind::LeftParen)?;
    let params = parse_params(cursor)?;
    cursor.expect(TokenKind::RightParen)?;

    cursor.set_in_function(true);
    let body = parse_block(cursor);
    cursor.set_in_function(false);

    Ok(AstStatement::Function(AstFunction {
        name,
        params,
        body: body?,
    }))
}

fn parse_statement_exp(cursor: &mut Cursor) -> Result<AstStatement> {
    let exp = parse_exp(cursor)?;
    cursor.expect(TokenKind::Semicolon)?;
    Ok(AstStatement::Exp(exp))
}

fn parse_assign_or_exp(cursor: &mut Cursor) -> Result<AstStatement> {
    if cursor.peek_2nd()?.is(TokenKind::Assign) {
        parse_assign(cursor)
    } else {
        parse_statement_exp(cursor)
    }
}

fn parse_statement(cursor: &mut Cursor) -> Result<AstStatement> {
    let statement = match cursor.peek().kind {
        TokenKind::Return => parse_return(cursor),
        TokenKind::If => parse_if(cursor),
        TokenKind::While => parse_while(cursor),
        TokenKind::Var => parse_var(cursor),
        TokenKind::LeftBrace => parse_block(cursor).map(AstStatement::Block),
        TokenKind::Function => parse_function(cursor),
        TokenKind::Identifier => parse_assign_or_exp(cursor),
        _ => parse_statement_exp(cursor),
    }?;
    trace!(kind = statement.kind_name(), "parsed statement");
    Ok(statement)
}

/// Parses a single statement, typically a whole program wrapped in braces.
pub fn parse(source: &str) -> Result<AstStatement> {
    let mut cursor = Cursor::new(source)?;
    parse_statement(&mut cursor)
}

/// Parses statements up to the end of input into one top-level block.
pub fn parse_program(source: &str) -> Result<AstStatement> {
    let mut cursor = Cursor::new(source)?;
    let mut statements = Vec::new();

    while !cursor.at_end() {
        statements.push(parse_statement(&mut cursor)?);
    }
    Ok(AstStatement::Block(AstBlock::new(statements)))
}
