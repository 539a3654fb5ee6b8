use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    symbols::symbol::{DataType, Symbol, SymbolKind},
};

use super::{
    lookups::BindingPower,
    parser::Parser,
    properties::{fold_binary, SemanticProperties},
};

/// Parses a factor followed by every infix operator binding tighter than
/// `bp`.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<SemanticProperties, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud_fn) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(parser.error_at(
            ErrorImpl::UnexpectedToken {
                expected: String::from("an identifier, number or '('"),
            },
            parser.current_token(),
        ));
    };

    let left = nud_fn(parser)?;
    parse_infix(parser, left, bp)
}

/// Continues an expression whose leftmost operand has been parsed.
fn parse_infix(
    parser: &mut Parser,
    mut left: SemanticProperties,
    bp: BindingPower,
) -> Result<SemanticProperties, Error> {
    // While the current token binds tighter than bp, keep extending lhs
    loop {
        let token_kind = parser.current_token_kind();
        let Some(&token_bp) = parser.get_bp_lookup().get(&token_kind) else {
            return Ok(left);
        };

        if token_bp <= bp {
            return Ok(left);
        }

        let Some(led_fn) = parser.get_led_lookup().get(&token_kind).copied() else {
            return Ok(left);
        };

        left = led_fn(parser, left, token_bp)?;
    }
}

/// `Expression := [("+"|"-")] Term {("+"|"-") Term}`
///
/// A leading sign applies to the first term only.
pub fn parse_expression(parser: &mut Parser) -> Result<SemanticProperties, Error> {
    let kind = parser.current_token_kind();
    if kind != TokenKind::Plus && kind != TokenKind::Dash {
        return parse_expr(parser, BindingPower::Default);
    }

    let operator = parser.advance()?;
    let term = parse_expr(parser, BindingPower::Additive)?;
    let signed = apply_unary(parser, &operator, term);

    parse_infix(parser, signed, BindingPower::Default)
}

fn apply_unary(parser: &mut Parser, operator: &Token, operand: SemanticProperties) -> SemanticProperties {
    if operand.is_error() {
        return operand;
    }

    if operand.data_type != DataType::Integer {
        parser.report_at(
            ErrorImpl::UnaryTypeMismatch {
                operator: operator.value.clone(),
                found: operand.data_type,
            },
            operator,
        );
        return SemanticProperties::error();
    }

    match (operator.kind, operand.value) {
        (TokenKind::Dash, Some(value)) => SemanticProperties::constant(value.wrapping_neg()),
        _ => operand,
    }
}

pub fn parse_binary_expr(
    parser: &mut Parser,
    left: SemanticProperties,
    bp: BindingPower,
) -> Result<SemanticProperties, Error> {
    let operator = parser.advance()?;
    let right = parse_expr(parser, bp)?;

    Ok(combine(parser, &operator, left, right))
}

/// Type-checks and, when both sides are constant, folds one arithmetic
/// operation.
fn combine(
    parser: &mut Parser,
    operator: &Token,
    left: SemanticProperties,
    right: SemanticProperties,
) -> SemanticProperties {
    if left.is_error() || right.is_error() {
        return SemanticProperties::error();
    }

    if left.data_type != DataType::Integer || right.data_type != DataType::Integer {
        parser.report_at(
            ErrorImpl::OperandTypeMismatch {
                operator: operator.value.clone(),
                left: left.data_type,
                right: right.data_type,
            },
            operator,
        );
        return SemanticProperties::error();
    }

    if right.value == Some(0) {
        let error = match operator.kind {
            TokenKind::Slash => Some(ErrorImpl::DivisionByZero),
            TokenKind::Percent => Some(ErrorImpl::ModuloByZero),
            _ => None,
        };

        if let Some(error) = error {
            parser.report_at(error, operator);
            return SemanticProperties::error();
        }
    }

    match (left.value, right.value) {
        (Some(l), Some(r)) => fold_binary(operator.kind, l, r)
            .map(SemanticProperties::constant)
            .unwrap_or_else(SemanticProperties::integer),
        _ => SemanticProperties::integer(),
    }
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<SemanticProperties, Error> {
    let token = parser.expect(TokenKind::Number, "a number")?;
    Ok(SemanticProperties::constant(token.number))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<SemanticProperties, Error> {
    parser.expect(TokenKind::OpenParen, "'('")?;
    let expr = parse_expression(parser)?;
    parser.expect(TokenKind::CloseParen, "')' after expression in parentheses")?;

    Ok(expr)
}

/// An identifier used as a factor.
pub fn parse_symbol_expr(parser: &mut Parser) -> Result<SemanticProperties, Error> {
    let identifier = parser.advance()?;
    let name = identifier.value.clone();
    let subscripted = parser.current_token_kind() == TokenKind::OpenBracket;

    let Some(index) = parser.symbols().resolve(&name) else {
        parser.report_at(ErrorImpl::NotDeclared { name }, &identifier);
        skip_subscript(parser)?;
        return Ok(SemanticProperties::error());
    };

    let symbol = parser.symbols()[index].clone();

    match symbol.kind {
        SymbolKind::Const if !subscripted => Ok(SemanticProperties::constant(symbol.value)),
        SymbolKind::Procedure => {
            parser.report_at(ErrorImpl::NotAValue { name }, &identifier);
            skip_subscript(parser)?;
            Ok(SemanticProperties::error())
        }
        SymbolKind::Var if symbol.is_array() => {
            if subscripted {
                let element_type = parse_subscript(parser, &symbol, &identifier)?;
                Ok(SemanticProperties::of_type(element_type))
            } else {
                parser.report_at(ErrorImpl::MissingSubscript { name }, &identifier);
                Ok(SemanticProperties::error())
            }
        }
        SymbolKind::Var if !subscripted => Ok(SemanticProperties::integer()),
        // A subscripted constant or scalar variable
        _ => {
            parser.report_at(ErrorImpl::NotAnArray { name }, &identifier);
            skip_subscript(parser)?;
            Ok(SemanticProperties::error())
        }
    }
}

/// Parses `"[" Expression "]"` after an array name and returns the type of
/// the element access, or `DataType::Error` if the index was rejected.
///
/// A constant index is checked against the declared size and reported at
/// `identifier`.
pub fn parse_subscript(parser: &mut Parser, array: &Symbol, identifier: &Token) -> Result<DataType, Error> {
    parser.expect(TokenKind::OpenBracket, "'['")?;
    let index = parse_expression(parser)?;
    parser.expect(TokenKind::CloseBracket, "']' after array index expression")?;

    if index.is_error() {
        return Ok(DataType::Error);
    }

    if index.data_type != DataType::Integer {
        parser.report_at(ErrorImpl::NonIntegerIndex { found: index.data_type }, identifier);
        return Ok(DataType::Error);
    }

    if let Some(value) = index.value {
        if value < 0 || value >= array.size {
            parser.report_at(
                ErrorImpl::IndexOutOfBounds {
                    name: array.name.clone(),
                    index: value,
                    size: array.size,
                },
                identifier,
            );
            return Ok(DataType::Error);
        }
    }

    Ok(array.element_type)
}

/// Consumes a subscript that follows a name which cannot take one, so that
/// parsing resumes after it. The index is still analyzed.
pub fn skip_subscript(parser: &mut Parser) -> Result<(), Error> {
    if parser.current_token_kind() != TokenKind::OpenBracket {
        return Ok(());
    }

    parser.advance()?;
    parse_expression(parser)?;
    parser.expect(TokenKind::CloseBracket, "']' after array index expression")?;

    Ok(())
}

/// `Condition := "ODD" Expression | Expression RelOp Expression`
///
/// Conditions produce no value; only their operands are checked.
pub fn parse_condition(parser: &mut Parser) -> Result<(), Error> {
    if parser.current_token_kind() == TokenKind::Odd {
        let odd = parser.advance()?;
        let operand = parse_expression(parser)?;

        if !operand.is_error() && operand.data_type != DataType::Integer {
            parser.report_at(ErrorImpl::OddOperandNotInteger { found: operand.data_type }, &odd);
        }

        return Ok(());
    }

    let left = parse_expression(parser)?;

    if !parser.current_token_kind().is_relational() {
        return Err(parser.error_at(ErrorImpl::MissingRelationalOperator, parser.current_token()));
    }

    let operator = parser.advance()?;
    let right = parse_expression(parser)?;

    if left.is_error() || right.is_error() {
        return Ok(());
    }

    if left.data_type != DataType::Integer || right.data_type != DataType::Integer {
        parser.report_at(
            ErrorImpl::OperandTypeMismatch {
                operator: operator.value.clone(),
                left: left.data_type,
                right: right.data_type,
            },
            &operator,
        );
    }

    Ok(())
}
