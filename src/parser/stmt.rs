use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    symbols::symbol::{DataType, SymbolKind},
};

use super::{
    expr::{parse_condition, parse_expression, parse_subscript, skip_subscript},
    parser::Parser,
    properties::SemanticProperties,
    recovery::{synchronize, SyncSet},
};

/// Parses one statement. A token that starts no statement leaves the
/// empty statement, which consumes nothing.
pub fn parse_stmt(parser: &mut Parser) -> Result<(), Error> {
    let stmt_fn = parser.get_stmt_lookup().get(&parser.current_token_kind()).copied();

    match stmt_fn {
        Some(stmt_fn) => stmt_fn(parser),
        None => Ok(()),
    }
}

/// `Statement {";" Statement}`, stopping before `END`, `.` or end of input.
///
/// A missing separator or a stray token is reported and skipped so that
/// the following statements are still analyzed.
pub fn parse_stmt_sequence(parser: &mut Parser) -> Result<(), Error> {
    parse_stmt(parser)?;

    loop {
        let kind = parser.current_token_kind();

        match kind {
            TokenKind::Semicolon => {
                parser.advance()?;
                parse_stmt(parser)?;
            }
            TokenKind::End | TokenKind::Dot | TokenKind::EOF => return Ok(()),
            _ if parser.starts_statement(kind) => {
                let previous = parser.previous_token().clone();
                parser.report_at(
                    ErrorImpl::MissingSemicolon {
                        context: String::from("between statements"),
                    },
                    &previous,
                );
                parse_stmt(parser)?;
            }
            _ => {
                let stray = parser.current_token().clone();
                parser.report_at(ErrorImpl::ExpectedStatement, &stray);

                let sync = SyncSet::statement_sequence(parser);
                synchronize(parser, &sync)?;

                if parser.starts_statement(parser.current_token_kind()) {
                    parse_stmt(parser)?;
                }
            }
        }
    }
}

/// `Ident ["[" Expression "]"] ":=" Expression`
pub fn parse_assignment_stmt(parser: &mut Parser) -> Result<(), Error> {
    let identifier = parser.expect(TokenKind::Identifier, "an identifier")?;
    let name = identifier.value.clone();

    let target_type = match parser.symbols().resolve(&name) {
        None => {
            parser.report_at(ErrorImpl::NotDeclared { name: name.clone() }, &identifier);
            skip_subscript(parser)?;
            DataType::Error
        }
        Some(index) if parser.symbols()[index].kind != SymbolKind::Var => {
            parser.report_at(ErrorImpl::NotAVariable { name: name.clone() }, &identifier);
            skip_subscript(parser)?;
            DataType::Error
        }
        Some(index) => {
            let symbol = parser.symbols()[index].clone();
            let subscripted = parser.current_token_kind() == TokenKind::OpenBracket;

            match (symbol.is_array(), subscripted) {
                (true, true) => parse_subscript(parser, &symbol, &identifier)?,
                (true, false) => {
                    parser.report_at(ErrorImpl::MissingSubscript { name: name.clone() }, &identifier);
                    DataType::Error
                }
                (false, true) => {
                    parser.report_at(ErrorImpl::NotAnArray { name: name.clone() }, &identifier);
                    skip_subscript(parser)?;
                    DataType::Error
                }
                (false, false) => symbol.data_type,
            }
        }
    };

    parser.expect(TokenKind::Assignment, "':=' in assignment")?;
    let value = parse_expression(parser)?;

    if target_type != DataType::Error && !value.is_error() && value.data_type != target_type {
        parser.report_at(
            ErrorImpl::AssignmentTypeMismatch {
                name,
                expected: target_type,
                received: value.data_type,
            },
            &identifier,
        );
    }

    Ok(())
}

/// `"CALL" Ident ["(" [Expression {"," Expression}] ")"]`
pub fn parse_call_stmt(parser: &mut Parser) -> Result<(), Error> {
    parser.expect(TokenKind::Call, "'CALL'")?;
    let identifier = parser.expect(TokenKind::Identifier, "a procedure name after 'CALL'")?;
    let name = identifier.value.clone();

    let arguments = parse_arguments(parser)?;

    let procedure = match parser.symbols().resolve(&name) {
        None => {
            parser.report_at(ErrorImpl::NotDeclared { name }, &identifier);
            return Ok(());
        }
        Some(index) if parser.symbols()[index].kind != SymbolKind::Procedure => {
            parser.report_at(ErrorImpl::NotAProcedure { name }, &identifier);
            return Ok(());
        }
        Some(index) => parser.symbols()[index].clone(),
    };

    if arguments.len() != procedure.param_count() {
        parser.report_at(
            ErrorImpl::ArgumentCountMismatch {
                procedure: name,
                expected: procedure.param_count(),
                received: arguments.len(),
            },
            &identifier,
        );
        return Ok(());
    }

    for (argument, (actual, formal)) in arguments.iter().zip(&procedure.parameters).enumerate() {
        if actual.is_error() || actual.data_type == formal.data_type {
            continue;
        }

        parser.report_at(
            ErrorImpl::ArgumentTypeMismatch {
                procedure: name.clone(),
                argument: argument + 1,
                expected: formal.data_type,
                received: actual.data_type,
            },
            &identifier,
        );
    }

    Ok(())
}

fn parse_arguments(parser: &mut Parser) -> Result<Vec<SemanticProperties>, Error> {
    let mut arguments = Vec::new();

    if parser.current_token_kind() != TokenKind::OpenParen {
        return Ok(arguments);
    }

    parser.advance()?;

    if parser.current_token_kind() != TokenKind::CloseParen {
        arguments.push(parse_expression(parser)?);

        while parser.current_token_kind() == TokenKind::Comma {
            parser.advance()?;
            arguments.push(parse_expression(parser)?);
        }
    }

    parser.expect(TokenKind::CloseParen, "',' or ')' in argument list")?;

    Ok(arguments)
}

/// `"BEGIN" Statement {";" Statement} "END"`
pub fn parse_compound_stmt(parser: &mut Parser) -> Result<(), Error> {
    parser.expect(TokenKind::Begin, "'BEGIN'")?;
    parse_stmt_sequence(parser)?;

    if parser.current_token_kind() == TokenKind::End {
        parser.advance()?;
        return Ok(());
    }

    // Nothing left to close the block with; point at where END should be
    let at = if matches!(parser.current_token_kind(), TokenKind::Dot | TokenKind::EOF) {
        parser.current_token().clone()
    } else {
        parser.previous_token().clone()
    };
    parser.report_at(ErrorImpl::ExpectedEnd, &at);

    Ok(())
}

/// `"IF" Condition "THEN" Statement ["ELSE" Statement]`
pub fn parse_if_stmt(parser: &mut Parser) -> Result<(), Error> {
    parser.expect(TokenKind::If, "'IF'")?;
    parse_condition(parser)?;
    parser.expect(TokenKind::Then, "'THEN' after condition")?;
    parse_stmt(parser)?;

    if parser.current_token_kind() == TokenKind::Else {
        parser.advance()?;
        parse_stmt(parser)?;
    }

    Ok(())
}

/// `"WHILE" Condition "DO" Statement`
pub fn parse_while_stmt(parser: &mut Parser) -> Result<(), Error> {
    parser.expect(TokenKind::While, "'WHILE'")?;
    parse_condition(parser)?;
    parser.expect(TokenKind::Do, "'DO' after condition")?;

    parse_stmt(parser)
}

/// `"FOR" Ident ":=" Expression "TO" Expression "DO" Statement`
pub fn parse_for_stmt(parser: &mut Parser) -> Result<(), Error> {
    parser.expect(TokenKind::For, "'FOR'")?;
    let identifier = parser.expect(TokenKind::Identifier, "a loop variable after 'FOR'")?;
    let name = identifier.value.clone();

    match parser.symbols().resolve(&name) {
        None => parser.report_at(ErrorImpl::NotDeclared { name }, &identifier),
        Some(index) if !parser.symbols()[index].is_scalar_integer() => {
            parser.report_at(ErrorImpl::LoopVariableNotInteger { name }, &identifier)
        }
        Some(_) => {}
    }

    parser.expect(TokenKind::Assignment, "':=' after loop variable")?;
    let start = parse_expression(parser)?;
    check_loop_bound(parser, "start", start);

    parser.expect(TokenKind::To, "'TO' in FOR loop")?;
    let end = parse_expression(parser)?;
    check_loop_bound(parser, "end", end);

    parser.expect(TokenKind::Do, "'DO' in FOR loop")?;

    parse_stmt(parser)
}

fn check_loop_bound(parser: &mut Parser, bound: &str, properties: SemanticProperties) {
    if properties.is_error() || properties.data_type == DataType::Integer {
        return;
    }

    let at = parser.previous_token().clone();
    parser.report_at(
        ErrorImpl::LoopBoundNotInteger {
            bound: String::from(bound),
            found: properties.data_type,
        },
        &at,
    );
}
