use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    symbols::symbol::{DataType, Parameter, SymbolKind},
};

use super::{parser::Parser, stmt::parse_compound_stmt};

/// `"PROGRAM" Ident ";" Block "."`
///
/// The program name opens the outermost scope but is not itself declared.
pub fn parse_program(parser: &mut Parser) -> Result<(), Error> {
    parser.expect(TokenKind::Program, "'PROGRAM'")?;
    let name = parser.expect(TokenKind::Identifier, "a program name after 'PROGRAM'")?;
    expect_separator(parser, "after program name")?;

    parser.symbols_mut().enter_scope(&name.position, &name.value)?;
    parse_block(parser)?;
    parser.symbols_mut().exit_scope();

    parser.expect(TokenKind::Dot, "'.' at the end of the program")?;

    if parser.current_token_kind() != TokenKind::EOF {
        return Err(parser.error_at(ErrorImpl::TrailingTokens, parser.current_token()));
    }

    Ok(())
}

/// Consumes a `;` that ends a header or a declaration section. A missing
/// one is reported after the preceding token and parsing goes on.
fn expect_separator(parser: &mut Parser, context: &str) -> Result<(), Error> {
    if parser.current_token_kind() == TokenKind::Semicolon {
        parser.advance()?;
        return Ok(());
    }

    let previous = parser.previous_token().clone();
    parser.report_at(
        ErrorImpl::MissingSemicolon {
            context: String::from(context),
        },
        &previous,
    );

    Ok(())
}

/// `{ConstDecl | VarDecl} {ProcDecl} CompoundStatement`
pub fn parse_block(parser: &mut Parser) -> Result<(), Error> {
    loop {
        match parser.current_token_kind() {
            TokenKind::Const => parse_const_decl(parser)?,
            TokenKind::Var => parse_var_decl(parser)?,
            _ => break,
        }
    }

    while parser.current_token_kind() == TokenKind::Procedure {
        parse_procedure_decl(parser)?;
        expect_separator(parser, "after procedure block")?;
    }

    if parser.current_token_kind() != TokenKind::Begin {
        return Err(parser.error_at(
            ErrorImpl::UnexpectedToken {
                expected: String::from("'BEGIN' to start the block body"),
            },
            parser.current_token(),
        ));
    }

    parse_compound_stmt(parser)
}

/// `"CONST" Ident "=" Number {"," Ident "=" Number} ";"`
fn parse_const_decl(parser: &mut Parser) -> Result<(), Error> {
    parser.expect(TokenKind::Const, "'CONST'")?;

    loop {
        let identifier = parser.expect(TokenKind::Identifier, "a constant name")?;
        parser.expect(TokenKind::Equals, "'=' after constant name")?;
        let value = parser.expect(TokenKind::Number, "a constant value after '='")?;

        if check_redeclaration(parser, &identifier) {
            parser.symbols_mut().declare(
                &identifier.value,
                SymbolKind::Const,
                DataType::Integer,
                value.number,
                0,
                &identifier.position,
            )?;
        }

        if parser.current_token_kind() != TokenKind::Comma {
            break;
        }
        parser.advance()?;
    }

    expect_separator(parser, "after constant declarations")
}

/// `"VAR" Ident ["[" Number "]"] {"," Ident ["[" Number "]"]} ";"`
fn parse_var_decl(parser: &mut Parser) -> Result<(), Error> {
    parser.expect(TokenKind::Var, "'VAR'")?;

    loop {
        let identifier = parser.expect(TokenKind::Identifier, "a variable name")?;

        let (data_type, size) = if parser.current_token_kind() == TokenKind::OpenBracket {
            parser.advance()?;
            let size = parser.expect(TokenKind::Number, "an array size after '['")?;
            parser.expect(TokenKind::CloseBracket, "']' after array size")?;
            (DataType::Array, size.number)
        } else {
            (DataType::Integer, 0)
        };

        if check_redeclaration(parser, &identifier) {
            parser.symbols_mut().declare(
                &identifier.value,
                SymbolKind::Var,
                data_type,
                0,
                size,
                &identifier.position,
            )?;
        }

        if parser.current_token_kind() != TokenKind::Comma {
            break;
        }
        parser.advance()?;
    }

    expect_separator(parser, "after variable declarations")
}

/// `"PROCEDURE" Ident ["(" ParamList ")"] ";" Block`
///
/// The procedure is declared in the enclosing scope; its parameters and
/// body live in a new one.
fn parse_procedure_decl(parser: &mut Parser) -> Result<(), Error> {
    parser.expect(TokenKind::Procedure, "'PROCEDURE'")?;
    let identifier = parser.expect(TokenKind::Identifier, "a procedure name")?;

    check_redeclaration(parser, &identifier);
    let procedure = parser.symbols_mut().declare(
        &identifier.value,
        SymbolKind::Procedure,
        DataType::None,
        0,
        0,
        &identifier.position,
    )?;

    parser
        .symbols_mut()
        .enter_scope(&identifier.position, &identifier.value)?;

    if parser.current_token_kind() == TokenKind::OpenParen {
        parse_parameters(parser, procedure, &identifier)?;
    }

    expect_separator(parser, "after procedure header")?;
    parse_block(parser)?;

    parser.symbols_mut().exit_scope();
    Ok(())
}

/// `"(" Param {(";" | ",") Param} ")"` where `Param := ["VAR"] Ident`.
fn parse_parameters(parser: &mut Parser, procedure: usize, name: &Token) -> Result<(), Error> {
    parser.expect(TokenKind::OpenParen, "'('")?;

    if parser.current_token_kind() == TokenKind::CloseParen {
        return Err(parser.error_at(ErrorImpl::EmptyParameterList, parser.current_token()));
    }

    loop {
        let by_reference = parser.current_token_kind() == TokenKind::Var;
        if by_reference {
            parser.advance()?;
        }

        let parameter = parser.expect(TokenKind::Identifier, "a parameter name")?;

        if check_redeclaration(parser, &parameter) {
            parser.symbols_mut().declare(
                &parameter.value,
                SymbolKind::Var,
                DataType::Integer,
                0,
                0,
                &parameter.position,
            )?;

            let appended = parser.symbols_mut().add_parameter(
                procedure,
                Parameter {
                    data_type: DataType::Integer,
                    by_reference,
                },
            );

            if !appended {
                let max = parser.limits().max_params;
                parser.report_at(
                    ErrorImpl::TooManyParameters {
                        procedure: name.value.clone(),
                        max,
                    },
                    &parameter,
                );
            }
        }

        match parser.current_token_kind() {
            TokenKind::Semicolon | TokenKind::Comma => {
                parser.advance()?;
            }
            _ => break,
        }
    }

    parser.expect(TokenKind::CloseParen, "';', ',' or ')' in parameter list")?;
    Ok(())
}

/// Reports `identifier` if it is already declared in the current scope.
/// Returns whether the name is free.
fn check_redeclaration(parser: &mut Parser, identifier: &Token) -> bool {
    if !parser.symbols().is_redeclared(&identifier.value) {
        return true;
    }

    parser.report_at(
        ErrorImpl::AlreadyDeclared {
            name: identifier.value.clone(),
        },
        identifier,
    );
    false
}
