//! Unit tests for the parser module.
//!
//! This module contains tests for:
//! - Expression typing and constant folding
//! - Operator precedence and associativity
//! - Recovery inside statement sequences
//! - Fatal syntax errors

use crate::{
    config::Limits,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    symbols::symbol::DataType,
};

use super::{
    expr::parse_expression,
    lookups::BindingPower,
    parser::{analyze, Outcome, Parser},
    properties::{fold_binary, SemanticProperties},
    recovery::{synchronize, SyncSet},
};

fn expression(source: &str) -> (SemanticProperties, Vec<Error>) {
    let mut parser = Parser::new(source, Some("test.pl0".to_string()), Limits::default());
    parser.advance().unwrap();

    let properties = parse_expression(&mut parser).unwrap();
    (properties, parser.diagnostics().to_vec())
}

fn kinds(errors: &[Error]) -> Vec<ErrorImpl> {
    errors.iter().map(|error| error.get_error_impl().clone()).collect()
}

#[test]
fn test_fold_precedence() {
    let (properties, errors) = expression("1 + 2 * 3");

    assert!(errors.is_empty());
    assert_eq!(properties, SemanticProperties::constant(7));
}

#[test]
fn test_fold_left_associative() {
    assert_eq!(expression("10 - 4 - 3").0.value, Some(3));
    assert_eq!(expression("100 / 10 / 5").0.value, Some(2));
    assert_eq!(expression("2 * (3 + 4) % 5").0.value, Some(4));
}

#[test]
fn test_fold_truncates_toward_zero() {
    assert_eq!(expression("-7 / 2").0.value, Some(-3));
    assert_eq!(expression("(0 - 7) % 2").0.value, Some(-1));
    assert_eq!(expression("7 / (0 - 2)").0.value, Some(-3));
}

#[test]
fn test_leading_sign_applies_to_first_term() {
    assert_eq!(expression("-2 * 3 + 10").0.value, Some(4));
    assert_eq!(expression("+5 - 1").0.value, Some(4));
}

#[test]
fn test_fold_wraps_on_overflow() {
    let (properties, errors) = expression("999999 * 999999");

    assert!(errors.is_empty());
    assert_eq!(properties.value, Some(999999i32.wrapping_mul(999999)));
}

#[test]
fn test_division_by_constant_zero_reported_at_operator() {
    let (properties, errors) = expression("8 / 0");

    assert!(properties.is_error());
    assert_eq!(kinds(&errors), vec![ErrorImpl::DivisionByZero]);
    assert_eq!(errors[0].get_position().column, 3);
    assert_eq!(errors[0].get_token(), "/");
}

#[test]
fn test_modulo_by_folded_zero() {
    let (properties, errors) = expression("8 % (2 - 2)");

    assert!(properties.is_error());
    assert_eq!(kinds(&errors), vec![ErrorImpl::ModuloByZero]);
}

#[test]
fn test_error_type_is_sticky() {
    let (properties, errors) = expression("(1 / 0) * 2 + 3");

    assert!(properties.is_error());
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_undeclared_identifier_in_expression() {
    let (properties, errors) = expression("missing + 1");

    assert!(properties.is_error());
    assert_eq!(
        kinds(&errors),
        vec![ErrorImpl::NotDeclared {
            name: "MISSING".to_string()
        }]
    );
}

#[test]
fn test_missing_factor_is_fatal() {
    let mut parser = Parser::new("1 + * 2", None, Limits::default());
    parser.advance().unwrap();

    let error = parse_expression(&mut parser).unwrap_err();
    assert!(matches!(error.get_error_impl(), ErrorImpl::UnexpectedToken { .. }));
    assert_eq!(error.get_token(), "*");
}

#[test]
fn test_fold_binary() {
    assert_eq!(fold_binary(TokenKind::Plus, 2, 3), Some(5));
    assert_eq!(fold_binary(TokenKind::Dash, 2, 3), Some(-1));
    assert_eq!(fold_binary(TokenKind::Slash, 1, 0), None);
    assert_eq!(fold_binary(TokenKind::Percent, 1, 0), None);
    assert_eq!(fold_binary(TokenKind::Slash, i32::MIN, -1), Some(i32::MIN));
    assert_eq!(fold_binary(TokenKind::Equals, 1, 1), None);
}

#[test]
fn test_binding_powers() {
    let parser = Parser::new("", None, Limits::default());
    let bp = parser.get_bp_lookup();

    assert!(bp[&TokenKind::Star] > bp[&TokenKind::Plus]);
    assert_eq!(bp[&TokenKind::Percent], BindingPower::Multiplicative);
    assert!(!bp.contains_key(&TokenKind::Identifier));
}

#[test]
fn test_synchronize_stops_at_statement_start() {
    let mut parser = Parser::new(") ) 3 IF", None, Limits::default());
    parser.advance().unwrap();

    let sync = SyncSet::statement_sequence(&parser);
    let skipped = synchronize(&mut parser, &sync).unwrap();

    assert_eq!(skipped, 3);
    assert_eq!(parser.current_token_kind(), TokenKind::If);
}

#[test]
fn test_synchronize_stops_at_eof() {
    let mut parser = Parser::new("] ]", None, Limits::default());
    parser.advance().unwrap();

    let sync = SyncSet::new(&[TokenKind::End]);
    synchronize(&mut parser, &sync).unwrap();

    assert_eq!(parser.current_token_kind(), TokenKind::EOF);
}

#[test]
fn test_missing_semicolon_between_statements_recovers() {
    let analysis = analyze("PROGRAM P; VAR x, y; BEGIN x := 1 y := 2 END.", None);

    assert_eq!(analysis.outcome(), Outcome::Failed);
    assert!(analysis.fatal.is_none());
    assert!(matches!(
        analysis.diagnostics[0].get_error_impl(),
        ErrorImpl::MissingSemicolon { .. }
    ));
    assert_eq!(analysis.diagnostics.len(), 1);
}

#[test]
fn test_stray_token_is_skipped() {
    let source = "PROGRAM P; VAR x; BEGIN x := 1; ) ) ; x := 1 / 0 END.";
    let analysis = analyze(source, None);

    assert_eq!(analysis.outcome(), Outcome::Failed);
    assert_eq!(
        kinds(&analysis.diagnostics),
        vec![ErrorImpl::ExpectedStatement, ErrorImpl::DivisionByZero]
    );
}

#[test]
fn test_missing_end_is_recoverable() {
    let analysis = analyze("PROGRAM P; VAR x; BEGIN x := 1 .", None);

    assert_eq!(analysis.outcome(), Outcome::Failed);
    assert_eq!(kinds(&analysis.diagnostics), vec![ErrorImpl::ExpectedEnd]);
    assert_eq!(analysis.diagnostics[0].get_token(), ".");
}

#[test]
fn test_missing_relational_operator_is_fatal() {
    let analysis = analyze("PROGRAM P; VAR x; BEGIN IF x THEN x := 1 END.", None);

    assert_eq!(analysis.outcome(), Outcome::Aborted);
    let fatal = analysis.fatal.unwrap();
    assert_eq!(fatal.get_error_impl(), &ErrorImpl::MissingRelationalOperator);
    assert_eq!(fatal.get_token(), "THEN");
}

#[test]
fn test_missing_then_is_fatal() {
    let analysis = analyze("PROGRAM P; VAR x; BEGIN IF x = 1 x := 1 END.", None);

    assert_eq!(analysis.outcome(), Outcome::Aborted);
    assert!(matches!(
        analysis.fatal.unwrap().get_error_impl(),
        ErrorImpl::UnexpectedToken { .. }
    ));
}

#[test]
fn test_diagnostics_before_fatal_are_kept() {
    let analysis = analyze("PROGRAM P; VAR x; BEGIN x := 1 / 0; x = 1 END.", None);

    assert_eq!(analysis.outcome(), Outcome::Aborted);
    assert_eq!(kinds(&analysis.diagnostics), vec![ErrorImpl::DivisionByZero]);
    assert_eq!(analysis.errors().count(), 2);
}

#[test]
fn test_else_branch_is_analyzed() {
    let analysis = analyze(
        "PROGRAM P; VAR x; BEGIN IF ODD x THEN x := 1 ELSE x := y END.",
        None,
    );

    assert_eq!(
        kinds(&analysis.diagnostics),
        vec![ErrorImpl::NotDeclared {
            name: "Y".to_string()
        }]
    );
}

#[test]
fn test_element_type_flows_from_array() {
    let analysis = analyze("PROGRAM P; VAR a[4], x; BEGIN x := a[1] + a[x] END.", None);

    assert!(analysis.is_accepted());
    let a = analysis.symbols.iter().find(|symbol| symbol.name == "A").unwrap();
    assert_eq!(a.data_type, DataType::Array);
    assert_eq!(a.element_type, DataType::Integer);
}
