//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers (case-insensitive)
//! - Numeric literals
//! - Operators and punctuation, including two-character operators
//! - Line and column tracking
//! - Error cases

use crate::{config::Limits, errors::errors::ErrorImpl};

use super::{
    lexer::{tokenize, Lexer},
    tokens::TokenKind,
};

#[test]
fn test_tokenize_keywords() {
    let source = "begin call const do else end for if odd procedure program then to var while";
    let tokens = tokenize(source, Some("test.pl0".to_string())).unwrap();

    let kinds: Vec<TokenKind> = tokens.iter().map(|token| token.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Begin,
            TokenKind::Call,
            TokenKind::Const,
            TokenKind::Do,
            TokenKind::Else,
            TokenKind::End,
            TokenKind::For,
            TokenKind::If,
            TokenKind::Odd,
            TokenKind::Procedure,
            TokenKind::Program,
            TokenKind::Then,
            TokenKind::To,
            TokenKind::Var,
            TokenKind::While,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_identifiers_are_uppercased() {
    let tokens = tokenize("foo Bar baz123 BeGiN", Some("test.pl0".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "FOO");
    assert_eq!(tokens[1].value, "BAR");
    assert_eq!(tokens[2].value, "BAZ123");
    assert_eq!(tokens[3].kind, TokenKind::Begin);
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers() {
    let tokens = tokenize("42 0 999999", Some("test.pl0".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].number, 42);
    assert_eq!(tokens[1].number, 0);
    assert_eq!(tokens[2].number, 999999);
    assert_eq!(tokens[2].value, "999999");
}

#[test]
fn test_number_followed_by_letters_splits() {
    let tokens = tokenize("12ab", Some("test.pl0".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].number, 12);
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].value, "AB");
}

#[test]
fn test_tokenize_operators() {
    let source = "+ - * / % = <> < <= > >= :=";
    let tokens = tokenize(source, Some("test.pl0".to_string())).unwrap();

    let kinds: Vec<TokenKind> = tokens.iter().map(|token| token.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::Less,
            TokenKind::LessEquals,
            TokenKind::Greater,
            TokenKind::GreaterEquals,
            TokenKind::Assignment,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_punctuation_without_spaces() {
    let tokens = tokenize("a[1],(b);c.", Some("test.pl0".to_string())).unwrap();

    let kinds: Vec<TokenKind> = tokens.iter().map(|token| token.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier,
            TokenKind::OpenBracket,
            TokenKind::Number,
            TokenKind::CloseBracket,
            TokenKind::Comma,
            TokenKind::OpenParen,
            TokenKind::Identifier,
            TokenKind::CloseParen,
            TokenKind::Semicolon,
            TokenKind::Identifier,
            TokenKind::Dot,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_less_followed_by_greater_is_not_equals() {
    let tokens = tokenize("x<>y x< >y", Some("test.pl0".to_string())).unwrap();

    assert_eq!(tokens[1].kind, TokenKind::NotEquals);
    assert_eq!(tokens[4].kind, TokenKind::Less);
    assert_eq!(tokens[5].kind, TokenKind::Greater);
}

#[test]
fn test_positions_track_lines_and_columns() {
    let tokens = tokenize("PROGRAM p;\n  VAR x;\n\tx := 1", Some("test.pl0".to_string())).unwrap();

    assert_eq!((tokens[0].position.line, tokens[0].position.column), (1, 1));
    assert_eq!((tokens[1].position.line, tokens[1].position.column), (1, 9));
    assert_eq!((tokens[2].position.line, tokens[2].position.column), (1, 10));
    assert_eq!((tokens[3].position.line, tokens[3].position.column), (2, 3));
    assert_eq!((tokens[4].position.line, tokens[4].position.column), (2, 7));
    // A tab advances the column by the tab width
    assert_eq!((tokens[6].position.line, tokens[6].position.column), (3, 5));
    assert_eq!((tokens[7].position.line, tokens[7].position.column), (3, 7));
    assert_eq!(tokens[7].kind, TokenKind::Assignment);
}

#[test]
fn test_identifier_at_maximum_length() {
    let tokens = tokenize("abcdefghijk", Some("test.pl0".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "ABCDEFGHIJK");
}

#[test]
fn test_identifier_too_long() {
    let error = tokenize("x abcdefghijkl", Some("test.pl0".to_string())).unwrap_err();

    assert_eq!(
        error.get_error_impl(),
        &ErrorImpl::IdentifierTooLong {
            identifier: "ABCDEFGHIJK".to_string(),
            max: 11
        }
    );
    assert_eq!(error.get_position().column, 3);
}

#[test]
fn test_number_too_long() {
    let error = tokenize("1234567", Some("test.pl0".to_string())).unwrap_err();

    assert_eq!(
        error.get_error_impl(),
        &ErrorImpl::NumberTooLong {
            number: "123456".to_string(),
            max: 6
        }
    );
}

#[test]
fn test_lone_colon_is_an_error() {
    let error = tokenize("x : 1", Some("test.pl0".to_string())).unwrap_err();

    assert_eq!(error.get_error_impl(), &ErrorImpl::LoneColon);
    assert_eq!(error.get_position().column, 3);
}

#[test]
fn test_unknown_character() {
    let error = tokenize("x := @", Some("test.pl0".to_string())).unwrap_err();

    assert_eq!(error.get_error_impl(), &ErrorImpl::UnknownCharacter { character: '@' });
    assert_eq!(error.get_token(), "@");
}

#[test]
fn test_eof_is_repeated() {
    let mut lexer = Lexer::new("x", None, Limits::default());

    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Identifier);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::EOF);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::EOF);
}

#[test]
fn test_custom_limits() {
    let limits = Limits {
        max_ident_len: 3,
        tab_width: 8,
        ..Limits::default()
    };
    let mut lexer = Lexer::new("\tabc abcd", None, limits);

    let token = lexer.next_token().unwrap();
    assert_eq!(token.value, "ABC");
    assert_eq!(token.position.column, 9);
    assert!(lexer.next_token().is_err());
}
