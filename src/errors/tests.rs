//! Unit tests for error handling.
//!
//! This module contains tests for error names, messages, categories and
//! tips.

use crate::errors::errors::{Error, ErrorCategory, ErrorImpl, ErrorTip};
use crate::symbols::symbol::DataType;
use crate::Position;
use std::rc::Rc;

fn position() -> Position {
    Position::new(3, 7, Rc::new("test.pl0".to_string()))
}

#[test]
fn test_error_position_and_token() {
    let error = Error::new(ErrorImpl::DivisionByZero, position(), "/".to_string());

    assert_eq!(error.get_position().line, 3);
    assert_eq!(error.get_position().column, 7);
    assert_eq!(error.get_token(), "/");
    assert_eq!(error.get_error_name(), "DivisionByZero");
}

#[test]
fn test_message_mentions_token() {
    let error = Error::new(
        ErrorImpl::NotDeclared {
            name: "FOO".to_string(),
        },
        position(),
        "FOO".to_string(),
    );

    assert_eq!(error.get_message(), "'FOO' is not declared, near `FOO`");
    assert_eq!(error.to_string(), "test.pl0:3:7: 'FOO' is not declared, near `FOO`");
}

#[test]
fn test_message_without_token() {
    let error = Error::new(ErrorImpl::ExpectedEnd, position(), String::new());

    assert_eq!(error.get_message(), "expected 'END' to close the BEGIN ... END block");
}

#[test]
fn test_out_of_bounds_message() {
    let error = ErrorImpl::IndexOutOfBounds {
        name: "A".to_string(),
        index: 5,
        size: 3,
    };

    assert_eq!(
        error.to_string(),
        "array index [5] for array 'A' is out of bounds (size: 3, valid indices: 0..2)"
    );
}

#[test]
fn test_type_names_in_messages() {
    let error = ErrorImpl::ArgumentTypeMismatch {
        procedure: "Q".to_string(),
        argument: 1,
        expected: DataType::Integer,
        received: DataType::Array,
    };

    assert_eq!(
        error.to_string(),
        "type mismatch for argument 1 of procedure 'Q': expected INTEGER, got ARRAY"
    );
}

#[test]
fn test_categories() {
    let lexical = Error::new(ErrorImpl::LoneColon, position(), ":".to_string());
    let syntactic = Error::new(ErrorImpl::TrailingTokens, position(), "X".to_string());
    let semantic = Error::new(ErrorImpl::NestingTooDeep { max: 100 }, position(), "Q".to_string());

    assert_eq!(lexical.category(), ErrorCategory::Lexical);
    assert_eq!(syntactic.category(), ErrorCategory::Syntactic);
    assert_eq!(semantic.category(), ErrorCategory::Semantic);
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(ErrorImpl::DivisionByZero, position(), "/".to_string());

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::MissingSubscript {
            name: "A".to_string(),
        },
        position(),
        "A".to_string(),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert!(tip.contains("A[index]")),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}
