use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Position;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("BEGIN", TokenKind::Begin);
        map.insert("CALL", TokenKind::Call);
        map.insert("CONST", TokenKind::Const);
        map.insert("DO", TokenKind::Do);
        map.insert("ELSE", TokenKind::Else);
        map.insert("END", TokenKind::End);
        map.insert("FOR", TokenKind::For);
        map.insert("IF", TokenKind::If);
        map.insert("ODD", TokenKind::Odd);
        map.insert("PROCEDURE", TokenKind::Procedure);
        map.insert("PROGRAM", TokenKind::Program);
        map.insert("THEN", TokenKind::Then);
        map.insert("TO", TokenKind::To);
        map.insert("VAR", TokenKind::Var);
        map.insert("WHILE", TokenKind::While);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    Identifier,

    OpenBracket,
    CloseBracket,
    OpenParen,
    CloseParen,

    Assignment, // :=
    Equals,     // =
    NotEquals,  // <>
    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Dot,
    Semicolon,
    Comma,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,

    // Reserved
    Begin,
    Call,
    Const,
    Do,
    Else,
    End,
    For,
    If,
    Odd,
    Procedure,
    Program,
    Then,
    To,
    Var,
    While,
}

impl TokenKind {
    pub fn is_relational(&self) -> bool {
        matches!(
            self,
            TokenKind::Equals
                | TokenKind::NotEquals
                | TokenKind::Less
                | TokenKind::LessEquals
                | TokenKind::Greater
                | TokenKind::GreaterEquals
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    /// Value of a numeric literal, 0 for every other token
    pub number: i32,
    pub position: Position,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    /// Placeholder occupying the token slots before the first token is read.
    pub fn null() -> Self {
        Token {
            kind: TokenKind::EOF,
            value: String::new(),
            number: 0,
            position: Position::null(),
        }
    }
}
