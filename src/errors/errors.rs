use std::fmt::Display;

use thiserror::Error;

use crate::{symbols::symbol::DataType, Position};

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
    token: String,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position, token: String) -> Self {
        Error {
            internal_error: error_impl,
            position,
            token,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    /// The lexeme of the token the error was reported near.
    pub fn get_token(&self) -> &str {
        &self.token
    }

    pub fn get_error_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::IdentifierTooLong { .. } => "IdentifierTooLong",
            ErrorImpl::NumberTooLong { .. } => "NumberTooLong",
            ErrorImpl::UnknownCharacter { .. } => "UnknownCharacter",
            ErrorImpl::LoneColon => "LoneColon",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::MissingSemicolon { .. } => "MissingSemicolon",
            ErrorImpl::ExpectedStatement => "ExpectedStatement",
            ErrorImpl::ExpectedEnd => "ExpectedEnd",
            ErrorImpl::MissingRelationalOperator => "MissingRelationalOperator",
            ErrorImpl::EmptyParameterList => "EmptyParameterList",
            ErrorImpl::TrailingTokens => "TrailingTokens",
            ErrorImpl::AlreadyDeclared { .. } => "AlreadyDeclared",
            ErrorImpl::NotDeclared { .. } => "NotDeclared",
            ErrorImpl::NotAVariable { .. } => "NotAVariable",
            ErrorImpl::NotAProcedure { .. } => "NotAProcedure",
            ErrorImpl::NotAValue { .. } => "NotAValue",
            ErrorImpl::NotAnArray { .. } => "NotAnArray",
            ErrorImpl::MissingSubscript { .. } => "MissingSubscript",
            ErrorImpl::IndexOutOfBounds { .. } => "IndexOutOfBounds",
            ErrorImpl::NonIntegerIndex { .. } => "NonIntegerIndex",
            ErrorImpl::OperandTypeMismatch { .. } => "OperandTypeMismatch",
            ErrorImpl::UnaryTypeMismatch { .. } => "UnaryTypeMismatch",
            ErrorImpl::AssignmentTypeMismatch { .. } => "AssignmentTypeMismatch",
            ErrorImpl::ArgumentCountMismatch { .. } => "ArgumentCountMismatch",
            ErrorImpl::ArgumentTypeMismatch { .. } => "ArgumentTypeMismatch",
            ErrorImpl::DivisionByZero => "DivisionByZero",
            ErrorImpl::ModuloByZero => "ModuloByZero",
            ErrorImpl::LoopVariableNotInteger { .. } => "LoopVariableNotInteger",
            ErrorImpl::LoopBoundNotInteger { .. } => "LoopBoundNotInteger",
            ErrorImpl::OddOperandNotInteger { .. } => "OddOperandNotInteger",
            ErrorImpl::TooManyParameters { .. } => "TooManyParameters",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
            ErrorImpl::SymbolTableFull { .. } => "SymbolTableFull",
        }
    }

    /// The diagnostic text, including the token it was reported near.
    pub fn get_message(&self) -> String {
        if self.token.is_empty() {
            self.internal_error.to_string()
        } else {
            format!("{}, near `{}`", self.internal_error, self.token)
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::LoneColon => ErrorTip::Suggestion(String::from("did you mean `:=`?")),
            ErrorImpl::MissingSemicolon { .. } => {
                ErrorTip::Suggestion(String::from("did you miss a semicolon?"))
            }
            ErrorImpl::EmptyParameterList => {
                ErrorTip::Suggestion(String::from("omit the parentheses for a procedure without parameters"))
            }
            ErrorImpl::MissingSubscript { name } => {
                ErrorTip::Suggestion(format!("use `{}[index]` to access a single element", name))
            }
            ErrorImpl::NotDeclared { name } => {
                ErrorTip::Suggestion(format!("declare `{}` with CONST or VAR before using it", name))
            }
            ErrorImpl::IdentifierTooLong { max, .. } => {
                ErrorTip::Suggestion(format!("identifiers are limited to {} characters", max))
            }
            ErrorImpl::NumberTooLong { max, .. } => {
                ErrorTip::Suggestion(format!("numbers are limited to {} digits", max))
            }
            _ => ErrorTip::None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match &self.internal_error {
            ErrorImpl::IdentifierTooLong { .. }
            | ErrorImpl::NumberTooLong { .. }
            | ErrorImpl::UnknownCharacter { .. }
            | ErrorImpl::LoneColon => ErrorCategory::Lexical,
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::MissingSemicolon { .. }
            | ErrorImpl::ExpectedStatement
            | ErrorImpl::ExpectedEnd
            | ErrorImpl::MissingRelationalOperator
            | ErrorImpl::EmptyParameterList
            | ErrorImpl::TrailingTokens => ErrorCategory::Syntactic,
            _ => ErrorCategory::Semantic,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.position, self.get_message())
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lexical,
    Syntactic,
    Semantic,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    // Lexical
    #[error("identifier '{identifier}' is longer than {max} characters")]
    IdentifierTooLong { identifier: String, max: usize },
    #[error("number '{number}' is longer than {max} digits")]
    NumberTooLong { number: String, max: usize },
    #[error("unknown character '{character}'")]
    UnknownCharacter { character: char },
    #[error("unexpected character ':'")]
    LoneColon,

    // Syntactic
    #[error("expected {expected}")]
    UnexpectedToken { expected: String },
    #[error("expected ';' {context}")]
    MissingSemicolon { context: String },
    #[error("expected a statement, ';' or 'END'")]
    ExpectedStatement,
    #[error("expected 'END' to close the BEGIN ... END block")]
    ExpectedEnd,
    #[error("expected a relational operator (=, <>, <, <=, >, >=) in condition")]
    MissingRelationalOperator,
    #[error("an empty parameter list '()' is not allowed")]
    EmptyParameterList,
    #[error("unexpected tokens after the final '.'")]
    TrailingTokens,

    // Semantic
    #[error("'{name}' is already declared in this scope")]
    AlreadyDeclared { name: String },
    #[error("'{name}' is not declared")]
    NotDeclared { name: String },
    #[error("'{name}' is not a variable")]
    NotAVariable { name: String },
    #[error("'{name}' is not a procedure")]
    NotAProcedure { name: String },
    #[error("procedure '{name}' cannot be used as a value")]
    NotAValue { name: String },
    #[error("'{name}' is not an array, cannot use subscript")]
    NotAnArray { name: String },
    #[error("array '{name}' cannot be used without a subscript")]
    MissingSubscript { name: String },
    #[error(
        "array index [{}] for array '{}' is out of bounds (size: {}, valid indices: 0..{})",
        .index, .name, .size, .size - 1
    )]
    IndexOutOfBounds { name: String, index: i32, size: i32 },
    #[error("array index must be an INTEGER expression, found {found}")]
    NonIntegerIndex { found: DataType },
    #[error("type mismatch for operator '{operator}': both operands must be INTEGER, found {left} and {right}")]
    OperandTypeMismatch {
        operator: String,
        left: DataType,
        right: DataType,
    },
    #[error("unary operator '{operator}' can only be applied to an INTEGER, found {found}")]
    UnaryTypeMismatch { operator: String, found: DataType },
    #[error("type mismatch in assignment to '{name}': expected {expected}, found {received}")]
    AssignmentTypeMismatch {
        name: String,
        expected: DataType,
        received: DataType,
    },
    #[error("incorrect number of arguments for procedure '{procedure}': expected {expected}, got {received}")]
    ArgumentCountMismatch {
        procedure: String,
        expected: usize,
        received: usize,
    },
    #[error("type mismatch for argument {argument} of procedure '{procedure}': expected {expected}, got {received}")]
    ArgumentTypeMismatch {
        procedure: String,
        argument: usize,
        expected: DataType,
        received: DataType,
    },
    #[error("division by constant zero")]
    DivisionByZero,
    #[error("modulo by constant zero")]
    ModuloByZero,
    #[error("loop control variable '{name}' must be an INTEGER variable")]
    LoopVariableNotInteger { name: String },
    #[error("FOR loop {bound} expression must be INTEGER, found {found}")]
    LoopBoundNotInteger { bound: String, found: DataType },
    #[error("operand of ODD must be an INTEGER expression, found {found}")]
    OddOperandNotInteger { found: DataType },
    #[error("procedure '{procedure}' has more than {max} parameters")]
    TooManyParameters { procedure: String, max: usize },
    #[error("maximum nesting depth of {max} exceeded")]
    NestingTooDeep { max: usize },
    #[error("symbol table overflow (capacity {max})")]
    SymbolTableFull { max: usize },
}
