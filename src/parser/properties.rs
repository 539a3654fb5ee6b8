use crate::{lexer::tokens::TokenKind, symbols::symbol::DataType};

/// What an expression rule reports to its caller: the synthesized type
/// and, for compile-time constants, the folded value.
///
/// Once `data_type` is `DataType::Error` the expression has already been
/// diagnosed; enclosing rules propagate it without reporting again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SemanticProperties {
    pub data_type: DataType,
    pub value: Option<i32>,
}

impl SemanticProperties {
    pub fn constant(value: i32) -> Self {
        SemanticProperties {
            data_type: DataType::Integer,
            value: Some(value),
        }
    }

    /// A non-constant INTEGER.
    pub fn integer() -> Self {
        Self::of_type(DataType::Integer)
    }

    pub fn error() -> Self {
        Self::of_type(DataType::Error)
    }

    pub fn of_type(data_type: DataType) -> Self {
        SemanticProperties { data_type, value: None }
    }

    pub fn is_error(&self) -> bool {
        self.data_type == DataType::Error
    }

    pub fn is_constant(&self) -> bool {
        self.value.is_some()
    }
}

/// Evaluates an arithmetic operator over two constants.
///
/// Returns `None` for a zero divisor. Overflow wraps.
pub fn fold_binary(operator: TokenKind, left: i32, right: i32) -> Option<i32> {
    match operator {
        TokenKind::Plus => Some(left.wrapping_add(right)),
        TokenKind::Dash => Some(left.wrapping_sub(right)),
        TokenKind::Star => Some(left.wrapping_mul(right)),
        TokenKind::Slash if right != 0 => Some(left.wrapping_div(right)),
        TokenKind::Percent if right != 0 => Some(left.wrapping_rem(right)),
        _ => None,
    }
}
