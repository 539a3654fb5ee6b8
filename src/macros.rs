//! Utility macros for the analyzer.
//!
//! This module defines helper macros used by the lexer:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a default lexer handler for fixed tokens
//!
//! These macros reduce boilerplate in the lexer's pattern table.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's lexeme
/// * `$number` - The numeric value (0 for non-numbers)
/// * `$position` - The position of the token's first character
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, "42".to_string(), 42, position);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $number:expr, $position:expr) => {
        Token {
            kind: $kind,
            value: $value,
            number: $number,
            position: $position,
        }
    };
}

/// Creates a default lexer handler for operators and punctuation.
///
/// Generates a handler that produces a token with the given kind at the
/// lexer's current position and advances the lexer over the lexeme.
///
/// # Arguments
///
/// * `$kind` - The TokenKind to create
/// * `$value` - The literal lexeme (used for the advance)
///
/// # Example
///
/// ```ignore
/// RegexPattern {
///     regex: Regex::new("^\\+").unwrap(),
///     handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+"),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut Lexer, _matched: &str| -> Result<Option<Token>, Error> {
            let position = lexer.position();
            lexer.advance_over($value);
            Ok(Some(MK_TOKEN!($kind, String::from($value), 0, position)))
        }
    };
}
