//! Lexical analysis module for the analyzer.
//!
//! This module contains the tokenizer that turns source text into tokens
//! one at a time. It handles:
//!
//! - Recognition of keywords, identifiers, numbers, operators and punctuation
//! - Case-insensitive identifiers (stored uppercase)
//! - Length limits on identifiers and numeric literals
//! - Line and column tracking for error reporting

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
