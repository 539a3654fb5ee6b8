//! Error types and error handling for the analyzer.
//!
//! This module defines the diagnostics produced while analyzing a program.
//! It includes:
//!
//! - Error structures carrying the source position and nearby lexeme
//! - One error variant per lexical, syntactic and semantic failure
//! - Classification into lexical / syntactic / semantic categories
//! - Helpful suggestions rendered alongside the message

pub mod errors;

#[cfg(test)]
mod tests;
