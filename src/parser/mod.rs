//! Parser module: the single pass that checks a program.
//!
//! There is no syntax tree. Every grammar rule is also the semantic rule
//! for the construct it recognizes: declarations go straight into the
//! symbol table, identifiers are resolved where they are read, and
//! expression rules return their type and constant value to the caller.
//! Expressions use NUD/LED lookups with binding powers for precedence.
//!
//! - `decl` - program, blocks, constant/variable/procedure declarations
//! - `stmt` - statements and statement sequences
//! - `expr` - expressions, factors and conditions
//! - `recovery` - synchronization after a recoverable syntax error

pub mod decl;
pub mod expr;
pub mod lookups;
pub mod parser;
pub mod properties;
pub mod recovery;
pub mod stmt;

#[cfg(test)]
mod tests;
