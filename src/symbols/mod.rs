//! Symbol table and lexical scopes.
//!
//! Every declared entity (constant, variable, procedure) is appended to a
//! flat table exactly once. An explicit scope stack partitions the table
//! into nested lexical levels and drives name resolution:
//!
//! - Redeclaration checks only look at the innermost open scope
//! - Resolution searches from the innermost scope outwards
//! - Closing a scope hides its symbols without removing them

pub mod symbol;
pub mod symbol_table;
