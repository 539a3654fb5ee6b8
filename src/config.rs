//! Observable limits of the language.
//!
//! The analyzer stores symbols and scopes in growable containers, but
//! programs exceeding these limits are still rejected.

/// Maximum number of characters in an identifier.
pub const MAX_IDENT_LEN: usize = 11;
/// Maximum number of digits in a numeric literal.
pub const MAX_NUM_LEN: usize = 6;
/// Maximum number of formal parameters of one procedure.
pub const MAX_PARAMS: usize = 10;
/// Maximum number of entries in the symbol table, built-ins included.
pub const MAX_SYMBOLS: usize = 1024;
/// Maximum number of simultaneously open scopes, the program scope included.
pub const MAX_NESTING_DEPTH: usize = 100;
/// Columns a tab character advances the column counter by.
pub const TAB_WIDTH: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_ident_len: usize,
    pub max_num_len: usize,
    pub max_params: usize,
    pub max_symbols: usize,
    pub max_nesting_depth: usize,
    pub tab_width: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_ident_len: MAX_IDENT_LEN,
            max_num_len: MAX_NUM_LEN,
            max_params: MAX_PARAMS,
            max_symbols: MAX_SYMBOLS,
            max_nesting_depth: MAX_NESTING_DEPTH,
            tab_width: TAB_WIDTH,
        }
    }
}
