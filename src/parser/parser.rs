//! Analysis context and entry points.
//!
//! The `Parser` owns everything a run mutates: the token cursor (current
//! and previous token), the symbol table with its scope stack, and the
//! list of recoverable diagnostics. Grammar rules receive it as `&mut
//! Parser` and return fatal errors through `Result`.
//!
//! Grammar dispatch goes through four tables:
//! - Statement handlers, keyed by the token that starts the statement
//! - NUD (null denotation) handlers for factors
//! - LED (left denotation) handlers for arithmetic operators
//! - Binding powers of the infix operators

use std::{collections::HashMap, mem};

use log::debug;

use crate::{
    config::Limits,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    symbols::symbol_table::SymbolTable,
};

use super::{
    decl::parse_program,
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
};

/// The analysis context shared by every grammar rule.
pub struct Parser {
    /// Source of tokens, pulled one at a time
    lexer: Lexer,
    /// The lookahead token
    current: Token,
    /// The most recently consumed token, used for error positions
    previous: Token,
    /// Declared entities and the scope stack
    symbols: SymbolTable,
    /// Recoverable errors recorded so far
    diagnostics: Vec<Error>,
    /// Set by the first recoverable error and never reset
    compilation_failed: bool,
    limits: Limits,
    /// Handlers for tokens that start a statement
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (factor) handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) handlers
    led_lookup: LEDLookup,
    /// Lookup table for operator binding powers
    binding_power_lookup: BPLookup,
}

impl Parser {
    /// Creates a parser over `source` with its lookup tables registered.
    /// No token has been read yet; call [`Parser::advance`] to prime the
    /// lookahead.
    pub fn new(source: &str, file: Option<String>, limits: Limits) -> Self {
        let mut parser = Parser {
            lexer: Lexer::new(source, file, limits),
            current: Token::null(),
            previous: Token::null(),
            symbols: SymbolTable::new(limits),
            diagnostics: Vec::new(),
            compilation_failed: false,
            limits,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        };

        create_token_lookups(&mut parser);
        parser
    }

    /// The lookahead token.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    pub fn previous_token(&self) -> &Token {
        &self.previous
    }

    /// Pulls the next token from the lexer and returns the one it replaces.
    pub fn advance(&mut self) -> Result<Token, Error> {
        let next = self.lexer.next_token()?;
        self.previous = mem::replace(&mut self.current, next);
        Ok(self.previous.clone())
    }

    /// Consumes a token of the expected kind or fails with `error`,
    /// reported at the current token.
    pub fn expect_error(&mut self, expected_kind: TokenKind, error: ErrorImpl) -> Result<Token, Error> {
        if self.current.kind != expected_kind {
            Err(self.error_at(error, &self.current))
        } else {
            self.advance()
        }
    }

    /// Consumes a token of the expected kind or fails with an
    /// `UnexpectedToken` error describing what was `expected`.
    pub fn expect(&mut self, expected_kind: TokenKind, expected: &str) -> Result<Token, Error> {
        self.expect_error(
            expected_kind,
            ErrorImpl::UnexpectedToken {
                expected: String::from(expected),
            },
        )
    }

    /// Builds an error positioned at `token`.
    pub fn error_at(&self, error: ErrorImpl, token: &Token) -> Error {
        Error::new(error, token.position.clone(), token.value.clone())
    }

    /// Records a recoverable error and marks the compilation as failed.
    pub fn report(&mut self, error: Error) {
        debug!("recoverable error: {}", error);
        self.compilation_failed = true;
        self.diagnostics.push(error);
    }

    /// Records a recoverable error positioned at `token`.
    pub fn report_at(&mut self, error: ErrorImpl, token: &Token) {
        let error = self.error_at(error, token);
        self.report(error);
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn symbols_mut(&mut self) -> &mut SymbolTable {
        &mut self.symbols
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    pub fn diagnostics(&self) -> &[Error] {
        &self.diagnostics
    }

    pub fn compilation_failed(&self) -> bool {
        self.compilation_failed
    }

    /// Whether a token of this kind can start a non-empty statement.
    pub fn starts_statement(&self, kind: TokenKind) -> bool {
        self.stmt_lookup.contains_key(&kind)
    }

    /// Statement handlers keyed by their first token.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Factor handlers keyed by their first token.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Registers an infix operator together with its binding power. Only
    /// tokens registered here take part in precedence climbing.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (factor) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for the token starting the statement.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    fn into_analysis(self, fatal: Option<Error>) -> Analysis {
        Analysis {
            symbols: self.symbols,
            diagnostics: self.diagnostics,
            fatal,
            compilation_failed: self.compilation_failed,
        }
    }
}

/// How an analysis run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No errors of any kind
    Success,
    /// The whole program was analyzed but recoverable errors were recorded
    Failed,
    /// Analysis stopped at a fatal error
    Aborted,
}

impl Outcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::Success => 0,
            Outcome::Failed => 1,
            Outcome::Aborted => 2,
        }
    }
}

/// The result of analyzing one program.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Every symbol declared before the run ended, in declaration order
    pub symbols: SymbolTable,
    /// Recoverable errors, in the order they were found
    pub diagnostics: Vec<Error>,
    /// The error that aborted the run, if any
    pub fatal: Option<Error>,
    compilation_failed: bool,
}

impl Analysis {
    pub fn outcome(&self) -> Outcome {
        if self.fatal.is_some() {
            Outcome::Aborted
        } else if self.compilation_failed {
            Outcome::Failed
        } else {
            Outcome::Success
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.outcome() == Outcome::Success
    }

    /// Recoverable errors followed by the fatal one, if any.
    pub fn errors(&self) -> impl Iterator<Item = &Error> {
        self.diagnostics.iter().chain(self.fatal.iter())
    }
}

/// Analyzes a program with the default limits.
///
/// # Arguments
///
/// * `source` - The program text
/// * `file` - The file name used in diagnostic positions
///
/// # Returns
///
/// The resolved symbol table together with every diagnostic produced.
pub fn analyze(source: &str, file: Option<String>) -> Analysis {
    analyze_with(source, file, Limits::default())
}

/// Analyzes a program with custom limits.
pub fn analyze_with(source: &str, file: Option<String>, limits: Limits) -> Analysis {
    let mut parser = Parser::new(source, file, limits);
    let result = run(&mut parser);

    if let Err(error) = &result {
        debug!("fatal error: {}", error);
    }

    parser.into_analysis(result.err())
}

fn run(parser: &mut Parser) -> Result<(), Error> {
    let position = parser.lexer.position();
    parser.symbols.declare_builtins(&position)?;

    parser.advance()?;
    parse_program(parser)
}
