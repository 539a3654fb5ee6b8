use std::collections::HashSet;

use log::debug;

use crate::{errors::errors::Error, lexer::tokens::TokenKind};

use super::parser::Parser;

/// Tokens at which panic-mode recovery stops skipping. End of input is
/// always a member.
#[derive(Debug, Clone)]
pub struct SyncSet {
    tokens: HashSet<TokenKind>,
}

impl SyncSet {
    pub fn new(tokens: &[TokenKind]) -> Self {
        let mut tokens: HashSet<TokenKind> = tokens.iter().copied().collect();
        tokens.insert(TokenKind::EOF);

        SyncSet { tokens }
    }

    /// Anything that can start a statement, plus the separators and
    /// terminators of a statement sequence.
    pub fn statement_sequence(parser: &Parser) -> Self {
        let mut tokens: Vec<TokenKind> = parser.get_stmt_lookup().keys().copied().collect();
        tokens.extend([TokenKind::Semicolon, TokenKind::End, TokenKind::Dot]);

        SyncSet::new(&tokens)
    }

    pub fn contains(&self, kind: TokenKind) -> bool {
        self.tokens.contains(&kind)
    }
}

/// Skips tokens until the current one is in `sync`. Returns how many tokens
/// were skipped.
pub fn synchronize(parser: &mut Parser, sync: &SyncSet) -> Result<usize, Error> {
    let mut skipped = 0;

    while !sync.contains(parser.current_token_kind()) {
        parser.advance()?;
        skipped += 1;
    }

    debug!(
        "skipped {} token(s), resuming at {:?} ({})",
        skipped,
        parser.current_token().value,
        parser.current_token().position
    );

    Ok(skipped)
}
