use std::rc::Rc;

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

use crate::{
    config::Limits,
    errors::errors::{Error, ErrorImpl},
    Position, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

/// Consumes the matched text. Returns `None` for text that produces no
/// token (whitespace).
pub type RegexHandler = fn(&mut Lexer, &str) -> Result<Option<Token>, Error>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    // Tried in order; two-character operators precede their one-character prefixes
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new(r"^[ \t\r\n\x0B\x0C]+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new(r"^[A-Za-z][A-Za-z0-9]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new(r"^[0-9]+").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new(r"^:=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment, ":=") },
        RegexPattern { regex: Regex::new(r"^:").unwrap(), handler: colon_handler },
        RegexPattern { regex: Regex::new(r"^<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=") },
        RegexPattern { regex: Regex::new(r"^<>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "<>") },
        RegexPattern { regex: Regex::new(r"^<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<") },
        RegexPattern { regex: Regex::new(r"^>=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=") },
        RegexPattern { regex: Regex::new(r"^>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
        RegexPattern { regex: Regex::new(r"^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "=") },
        RegexPattern { regex: Regex::new(r"^\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
        RegexPattern { regex: Regex::new(r"^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-") },
        RegexPattern { regex: Regex::new(r"^\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*") },
        RegexPattern { regex: Regex::new(r"^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
        RegexPattern { regex: Regex::new(r"^%").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Percent, "%") },
        RegexPattern { regex: Regex::new(r"^\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
        RegexPattern { regex: Regex::new(r"^\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
        RegexPattern { regex: Regex::new(r"^\[").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[") },
        RegexPattern { regex: Regex::new(r"^\]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]") },
        RegexPattern { regex: Regex::new(r"^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new(r"^;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
        RegexPattern { regex: Regex::new(r"^\.").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dot, ".") },
    ];
}

/// A pull tokenizer: every call to [`Lexer::next_token`] produces the next
/// token of the source, and `EOF` forever once the input is exhausted.
#[derive(Clone)]
pub struct Lexer {
    source: Rc<str>,
    pos: usize,
    line: u32,
    column: u32,
    file: Rc<String>,
    limits: Limits,
}

impl Lexer {
    pub fn new(source: &str, file: Option<String>, limits: Limits) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            source: Rc::from(source),
            pos: 0,
            line: 1,
            column: 1,
            file: file_name,
            limits,
        }
    }

    pub fn file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    /// Position of the next unread character.
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column, Rc::clone(&self.file))
    }

    /// Moves past `text`, which must be the source text at the cursor.
    pub fn advance_over(&mut self, text: &str) {
        for c in text.chars() {
            match c {
                '\t' => self.column += self.limits.tab_width,
                '\n' => {
                    self.line += 1;
                    self.column = 1;
                }
                _ => self.column += 1,
            }
        }

        self.pos += text.len();
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn next_token(&mut self) -> Result<Token, Error> {
        loop {
            if self.at_eof() {
                return Ok(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), 0, self.position()));
            }

            let source = Rc::clone(&self.source);
            let remainder = &source[self.pos..];

            let matched = PATTERNS
                .iter()
                .find_map(|pattern| pattern.regex.find(remainder).map(|m| (pattern.handler, m.as_str())));

            let Some((handler, text)) = matched else {
                let character = remainder.chars().next().unwrap_or_default();
                return Err(Error::new(
                    ErrorImpl::UnknownCharacter { character },
                    self.position(),
                    character.to_string(),
                ));
            };

            if let Some(token) = handler(self, text)? {
                trace!("{} {:?} at {}:{}", token.kind, token.value, token.position.line, token.position.column);
                return Ok(token);
            }
        }
    }
}

fn skip_handler(lexer: &mut Lexer, matched: &str) -> Result<Option<Token>, Error> {
    lexer.advance_over(matched);
    Ok(None)
}

fn symbol_handler(lexer: &mut Lexer, matched: &str) -> Result<Option<Token>, Error> {
    let position = lexer.position();
    let value = matched.to_ascii_uppercase();
    lexer.advance_over(matched);

    let max = lexer.limits.max_ident_len;
    if value.len() > max {
        let identifier = value[..max].to_string();
        return Err(Error::new(
            ErrorImpl::IdentifierTooLong { identifier: identifier.clone(), max },
            position,
            identifier,
        ));
    }

    let kind = RESERVED_LOOKUP
        .get(value.as_str())
        .copied()
        .unwrap_or(TokenKind::Identifier);

    Ok(Some(MK_TOKEN!(kind, value, 0, position)))
}

fn number_handler(lexer: &mut Lexer, matched: &str) -> Result<Option<Token>, Error> {
    let position = lexer.position();
    lexer.advance_over(matched);

    let max = lexer.limits.max_num_len;
    let too_long = |number: &str| {
        let number = number[..max.min(number.len())].to_string();
        Error::new(
            ErrorImpl::NumberTooLong { number: number.clone(), max },
            position.clone(),
            number,
        )
    };

    if matched.len() > max {
        return Err(too_long(matched));
    }

    let number = matched.parse::<i32>().map_err(|_| too_long(matched))?;

    Ok(Some(MK_TOKEN!(TokenKind::Number, matched.to_string(), number, position)))
}

fn colon_handler(lexer: &mut Lexer, _matched: &str) -> Result<Option<Token>, Error> {
    Err(Error::new(ErrorImpl::LoneColon, lexer.position(), String::from(":")))
}

/// Tokenizes the whole source with the default limits, `EOF` included.
pub fn tokenize(source: &str, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file, Limits::default());
    let mut tokens = vec![];

    loop {
        let token = lex.next_token()?;
        let done = token.kind == TokenKind::EOF;
        tokens.push(token);

        if done {
            return Ok(tokens);
        }
    }
}
