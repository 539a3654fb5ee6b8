#![allow(clippy::module_inception)]

use std::{fmt::Display, rc::Rc};

use crate::errors::errors::{Error, ErrorTip};

pub mod config;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod symbols;

extern crate regex;

pub use parser::parser::{analyze, analyze_with, Analysis, Outcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub line: u32,
    pub column: u32,
    pub file: Rc<String>,
}

impl Position {
    pub fn new(line: u32, column: u32, file: Rc<String>) -> Self {
        Position { line, column, file }
    }

    pub fn null() -> Self {
        Position::new(0, 0, Rc::new(String::from("<null>")))
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// Returns the text of the 1-based `line` of `content`, without its line
/// terminator, or `None` if the source is shorter than that.
pub fn get_line_at_position(content: &str, line: u32) -> Option<&str> {
    if line == 0 {
        return None;
    }

    content
        .split('\n')
        .nth((line - 1) as usize)
        .map(|text| text.trim_end_matches('\r'))
}


/// Renders a diagnostic with the offending source line and a caret under
/// the reported column.
pub fn render_error(error: &Error, source: &str) -> String {
    /*
        Error: message
        -> final.pl0:20:9
           |
        20 | x := a / 0;
           | --------^
    */

    let position = error.get_position();
    let line_string = position.line.to_string();
    let padding = line_string.len() + 2;

    let mut rendered = String::new();

    rendered.push_str(&format!(
        "Error: {} ({})\n",
        error.get_error_name(),
        error.get_message()
    ));
    rendered.push_str(&format!("-> {}\n", position));

    if let Some(line_text) = get_line_at_position(source, position.line) {
        rendered.push_str(&format!("{:>padding$}\n", "|"));

        let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
        rendered.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

        let arrows = (position.column as usize)
            .saturating_sub(removed_whitespace)
            .max(1);

        rendered.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));
    }

    if let ErrorTip::Suggestion(tip) = error.get_tip() {
        rendered.push_str(&format!("{:>padding$} help: {}\n", "=", tip));
    }

    rendered
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
