use std::{fmt::Display, ops::Index};

use log::debug;

use crate::{
    config::Limits,
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::symbol::{DataType, Parameter, Symbol, SymbolKind};

/// Procedures available to every program without a declaration.
pub const BUILTIN_PROCEDURES: [&str; 4] = ["READLN", "WRITELN", "READ", "WRITE"];

/// A flat, append-only table of symbols partitioned into lexical scopes.
///
/// `scopes` holds, for every open level, the index of the first symbol
/// declared after that level was entered. Symbols of closed scopes stay in
/// the table; resolution skips them by comparing declaring levels.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    scopes: Vec<usize>,
    limits: Limits,
}

impl SymbolTable {
    pub fn new(limits: Limits) -> Self {
        SymbolTable {
            symbols: Vec::new(),
            scopes: Vec::new(),
            limits,
        }
    }

    /// Declares the built-in I/O procedures at level 0, each taking one
    /// INTEGER value parameter. Must run before the program scope opens so
    /// that programs may shadow them.
    pub fn declare_builtins(&mut self, position: &Position) -> Result<(), Error> {
        for name in BUILTIN_PROCEDURES {
            let index = self.declare(name, SymbolKind::Procedure, DataType::None, 0, 0, position)?;
            self.add_parameter(index, Parameter::value(DataType::Integer));
        }

        Ok(())
    }

    /// The current scope level. Level 0 is the program level.
    pub fn level(&self) -> usize {
        self.scopes.len().saturating_sub(1)
    }

    /// Number of currently open scopes.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Symbol> {
        self.symbols.iter()
    }

    /// Appends a symbol at the current level and returns its index.
    ///
    /// Fails when the table is at capacity.
    pub fn declare(
        &mut self,
        name: &str,
        kind: SymbolKind,
        data_type: DataType,
        value: i32,
        size: i32,
        position: &Position,
    ) -> Result<usize, Error> {
        if self.symbols.len() >= self.limits.max_symbols {
            return Err(Error::new(
                ErrorImpl::SymbolTableFull {
                    max: self.limits.max_symbols,
                },
                position.clone(),
                name.to_string(),
            ));
        }

        let address = self.symbols.len();
        let element_type = if data_type == DataType::Array {
            DataType::Integer
        } else {
            DataType::None
        };

        self.symbols.push(Symbol {
            name: name.to_string(),
            kind,
            data_type,
            element_type,
            value,
            size,
            level: self.level(),
            address,
            parameters: Vec::new(),
        });

        debug!("declared {} {} at level {} (index {})", kind, name, self.level(), address);
        Ok(address)
    }

    /// Appends a formal parameter to a procedure's parameter list.
    ///
    /// Returns `false` without appending when the list is already full.
    pub fn add_parameter(&mut self, procedure: usize, parameter: Parameter) -> bool {
        let max_params = self.limits.max_params;
        let symbol = &mut self.symbols[procedure];

        if symbol.parameters.len() >= max_params {
            return false;
        }

        symbol.parameters.push(parameter);
        true
    }

    /// Whether `name` is already declared directly in the current scope.
    /// Enclosing scopes are not consulted, so shadowing is allowed.
    pub fn is_redeclared(&self, name: &str) -> bool {
        let level = self.level();
        let start = self.scopes.last().copied().unwrap_or(0);

        self.symbols[start..]
            .iter()
            .any(|symbol| symbol.level == level && symbol.name == name)
    }

    /// Finds the visible symbol called `name`, searching from the innermost
    /// scope outwards and, within a scope, from the most recent declaration.
    pub fn resolve(&self, name: &str) -> Option<usize> {
        if self.scopes.is_empty() {
            return self
                .symbols
                .iter()
                .rposition(|symbol| symbol.level == 0 && symbol.name == name);
        }

        for level in (0..self.scopes.len()).rev() {
            // Level 0 also covers the built-ins declared before it opened
            let start = if level == 0 { 0 } else { self.scopes[level] };
            let end = self
                .scopes
                .get(level + 1)
                .copied()
                .unwrap_or(self.symbols.len());

            let found = (start..end)
                .rev()
                .find(|&index| self.symbols[index].level == level && self.symbols[index].name == name);

            if found.is_some() {
                return found;
            }
        }

        None
    }

    /// Opens a new scope level.
    ///
    /// Fails when the maximum nesting depth would be exceeded.
    pub fn enter_scope(&mut self, position: &Position, near: &str) -> Result<(), Error> {
        if self.scopes.len() >= self.limits.max_nesting_depth {
            return Err(Error::new(
                ErrorImpl::NestingTooDeep {
                    max: self.limits.max_nesting_depth,
                },
                position.clone(),
                near.to_string(),
            ));
        }

        self.scopes.push(self.symbols.len());
        debug!("entered scope level {}", self.level());
        Ok(())
    }

    pub fn exit_scope(&mut self) {
        debug!("leaving scope level {}", self.level());
        self.scopes.pop();
    }
}

impl Index<usize> for SymbolTable {
    type Output = Symbol;

    fn index(&self, index: usize) -> &Self::Output {
        &self.symbols[index]
    }
}

impl Display for SymbolTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{:<15} {:<10} {:<10} {:<10} {:<10} {:<10} {:<10} {:<10} {:<10}",
            "Name", "Kind", "Type", "ElemType", "Value", "Size", "Level", "Address", "NumParams"
        )?;
        writeln!(f, "{}", "-".repeat(98))?;

        for symbol in &self.symbols {
            write!(
                f,
                "{:<15} {:<10} {:<10} {:<10} {:<10} {:<10} {:<10} {:<10} {:<10}",
                symbol.name,
                symbol.kind.to_string(),
                symbol.data_type.to_string(),
                symbol.element_type.to_string(),
                symbol.value,
                symbol.size,
                symbol.level,
                symbol.address,
                symbol.param_count()
            )?;

            if !symbol.parameters.is_empty() {
                let types: Vec<String> = symbol
                    .parameters
                    .iter()
                    .map(|parameter| parameter.data_type.to_string())
                    .collect();
                write!(f, " [{}]", types.join(", "))?;
            }

            writeln!(f)?;
        }

        Ok(())
    }
}
