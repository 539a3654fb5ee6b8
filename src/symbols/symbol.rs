use std::fmt::Display;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum SymbolKind {
    Const,
    Var,
    Procedure,
}

impl Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SymbolKind::Const => write!(f, "CONST"),
            SymbolKind::Var => write!(f, "VAR"),
            SymbolKind::Procedure => write!(f, "PROC"),
        }
    }
}

/// Types the analyzer distinguishes. `Error` marks an expression whose
/// diagnostic has already been reported.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum DataType {
    None,
    Integer,
    Array,
    Error,
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataType::None => write!(f, "NONE"),
            DataType::Integer => write!(f, "INTEGER"),
            DataType::Array => write!(f, "ARRAY"),
            DataType::Error => write!(f, "TYPE_ERROR"),
        }
    }
}

/// A formal parameter of a procedure.
///
/// `by_reference` records a `VAR` prefix; calls are checked the same way
/// for both forms.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Parameter {
    pub data_type: DataType,
    pub by_reference: bool,
}

impl Parameter {
    pub fn value(data_type: DataType) -> Self {
        Parameter {
            data_type,
            by_reference: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub data_type: DataType,
    /// Element type of an array, `None` for everything else
    pub element_type: DataType,
    /// Value of a constant
    pub value: i32,
    /// Declared size of an array
    pub size: i32,
    /// Scope level the symbol was declared at
    pub level: usize,
    /// Index of the symbol in the table
    pub address: usize,
    pub parameters: Vec<Parameter>,
}

impl Symbol {
    pub fn is_array(&self) -> bool {
        self.kind == SymbolKind::Var && self.data_type == DataType::Array
    }

    pub fn is_scalar_integer(&self) -> bool {
        self.kind == SymbolKind::Var && self.data_type == DataType::Integer
    }

    pub fn param_count(&self) -> usize {
        self.parameters.len()
    }
}
