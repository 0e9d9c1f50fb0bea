//! Binary operator precedence table
//!
//! Seeded with the built-in operators and extended while parsing whenever an
//! `infix` declaration is seen, so later source text can use the new symbol.
//! Higher numbers bind tighter. A symbol with no entry is not an operator.

use rustc_hash::FxHashMap;

/// Precedence of `=`, the loosest binding operator.
pub const ASSIGNMENT_PRECEDENCE: u8 = 1;

/// Precedence given to an `infix` declaration that omits one; tighter than
/// every built-in operator.
pub const DEFAULT_INFIX_PRECEDENCE: u8 = 12;

const BUILTIN_PRECEDENCE: &[(&str, u8)] = &[
    ("=", ASSIGNMENT_PRECEDENCE),
    ("||", 2),
    ("&&", 3),
    ("|", 4),
    ("^", 5),
    ("&", 6),
    ("==", 7),
    ("!=", 7),
    ("<", 8),
    ("<=", 8),
    (">", 8),
    (">=", 8),
    ("<<", 9),
    (">>", 9),
    ("+", 10),
    ("-", 10),
    ("*", 11),
    ("/", 11),
    ("%", 11),
];

#[derive(Debug, Clone)]
pub struct PrecedenceTable {
    table: FxHashMap<String, u8>,
}

impl PrecedenceTable {
    pub fn new() -> Self {
        let table = BUILTIN_PRECEDENCE
            .iter()
            .map(|(symbol, precedence)| (symbol.to_string(), *precedence))
            .collect();
        Self { table }
    }

    pub fn get(&self, symbol: &str) -> Option<u8> {
        self.table.get(symbol).copied()
    }

    /// Insert or replace a symbol, returning its previous precedence.
    pub fn register(&mut self, symbol: impl Into<String>, precedence: u8) -> Option<u8> {
        let symbol = symbol.into();
        tracing::trace!(%symbol, precedence, "registering operator precedence");
        self.table.insert(symbol, precedence)
    }
}

impl Default for PrecedenceTable {
    fn default() -> Self {
        Self::new()
    }
}
