// Wed Feb 04 2026 - Alex

use std::borrow::Cow;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    Count(u8),
    NotApplicable,
    Unknown,
}

impl Arity {
    pub fn count(&self) -> Option<u8> {
        match self {
            Arity::Count(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Arity::Unknown)
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Count(n) => write!(f, "{}", n),
            Arity::NotApplicable => f.write_str("n/a"),
            Arity::Unknown => f.write_str("unknown"),
        }
    }
}

/// One accepted command as found in the symbol table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolRecord {
    pub slot: i32,
    pub name: Vec<u8>,
    pub category: i32,
    pub arity: Arity,
}

impl SymbolRecord {
    pub fn new(slot: i32, name: Vec<u8>, category: i32) -> Self {
        Self {
            slot,
            name,
            category,
            arity: Arity::NotApplicable,
        }
    }

    pub fn with_arity(mut self, arity: Arity) -> Self {
        self.arity = arity;
        self
    }

    pub fn name_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }

    pub fn is_macro(&self) -> bool {
        !matches!(self.arity, Arity::NotApplicable)
    }
}

impl fmt::Display for SymbolRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\\{} (slot {}, category {}, arity {})",
            self.name_lossy(),
            self.slot,
            self.category,
            self.arity
        )
    }
}
