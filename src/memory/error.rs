// Tue Feb 03 2026 - Alex

use crate::memory::IndexRange;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Hash,
    StrStart,
    StrPool,
    Eqtb,
    Mem,
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Table::Hash => "hash",
            Table::StrStart => "str_start",
            Table::StrPool => "str_pool",
            Table::Eqtb => "eqtb",
            Table::Mem => "mem",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Out of bounds: {table} index {index} not in {range}")]
    OutOfBounds {
        table: Table,
        index: i32,
        range: IndexRange,
    },
    #[error("Read failed at heap offset 0x{0:x}")]
    ReadFailed(u64),
    #[error("Corrupt string span for string {id}: start {start}, end {end}")]
    CorruptSpan { id: i32, start: i32, end: i32 },
    #[error("Invalid image layout: {0}")]
    InvalidLayout(String),
    #[error("Image dump parse error: {0}")]
    DumpParse(#[from] serde_json::Error),
}

impl MemoryError {
    pub fn out_of_bounds(table: Table, index: i32, range: IndexRange) -> Self {
        MemoryError::OutOfBounds {
            table,
            index,
            range,
        }
    }

    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, MemoryError::OutOfBounds { .. } | MemoryError::ReadFailed(_))
    }
}
