// Fri Feb 06 2026 - Alex

use crate::config::{DEFAULT_MACRO_FIRST, DEFAULT_MACRO_LAST};
use crate::memory::IndexRange;
use crate::output::writer::{NOT_APPLICABLE_MARKER, UNKNOWN_MARKER};
use crate::output::SnapshotError;
use crate::symbol::Arity;
use std::io::ErrorKind;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Macro,
    Primitive,
    Unknown,
}

/// One snapshot line as seen by the completion side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineCommand {
    pub name: String,
    pub category: Option<i32>,
    pub arity: Arity,
    pub kind: CommandKind,
}

impl EngineCommand {
    /// Argument count, when the snapshot carries one.
    pub fn arg_count(&self) -> Option<u8> {
        self.arity.count()
    }
}

/// Parses snapshot lines. Accepts the current three-column form, the older
/// `name<TAB>category` form and bare names.
#[derive(Debug, Clone)]
pub struct SnapshotReader {
    macro_categories: IndexRange,
}

impl SnapshotReader {
    pub fn new(macro_categories: IndexRange) -> Self {
        Self { macro_categories }
    }

    pub fn classify(&self, category: Option<i32>) -> CommandKind {
        match category {
            Some(c) if self.macro_categories.contains(c) => CommandKind::Macro,
            Some(c) if c > 0 => CommandKind::Primitive,
            _ => CommandKind::Unknown,
        }
    }

    pub fn parse_line(&self, line: &str) -> Option<EngineCommand> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() {
            return None;
        }

        let mut fields = line.splitn(3, '\t');
        let name = fields.next()?.to_string();
        let category = match fields.next() {
            Some(field) => match field.trim().parse::<i32>() {
                Ok(category) => Some(category),
                Err(_) => {
                    return Some(EngineCommand {
                        name,
                        category: None,
                        arity: Arity::Unknown,
                        kind: CommandKind::Unknown,
                    })
                }
            },
            None => None,
        };
        let arity = match fields.next() {
            Some(field) => parse_arity(field.trim()),
            None => Arity::Unknown,
        };

        Some(EngineCommand {
            name,
            category,
            arity,
            kind: self.classify(category),
        })
    }

    pub fn parse(&self, content: &str) -> Vec<EngineCommand> {
        content.lines().filter_map(|line| self.parse_line(line)).collect()
    }

    /// A missing snapshot means no data yet, not a failure.
    pub fn read<P: AsRef<Path>>(&self, path: P) -> Result<Vec<EngineCommand>, SnapshotError> {
        match std::fs::read(path.as_ref()) {
            Ok(bytes) => Ok(self.parse(&String::from_utf8_lossy(&bytes))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(SnapshotError::Io(e)),
        }
    }
}

impl Default for SnapshotReader {
    fn default() -> Self {
        Self::new(IndexRange::new(DEFAULT_MACRO_FIRST, DEFAULT_MACRO_LAST))
    }
}

fn parse_arity(field: &str) -> Arity {
    if field == NOT_APPLICABLE_MARKER {
        return Arity::NotApplicable;
    }
    if field == UNKNOWN_MARKER {
        return Arity::Unknown;
    }
    match field.parse::<u8>() {
        Ok(n) => Arity::Count(n),
        Err(_) => Arity::Unknown,
    }
}

pub fn parse_snapshot(content: &str) -> Vec<EngineCommand> {
    SnapshotReader::default().parse(content)
}

pub fn read_snapshot<P: AsRef<Path>>(path: P) -> Result<Vec<EngineCommand>, SnapshotError> {
    SnapshotReader::default().read(path)
}
