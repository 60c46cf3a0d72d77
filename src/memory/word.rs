// Tue Feb 03 2026 - Alex

use serde::{Deserialize, Serialize};

/// One `hash` entry: `next` is the collision-chain link, `text` the string
/// number of the command name (0 for an empty slot).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashSlot {
    pub next: i32,
    pub text: i32,
}

/// One `eqtb` entry seen through its halfword view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EqEntry {
    pub category: i32,
    pub operand: i32,
}

impl EqEntry {
    pub fn is_undefined(&self) -> bool {
        self.category == 0
    }
}

/// One `mem` word of a token list: `info` holds the token, `link` the next node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemNode {
    pub info: i32,
    pub link: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringSpan {
    pub start: i32,
    pub end: i32,
}

impl StringSpan {
    pub fn len(&self) -> i64 {
        i64::from(self.end) - i64::from(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 0
    }
}

/// Scalar bounds the engine publishes alongside its arrays for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageBounds {
    pub slot_top: i32,
    pub next_free_string: i32,
    pub arena_min: i32,
    pub arena_max: i32,
}

impl Default for ImageBounds {
    fn default() -> Self {
        Self {
            slot_top: -1,
            next_free_string: 0,
            arena_min: 0,
            arena_max: -1,
        }
    }
}
