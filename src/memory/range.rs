// Tue Feb 03 2026 - Alex

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// Inclusive range of engine indices. `last < first` is a valid, empty range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexRange {
    first: i32,
    last: i32,
}

impl IndexRange {
    pub fn new(first: i32, last: i32) -> Self {
        Self { first, last }
    }

    pub fn empty() -> Self {
        Self { first: 0, last: -1 }
    }

    /// Range covering `[start, start + len)`.
    pub fn from_start_len(start: i32, len: usize) -> Self {
        if len == 0 {
            return Self::new(start, start.saturating_sub(1));
        }
        let last = i64::from(start) + len as i64 - 1;
        Self::new(start, last.min(i64::from(i32::MAX)) as i32)
    }

    pub fn first(&self) -> i32 {
        self.first
    }

    pub fn last(&self) -> i32 {
        self.last
    }

    pub fn contains(&self, index: i32) -> bool {
        index >= self.first && index <= self.last
    }

    pub fn is_empty(&self) -> bool {
        self.last < self.first
    }

    pub fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            (i64::from(self.last) - i64::from(self.first) + 1) as usize
        }
    }

    pub fn indices(&self) -> RangeInclusive<i32> {
        self.first..=self.last
    }

    /// Zero-based position of `index` inside the range.
    pub fn position(&self, index: i32) -> Option<usize> {
        if self.contains(index) {
            Some((i64::from(index) - i64::from(self.first)) as usize)
        } else {
            None
        }
    }
}

impl fmt::Display for IndexRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.first, self.last)
    }
}
