// Wed Feb 04 2026 - Alex

use crate::config::ScanConfig;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rejection {
    FrozenSlot,
    EmptySlot,
    Undefined,
    StaleStringId,
    Unreadable,
    TooShort,
    TooLong,
    ReservedMarker,
    DelimiterByte,
}

impl Rejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rejection::FrozenSlot => "frozen slot",
            Rejection::EmptySlot => "empty slot",
            Rejection::Undefined => "undefined",
            Rejection::StaleStringId => "stale string id",
            Rejection::Unreadable => "unreadable",
            Rejection::TooShort => "too short",
            Rejection::TooLong => "too long",
            Rejection::ReservedMarker => "reserved marker",
            Rejection::DelimiterByte => "delimiter byte",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bytes that cannot appear in a snapshot line.
const LINE_BYTES: [u8; 3] = [b'\t', b'\n', b'\r'];

#[derive(Debug, Clone)]
pub struct NameFilter {
    min_len: usize,
    max_len: usize,
    reserved: Vec<u8>,
}

impl NameFilter {
    pub fn new(min_len: usize, max_len: usize, reserved: &[u8]) -> Self {
        Self {
            min_len,
            max_len,
            reserved: reserved.to_vec(),
        }
    }

    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(config.min_name_len, config.max_name_len, &config.reserved_bytes())
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn check_len(&self, len: i64) -> Result<(), Rejection> {
        if len <= self.min_len as i64 {
            return Err(Rejection::TooShort);
        }
        if len > self.max_len as i64 {
            return Err(Rejection::TooLong);
        }
        Ok(())
    }

    /// A single reserved byte anywhere excludes the whole name.
    pub fn check_bytes(&self, name: &[u8]) -> Result<(), Rejection> {
        if name.iter().any(|b| self.reserved.contains(b)) {
            return Err(Rejection::ReservedMarker);
        }
        if name.iter().any(|b| LINE_BYTES.contains(b)) {
            return Err(Rejection::DelimiterByte);
        }
        Ok(())
    }
}

impl Default for NameFilter {
    fn default() -> Self {
        Self::from_config(&ScanConfig::default())
    }
}
