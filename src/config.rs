// Tue Feb 03 2026 - Alex

use crate::memory::IndexRange;
use crate::symbol::token::{END_MATCH, MATCH};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_SLOT_BASE: i32 = 514;
pub const DEFAULT_FROZEN_SLOT: i32 = 26627;
pub const DEFAULT_MAX_NAME_LEN: usize = 200;
pub const DEFAULT_ARITY_WALK_LIMIT: usize = 1000;
pub const MAX_FORMAL_PARAMETERS: u8 = 9;

/// `call` through `shape_ref`.
pub const DEFAULT_MACRO_FIRST: i32 = 111;
pub const DEFAULT_MACRO_LAST: i32 = 118;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub slot_base: i32,
    pub frozen_slot: i32,
    /// Names must be strictly longer than this.
    pub min_name_len: usize,
    pub max_name_len: usize,
    pub reserved_markers: String,
    pub macro_categories: IndexRange,
    pub match_command: i32,
    pub end_match_command: i32,
    pub arity_walk_limit: usize,
    pub max_arity: u8,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            slot_base: DEFAULT_SLOT_BASE,
            frozen_slot: DEFAULT_FROZEN_SLOT,
            min_name_len: 1,
            max_name_len: DEFAULT_MAX_NAME_LEN,
            reserved_markers: "@_:".to_string(),
            macro_categories: IndexRange::new(DEFAULT_MACRO_FIRST, DEFAULT_MACRO_LAST),
            match_command: MATCH,
            end_match_command: END_MATCH,
            arity_walk_limit: DEFAULT_ARITY_WALK_LIMIT,
            max_arity: MAX_FORMAL_PARAMETERS,
        }
    }
}

impl ScanConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: ScanConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_slot_base(mut self, slot_base: i32) -> Self {
        self.slot_base = slot_base;
        self
    }

    pub fn with_frozen_slot(mut self, frozen_slot: i32) -> Self {
        self.frozen_slot = frozen_slot;
        self
    }

    pub fn with_reserved_markers(mut self, markers: &str) -> Self {
        self.reserved_markers = markers.to_string();
        self
    }

    pub fn with_macro_categories(mut self, first: i32, last: i32) -> Self {
        self.macro_categories = IndexRange::new(first, last);
        self
    }

    pub fn with_arity_walk_limit(mut self, limit: usize) -> Self {
        self.arity_walk_limit = limit;
        self
    }

    pub fn reserved_bytes(&self) -> Vec<u8> {
        self.reserved_markers.bytes().collect()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.macro_categories.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "macro_categories {} is empty",
                self.macro_categories
            )));
        }
        if self.macro_categories.first() <= 0 {
            return Err(ConfigError::Invalid(
                "macro_categories must not include the undefined category 0".to_string(),
            ));
        }
        if self.arity_walk_limit == 0 {
            return Err(ConfigError::Invalid("arity_walk_limit must be greater than 0".to_string()));
        }
        if self.max_arity > MAX_FORMAL_PARAMETERS {
            return Err(ConfigError::Invalid(format!(
                "max_arity must be at most {}",
                MAX_FORMAL_PARAMETERS
            )));
        }
        if self.max_name_len <= self.min_name_len {
            return Err(ConfigError::Invalid(
                "max_name_len must be greater than min_name_len".to_string(),
            ));
        }
        if self.match_command == self.end_match_command {
            return Err(ConfigError::Invalid(
                "match_command and end_match_command must differ".to_string(),
            ));
        }
        if !self.reserved_markers.is_ascii() {
            return Err(ConfigError::Invalid("reserved_markers must be ASCII".to_string()));
        }
        if self.reserved_markers.contains(|c| matches!(c, '\t' | '\n' | '\r')) {
            return Err(ConfigError::Invalid(
                "reserved_markers must not contain the field delimiter or line breaks".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ScanConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.slot_base, 514);
        assert_eq!(config.frozen_slot, 26627);
        assert_eq!(config.reserved_bytes(), b"@_:".to_vec());
        assert!(config.macro_categories.contains(111));
        assert!(config.macro_categories.contains(118));
        assert!(!config.macro_categories.contains(110));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(ScanConfig::default().with_arity_walk_limit(0).validate().is_err());
        assert!(ScanConfig::default().with_macro_categories(5, 4).validate().is_err());
        assert!(ScanConfig::default().with_macro_categories(0, 4).validate().is_err());
        assert!(ScanConfig::default().with_reserved_markers("@\t").validate().is_err());

        let mut config = ScanConfig::default();
        config.max_arity = 10;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ScanConfig = serde_json::from_str(r#"{"reserved_markers": "@"}"#).unwrap();
        assert_eq!(config.reserved_markers, "@");
        assert_eq!(config.arity_walk_limit, DEFAULT_ARITY_WALK_LIMIT);
        assert_eq!(config.macro_categories, IndexRange::new(111, 118));
    }

    #[test]
    fn test_from_file_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.json");
        std::fs::write(&path, r#"{"arity_walk_limit": 0}"#).unwrap();
        assert!(matches!(ScanConfig::from_file(&path), Err(ConfigError::Invalid(_))));

        std::fs::write(&path, ScanConfig::default().to_json().unwrap()).unwrap();
        assert_eq!(ScanConfig::from_file(&path).unwrap(), ScanConfig::default());
    }
}
