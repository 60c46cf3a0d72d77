// Tue Feb 03 2026 - Alex

pub mod config;
pub mod memory;
pub mod output;
pub mod symbol;
pub mod ui;
pub mod utils;

pub use config::{ConfigError, ScanConfig};
pub use memory::{ImageAccess, ImageArrays, ImageBuilder, ImageDump, ImageReader, HeapImage, HeapLayout, MemoryError};
pub use output::{read_snapshot, snapshot_after_run, write_snapshot, CommandIndex, SnapshotError};
pub use symbol::{Arity, ScanReport, SymbolRecord, SymbolScanner};
