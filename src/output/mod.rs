// Fri Feb 06 2026 - Alex

pub mod error;
pub mod index;
pub mod reader;
pub mod writer;

pub use error::SnapshotError;
pub use index::CommandIndex;
pub use reader::{parse_snapshot, read_snapshot, CommandKind, EngineCommand, SnapshotReader};
pub use writer::SnapshotWriter;

use crate::config::ScanConfig;
use crate::memory::ImageReader;
use crate::symbol::{ScanObserver, ScanReport, SymbolScanner};
use crate::utils::logging::ScopedTimer;
use std::path::Path;

/// Scans `image` and replaces the snapshot at `path`. The destination is
/// opened before any slot is read, so an open failure leaves nothing behind.
pub fn write_snapshot<P: AsRef<Path>>(
    image: &dyn ImageReader,
    config: &ScanConfig,
    path: P,
) -> Result<ScanReport, SnapshotError> {
    write_snapshot_observed(image, config, path, None)
}

pub fn write_snapshot_observed<P: AsRef<Path>>(
    image: &dyn ImageReader,
    config: &ScanConfig,
    path: P,
    observer: Option<&mut dyn ScanObserver>,
) -> Result<ScanReport, SnapshotError> {
    let _timer = ScopedTimer::new("snapshot scan");
    let path = path.as_ref();
    let mut writer = SnapshotWriter::create(path)?;

    let mut scanner = SymbolScanner::new(image, config);
    if let Some(observer) = observer {
        scanner = scanner.with_observer(observer);
    }
    let report = scanner.scan_with(|record| writer.write_record(record))?;
    let written = writer.finish()?;

    log::info!(
        "Wrote {} commands to {} ({} slots, {} macros, {} unknown arity)",
        written,
        path.display(),
        report.slots_visited,
        report.macros,
        report.unknown_arity
    );
    Ok(report)
}

/// Entry point for the engine wrapper once a run has finished and before its
/// state is reset. Failures are logged and otherwise ignored; consumers treat
/// a missing or unchanged snapshot as "no data".
pub fn snapshot_after_run<P: AsRef<Path>>(
    image: &dyn ImageReader,
    config: &ScanConfig,
    path: P,
) -> Option<ScanReport> {
    match write_snapshot(image, config, path) {
        Ok(report) => Some(report),
        Err(e) => {
            log::warn!("Command snapshot skipped: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::ImageBuilder;
    use crate::symbol::TraceHook;

    #[test]
    fn test_write_snapshot_streams_records() {
        let mut builder = ImageBuilder::new();
        builder.define("hbox", 21, 0);
        builder.define_macro("newcommand", 2);
        builder.define("@gobble", 111, 0);
        let image = builder.build();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".commands");
        let report = write_snapshot(&image, &ScanConfig::default(), &path).unwrap();

        assert_eq!(report.accepted, 2);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "hbox\t21\t-1\nnewcommand\t111\t2\n"
        );
    }

    #[test]
    fn test_observed_scan_reports_to_hook() {
        let mut builder = ImageBuilder::new();
        builder.define_macro("foo", 1);
        let image = builder.build();
        let dir = tempfile::tempdir().unwrap();

        let mut hook = TraceHook::for_names(["foo"]);
        write_snapshot_observed(
            &image,
            &ScanConfig::default(),
            dir.path().join(".commands"),
            Some(&mut hook),
        )
        .unwrap();
        assert_eq!(hook.hits(), 1);
    }

    #[test]
    fn test_after_run_swallows_open_failure() {
        let mut builder = ImageBuilder::new();
        builder.define("hbox", 21, 0);
        let image = builder.build();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join(".commands");

        assert!(snapshot_after_run(&image, &ScanConfig::default(), &path).is_none());
        assert!(!path.exists());
    }
}
