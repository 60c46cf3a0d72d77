// Wed Feb 11 2026 - Alex

use csname_scanner::memory::{ImageBuilder, ImageDump};
use csname_scanner::output::{read_snapshot, snapshot_after_run, write_snapshot, CommandIndex, CommandKind};
use csname_scanner::symbol::{Arity, Rejection, Token};
use csname_scanner::ScanConfig;
use std::fs;

fn latex_like_image() -> ImageBuilder {
    let mut builder = ImageBuilder::new();
    builder.define("relax", 70, 256);
    builder.define("hbox", 21, 0);
    builder.define_macro("section", 1);
    builder.define_macro("newcommand", 2);
    builder.define_macro("itemize", 0);
    builder.define_macro("enditemize", 0);
    builder.define("@gobble", 111, 0);
    builder.define("__kernel_tl", 111, 0);
    builder.define("c_zero:", 111, 0);
    builder
}

#[test]
fn test_empty_symbol_range_writes_empty_file() {
    let image = ImageBuilder::new().build();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".commands");

    let report = write_snapshot(&image, &ScanConfig::default(), &path).unwrap();

    assert_eq!(report.slots_visited, 0);
    assert!(path.exists());
    assert_eq!(fs::read(&path).unwrap().len(), 0);
}

#[test]
fn test_rescan_is_byte_identical() {
    let image = latex_like_image().build();
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first");
    let second = dir.path().join("second");

    write_snapshot(&image, &ScanConfig::default(), &first).unwrap();
    write_snapshot(&image, &ScanConfig::default(), &second).unwrap();

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn test_stale_snapshot_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".commands");
    let stale: String = (0..500).map(|i| format!("stale{}\t111\t0\n", i)).collect();
    fs::write(&path, stale).unwrap();

    let mut builder = ImageBuilder::new();
    builder.define("hbox", 21, 0);
    write_snapshot(&builder.build(), &ScanConfig::default(), &path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "hbox\t21\t-1\n");
}

#[test]
fn test_snapshot_lines_and_exclusions() {
    let image = latex_like_image().build();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".commands");

    let report = write_snapshot(&image, &ScanConfig::default(), &path).unwrap();
    let content = fs::read_to_string(&path).unwrap();

    assert_eq!(
        content,
        "relax\t70\t-1\n\
         hbox\t21\t-1\n\
         section\t111\t1\n\
         newcommand\t111\t2\n\
         itemize\t111\t0\n\
         enditemize\t111\t0\n"
    );
    assert_eq!(report.rejected_for(Rejection::ReservedMarker), 3);
    assert_eq!(report.macros, 4);
}

#[test]
fn test_macro_without_end_marker_is_unknown() {
    let mut builder = ImageBuilder::new();
    let tokens = [Token::parameter(1).encode(), Token::parameter(2).encode()];
    let head = builder.token_list(&tokens);
    builder.define("broken", 111, head);
    let image = builder.build();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".commands");
    let report = write_snapshot(&image, &ScanConfig::default(), &path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "broken\t111\t?\n");
    assert_eq!(report.unknown_arity, 1);
}

#[test]
fn test_open_failure_leaves_no_file() {
    let image = latex_like_image().build();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join(".commands");

    assert!(write_snapshot(&image, &ScanConfig::default(), &path).is_err());
    assert!(snapshot_after_run(&image, &ScanConfig::default(), &path).is_none());
    assert!(!path.exists());
}

#[test]
fn test_dump_scan_and_index_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let dump_path = dir.path().join("image.json");
    let snapshot_path = dir.path().join(".commands");

    ImageDump::from_arrays(&latex_like_image().build())
        .save(&dump_path)
        .unwrap();
    let image = ImageDump::load(&dump_path).unwrap().into_arrays();
    write_snapshot(&image, &ScanConfig::default(), &snapshot_path).unwrap();

    let index = CommandIndex::from_commands(read_snapshot(&snapshot_path).unwrap());
    assert_eq!(index.len(), 6);
    assert_eq!(index.get("newcommand").unwrap().arity, Arity::Count(2));
    assert_eq!(index.get("hbox").unwrap().kind, CommandKind::Primitive);
    assert!(index.environments().contains("itemize"));
}
