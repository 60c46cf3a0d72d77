// Tue Feb 10 2026 - Alex

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "csname-scanner")]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Control sequence snapshot tool for TeX engine memory images", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan an engine image and write its command snapshot
    Scan(ScanArgs),
    /// Summarize an existing snapshot
    Inspect(InspectArgs),
    /// Print the default scan configuration
    Config,
}

#[derive(Parser, Debug)]
pub struct ScanArgs {
    #[arg(short, long)]
    pub image: Option<PathBuf>,

    #[arg(long)]
    pub heap: Option<PathBuf>,

    #[arg(long)]
    pub layout: Option<PathBuf>,

    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long, default_value = ".commands")]
    pub output: PathBuf,

    #[arg(short, long)]
    pub trace: Vec<String>,
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    pub snapshot: PathBuf,

    #[arg(long, default_value = "20")]
    pub limit: usize,
}

impl ScanArgs {
    pub fn validate(&self) -> Result<(), String> {
        match (&self.image, &self.heap) {
            (None, None) => return Err("Either --image or --heap must be specified".to_string()),
            (Some(_), Some(_)) => return Err("Cannot specify both --image and --heap".to_string()),
            _ => {}
        }
        if self.heap.is_some() && self.layout.is_none() {
            return Err("--heap requires --layout".to_string());
        }
        if self.image.is_some() && self.layout.is_some() {
            return Err("--layout only applies to --heap".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_scan_defaults() {
        let args = parse(&["csname-scanner", "scan", "--image", "dump.json"]);
        assert_eq!(args.log_level, "info");
        match args.command {
            Command::Scan(scan) => {
                assert_eq!(scan.output, PathBuf::from(".commands"));
                assert!(scan.trace.is_empty());
                assert!(scan.validate().is_ok());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_repeated_trace() {
        let args = parse(&[
            "csname-scanner",
            "scan",
            "--heap",
            "heap.bin",
            "--layout",
            "layout.json",
            "--trace",
            "\\section",
            "--trace",
            "foo",
        ]);
        match args.command {
            Command::Scan(scan) => {
                assert_eq!(scan.trace, vec!["\\section", "foo"]);
                assert!(scan.validate().is_ok());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_scan_source_validation() {
        let none = ScanArgs {
            image: None,
            heap: None,
            layout: None,
            config: None,
            output: PathBuf::from(".commands"),
            trace: Vec::new(),
        };
        assert!(none.validate().is_err());

        let heap_without_layout = ScanArgs {
            heap: Some(PathBuf::from("heap.bin")),
            ..none
        };
        assert!(heap_without_layout.validate().is_err());
    }

    #[test]
    fn test_inspect_positional() {
        let args = parse(&["csname-scanner", "-q", "inspect", "out/.commands"]);
        assert!(args.quiet);
        match args.command {
            Command::Inspect(inspect) => {
                assert_eq!(inspect.snapshot, PathBuf::from("out/.commands"));
                assert_eq!(inspect.limit, 20);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
