// Tue Feb 10 2026 - Alex

use super::args::{Args, Command, InspectArgs, ScanArgs};
use crate::config::ScanConfig;
use crate::memory::{HeapImage, HeapLayout, ImageDump, ImageReader};
use crate::output::{read_snapshot, write_snapshot_observed, CommandIndex, CommandKind};
use crate::symbol::{ScanObserver, ScanReport, TraceHook};
use crate::ui::{print_info, print_success, print_warning};
use crate::utils::logging::init_logger;
use crate::utils::pluralize;
use anyhow::Context;
use colored::Colorize;

pub struct CommandHandler {
    quiet: bool,
}

impl CommandHandler {
    pub fn new() -> Self {
        Self { quiet: false }
    }

    pub fn execute(&mut self, args: Args) -> anyhow::Result<()> {
        self.quiet = args.quiet;
        if args.no_color {
            colored::control::set_override(false);
        }
        init_logger(&args.log_level);

        match args.command {
            Command::Scan(scan_args) => self.handle_scan(scan_args),
            Command::Inspect(inspect_args) => self.handle_inspect(inspect_args),
            Command::Config => self.handle_config(),
        }
    }

    fn handle_scan(&self, args: ScanArgs) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        let config = match &args.config {
            Some(path) => ScanConfig::from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => ScanConfig::default(),
        };

        let image = self.load_image(&args)?;

        let mut hook = TraceHook::for_names(&args.trace);
        let observer: Option<&mut dyn ScanObserver> = if args.trace.is_empty() {
            None
        } else {
            Some(&mut hook)
        };

        let report = write_snapshot_observed(&*image, &config, &args.output, observer)
            .with_context(|| format!("Failed to write snapshot {}", args.output.display()))?;

        if !self.quiet {
            self.print_scan_summary(&args, &report);
        }
        if !args.trace.is_empty() && hook.hits() == 0 {
            print_warning("None of the traced names were seen in the symbol table");
        }
        Ok(())
    }

    fn load_image(&self, args: &ScanArgs) -> anyhow::Result<Box<dyn ImageReader>> {
        if let Some(path) = &args.image {
            if !self.quiet {
                print_info(&format!("Loading image dump: {}", path.display()));
            }
            let dump = ImageDump::load(path)
                .with_context(|| format!("Failed to load image dump {}", path.display()))?;
            return Ok(Box::new(dump.into_arrays()));
        }

        let (heap, layout) = match (&args.heap, &args.layout) {
            (Some(heap), Some(layout)) => (heap, layout),
            _ => anyhow::bail!("No image source given"),
        };
        if !self.quiet {
            print_info(&format!("Mapping heap: {}", heap.display()));
        }
        let layout = HeapLayout::load(layout)
            .with_context(|| format!("Failed to load heap layout {}", layout.display()))?;
        let image = HeapImage::open(heap, layout)
            .with_context(|| format!("Failed to open heap {}", heap.display()))?;
        Ok(Box::new(image))
    }

    fn print_scan_summary(&self, args: &ScanArgs, report: &ScanReport) {
        print_success(&format!(
            "Wrote {} to {}",
            pluralize(report.accepted, "command", "commands"),
            args.output.display()
        ));
        println!("  {}: {}", "Slots visited".bold(), report.slots_visited);
        println!("  {}: {}", "Macros".bold(), report.macros);
        println!("  {}: {}", "Unknown arity".bold(), report.unknown_arity);
        println!("  {}: {}", "Rejected".bold(), report.total_rejected());
        for (reason, count) in &report.rejected {
            println!("    {:<18} {}", reason.to_string().dimmed(), count);
        }
    }

    fn handle_inspect(&self, args: InspectArgs) -> anyhow::Result<()> {
        if !args.snapshot.exists() {
            print_warning(&format!("No snapshot at {}", args.snapshot.display()));
        }
        let commands = read_snapshot(&args.snapshot)
            .with_context(|| format!("Failed to read snapshot {}", args.snapshot.display()))?;
        let index = CommandIndex::from_commands(commands);

        let primitives = index
            .commands()
            .filter(|command| command.kind == CommandKind::Primitive)
            .count();
        let unknown = index
            .commands()
            .filter(|command| command.kind == CommandKind::Unknown)
            .count();

        println!("{}", "Snapshot summary".cyan().bold());
        println!("{}", "=".repeat(40).cyan());
        println!("  {}: {}", "Commands".bold(), index.len());
        println!("  {}: {}", "Macros".bold(), index.macros().count());
        println!("  {}: {}", "Primitives".bold(), primitives);
        println!("  {}: {}", "Unclassified".bold(), unknown);
        println!("  {}: {}", "Environments".bold(), index.environments().len());

        let with_arity: Vec<_> = index
            .macros()
            .filter_map(|command| command.arg_count().map(|n| (command, n)))
            .filter(|(_, n)| *n > 0)
            .take(args.limit)
            .collect();
        if !with_arity.is_empty() {
            println!();
            println!("{}", "Macros with arguments".cyan());
            for (command, count) in with_arity {
                println!("  \\{:<30} {}", command.name.green(), count);
            }
        }

        if !index.environments().is_empty() {
            println!();
            println!("{}", "Environments".cyan());
            for name in index.environments().iter().take(args.limit) {
                println!("  {}", name.yellow());
            }
        }
        Ok(())
    }

    fn handle_config(&self) -> anyhow::Result<()> {
        println!("{}", ScanConfig::default().to_json()?);
        Ok(())
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}
