use std::path::PathBuf;
use std::process::ExitCode;

use billmerge::{
    merge_day, normalize_year, validate_date, ConsoleSink, MergeOutcome, OrderReportsLayout,
    ProcessedFileLedger, Severity, StatusSink, DEFAULT_LEDGER_FILE,
};
use clap::Parser;

/// Merge one day's bill exports into the monthly order report.
#[derive(Parser)]
#[command(name = "billmerge", version)]
struct Args {
    /// Root of the order-reports tree (contains the Year_*/Month_* folders)
    #[arg(long, default_value = "OrderReports")]
    root: PathBuf,

    /// Calendar or Buddhist-era year
    #[arg(long)]
    year: String,

    /// Month number, 1-12
    #[arg(long)]
    month: u32,

    /// Day of month
    #[arg(long)]
    day: u32,

    /// Processed-file ledger location
    #[arg(long, default_value = DEFAULT_LEDGER_FILE)]
    ledger: PathBuf,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let mut sink = ConsoleSink;
    match run(&args, &mut sink) {
        Ok(_) => ExitCode::SUCCESS,
        Err(message) => {
            sink.emit(Severity::Error, &message);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, sink: &mut dyn StatusSink) -> Result<MergeOutcome, String> {
    let year = normalize_year(&args.year)?;
    validate_date(year, args.month, args.day)?;
    sink.emit(
        Severity::Normal,
        &format!(
            "Starting processing for {year}-{:02}-{:02}...",
            args.month, args.day
        ),
    );

    let mut ledger = ProcessedFileLedger::load(&args.ledger)?;
    let layout = OrderReportsLayout::new(&args.root);
    merge_day(&layout, &mut ledger, sink, year, args.month, args.day).map_err(|e| e.to_string())
}
