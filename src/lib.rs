pub mod address_parse;
pub mod bill_discovery;
pub mod bill_extract;
pub mod bill_filename;
pub mod day_sheet;
pub mod error;
pub mod processed_ledger;
pub mod report_merge;
pub mod report_paths;
pub mod status;
pub mod summary_formulas;

pub use error::MergeError;
pub use processed_ledger::{ProcessedFileKey, ProcessedFileLedger, DEFAULT_LEDGER_FILE};
pub use report_merge::{merge_day, MergeOutcome};
pub use report_paths::{normalize_year, validate_date, OrderReportsLayout, ReportLayout};
pub use status::{ConsoleSink, Severity, StatusSink};
