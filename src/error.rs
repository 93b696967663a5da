use std::path::PathBuf;
use thiserror::Error;

/// Terminal failures of one merge operation. Per-file problems (malformed
/// filenames, incomplete extractions, missing summary label rows) are not in
/// here: they are isolated, reported through the status sink and never abort
/// the batch.
#[derive(Debug, Error)]
pub enum MergeError {
    /// The report file could not be opened read-write; nothing was mutated.
    #[error("report file {} is currently open in another program or missing", .0.display())]
    ReportLocked(PathBuf),

    #[error("monthly report {} could not be read: {1}", .0.display())]
    Workbook(PathBuf, String),

    #[error("monthly report has no sheet for day {0}")]
    DaySheetMissing(u32),

    #[error("bill folder {} could not be listed: {1}", .0.display())]
    BillFolder(PathBuf, String),

    #[error("failed to save monthly report {}: {1}", .0.display())]
    Save(PathBuf, String),

    /// The report was saved but the ledger rewrite failed; the affected
    /// files will be picked up again on the next run.
    #[error("merged rows were saved but the processed-file ledger could not be written: {0}")]
    LedgerPersist(String),
}
