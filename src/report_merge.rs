use std::fs::OpenOptions;
use std::path::Path;
use umya_spreadsheet::{reader, writer, Worksheet};

use crate::bill_discovery::discover_bills;
use crate::bill_extract::{extract_bill, BillRecord};
use crate::day_sheet::{
    apply_row_format, last_data_row, update_row_indices, update_summary_sums, BILL_ID_COLUMN,
    DATA_START_ROW,
};
use crate::error::MergeError;
use crate::processed_ledger::ProcessedFileLedger;
use crate::report_paths::ReportLayout;
use crate::status::{Severity, StatusSink};
use crate::summary_formulas::{apply_platform_styling, write_summary_formulas};

/// Branch identifier written in front of every merged row.
const ROW_PREFIX: &str = "PHK";
const DATA_ROW_HEIGHT: f64 = 18.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    Merged { count: usize },
    NoNewBills,
}

/// Merges one day's new bills into the monthly report.
///
/// Synchronous and non-reentrant for a given report file: the read-write
/// probe up front rejects a workbook that is open elsewhere before anything
/// is touched. The caller owns the ledger for the duration of the run; it is
/// persisted only after the workbook was saved successfully, so a failed run
/// leaves both the report and the ledger store untouched.
pub fn merge_day(
    layout: &dyn ReportLayout,
    ledger: &mut ProcessedFileLedger,
    sink: &mut dyn StatusSink,
    year: i32,
    month: u32,
    day: u32,
) -> Result<MergeOutcome, MergeError> {
    let report_path = layout.monthly_report_path(year, month);
    if !is_file_writable(&report_path) {
        sink.emit(
            Severity::Warning,
            &format!(
                "File {} is currently open. Please close it to continue.",
                report_path.display()
            ),
        );
        return Err(MergeError::ReportLocked(report_path));
    }

    let mut book = reader::xlsx::read(&report_path)
        .map_err(|e| MergeError::Workbook(report_path.clone(), e.to_string()))?;
    let sheet_name = day.to_string();
    if book.get_sheet_by_name(&sheet_name).is_none() {
        return Err(MergeError::DaySheetMissing(day));
    }

    sink.emit(
        Severity::Badge,
        "Loading workbook and checking existing bills...",
    );

    let records = collect_new_records(layout, ledger, sink, year, month, day)?;
    if records.is_empty() {
        sink.emit(Severity::Badge, "No new bills found.");
        return Ok(MergeOutcome::NoNewBills);
    }

    sink.emit(Severity::Badge, "Updating rows and formulas...");
    let sheet = book
        .get_sheet_by_name_mut(&sheet_name)
        .ok_or(MergeError::DaySheetMissing(day))?;
    append_records(sheet, &records);
    apply_platform_styling(sheet);
    write_summary_formulas(sheet, day, sink);
    update_row_indices(sheet);
    update_summary_sums(sheet);

    writer::xlsx::write(&book, &report_path)
        .map_err(|e| MergeError::Save(report_path.clone(), e.to_string()))?;
    ledger.save().map_err(MergeError::LedgerPersist)?;

    sink.emit(
        Severity::Success,
        &format!("Data updated in {}", report_path.display()),
    );
    Ok(MergeOutcome::Merged {
        count: records.len(),
    })
}

/// Discovers and extracts the day's candidates. Every attempted file lands
/// in the in-memory ledger whether or not it produced a record, so broken
/// exports are not retried on the next run.
fn collect_new_records(
    layout: &dyn ReportLayout,
    ledger: &mut ProcessedFileLedger,
    sink: &mut dyn StatusSink,
    year: i32,
    month: u32,
    day: u32,
) -> Result<Vec<BillRecord>, MergeError> {
    let folder = layout.daily_bills_dir(year, month, day);
    if !folder.exists() {
        // absent folder simply means no bills were exported for this day
        return Ok(Vec::new());
    }

    let candidates = discover_bills(&folder, ledger)
        .map_err(|message| MergeError::BillFolder(folder.clone(), message))?;

    let mut records = Vec::new();
    for candidate in candidates {
        match extract_bill(&candidate.path, &candidate.bill_id, candidate.box_count) {
            Ok(Some(record)) => records.push(record),
            Ok(None) => sink.emit(
                Severity::Warning,
                &format!(
                    "Skipped {}: total or tax value could not be located.",
                    candidate.path.display()
                ),
            ),
            Err(message) => sink.emit(
                Severity::Warning,
                &format!("Skipped {}: {message}", candidate.path.display()),
            ),
        }
        ledger.insert(candidate.key);
    }
    Ok(records)
}

/// Appends the records after the current data block. The first data row is
/// written in place; any further position gets a fresh inserted row, which
/// pushes the carry and summary rows down.
fn append_records(ws: &mut Worksheet, records: &[BillRecord]) {
    let mut current_row = if ws.get_value("C5").is_empty() {
        DATA_START_ROW
    } else {
        last_data_row(ws, DATA_START_ROW, BILL_ID_COLUMN) + 1
    };

    for record in records {
        if current_row != DATA_START_ROW {
            ws.insert_new_row(&current_row, &1);
            ws.get_row_dimension_mut(&current_row)
                .set_height(DATA_ROW_HEIGHT);
        }
        write_record_row(ws, current_row, record);
        apply_row_format(ws, current_row, false);
        current_row += 1;
    }
}

fn write_record_row(ws: &mut Worksheet, row: u32, record: &BillRecord) {
    ws.get_cell_mut(format!("B{row}").as_str())
        .set_value_string(ROW_PREFIX);
    ws.get_cell_mut(format!("C{row}").as_str())
        .set_value_string(record.bill_id.as_str());
    ws.get_cell_mut(format!("D{row}").as_str())
        .set_value_string(record.customer_name.as_str());
    ws.get_cell_mut(format!("E{row}").as_str())
        .set_value_string(record.zone_province.as_str());
    ws.get_cell_mut(format!("F{row}").as_str())
        .set_value_number(record.box_count);
    ws.get_cell_mut(format!("G{row}").as_str())
        .set_value_number(record.total_value);
    ws.get_cell_mut(format!("H{row}").as_str())
        .set_value_number(record.tax_value);
    ws.get_style_mut(format!("H{row}").as_str())
        .get_number_format_mut()
        .set_format_code("0.00");
    ws.get_cell_mut(format!("K{row}").as_str())
        .set_value_string(record.transport_service.as_str());
    ws.get_cell_mut(format!("M{row}").as_str())
        .set_value_string(record.phone.as_str());
}

fn is_file_writable(path: &Path) -> bool {
    OpenOptions::new().read(true).write(true).open(path).is_ok()
}
