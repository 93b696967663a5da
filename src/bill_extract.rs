use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;

use crate::address_parse::{extract_transport_service, parse_zone_province_and_phone};

pub const BILL_SHEET_NAME: &str = "CashSale_th";

// Fixed cells of the bill template, 0-based (row, column).
const CUSTOMER_CELL: (u32, u32) = (8, 3); // D9
const ADDRESS_CELL: (u32, u32) = (10, 3); // D11
const TRANSPORT_CELL: (u32, u32) = (11, 3); // D12
const TOTAL_COLUMN: u32 = 5; // F
const TAX_COLUMN: u32 = 9; // J
const TAX_ROW_OFFSET: u32 = 5;

/// One merged line item, assembled from a bill file plus its
/// filename-encoded id and box count.
#[derive(Debug, Clone, PartialEq)]
pub struct BillRecord {
    pub bill_id: String,
    pub box_count: u32,
    pub customer_name: String,
    pub zone_province: String,
    pub phone: String,
    pub total_value: f64,
    pub tax_value: f64,
    pub transport_service: String,
}

/// Reads one bill workbook. `Ok(None)` means the file opened but its total
/// or tax could not be located; the caller still marks the file processed
/// so a structurally broken export is not retried forever.
pub fn extract_bill(path: &Path, bill_id: &str, box_count: u32) -> Result<Option<BillRecord>, String> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| format!("failed to open bill {}: {e}", path.display()))?;
    let range = workbook
        .worksheet_range(BILL_SHEET_NAME)
        .map_err(|e| format!("bill {} has no {BILL_SHEET_NAME} sheet: {e}", path.display()))?;

    let Some((total_value, total_row)) = find_total(&range) else {
        return Ok(None);
    };
    let Some(tax_value) = cell_number(&range, (total_row + TAX_ROW_OFFSET, TAX_COLUMN)) else {
        return Ok(None);
    };

    let address = cell_text(&range, ADDRESS_CELL);
    let (zone_province, phone) = parse_zone_province_and_phone(&address);
    let transport = cell_text(&range, TRANSPORT_CELL);

    Ok(Some(BillRecord {
        bill_id: bill_id.to_string(),
        box_count,
        customer_name: cell_text(&range, CUSTOMER_CELL),
        zone_province,
        phone,
        total_value,
        tax_value,
        transport_service: extract_transport_service(
            (!transport.is_empty()).then_some(transport.as_str()),
        ),
    }))
}

/// Last numeric cell in the total column, top to bottom, with its row.
fn find_total(range: &Range<Data>) -> Option<(f64, u32)> {
    let end = range.end()?;
    let mut found = None;
    for row in 0..=end.0 {
        if let Some(value) = cell_number(range, (row, TOTAL_COLUMN)) {
            found = Some((value, row));
        }
    }
    found
}

fn cell_number(range: &Range<Data>, position: (u32, u32)) -> Option<f64> {
    match range.get_value(position)? {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        _ => None,
    }
}

fn cell_text(range: &Range<Data>, position: (u32, u32)) -> String {
    range
        .get_value(position)
        .map(|value| match value {
            Data::Empty => String::new(),
            other => other.to_string(),
        })
        .unwrap_or_default()
        .trim()
        .to_string()
}
