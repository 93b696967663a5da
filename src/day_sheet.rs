use umya_spreadsheet::{Border, Worksheet};

/// Data rows of a day sheet start here; rows 1-4 are the header block.
pub const DATA_START_ROW: u32 = 5;
/// Column holding the 1-based row index.
pub const INDEX_COLUMN: &str = "A";
/// Column holding the bill id; an empty cell here ends the data block.
pub const BILL_ID_COLUMN: &str = "C";

pub const DEFAULT_FONT_NAME: &str = "Tahoma";
pub const DEFAULT_FONT_SIZE: f64 = 12.0;

/// Columns that get a trailing SUM row below the data block.
const SUM_COLUMNS: [&str; 3] = ["F", "G", "H"];

/// Last row holding data in `column`, scanning down from `start_row`.
/// Returns `start_row - 1` when the first cell is already empty.
pub fn last_data_row(ws: &Worksheet, start_row: u32, column: &str) -> u32 {
    let highest = ws.get_highest_row();
    for row in start_row..=highest.max(start_row) {
        if ws.get_value(format!("{column}{row}").as_str()).is_empty() {
            return row - 1;
        }
    }
    highest
}

/// Row whose cell in `column` holds exactly `label`, first match top-down.
/// The production sheets move these rows around, so no fixed offsets.
pub fn find_label_row(ws: &Worksheet, label: &str, column: &str) -> Option<u32> {
    (1..=ws.get_highest_row())
        .find(|row| ws.get_value(format!("{column}{row}").as_str()) == label)
}

/// Thin borders and the sheet font across columns A..N of one row.
pub fn apply_row_format(ws: &mut Worksheet, row: u32, bold: bool) {
    for col in b'A'..=b'N' {
        let coordinate = format!("{}{row}", col as char);
        let style = ws.get_style_mut(coordinate.as_str());
        let borders = style.get_borders_mut();
        borders.get_left_mut().set_border_style(Border::BORDER_THIN);
        borders.get_right_mut().set_border_style(Border::BORDER_THIN);
        borders.get_top_mut().set_border_style(Border::BORDER_THIN);
        borders
            .get_bottom_mut()
            .set_border_style(Border::BORDER_THIN);
        let font = style.get_font_mut();
        font.set_name(DEFAULT_FONT_NAME);
        font.set_size(DEFAULT_FONT_SIZE);
        font.set_bold(bold);
    }
}

/// Rewrites the index column as a plain 1-based sequence over the data rows.
/// The two rows after the last data row repeat the final index by formula;
/// they are visual continuation markers, not data.
pub fn update_row_indices(ws: &mut Worksheet) {
    let last = last_data_row(ws, DATA_START_ROW, BILL_ID_COLUMN);
    for (offset, row) in (DATA_START_ROW..=last).enumerate() {
        ws.get_cell_mut(format!("{INDEX_COLUMN}{row}").as_str())
            .set_value_number(offset as u32 + 1);
    }
    ws.get_cell_mut(format!("{INDEX_COLUMN}{}", last + 1).as_str())
        .set_formula(format!("{INDEX_COLUMN}{last}"));
    ws.get_cell_mut(format!("{INDEX_COLUMN}{}", last + 2).as_str())
        .set_formula(format!("{INDEX_COLUMN}{}", last + 1));
}

/// Regenerates the aggregate rows under the data block: a SUM over each
/// tracked column, a self-reference one row further down, and for the tax
/// column an extra reference two rows below that.
pub fn update_summary_sums(ws: &mut Worksheet) {
    let last = last_data_row(ws, DATA_START_ROW, BILL_ID_COLUMN);
    for col in SUM_COLUMNS {
        ws.get_cell_mut(format!("{col}{}", last + 1).as_str())
            .set_formula(format!("SUM({col}{DATA_START_ROW}:{col}{last})"));
        ws.get_cell_mut(format!("{col}{}", last + 2).as_str())
            .set_formula(format!("{col}{}", last + 1));
        if col == "H" {
            ws.get_cell_mut(format!("{col}{}", last + 4).as_str())
                .set_formula(format!("{col}{}", last + 2));
        }
    }
}
