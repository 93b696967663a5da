use regex::Regex;
use std::sync::OnceLock;
use umya_spreadsheet::{Border, Worksheet};

use crate::day_sheet::{
    apply_row_format, find_label_row, last_data_row, DATA_START_ROW, DEFAULT_FONT_NAME,
    DEFAULT_FONT_SIZE,
};
use crate::status::{Severity, StatusSink};

pub const PLATFORM_SHOPEE: &str = "Shopee";
pub const PLATFORM_LAZADA: &str = "Lazada";
const GRAND_TOTAL_LABEL: &str = "Grand total";

/// Column E carries the summary row labels.
const LABEL_COLUMN: &str = "E";
/// Column K holds the transport text, column L the derived platform name.
const TRANSPORT_COLUMN: &str = "K";
const PLATFORM_COLUMN: &str = "L";
/// Columns I..K are tinted on platform rows.
const TINT_COLUMNS: [&str; 3] = ["I", "J", "K"];

const FILL_SHOPEE: &str = "FFF7C7AC";
const FILL_LAZADA: &str = "FFFFC000";
const PLATFORM_FONT_COLOR: &str = "FFFF0000";

fn platform_suffix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)/\s*(\w+)$").expect("invalid platform suffix regex"))
}

/// Tags every data row whose transport text ends in "/ <platform>" with the
/// capitalized platform name and tints the transport block with that
/// platform's fill. Rows without a recognized suffix keep default styling.
pub fn apply_platform_styling(ws: &mut Worksheet) {
    let last = last_data_row(ws, DATA_START_ROW, "H");
    for row in 2..=last {
        let transport = ws.get_value(format!("{TRANSPORT_COLUMN}{row}").as_str());
        if transport.is_empty() {
            continue;
        }
        let Some(caps) = platform_suffix_re().captures(&transport) else {
            continue;
        };
        let (name, fill) = match caps[1].to_lowercase().as_str() {
            "shopee" => (PLATFORM_SHOPEE, FILL_SHOPEE),
            "lazada" => (PLATFORM_LAZADA, FILL_LAZADA),
            _ => continue,
        };

        let platform_coordinate = format!("{PLATFORM_COLUMN}{row}");
        ws.get_cell_mut(platform_coordinate.as_str())
            .set_value_string(name);
        style_platform_cell(ws, &platform_coordinate, None);
        for col in TINT_COLUMNS {
            style_platform_cell(ws, &format!("{col}{row}"), Some(fill));
        }
    }
}

fn style_platform_cell(ws: &mut Worksheet, coordinate: &str, fill: Option<&str>) {
    let style = ws.get_style_mut(coordinate);
    if let Some(color) = fill {
        style.set_background_color(color);
    }
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
    font.get_color_mut().set_argb(PLATFORM_FONT_COLOR);
}

/// Populates the per-platform subtotal rows, their running totals and the
/// grand-total row. Returns `false` (after a warning) when any of the three
/// label rows cannot be located; the merge still saves in that case.
pub fn write_summary_formulas(
    ws: &mut Worksheet,
    day_number: u32,
    sink: &mut dyn StatusSink,
) -> bool {
    let last = last_data_row(ws, DATA_START_ROW, "H");
    let shopee_row = find_label_row(ws, PLATFORM_SHOPEE, LABEL_COLUMN);
    let lazada_row = find_label_row(ws, PLATFORM_LAZADA, LABEL_COLUMN);
    let grand_row = find_label_row(ws, GRAND_TOTAL_LABEL, LABEL_COLUMN);
    let (Some(shopee_row), Some(lazada_row), Some(grand_row)) = (shopee_row, lazada_row, grand_row)
    else {
        sink.emit(
            Severity::Warning,
            "Required rows not found for Shopee, Lazada, or Grand total; summary formulas were left unset.",
        );
        return false;
    };

    write_platform_row(ws, shopee_row, PLATFORM_SHOPEE, day_number, last);
    write_platform_row(ws, lazada_row, PLATFORM_LAZADA, day_number, last);

    for col in ["F", "G", "H", "I"] {
        ws.get_cell_mut(format!("{col}{grand_row}").as_str())
            .set_formula(format!("{col}{shopee_row}+{col}{lazada_row}"));
    }

    apply_row_format(ws, shopee_row, false);
    apply_row_format(ws, lazada_row, false);
    apply_row_format(ws, grand_row, true);
    true
}

/// Conditional subtotals over the data range for one platform, plus the
/// running total: on the first day sheet it is just this day's subtotal,
/// afterwards it chains to the previous day sheet's running-total column.
fn write_platform_row(ws: &mut Worksheet, row: u32, platform: &str, day_number: u32, last: u32) {
    for col in ["F", "G", "H"] {
        ws.get_cell_mut(format!("{col}{row}").as_str()).set_formula(format!(
            "SUMIF({PLATFORM_COLUMN}{DATA_START_ROW}:{PLATFORM_COLUMN}{last},\"{platform}\",{col}{DATA_START_ROW}:{col}{last})"
        ));
    }

    let running = if day_number > 1 {
        let previous_sheet = day_number - 1;
        format!(
            "H{row} + SUMIF(INDIRECT(\"'{previous_sheet}'!E:E\"), \"{platform}\", INDIRECT(\"'{previous_sheet}'!I:I\"))"
        )
    } else {
        format!("H{row}")
    };
    ws.get_cell_mut(format!("I{row}").as_str()).set_formula(running);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::MemorySink;

    fn day_sheet_fixture(data_rows: u32) -> umya_spreadsheet::Spreadsheet {
        let mut book = umya_spreadsheet::new_file();
        let ws = book.get_sheet_mut(&0).expect("default sheet");
        for i in 0..data_rows {
            let row = DATA_START_ROW + i;
            ws.get_cell_mut(format!("C{row}").as_str())
                .set_value_string(format!("BILL{i:02}"));
            ws.get_cell_mut(format!("H{row}").as_str())
                .set_value_number(10 + i);
        }
        let base = DATA_START_ROW + data_rows + 4;
        ws.get_cell_mut(format!("E{base}").as_str())
            .set_value_string(PLATFORM_SHOPEE);
        ws.get_cell_mut(format!("E{}", base + 1).as_str())
            .set_value_string(PLATFORM_LAZADA);
        ws.get_cell_mut(format!("E{}", base + 2).as_str())
            .set_value_string(GRAND_TOTAL_LABEL);
        book
    }

    #[test]
    fn first_day_running_total_is_the_day_subtotal() {
        let mut book = day_sheet_fixture(2);
        let ws = book.get_sheet_mut(&0).expect("sheet");
        let mut sink = MemorySink::default();
        assert!(write_summary_formulas(ws, 1, &mut sink));

        // labels at rows 11-13 for two data rows
        assert_eq!(
            ws.get_cell("F11").expect("subtotal cell").get_formula(),
            "SUMIF(L5:L6,\"Shopee\",F5:F6)"
        );
        assert_eq!(
            ws.get_cell("I11").expect("running cell").get_formula(),
            "H11"
        );
        assert_eq!(
            ws.get_cell("H13").expect("grand cell").get_formula(),
            "H11+H12"
        );
        assert!(sink.0.is_empty());
    }

    #[test]
    fn later_days_chain_to_the_previous_sheet() {
        let mut book = day_sheet_fixture(1);
        let ws = book.get_sheet_mut(&0).expect("sheet");
        let mut sink = MemorySink::default();
        assert!(write_summary_formulas(ws, 2, &mut sink));

        assert_eq!(
            ws.get_cell("I10").expect("running cell").get_formula(),
            "H10 + SUMIF(INDIRECT(\"'1'!E:E\"), \"Shopee\", INDIRECT(\"'1'!I:I\"))"
        );
        assert_eq!(
            ws.get_cell("I11").expect("running cell").get_formula(),
            "H11 + SUMIF(INDIRECT(\"'1'!E:E\"), \"Lazada\", INDIRECT(\"'1'!I:I\"))"
        );
    }

    #[test]
    fn missing_label_rows_warn_and_skip() {
        let mut book = umya_spreadsheet::new_file();
        let ws = book.get_sheet_mut(&0).expect("sheet");
        ws.get_cell_mut("E9").set_value_string(PLATFORM_SHOPEE);

        let mut sink = MemorySink::default();
        assert!(!write_summary_formulas(ws, 1, &mut sink));
        assert_eq!(sink.0.len(), 1);
        assert_eq!(sink.0[0].0, Severity::Warning);
    }

    #[test]
    fn recognized_transport_suffix_sets_the_platform_column() {
        let mut book = day_sheet_fixture(3);
        let ws = book.get_sheet_mut(&0).expect("sheet");
        ws.get_cell_mut("K5").set_value_string("Kerry / Shopee");
        ws.get_cell_mut("K6").set_value_string("Flash / LAZADA");
        ws.get_cell_mut("K7").set_value_string("EMS");
        apply_platform_styling(ws);

        assert_eq!(ws.get_value("L5"), PLATFORM_SHOPEE);
        assert_eq!(ws.get_value("L6"), PLATFORM_LAZADA);
        assert_eq!(ws.get_value("L7"), "");
    }
}
