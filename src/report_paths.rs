use std::path::PathBuf;

/// Where the monthly report and the per-day bill folders live. The merge
/// core only ever asks for these two paths; the directory convention itself
/// is a collaborator detail.
pub trait ReportLayout {
    fn monthly_report_path(&self, year: i32, month: u32) -> PathBuf;
    fn daily_bills_dir(&self, year: i32, month: u32, day: u32) -> PathBuf;
}

/// The production tree: `Year_{y}/Month_{mm}` folders holding
/// `Monthly_Report_{m}_{y}.xlsx` and `Daily_Bills/Day_{d}` subfolders.
#[derive(Debug, Clone)]
pub struct OrderReportsLayout {
    root: PathBuf,
}

impl OrderReportsLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn month_dir(&self, year: i32, month: u32) -> PathBuf {
        self.root
            .join(format!("Year_{year}"))
            .join(format!("Month_{month:02}"))
    }
}

impl ReportLayout for OrderReportsLayout {
    fn monthly_report_path(&self, year: i32, month: u32) -> PathBuf {
        self.month_dir(year, month)
            .join(format!("Monthly_Report_{month}_{year}.xlsx"))
    }

    fn daily_bills_dir(&self, year: i32, month: u32, day: u32) -> PathBuf {
        self.month_dir(year, month)
            .join("Daily_Bills")
            .join(format!("Day_{day}"))
    }
}

/// Normalizes a year entry. Buddhist-era years (over 2500) are converted to
/// the common era; anything that still has more than four digits is refused.
pub fn normalize_year(input: &str) -> Result<i32, String> {
    let year: i32 = input
        .trim()
        .parse()
        .map_err(|_| format!("invalid year: {input}"))?;
    let year = if year > 2500 { year - 543 } else { year };
    if year.abs() > 9999 {
        return Err("year cannot have more than 4 digits".to_string());
    }
    Ok(year)
}

/// Rejects dates that do not exist on the calendar.
pub fn validate_date(year: i32, month: u32, day: u32) -> Result<(), String> {
    chrono::NaiveDate::from_ymd_opt(year, month, day)
        .map(|_| ())
        .ok_or_else(|| format!("{year}-{month:02}-{day:02} is not a valid date"))
}
