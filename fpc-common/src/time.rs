//! Timestamp and log-period utilities

use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};

/// Month names as they appear on the monthly log sheets
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "June", "July", "Aug", "Sept", "Oct", "Nov", "Dec",
];

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Monthly period a strip is logged under, e.g. `Nov 2025`
pub fn period_label(date: NaiveDate) -> String {
    format!("{} {}", MONTH_LABELS[date.month0() as usize], date.year())
}

/// Period containing the local wall-clock time right now
pub fn current_period() -> String {
    period_label(Local::now().date_naive())
}

/// `dd/mm/yyyy`, the form technicians write on the sheet
pub fn sheet_date(at: DateTime<Local>) -> String {
    at.format("%d/%m/%Y").to_string()
}

/// `HH:MM`, 24-hour
pub fn sheet_time(at: DateTime<Local>) -> String {
    at.format("%H:%M").to_string()
}
