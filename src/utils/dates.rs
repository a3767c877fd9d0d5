//! Date and time utilities

use chrono::{Local, NaiveDate};

/// Short numeric date, e.g. "10/19/2026"
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

/// Name given to palettes saved without one
pub fn default_palette_name() -> String {
    format!("Palette {}", format_short_date(Local::now().date_naive()))
}
