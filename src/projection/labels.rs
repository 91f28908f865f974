//! Period label generation along the projection horizon

use chrono::{Datelike, Months, NaiveDate};

use crate::rates::Cadence;

/// Lowercase pt-BR month abbreviations, matching what the frontend displays
const MONTH_ABBREV: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

/// Label for the point `t` periods after `start`
///
/// Annual cadence labels with the calendar year; monthly cadence with the
/// abbreviated month and year. Labels are cosmetic and never feed back into
/// the numeric series.
pub fn period_label(start: NaiveDate, cadence: Cadence, t: u32) -> String {
    match cadence {
        Cadence::Annual => (start.year() + t as i32).to_string(),
        Cadence::Monthly => {
            let date = start + Months::new(t);
            format!("{}/{}", MONTH_ABBREV[date.month0() as usize], date.year())
        }
    }
}
