// src/core/period.rs
//
// Period keys are "YYYY-MM"; their lexicographic order is chronological,
// so every consumer can walk a BTreeMap<String, _> and get months in order.

use chrono::NaiveDate;

pub const PERIOD_FORMAT: &str = "%Y-%m";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Month bucket a sample taken on `date` belongs to.
pub fn period_key(date: NaiveDate) -> String {
    date.format(PERIOD_FORMAT).to_string()
}

/// Report stamp for `date`.
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
