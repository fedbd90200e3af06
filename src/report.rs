// src/report.rs
//
// Plain-text subscriber report. Output depends only on store contents
// and the date passed in.
//
//   --- Webtoon Subscriber Report (Generated: 2024-03-15) ---
//
//   ## Top 15 Webtoons by Subscribers
//
//   1. Alpha: 150
//
//   ---------------------------------------------------------
//
//   ## Detailed Breakdown
//
//   Alpha
//     - Current Subscribers: 150
//     - Monthly Data:
//       - 2024-01: 100
//       - 2024-02: 150 (+50)

use chrono::NaiveDate;

use crate::config::consts::{REPORT_RULE_WIDTH, REPORT_TOP_N};
use crate::core::{fmt, period};
use crate::model::TimeSeriesRecord;
use crate::rank;
use crate::store::SeriesStore;

pub fn render_report(store: &SeriesStore, today: NaiveDate) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!(
        "--- Webtoon Subscriber Report (Generated: {}) ---",
        period::date_key(today)
    ));

    lines.push(s!());
    lines.push(format!("## Top {REPORT_TOP_N} Webtoons by Subscribers"));
    lines.push(s!());
    for (i, entry) in rank::top_n(store, REPORT_TOP_N).iter().enumerate() {
        lines.push(format!("{}. {}: {}", i + 1, entry.title, fmt::thousands(entry.subscribers)));
    }

    lines.push(s!());
    lines.push("-".repeat(REPORT_RULE_WIDTH));

    lines.push(s!());
    lines.push(s!("## Detailed Breakdown"));
    for record in store.sorted_by_title() {
        lines.push(s!());
        lines.push(record.title().to_string());
        lines.extend(record_detail(record));
    }

    lines.join("\n")
}

/// Stats block under a title; empty for a series with no samples.
pub fn record_detail(record: &TimeSeriesRecord) -> Vec<String> {
    let Some(latest) = record.latest_value() else {
        return Vec::new();
    };

    let mut lines = Vec::with_capacity(record.monthly_data().len() + 2);
    lines.push(format!("  - Current Subscribers: {}", fmt::thousands(latest)));
    lines.push(s!("  - Monthly Data:"));
    lines.extend(monthly_lines(record).into_iter().map(|l| join!("    - ", &l)));
    lines
}

/// `"{period}: {count}{delta}"` per month, oldest first.
pub fn monthly_lines(record: &TimeSeriesRecord) -> Vec<String> {
    let mut previous: Option<i64> = None;
    record
        .history()
        .map(|(month, value)| {
            let line = format!("{month}: {}{}", fmt::thousands(value), fmt::delta(previous, value));
            previous = Some(value);
            line
        })
        .collect()
}
