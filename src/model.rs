// src/model.rs
use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::core::period;

/// Stable external key of a tracked series (its page URL). Compared as-is.
pub type SeriesId = String;

/// `"YYYY-MM"`.
pub type PeriodKey = String;

/// What a successful page fetch yields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeriesInfo {
    pub identifier: SeriesId,
    pub title: String,
    pub subscribers: i64,
}

/// One tracked series and its month → subscriber count history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeSeriesRecord {
    identifier: SeriesId,
    title: String,
    monthly_data: BTreeMap<PeriodKey, i64>,
}

impl TimeSeriesRecord {
    /// New record with no samples yet.
    pub fn new(identifier: impl Into<SeriesId>, title: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            title: title.into(),
            monthly_data: BTreeMap::new(),
        }
    }

    pub(crate) fn from_parts(identifier: SeriesId, title: String, monthly_data: BTreeMap<PeriodKey, i64>) -> Self {
        Self { identifier, title, monthly_data }
    }

    pub fn identifier(&self) -> &str { &self.identifier }
    pub fn title(&self) -> &str { &self.title }
    pub fn monthly_data(&self) -> &BTreeMap<PeriodKey, i64> { &self.monthly_data }
    pub fn is_empty(&self) -> bool { self.monthly_data.is_empty() }

    /// Count at the most recent period, if any.
    pub fn latest_value(&self) -> Option<i64> {
        self.monthly_data.last_key_value().map(|(_, v)| *v)
    }

    /// Insert or overwrite one period. Values are stored as given.
    pub fn set_period(&mut self, period: impl Into<PeriodKey>, value: i64) {
        self.monthly_data.insert(period.into(), value);
    }

    /// `set_period` for the month containing `today`.
    pub fn record_current_period(&mut self, value: i64, today: NaiveDate) {
        self.set_period(period::period_key(today), value);
    }

    /// `(period, value)` in chronological order.
    pub fn history(&self) -> impl Iterator<Item = (&str, i64)> + '_ {
        self.monthly_data.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_is_max_period_not_last_inserted() {
        let mut r = TimeSeriesRecord::new("u", "T");
        assert_eq!(r.latest_value(), None);
        r.set_period("2024-03", 30);
        r.set_period("2023-12", 999);
        r.set_period("2024-01", 10);
        assert_eq!(r.latest_value(), Some(30));
        let months: Vec<_> = r.history().map(|(p, _)| p).collect();
        assert_eq!(months, ["2023-12", "2024-01", "2024-03"]);
    }

    #[test]
    fn same_period_overwrites() {
        let mut r = TimeSeriesRecord::new("u", "T");
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let later = NaiveDate::from_ymd_opt(2024, 5, 30).unwrap();
        r.record_current_period(500, day);
        r.record_current_period(600, later);
        assert_eq!(r.monthly_data().len(), 1);
        assert_eq!(r.monthly_data().get("2024-05"), Some(&600));
    }

    #[test]
    fn accepts_zero_and_negative() {
        let mut r = TimeSeriesRecord::new("u", "T");
        r.set_period("2024-01", 0);
        r.set_period("2024-02", -5);
        assert_eq!(r.latest_value(), Some(-5));
    }
}
