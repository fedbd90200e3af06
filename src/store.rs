// src/store.rs
//
// In-memory series store and its persisted JSON shape:
//
//   { "<url>": { "title": "...", "data": { "2024-09": 123456, ... } }, ... }
//
// The store imposes no iteration order. Anything user-visible goes
// through `sorted_by_title` or the ranking engine.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::normalize_title;
use crate::model::{PeriodKey, SeriesId, TimeSeriesRecord};

/// One entry of the persisted file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSeries {
    pub title: String,
    #[serde(default)]
    pub data: BTreeMap<PeriodKey, i64>,
}

/// Whole persisted file. Keyed map so the written JSON is stable.
pub type PersistedStore = BTreeMap<SeriesId, PersistedSeries>;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeriesStore {
    records: HashMap<SeriesId, TimeSeriesRecord>,
}

impl SeriesStore {
    pub fn new() -> Self { Self::default() }

    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }
    pub fn contains(&self, identifier: &str) -> bool { self.records.contains_key(identifier) }

    /// Record `value` for the month of `today`, creating the series with
    /// `title` first if it is unknown. An existing series keeps its title.
    /// Returns `true` when the series was created.
    pub fn upsert(&mut self, identifier: &str, title: &str, value: i64, today: NaiveDate) -> bool {
        let created = !self.records.contains_key(identifier);
        self.records
            .entry(identifier.to_string())
            .or_insert_with(|| TimeSeriesRecord::new(identifier, title))
            .record_current_period(value, today);
        created
    }

    /// Record `value` for an already tracked series. Unknown identifiers
    /// are left alone and `false` is returned.
    pub fn record_sample(&mut self, identifier: &str, value: i64, today: NaiveDate) -> bool {
        match self.records.get_mut(identifier) {
            Some(rec) => {
                rec.record_current_period(value, today);
                true
            }
            None => false,
        }
    }

    /// `true` if something was removed.
    pub fn remove(&mut self, identifier: &str) -> bool {
        self.records.remove(identifier).is_some()
    }

    pub fn get(&self, identifier: &str) -> Option<&TimeSeriesRecord> {
        self.records.get(identifier)
    }

    /// Owned snapshot; later store mutations do not show through it.
    pub fn all(&self) -> Vec<(SeriesId, TimeSeriesRecord)> {
        self.records.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    pub fn identifiers(&self) -> Vec<SeriesId> {
        self.records.keys().cloned().collect()
    }

    pub fn records(&self) -> impl Iterator<Item = &TimeSeriesRecord> {
        self.records.values()
    }

    /// Records by normalized title, ties by raw title then identifier.
    pub fn sorted_by_title(&self) -> Vec<&TimeSeriesRecord> {
        let mut keyed: Vec<(String, &TimeSeriesRecord)> = self
            .records
            .values()
            .map(|r| (normalize_title(r.title()), r))
            .collect();
        keyed.sort_by(|(ka, a), (kb, b)| {
            ka.cmp(kb)
                .then_with(|| a.title().cmp(b.title()))
                .then_with(|| a.identifier().cmp(b.identifier()))
        });
        keyed.into_iter().map(|(_, r)| r).collect()
    }

    /* ---------------- Persisted form ---------------- */

    pub fn to_persisted(&self) -> PersistedStore {
        self.records
            .iter()
            .map(|(id, rec)| {
                let entry = PersistedSeries {
                    title: rec.title().to_string(),
                    data: rec.monthly_data().clone(),
                };
                (id.clone(), entry)
            })
            .collect()
    }

    pub fn from_persisted(persisted: PersistedStore) -> Self {
        let records = persisted
            .into_iter()
            .map(|(id, entry)| {
                let rec = TimeSeriesRecord::from_parts(id.clone(), entry.title, entry.data);
                (id, rec)
            })
            .collect();
        Self { records }
    }

    /// Pretty JSON, two-space indent.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.to_persisted())
    }

    /// Integers only: a fractional or out-of-range count is rejected.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        let persisted: PersistedStore = serde_json::from_str(text)?;
        Ok(Self::from_persisted(persisted))
    }
}
