// src/rank.rs
use crate::core::normalize_title;
use crate::store::SeriesStore;

/// A series projected to its latest count. Derived, never stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankedEntry {
    pub title: String,
    pub subscribers: i64,
}

/// Top `n` series by latest subscriber count, highest first.
///
/// Series without samples are left out entirely. Equal counts are ordered
/// by normalized title, then raw title, then identifier, so the result does
/// not depend on store iteration order.
pub fn top_n(store: &SeriesStore, n: usize) -> Vec<RankedEntry> {
    let mut ranked: Vec<(i64, String, &str, &str)> = store
        .records()
        .filter_map(|r| {
            r.latest_value()
                .map(|v| (v, normalize_title(r.title()), r.title(), r.identifier()))
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.0.cmp(&a.0)
            .then_with(|| a.1.cmp(&b.1))
            .then_with(|| a.2.cmp(b.2))
            .then_with(|| a.3.cmp(b.3))
    });

    ranked
        .into_iter()
        .take(n)
        .map(|(subscribers, _, title, _)| RankedEntry { title: title.to_string(), subscribers })
        .collect()
}
