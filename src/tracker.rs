// src/tracker.rs
//
// Orchestrates fetcher → store → file. Every mutating call persists the
// store before returning; bulk refresh persists once at the end.

use std::path::PathBuf;

use chrono::NaiveDate;

use crate::config::TrackerOptions;
use crate::config::options::report_filename;
use crate::error::{StoreError, TrackerError};
use crate::fetch::Fetch;
use crate::file;
use crate::model::{SeriesId, SeriesInfo};
use crate::progress::Progress;
use crate::rank::{self, RankedEntry};
use crate::refresh;
use crate::report;
use crate::store::SeriesStore;

pub struct Tracker<F: Fetch> {
    options: TrackerOptions,
    store: SeriesStore,
    fetcher: F,
    /// The store file could not be read; move it aside before the first save.
    load_failed: bool,
}

/// What happened during a bulk refresh.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RefreshSummary {
    pub total: usize,
    pub updated: Vec<SeriesId>,
    /// `(identifier, reason)`
    pub failed: Vec<(SeriesId, String)>,
}

impl<F: Fetch> Tracker<F> {
    /// Load the store named by `options`.
    ///
    /// A corrupted store file does not stop the tracker: it starts empty and
    /// the load error is handed back so the frontend can show it.
    pub fn open(options: TrackerOptions, fetcher: F) -> (Self, Option<StoreError>) {
        let path = options.data_path();
        let (store, load_error) = match file::load_store(&path) {
            Ok(store) => {
                logf!("Store: loaded {} series from {}", store.len(), path.display());
                (store, None)
            }
            Err(e) => {
                loge!("Store: load failed, starting empty: {e}");
                (SeriesStore::new(), Some(e))
            }
        };
        let load_failed = load_error.is_some();
        (Self { options, store, fetcher, load_failed }, load_error)
    }

    /// Wrap an existing store; nothing is read from disk.
    pub fn with_store(options: TrackerOptions, store: SeriesStore, fetcher: F) -> Self {
        Self { options, store, fetcher, load_failed: false }
    }

    pub fn options(&self) -> &TrackerOptions { &self.options }
    pub fn store(&self) -> &SeriesStore { &self.store }

    /// Fetch one series and record today's count, creating it if new.
    pub fn add(&mut self, identifier: &str, today: NaiveDate) -> Result<SeriesInfo, TrackerError> {
        let info = self.fetcher.fetch(identifier)?;
        let created = self.ingest(&info, today);
        logf!(
            "Add: {} {:?} = {} ({})",
            info.identifier,
            info.title,
            info.subscribers,
            if created { "new" } else { "updated" }
        );
        self.save()?;
        Ok(info)
    }

    /// Apply one fetch result to the store. `true` if the series is new.
    pub fn ingest(&mut self, info: &SeriesInfo, today: NaiveDate) -> bool {
        self.store.upsert(&info.identifier, &info.title, info.subscribers, today)
    }

    /// Forget a series. Unknown identifiers are not an error.
    pub fn remove(&mut self, identifier: &str) -> Result<bool, TrackerError> {
        if !self.store.remove(identifier) {
            logd!("Remove: {identifier} not tracked");
            return Ok(false);
        }
        logf!("Remove: {identifier}");
        self.save()?;
        Ok(true)
    }

    /// Refetch every tracked series and record today's counts.
    ///
    /// Fetches run concurrently; results are applied here, one at a time.
    /// A failed fetch leaves that series untouched. The store is saved once.
    pub fn refresh_all(
        &mut self,
        today: NaiveDate,
        mut progress: Option<&mut dyn Progress>,
    ) -> Result<RefreshSummary, TrackerError> {
        let mut ids = self.store.identifiers();
        ids.sort();

        let mut summary = RefreshSummary { total: ids.len(), ..Default::default() };
        logf!("Refresh: begin, {} series", ids.len());
        if let Some(p) = progress.as_deref_mut() {
            p.begin(ids.len());
        }
        if ids.is_empty() {
            if let Some(p) = progress.as_deref_mut() {
                p.finish();
            }
            return Ok(summary);
        }

        let store = &mut self.store;
        refresh::fetch_all(&self.fetcher, &ids, &self.options.pool, |outcome| match outcome {
            Ok(info) => {
                if store.record_sample(&info.identifier, info.subscribers, today) {
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_done(&info.identifier, &info.title);
                    }
                    summary.updated.push(info.identifier);
                }
            }
            Err((id, e)) => {
                logw!("Refresh: {id}: {e}");
                let reason = e.to_string();
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(&id, &reason);
                }
                summary.failed.push((id, reason));
            }
        });

        summary.updated.sort();
        summary.failed.sort();

        let saved = self.save();
        if let Some(p) = progress.as_deref_mut() {
            p.finish();
        }
        saved?;

        logf!(
            "Refresh: done, {} updated, {} failed",
            summary.updated.len(),
            summary.failed.len()
        );
        Ok(summary)
    }

    pub fn top(&self, n: usize) -> Vec<RankedEntry> {
        rank::top_n(&self.store, n)
    }

    pub fn report(&self, today: NaiveDate) -> String {
        report::render_report(&self.store, today)
    }

    /// Render and write `report-YYYY-MM-DD.txt` into the data folder.
    pub fn save_report(&self, today: NaiveDate) -> Result<PathBuf, TrackerError> {
        let contents = self.report(today);
        let path = file::save_report(&self.options.data_dir, &report_filename(today), &contents)?;
        logf!("Report: wrote {}", path.display());
        Ok(path)
    }

    /// Write the store file. After a failed load the unreadable file is
    /// first renamed to `<name>.corrupt`.
    pub fn save(&mut self) -> Result<(), TrackerError> {
        let path = self.options.data_path();
        if self.load_failed {
            file::backup_corrupt(&path)?;
            self.load_failed = false;
        }
        file::save_store(&path, &self.store).map_err(|e| {
            loge!("Store: save failed: {e}");
            TrackerError::from(e)
        })
    }
}
