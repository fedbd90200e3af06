// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;

use super::consts::*;
use crate::core::period;

/// Everything the tracker needs to know about its environment.
/// Built once by the frontend and handed to `Tracker::open`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackerOptions {
    /// Folder holding the store file, reports and the debug log.
    pub data_dir: PathBuf,
    pub data_file: String,
    pub net: NetOptions,
    pub pool: PoolOptions,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DATA_DIR),
            data_file: s!(DATA_FILE),
            net: NetOptions::default(),
            pool: PoolOptions::default(),
        }
    }
}

impl TrackerOptions {
    /// Options rooted at `data_dir`, defaults everywhere else.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into(), ..Self::default() }
    }

    pub fn data_path(&self) -> PathBuf {
        self.data_dir.join(&self.data_file)
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }
}

/// `report-YYYY-MM-DD.txt`
pub fn report_filename(today: NaiveDate) -> String {
    join!(REPORT_PREFIX, &period::date_key(today), ".", REPORT_EXT)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetOptions {
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for NetOptions {
    fn default() -> Self {
        Self {
            user_agent: s!(USER_AGENT),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }
}

/// Bulk refresh worker pool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolOptions {
    pub workers: usize,
    /// Pause after each request, per worker.
    pub pause: Duration,
    /// Upper bound (exclusive) of the extra per-request pause.
    pub jitter_ms: u64,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            workers: WORKERS,
            pause: Duration::from_millis(REQUEST_PAUSE_MS),
            jitter_ms: JITTER_MS,
        }
    }
}

impl PoolOptions {
    /// No pauses at all; for tests and local fixtures.
    pub fn immediate(workers: usize) -> Self {
        Self { workers, pause: Duration::ZERO, jitter_ms: 0 }
    }
}
