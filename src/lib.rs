// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod fetch;

pub mod file;
pub mod model;
pub mod progress;
pub mod rank;
pub mod refresh;
pub mod report;
pub mod store;
pub mod tracker;

pub use config::TrackerOptions;
pub use error::{FetchError, StoreError, TrackerError};
pub use fetch::{Fetch, WebFetcher};
pub use model::{SeriesInfo, TimeSeriesRecord};
pub use rank::{RankedEntry, top_n};
pub use report::render_report;
pub use store::SeriesStore;
pub use tracker::{RefreshSummary, Tracker};
