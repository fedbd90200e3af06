// src/error.rs
use std::{io, path::PathBuf};

use thiserror::Error;

/// Persisted store / report file failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("data file {path} is corrupted; edit or delete it ({source})")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not encode store: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("path exists but is not a directory: {0}")]
    NotADirectory(PathBuf),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

/// Why a series page did not yield `(title, subscribers)`.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("no series URL given")]
    EmptyIdentifier,

    #[error("failed to fetch page: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP error: status {0}")]
    Status(u16),

    #[error("could not find webtoon title")]
    TitleNotFound,

    #[error("could not find subscriber information")]
    SubscribersNotFound,

    #[error("could not parse subscriber count {0:?}")]
    UnparsableCount(String),
}

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}
