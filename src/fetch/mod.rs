// src/fetch/mod.rs
//! # Series page fetching
//!
//! The tracker only ever sees the [`Fetch`] trait: give it a series URL, get
//! back `(title, subscribers)` or a reason why not. Failures are per series;
//! callers decide whether that is fatal (`add`) or just a skipped item
//! (bulk refresh).
//!
//! - `net`  – blocking HTTP client with the browser User-Agent.
//! - `page` – pure HTML extraction, testable offline against saved pages.

pub mod net;
pub mod page;

use crate::config::NetOptions;
use crate::error::FetchError;
use crate::model::SeriesInfo;

pub trait Fetch: Send + Sync {
    fn fetch(&self, identifier: &str) -> Result<SeriesInfo, FetchError>;
}

/// Any thread-safe closure works as a fetcher (handy for fixtures).
impl<F> Fetch for F
where
    F: Fn(&str) -> Result<SeriesInfo, FetchError> + Send + Sync,
{
    fn fetch(&self, identifier: &str) -> Result<SeriesInfo, FetchError> {
        self(identifier)
    }
}

/// Fetches the live series page and scrapes it.
pub struct WebFetcher {
    http: net::HttpClient,
}

impl WebFetcher {
    pub fn new(opts: &NetOptions) -> Result<Self, FetchError> {
        Ok(Self { http: net::HttpClient::new(opts)? })
    }
}

impl Fetch for WebFetcher {
    fn fetch(&self, identifier: &str) -> Result<SeriesInfo, FetchError> {
        let url = identifier.trim();
        if url.is_empty() {
            return Err(FetchError::EmptyIdentifier);
        }

        let html = self.http.get(url)?;
        let parsed = page::parse_series_page(&html)?;
        logd!("Fetch: {url} → {:?} {}", parsed.title, parsed.subscribers);

        Ok(SeriesInfo {
            identifier: identifier.to_string(),
            title: parsed.title,
            subscribers: parsed.subscribers,
        })
    }
}
