// src/fetch/net.rs

use reqwest::blocking::Client;

use crate::config::NetOptions;
use crate::error::FetchError;

/// Shared blocking client; cheap to use from several worker threads.
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(opts: &NetOptions) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(opts.user_agent.as_str())
            .timeout(opts.timeout)
            .build()?;
        Ok(Self { client })
    }

    /// GET `url`, body as text. Non-2xx is an error.
    pub fn get(&self, url: &str) -> Result<String, FetchError> {
        let resp = self.client.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        Ok(resp.text()?)
    }
}
