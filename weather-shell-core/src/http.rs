use std::fmt::Debug;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::error::FetchError;

/// Formats the diagnostic for a non-success status code.
pub type StatusMessage<'a> = &'a (dyn Fn(StatusCode) -> String + Send + Sync);

/// Fetches the body of a URL as text.
#[async_trait]
pub trait Fetcher: Send + Sync + Debug {
    /// GET `url` and return the body. A non-success status fails with
    /// [`FetchError::Status`] carrying `bad_status(status)`.
    async fn fetch(&self, url: &str, bad_status: StatusMessage<'_>) -> Result<String, FetchError>;
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> anyhow::Result<Self> {
        let http = Client::builder().user_agent(user_agent).build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, bad_status: StatusMessage<'_>) -> Result<String, FetchError> {
        tracing::debug!(url, "GET");

        let transport = |source: reqwest::Error| FetchError::Transport { url: url.to_string(), source };

        let res = self.http.get(url).send().await.map_err(transport)?;

        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Status(bad_status(status)));
        }

        res.text().await.map_err(transport)
    }
}
