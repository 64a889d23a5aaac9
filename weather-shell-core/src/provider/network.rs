use std::{net::IpAddr, sync::Arc};

use async_trait::async_trait;

use crate::{error::NetworkError, http::Fetcher, memo::Memo};

use super::NetworkAccessor;

/// Resolves the external address through a "what is my IP" endpoint that
/// answers with the bare address. The first successful answer is kept for
/// the process lifetime.
#[derive(Debug)]
pub struct CheckIpAccessor {
    fetcher: Arc<dyn Fetcher>,
    url: String,
    address: Memo<IpAddr>,
}

impl CheckIpAccessor {
    pub fn new(fetcher: Arc<dyn Fetcher>, url: impl Into<String>) -> Self {
        Self { fetcher, url: url.into(), address: Memo::new() }
    }

    async fn lookup(&self) -> Result<IpAddr, NetworkError> {
        let body = self
            .fetcher
            .fetch(&self.url, &|status| {
                format!("IP lookup API '{}' yielded status code: {}", self.url, status.as_u16())
            })
            .await?;

        let raw = body.trim();
        let address = raw
            .parse()
            .map_err(|source| NetworkError::InvalidAddress { raw: raw.to_string(), source })?;

        tracing::debug!(%address, "resolved external address");
        Ok(address)
    }
}

#[async_trait]
impl NetworkAccessor for CheckIpAccessor {
    async fn external_address(&self) -> Result<IpAddr, NetworkError> {
        self.address.get_or_try_compute(|| self.lookup()).await
    }
}
