use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use regex::Regex;

use crate::{
    error::LocationLookupError,
    http::Fetcher,
    memo::Memo,
    model::Location,
};

use super::{LocationProvider, NetworkAccessor};

/// Matches the "Coordinates" row of the lookup page: `<lat>, <lon>`.
static COORDINATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<tr>\s*<th>\s*Coordinates\s*</th>\s*<td>\s*([\d.-]+)\s*,\s*([\d.-]+)\s*</td>\s*</tr>")
        .unwrap()
});

/// Geolocates the external address by scraping an IP lookup page
/// (`<base_url><ip>`). The location is resolved once per process.
#[derive(Debug)]
pub struct DbIpLocationProvider {
    accessor: Arc<dyn NetworkAccessor>,
    fetcher: Arc<dyn Fetcher>,
    base_url: String,
    location: Memo<Location>,
}

impl DbIpLocationProvider {
    pub fn new(
        accessor: Arc<dyn NetworkAccessor>,
        fetcher: Arc<dyn Fetcher>,
        base_url: impl Into<String>,
    ) -> Self {
        Self { accessor, fetcher, base_url: base_url.into(), location: Memo::new() }
    }

    async fn request_location(&self) -> Result<Location, LocationLookupError> {
        let ip = self.accessor.external_address().await?;
        let url = format!("{}{}", self.base_url, ip);

        let content = self
            .fetcher
            .fetch(&url, &|status| {
                format!(
                    "Location lookup API '{}' yielded status code: {}",
                    self.base_url,
                    status.as_u16()
                )
            })
            .await?;

        let location = parse_coordinates(&content)?;
        tracing::debug!(%ip, %location, "resolved current location");
        Ok(location)
    }
}

#[async_trait]
impl LocationProvider for DbIpLocationProvider {
    async fn current_location(&self) -> Result<Location, LocationLookupError> {
        self.location.get_or_try_compute(|| self.request_location()).await
    }
}

fn parse_coordinates(content: &str) -> Result<Location, LocationLookupError> {
    let caps = COORDINATE_PATTERN
        .captures(content)
        .ok_or(LocationLookupError::FormatChanged)?;

    let coordinate = |raw: &str| {
        raw.parse::<f64>()
            .map_err(|source| LocationLookupError::InvalidCoordinate { raw: raw.to_string(), source })
    };

    Ok(Location::new(coordinate(&caps[1])?, coordinate(&caps[2])?))
}
