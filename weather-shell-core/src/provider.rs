use std::{fmt::Debug, net::IpAddr};

use async_trait::async_trait;

use crate::{
    error::{LocationLookupError, NetworkError, WeatherLookupError},
    model::{Location, Weather},
};

pub mod location;
pub mod network;
pub mod weather;

pub use location::DbIpLocationProvider;
pub use network::CheckIpAccessor;
pub use weather::NwsWeatherProvider;

/// Network information about the host we run on.
#[async_trait]
pub trait NetworkAccessor: Send + Sync + Debug {
    /// The public IP address of this host, as seen from the internet.
    async fn external_address(&self) -> Result<IpAddr, NetworkError>;
}

#[async_trait]
pub trait LocationProvider: Send + Sync + Debug {
    async fn current_location(&self) -> Result<Location, LocationLookupError>;
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn for_location(&self, location: Location) -> Result<Weather, WeatherLookupError>;
}
