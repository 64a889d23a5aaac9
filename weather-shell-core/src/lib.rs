//! Core library for the `weather-shell` CLI.
//!
//! This crate defines:
//! - The location and weather domain model
//! - Providers chaining IP lookup, geolocation and the weather.gov API,
//!   with their caches
//! - The command contract, the built-in commands and the dispatching registry
//! - Configuration of the external endpoints
//!
//! It is used by `weather-shell`, which only wires these pieces together.

pub mod command;
pub mod config;
pub mod error;
pub mod http;
pub mod memo;
pub mod model;
pub mod provider;
pub mod registry;
pub mod session;

#[cfg(test)]
mod testing;

pub use command::{Command, Context, StandardCommands};
pub use config::{Config, Endpoints};
pub use error::{CommandError, FetchError, LocationLookupError, NetworkError, WeatherLookupError};
pub use http::{Fetcher, HttpFetcher};
pub use model::{CompassDirection, Location, Temperature, Weather, Wind};
pub use provider::{LocationProvider, NetworkAccessor, WeatherProvider};
pub use registry::{CommandLoader, CommandRegistry, Dispatch};
