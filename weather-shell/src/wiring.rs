use std::sync::Arc;

use weather_shell_core::{
    CommandRegistry, Config, Fetcher, HttpFetcher, LocationProvider, NetworkAccessor,
    StandardCommands, WeatherProvider,
    provider::{CheckIpAccessor, DbIpLocationProvider, NwsWeatherProvider},
};

/// Builds the provider graph from `config` and registers the standard commands.
pub fn registry_from_config(config: &Config) -> anyhow::Result<CommandRegistry> {
    let fetcher: Arc<dyn Fetcher> = Arc::new(HttpFetcher::new(&config.user_agent)?);
    let endpoints = &config.endpoints;

    let network: Arc<dyn NetworkAccessor> =
        Arc::new(CheckIpAccessor::new(fetcher.clone(), endpoints.ip_lookup.clone()));
    let location: Arc<dyn LocationProvider> = Arc::new(DbIpLocationProvider::new(
        network,
        fetcher.clone(),
        endpoints.geolocation.clone(),
    ));
    let weather: Arc<dyn WeatherProvider> =
        Arc::new(NwsWeatherProvider::new(fetcher, endpoints.weather_points.clone()));

    Ok(CommandRegistry::new(&StandardCommands::new(location, weather)))
}
