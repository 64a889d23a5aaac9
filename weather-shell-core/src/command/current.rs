use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::CommandError,
    provider::{LocationProvider, WeatherProvider},
};

use super::{Command, Context};

/// `current`: weather at the current location.
#[derive(Debug)]
pub struct CurrentWeather {
    weather: Arc<dyn WeatherProvider>,
    location: Arc<dyn LocationProvider>,
}

impl CurrentWeather {
    pub fn new(weather: Arc<dyn WeatherProvider>, location: Arc<dyn LocationProvider>) -> Self {
        Self { weather, location }
    }
}

#[async_trait]
impl Command for CurrentWeather {
    fn name(&self) -> &str {
        "current"
    }

    async fn execute(&self, ctx: &mut Context<'_>, _args: &[String]) -> Result<(), CommandError> {
        let location = match self.location.current_location().await {
            Ok(location) => location,
            Err(err) => {
                tracing::debug!("location lookup failed: {:#}", anyhow::Error::from(err));
                writeln!(ctx.err, "Failed to determine current location")?;
                return Ok(());
            }
        };

        match self.weather.for_location(location).await {
            Ok(weather) => writeln!(ctx.out, "{}", weather.report())?,
            Err(err) => {
                tracing::debug!(%location, "weather lookup failed: {:#}", anyhow::Error::from(err));
                writeln!(ctx.err, "Failed to determine weather for current location")?;
            }
        }
        Ok(())
    }
}
