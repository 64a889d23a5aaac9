use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::CommandError,
    model::Location,
    provider::WeatherProvider,
};

use super::{Command, Context};

/// `remote <latitude> <longitude>`: weather at the given coordinates.
#[derive(Debug)]
pub struct RemoteWeather {
    weather: Arc<dyn WeatherProvider>,
}

impl RemoteWeather {
    pub fn new(weather: Arc<dyn WeatherProvider>) -> Self {
        Self { weather }
    }
}

#[async_trait]
impl Command for RemoteWeather {
    fn name(&self) -> &str {
        "remote"
    }

    async fn execute(&self, ctx: &mut Context<'_>, args: &[String]) -> Result<(), CommandError> {
        let [lat, lon, ..] = args else {
            return Err(CommandError::invalid_input(
                "Missing required arguments: 'latitude' and 'longitude'",
            ));
        };

        let (Ok(latitude), Ok(longitude)) = (lat.parse::<f64>(), lon.parse::<f64>()) else {
            writeln!(ctx.err, "Failed to parse lat/lon arguments")?;
            return Ok(());
        };

        if !latitude.is_finite() || latitude.abs() > 90.0 {
            return Err(CommandError::invalid_input("Latitude must be within [+90, -90]"));
        }
        if !longitude.is_finite() || longitude.abs() > 180.0 {
            return Err(CommandError::invalid_input("Longitude must be within [+180, -180]"));
        }

        let location = Location::new(latitude, longitude);
        match self.weather.for_location(location).await {
            Ok(weather) => writeln!(ctx.out, "{}", weather.report())?,
            Err(err) => {
                tracing::debug!(%location, "weather lookup failed: {:#}", anyhow::Error::from(err));
                writeln!(ctx.err, "Failed to determine weather for requested location")?;
            }
        }
        Ok(())
    }
}
