use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::{
    error::WeatherLookupError,
    http::Fetcher,
    model::{CompassDirection, Location, Temperature, Weather, Wind},
};

use super::WeatherProvider;

/// Weather from the two-stage weather.gov API: `points/<lat>,<lon>` gives the
/// zone descriptor, whose `properties.forecastHourly` URL gives the periods.
///
/// Zone descriptors are cached per ~10 km cell (coordinates rounded to one
/// decimal) for the process lifetime.
#[derive(Debug)]
pub struct NwsWeatherProvider {
    fetcher: Arc<dyn Fetcher>,
    points_url: String,
    points_cache: Mutex<HashMap<String, String>>,
}

impl NwsWeatherProvider {
    pub fn new(fetcher: Arc<dyn Fetcher>, points_url: impl Into<String>) -> Self {
        Self { fetcher, points_url: points_url.into(), points_cache: Mutex::default() }
    }

    async fn points_json(&self, location: Location) -> Result<String, WeatherLookupError> {
        let key = points_cache_key(location);

        if let Some(cached) = self.points_cache.lock().await.get(&key) {
            tracing::debug!(%key, "points cache hit");
            return Ok(cached.clone());
        }

        // The request uses the exact coordinates, the cache key the rounded ones.
        let url = format!("{}{},{}", self.points_url, location.latitude(), location.longitude());
        let live = self
            .fetcher
            .fetch(&url, &|status| {
                format!(
                    "Weather points API '{}' yielded status code: {}",
                    self.points_url,
                    status.as_u16()
                )
            })
            .await?;

        tracing::debug!(%key, "points cache miss, storing zone descriptor");
        self.points_cache.lock().await.insert(key, live.clone());
        Ok(live)
    }

    async fn forecast_json(&self, forecast_url: &str) -> Result<String, WeatherLookupError> {
        let body = self
            .fetcher
            .fetch(forecast_url, &|status| {
                format!(
                    "Weather forecast API '{}' yielded status code: {}",
                    forecast_url,
                    status.as_u16()
                )
            })
            .await?;
        Ok(body)
    }
}

#[async_trait]
impl WeatherProvider for NwsWeatherProvider {
    async fn for_location(&self, location: Location) -> Result<Weather, WeatherLookupError> {
        let points_json = self.points_json(location).await?;
        let forecast_url = forecast_hourly_url(&points_json)?;

        let forecast_json = self.forecast_json(&forecast_url).await?;
        let weather = current_period(&forecast_json)?;

        tracing::debug!(%location, forecast = %weather.forecast, "resolved weather");
        Ok(weather)
    }
}

/// `"<lat>,<lon>"` with both coordinates at one decimal place.
pub fn points_cache_key(location: Location) -> String {
    format!("{},{}", location.formatted_latitude(1), location.formatted_longitude(1))
}

#[derive(Debug, Deserialize)]
struct PointsResponse {
    properties: Option<PointsProperties>,
}

#[derive(Debug, Deserialize)]
struct PointsProperties {
    #[serde(rename = "forecastHourly")]
    forecast_hourly: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    properties: ForecastProperties,
}

#[derive(Debug, Deserialize)]
struct ForecastProperties {
    periods: Vec<ForecastPeriod>,
}

#[derive(Debug, Deserialize)]
struct ForecastPeriod {
    temperature: f64,
    #[serde(rename = "temperatureUnit")]
    temperature_unit: String,
    #[serde(rename = "windSpeed")]
    wind_speed: String,
    #[serde(rename = "windDirection")]
    wind_direction: String,
    #[serde(rename = "shortForecast")]
    short_forecast: String,
}

fn forecast_hourly_url(points_json: &str) -> Result<String, WeatherLookupError> {
    let parsed: PointsResponse = serde_json::from_str(points_json)?;

    parsed
        .properties
        .and_then(|p| p.forecast_hourly)
        .ok_or(WeatherLookupError::MissingField("properties.forecastHourly"))
}

fn current_period(forecast_json: &str) -> Result<Weather, WeatherLookupError> {
    let parsed: ForecastResponse = serde_json::from_str(forecast_json)?;

    let period = parsed
        .properties
        .periods
        .into_iter()
        .next()
        .ok_or(WeatherLookupError::NoPeriods)?;

    let temperature = Temperature::new(period.temperature, period.temperature_unit);
    let (speed, unit) = parse_wind_speed(&period.wind_speed)?;
    let wind = Wind::new(speed, unit, CompassDirection::from_code(&period.wind_direction));

    Ok(Weather::new(temperature, wind, period.short_forecast))
}

/// Splits `"<number> <unit>"` into its parts.
fn parse_wind_speed(raw: &str) -> Result<(f64, String), WeatherLookupError> {
    let invalid = || WeatherLookupError::InvalidWindSpeed(raw.to_string());

    let mut parts = raw.split_whitespace();
    let speed = parts.next().and_then(|s| s.parse().ok()).ok_or_else(invalid)?;
    let unit = parts.next().ok_or_else(invalid)?;

    Ok((speed, unit.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::FetchError, testing::StubFetcher};
    use reqwest::StatusCode;

    const POINTS: &str = "https://nws.test/points/";
    const HOURLY: &str = "https://nws.test/gridpoints/PQR/112,103/forecast/hourly";

    fn points_body() -> String {
        format!(r#"{{"properties": {{"gridId": "PQR", "forecastHourly": "{HOURLY}"}}}}"#)
    }

    const FORECAST_BODY: &str = r#"{
        "properties": {
            "periods": [
                {
                    "number": 1,
                    "temperature": 58,
                    "temperatureUnit": "F",
                    "windSpeed": "7 mph",
                    "windDirection": "NW",
                    "shortForecast": "Partly Cloudy"
                },
                {
                    "number": 2,
                    "temperature": 60,
                    "temperatureUnit": "F",
                    "windSpeed": "9 mph",
                    "windDirection": "W",
                    "shortForecast": "Sunny"
                }
            ]
        }
    }"#;

    fn stubbed() -> Arc<StubFetcher> {
        let fetcher = StubFetcher::new();
        fetcher.respond("https://nws.test/points/45.51,-122.68", &points_body());
        fetcher.respond("https://nws.test/points/45.53,-122.66", &points_body());
        fetcher.respond(HOURLY, FORECAST_BODY);
        fetcher
    }

    #[test]
    fn cache_key_rounds_to_one_decimal() {
        assert_eq!(points_cache_key(Location::new(45.51, -122.68)), "45.5,-122.7");
        assert_eq!(
            points_cache_key(Location::new(45.51, -122.68)),
            points_cache_key(Location::new(45.53, -122.66))
        );
        assert_ne!(
            points_cache_key(Location::new(45.51, -122.68)),
            points_cache_key(Location::new(45.71, -122.68))
        );
    }

    #[test]
    fn wind_speed_splits_number_and_unit() {
        assert_eq!(parse_wind_speed("12 mph").unwrap(), (12.0, "mph".to_string()));
        assert_eq!(parse_wind_speed("  3.5   km/h ").unwrap(), (3.5, "km/h".to_string()));
        assert!(parse_wind_speed("calm").is_err());
        assert!(parse_wind_speed("12").is_err());
    }

    #[tokio::test]
    async fn resolves_first_period() {
        let fetcher = stubbed();
        let provider = NwsWeatherProvider::new(fetcher.clone(), POINTS);

        let weather = provider
            .for_location(Location::new(45.51, -122.68))
            .await
            .expect("weather must resolve");

        assert_eq!(
            weather,
            Weather::new(
                Temperature::new(58.0, "F"),
                Wind::new(7.0, "mph", CompassDirection::NorthWest),
                "Partly Cloudy",
            )
        );
        assert_eq!(
            fetcher.requests(),
            vec!["https://nws.test/points/45.51,-122.68".to_string(), HOURLY.to_string()]
        );
    }

    #[tokio::test]
    async fn nearby_locations_share_one_points_lookup() {
        let fetcher = stubbed();
        let provider = NwsWeatherProvider::new(fetcher.clone(), POINTS);

        provider.for_location(Location::new(45.51, -122.68)).await.unwrap();
        provider.for_location(Location::new(45.53, -122.66)).await.unwrap();
        provider.for_location(Location::new(45.51, -122.68)).await.unwrap();

        assert_eq!(fetcher.request_count("https://nws.test/points/45.51,-122.68"), 1);
        assert_eq!(fetcher.request_count("https://nws.test/points/45.53,-122.66"), 0);
        assert_eq!(fetcher.request_count(HOURLY), 3);
    }

    #[tokio::test]
    async fn missing_forecast_hourly_is_an_error() {
        let fetcher = StubFetcher::new();
        fetcher.respond("https://nws.test/points/1.5,2.5", r#"{"properties": {"gridId": "X"}}"#);
        let provider = NwsWeatherProvider::new(fetcher, POINTS);

        let err = provider.for_location(Location::new(1.5, 2.5)).await.unwrap_err();
        assert!(matches!(err, WeatherLookupError::MissingField("properties.forecastHourly")));
    }

    #[tokio::test]
    async fn failed_points_lookup_is_not_cached() {
        let fetcher = StubFetcher::new();
        fetcher.fail("https://nws.test/points/1.5,2.5", StatusCode::INTERNAL_SERVER_ERROR);
        let provider = NwsWeatherProvider::new(fetcher.clone(), POINTS);

        let err = provider.for_location(Location::new(1.5, 2.5)).await.unwrap_err();
        match err {
            WeatherLookupError::Fetch(FetchError::Status(msg)) => {
                assert_eq!(msg, "Weather points API 'https://nws.test/points/' yielded status code: 500");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        provider.for_location(Location::new(1.5, 2.5)).await.unwrap_err();
        assert_eq!(fetcher.request_count("https://nws.test/points/1.5,2.5"), 2);
    }

    #[tokio::test]
    async fn empty_periods_is_an_error() {
        let fetcher = stubbed();
        fetcher.respond(HOURLY, r#"{"properties": {"periods": []}}"#);
        let provider = NwsWeatherProvider::new(fetcher, POINTS);

        let err = provider.for_location(Location::new(45.51, -122.68)).await.unwrap_err();
        assert!(matches!(err, WeatherLookupError::NoPeriods));
    }

    #[tokio::test]
    async fn malformed_forecast_is_an_error() {
        let fetcher = stubbed();
        fetcher.respond(HOURLY, "<html>maintenance</html>");
        let provider = NwsWeatherProvider::new(fetcher, POINTS);

        let err = provider.for_location(Location::new(45.51, -122.68)).await.unwrap_err();
        assert!(matches!(err, WeatherLookupError::Json(_)));
    }
}
