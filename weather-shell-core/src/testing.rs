//! Test doubles shared by the unit tests.

use std::{
    collections::HashMap,
    io::Write,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::{
    error::{FetchError, LocationLookupError, WeatherLookupError},
    http::{Fetcher, StatusMessage},
    model::{Location, Weather},
    provider::{LocationProvider, WeatherProvider},
};

/// Serves canned bodies by URL and records every requested URL.
/// Unknown URLs answer with a 404 through the caller's formatter.
#[derive(Debug, Default)]
pub struct StubFetcher {
    responses: Mutex<HashMap<String, Result<String, StatusCode>>>,
    requests: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, url: &str, body: &str) {
        self.responses.lock().unwrap().insert(url.to_string(), Ok(body.to_string()));
    }

    pub fn fail(&self, url: &str, status: StatusCode) {
        self.responses.lock().unwrap().insert(url.to_string(), Err(status));
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self, url: &str) -> usize {
        self.requests.lock().unwrap().iter().filter(|r| *r == url).count()
    }
}

#[async_trait]
impl Fetcher for StubFetcher {
    async fn fetch(&self, url: &str, bad_status: StatusMessage<'_>) -> Result<String, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());
        match self.responses.lock().unwrap().get(url) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(status)) => Err(FetchError::Status(bad_status(*status))),
            None => Err(FetchError::Status(bad_status(StatusCode::NOT_FOUND))),
        }
    }
}

/// Location provider returning a fixed answer.
#[derive(Debug)]
pub struct FixedLocation(pub Option<Location>);

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn current_location(&self) -> Result<Location, LocationLookupError> {
        self.0.ok_or(LocationLookupError::FormatChanged)
    }
}

/// Weather provider returning a fixed answer and recording queried locations.
#[derive(Debug, Default)]
pub struct FixedWeather {
    weather: Option<Weather>,
    queries: Mutex<Vec<Location>>,
}

impl FixedWeather {
    pub fn returning(weather: Weather) -> Arc<Self> {
        Arc::new(Self { weather: Some(weather), queries: Mutex::default() })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn queries(&self) -> Vec<Location> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherProvider for FixedWeather {
    async fn for_location(&self, location: Location) -> Result<Weather, WeatherLookupError> {
        self.queries.lock().unwrap().push(location);
        self.weather.clone().ok_or(WeatherLookupError::NoPeriods)
    }
}

/// Captures what a command writes to its output and error streams.
#[derive(Debug, Default)]
pub struct Captured {
    pub out: Vec<u8>,
    pub err: Vec<u8>,
}

impl Captured {
    pub fn out(&self) -> String {
        String::from_utf8_lossy(&self.out).into_owned()
    }

    pub fn err(&self) -> String {
        String::from_utf8_lossy(&self.err).into_owned()
    }
}

/// Log lines emitted at `WARN` and above while the returned guard is alive.
/// The subscriber is thread-local, so use it from a current-thread runtime.
pub fn capture_warnings() -> (LogBuffer, tracing::subscriber::DefaultGuard) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    (buffer, tracing::subscriber::set_default(subscriber))
}

#[derive(Debug, Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
