//! Error taxonomy shared by the providers and the command layer.

use std::{net::AddrParseError, num::ParseFloatError};

use thiserror::Error;

/// Failure of a single HTTP GET.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to '{url}' failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-success status, already formatted by the caller's status formatter.
    #[error("{0}")]
    Status(String),
}

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("external address lookup failed")]
    Fetch(#[from] FetchError),

    #[error("external address lookup returned '{raw}', which is not an IP address")]
    InvalidAddress {
        raw: String,
        #[source]
        source: AddrParseError,
    },
}

#[derive(Debug, Error)]
pub enum LocationLookupError {
    #[error("could not determine external address")]
    Network(#[from] NetworkError),

    #[error("location lookup request failed")]
    Fetch(#[from] FetchError),

    #[error("Location lookup API output format changed! Content could not be parsed.")]
    FormatChanged,

    #[error("location lookup returned an invalid coordinate '{raw}'")]
    InvalidCoordinate {
        raw: String,
        #[source]
        source: ParseFloatError,
    },
}

/// Any failure of either weather API stage. The zone and forecast stages are
/// only distinguishable through the wrapped cause.
#[derive(Debug, Error)]
pub enum WeatherLookupError {
    #[error("weather lookup request failed")]
    Fetch(#[from] FetchError),

    #[error("weather lookup returned malformed JSON")]
    Json(#[from] serde_json::Error),

    #[error("Weather lookup API did not yield '{0}' property")]
    MissingField(&'static str),

    #[error("weather forecast contained no periods")]
    NoPeriods,

    #[error("weather forecast wind speed '{0}' could not be parsed")]
    InvalidWindSpeed(String),
}

/// Errors raised while executing a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Malformed user input. The message is shown to the user as-is.
    #[error("{0}")]
    InvalidInput(String),

    #[error("console I/O failed")]
    Io(#[from] std::io::Error),
}

impl CommandError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CommandError::InvalidInput(message.into())
    }
}
