use std::{
    fmt,
    hash::{Hash, Hasher},
};

/// Latitude/longitude pair.
///
/// Equality and hashing compare the exact bit patterns of both coordinates,
/// so `Location` can be used as a map key.
#[derive(Debug, Clone, Copy)]
pub struct Location {
    latitude: f64,
    longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Latitude rendered with a fixed number of decimal places.
    pub fn formatted_latitude(&self, decimals: usize) -> String {
        format!("{:.*}", decimals, self.latitude)
    }

    /// Longitude rendered with a fixed number of decimal places.
    pub fn formatted_longitude(&self, decimals: usize) -> String {
        format!("{:.*}", decimals, self.longitude)
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.latitude.to_bits() == other.latitude.to_bits()
            && self.longitude.to_bits() == other.longitude.to_bits()
    }
}

impl Eq for Location {}

impl Hash for Location {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.latitude.to_bits().hash(state);
        self.longitude.to_bits().hash(state);
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}, {:?}", self.latitude, self.longitude)
    }
}

/// Temperature in the unit reported by the forecast API ("F" or "C").
#[derive(Debug, Clone, PartialEq)]
pub struct Temperature {
    pub degrees: f64,
    pub unit: String,
}

impl Temperature {
    pub fn new(degrees: f64, unit: impl Into<String>) -> Self {
        Self { degrees, unit: unit.into() }
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}'{}", self.degrees, self.unit)
    }
}

/// The eight principal compass points, plus anything we could not recognise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompassDirection {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
    Unknown,
}

impl CompassDirection {
    /// Maps an abbreviation such as `"NE"` to a direction. Never fails.
    pub fn from_code(code: &str) -> Self {
        match code {
            "N" => CompassDirection::North,
            "NE" => CompassDirection::NorthEast,
            "E" => CompassDirection::East,
            "SE" => CompassDirection::SouthEast,
            "S" => CompassDirection::South,
            "SW" => CompassDirection::SouthWest,
            "W" => CompassDirection::West,
            "NW" => CompassDirection::NorthWest,
            _ => CompassDirection::Unknown,
        }
    }

    pub fn verbose(&self) -> &'static str {
        match self {
            CompassDirection::North => "North",
            CompassDirection::NorthEast => "North-east",
            CompassDirection::East => "East",
            CompassDirection::SouthEast => "South-east",
            CompassDirection::South => "South",
            CompassDirection::SouthWest => "South-west",
            CompassDirection::West => "West",
            CompassDirection::NorthWest => "North-west",
            CompassDirection::Unknown => "?",
        }
    }
}

impl fmt::Display for CompassDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verbose())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Wind {
    pub speed: f64,
    /// e.g. "mph" or "km/h".
    pub unit: String,
    pub direction: CompassDirection,
}

impl Wind {
    pub fn new(speed: f64, unit: impl Into<String>, direction: CompassDirection) -> Self {
        Self { speed, unit: unit.into(), direction }
    }
}

impl fmt::Display for Wind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.2}{}", self.direction, self.speed, self.unit)
    }
}

/// Current weather summary for a single forecast period.
#[derive(Debug, Clone, PartialEq)]
pub struct Weather {
    pub temperature: Temperature,
    pub wind: Wind,
    pub forecast: String,
}

impl Weather {
    pub fn new(temperature: Temperature, wind: Wind, forecast: impl Into<String>) -> Self {
        Self { temperature, wind, forecast: forecast.into() }
    }

    /// The three-line report printed by the weather commands.
    pub fn report(&self) -> String {
        format!(
            "Temperature: {}\nForecast:    {}\nWind:        {}",
            self.temperature, self.forecast, self.wind
        )
    }
}
