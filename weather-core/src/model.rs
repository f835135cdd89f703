use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A city name as typed by the user.
///
/// The only rule is that something was typed: surrounding whitespace is
/// trimmed and an empty result is rejected. Everything else is the
/// provider's business.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CityName(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidCity {
    #[error("city name must not be empty")]
    Empty,
}

impl CityName {
    pub fn parse(input: &str) -> Result<Self, InvalidCity> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(InvalidCity::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for CityName {
    type Error = InvalidCity;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

/// Unit system requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
    Standard,
}

impl Units {
    /// Value of the provider's `units` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
            Units::Standard => "standard",
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Metric, Units::Imperial, Units::Standard]
    }

    pub fn temperature_suffix(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
            Units::Standard => "K",
        }
    }

    pub fn speed_suffix(&self) -> &'static str {
        match self {
            Units::Metric | Units::Standard => "m/s",
            Units::Imperial => "mph",
        }
    }

    pub fn to_celsius(&self, value: f64) -> f64 {
        match self {
            Units::Metric => value,
            Units::Imperial => (value - 32.0) * 5.0 / 9.0,
            Units::Standard => value - 273.15,
        }
    }

    pub fn to_metres_per_second(&self, value: f64) -> f64 {
        match self {
            Units::Metric | Units::Standard => value,
            Units::Imperial => value * 0.44704,
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Units {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            "standard" => Ok(Units::Standard),
            _ => Err(anyhow::anyhow!(
                "Unknown units '{value}'. Supported units: metric, imperial, standard."
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeatherRequest {
    pub city: CityName,
    pub units: Units,
}

/// Current conditions for one city, in the units that were requested.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherRecord {
    pub city: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub wind_speed: f64,
    pub description: String,
    pub condition_code: Option<u16>,
    pub observed_at: Option<DateTime<Utc>>,
    pub units: Units,
}
