//! Core library for the `weather-now` lookup tool.
//!
//! This crate defines:
//! - Configuration handling
//! - The OpenWeather client behind the [`WeatherProvider`] trait
//! - The fetch state machine driving one lookup at a time
//! - Presentation: emoji tables, threshold bands and the live clock
//!
//! It is used by `weather-now-cli`, but can also be reused by other front ends.

pub mod clock;
pub mod config;
pub mod error;
pub mod lookup;
pub mod model;
pub mod present;
pub mod provider;

pub use clock::{Clock, ClockReading};
pub use config::Config;
pub use error::FetchError;
pub use lookup::{FetchState, WeatherLookup};
pub use model::{CityName, InvalidCity, Units, WeatherRecord, WeatherRequest};
pub use present::Report;
pub use provider::{WeatherProvider, provider_from_config};
