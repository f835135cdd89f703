use crate::{
    error::FetchError,
    model::{CityName, Units, WeatherRecord, WeatherRequest},
    provider::WeatherProvider,
};

/// Where the most recent lookup stands.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    Idle,
    Loading { city: CityName },
    Ready(WeatherRecord),
    Failed { city: CityName, message: String },
}

impl FetchState {
    pub fn record(&self) -> Option<&WeatherRecord> {
        match self {
            FetchState::Ready(record) => Some(record),
            _ => None,
        }
    }
}

/// Drives one provider through submit -> loading -> ready/failed.
///
/// `submit` borrows the lookup mutably for the whole request, so at most one
/// call is ever in flight.
#[derive(Debug)]
pub struct WeatherLookup {
    provider: Box<dyn WeatherProvider>,
    units: Units,
    state: FetchState,
}

impl WeatherLookup {
    pub fn new(provider: Box<dyn WeatherProvider>, units: Units) -> Self {
        Self { provider, units, state: FetchState::Idle }
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    pub async fn submit(&mut self, city: CityName) -> &FetchState {
        let request = self.begin(city);
        let result = self.provider.current_weather(&request).await;
        self.finish(request.city, result)
    }

    fn begin(&mut self, city: CityName) -> WeatherRequest {
        self.state = FetchState::Loading { city: city.clone() };
        WeatherRequest { city, units: self.units }
    }

    fn finish(
        &mut self,
        city: CityName,
        result: Result<WeatherRecord, FetchError>,
    ) -> &FetchState {
        self.state = match result {
            Ok(record) => {
                tracing::debug!(?record, "weather lookup succeeded");
                FetchState::Ready(record)
            }
            Err(err) => {
                tracing::error!(city = %city, error = %err, "weather lookup failed");
                FetchState::Failed { city, message: err.user_message() }
            }
        };
        &self.state
    }
}
