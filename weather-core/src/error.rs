use thiserror::Error;

/// Why a single weather lookup failed.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to reach the weather service: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("city '{city}' was not found")]
    CityNotFound { city: String },

    #[error("the weather service rejected the API key")]
    Unauthorized,

    #[error("weather request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to parse the weather response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// Short text suitable for showing in place of the report.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Transport(_) => {
                "Could not reach the weather service. Check your connection and try again."
                    .to_string()
            }
            FetchError::CityNotFound { city } => format!("No weather found for '{city}'."),
            FetchError::Unauthorized => {
                "The weather service rejected the API key. Check your configuration.".to_string()
            }
            FetchError::Status { status, .. } => {
                format!("The weather service answered with status {status}.")
            }
            FetchError::Decode(_) => "The weather service sent an unexpected response.".to_string(),
        }
    }
}
