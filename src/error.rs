use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlantOpsError {
    #[error("No location available: every location source was exhausted")]
    NoLocationAvailable,

    #[error("Weather unavailable: {0}")]
    WeatherUnavailable(String),

    #[error("Weather service misconfigured: upstream reported a server-side error")]
    WeatherServiceMisconfigured,

    #[error("Weather provider untrusted: response source was '{0}'")]
    WeatherProviderUntrusted(String),

    #[error("Invalid weather input: snapshot is not flagged as real provider data")]
    InvalidWeatherInput,

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, PlantOpsError>;
