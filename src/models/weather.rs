use super::location::GeoPoint;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Normalized weather data for one location, as returned by the backend
/// weather proxy after unit/field normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub current: CurrentConditions,
    pub forecast: Vec<ForecastDay>, // at most 5 days
    pub location: GeoPoint,
    pub fetched_at: DateTime<Utc>,
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
    pub precipitation: PrecipitationSummary,
    /// True only when the response was positively attributed to the real
    /// upstream provider. The advisory engine re-checks this before use.
    pub is_real_data: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_c: i32,
    pub humidity_percent: f64,
    pub description: String,
    pub icon_code: String,
    pub wind_speed_ms: f64,
    pub uv_index: f64,
    pub visibility_km: f64,
    pub feels_like_c: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub temp_max_c: i32,
    pub temp_min_c: i32,
    pub humidity_percent: f64,
    pub description: String,
    pub icon_code: String,
    pub precipitation_mm: f64,
    pub wind_speed_ms: f64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PrecipitationSummary {
    pub last_24h_mm: f64,
    pub next_24h_mm: f64,
}

impl WeatherSnapshot {
    /// Forecast days within the next N hours of the snapshot, counted in
    /// whole days from the first forecast entry.
    pub fn forecast_within_hours(&self, hours: u32) -> &[ForecastDay] {
        let days = (hours / 24).max(1) as usize;
        let end = days.min(self.forecast.len());
        &self.forecast[..end]
    }
}
