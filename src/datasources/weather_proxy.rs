use crate::error::{PlantOpsError, Result};
use crate::models::{
    CurrentConditions, ForecastDay, GeoPoint, PrecipitationSummary, WeatherSnapshot,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The only upstream provider the proxy is allowed to relay. Responses with
/// any other `source` tag are rejected rather than normalized.
const WEATHER_PROVIDER: &str = "openweathermap";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const FORECAST_DAYS: usize = 5;

/// Client for the backend weather proxy.
pub struct WeatherProxyClient {
    client: reqwest::Client,
    url: String,
}

#[derive(Debug, Serialize)]
struct WeatherQuery {
    latitude: f64,
    longitude: f64,
}

// Proxy response structures (provider units, pre-normalization)

#[derive(Debug, Deserialize)]
struct ProxyResponse {
    current: Option<ProxyCurrent>,
    #[serde(default)]
    daily: Vec<ProxyDay>,
    source: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProxyCurrent {
    sunrise: i64,
    sunset: i64,
    temp: f64,
    feels_like: f64,
    humidity: f64,
    #[serde(default)]
    uvi: f64,
    #[serde(default)]
    visibility: f64, // meters
    wind_speed: f64,
    #[serde(default)]
    weather: Vec<ProxyWeatherDesc>,
    #[serde(default)]
    rain: Option<ProxyRain>,
}

#[derive(Debug, Deserialize)]
struct ProxyWeatherDesc {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct ProxyRain {
    #[serde(rename = "1h", default)]
    one_hour: f64,
}

#[derive(Debug, Deserialize)]
struct ProxyDay {
    dt: i64,
    temp: ProxyDayTemp,
    humidity: f64,
    #[serde(default)]
    weather: Vec<ProxyWeatherDesc>,
    #[serde(default)]
    rain: f64,
    wind_speed: f64,
}

#[derive(Debug, Deserialize)]
struct ProxyDayTemp {
    min: f64,
    max: f64,
}

impl WeatherProxyClient {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Fetch and normalize weather for a point. Exactly one attempt; the
    /// caller decides whether a failure is retried.
    pub async fn fetch(&self, point: &GeoPoint, now: DateTime<Utc>) -> Result<WeatherSnapshot> {
        let query = WeatherQuery {
            latitude: point.latitude,
            longitude: point.longitude,
        };

        let response = self.client.post(&self.url).json(&query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(match status.as_u16() {
                503 => {
                    PlantOpsError::WeatherUnavailable("service temporarily unavailable".into())
                }
                500 => PlantOpsError::WeatherServiceMisconfigured,
                code => PlantOpsError::WeatherUnavailable(format!("upstream returned HTTP {code}")),
            });
        }

        let body: ProxyResponse = response.json().await.map_err(|e| {
            PlantOpsError::WeatherUnavailable(format!("invalid response: {e}"))
        })?;

        let (Some(current), Some(source)) = (body.current, body.source) else {
            return Err(PlantOpsError::WeatherUnavailable("invalid response".into()));
        };

        if source != WEATHER_PROVIDER {
            return Err(PlantOpsError::WeatherProviderUntrusted(source));
        }

        Ok(convert_response(current, body.daily, point.clone(), now))
    }

    /// Probe proxy reachability for `plantops check`.
    pub async fn test_connection(&self, point: &GeoPoint) -> Result<bool> {
        let query = WeatherQuery {
            latitude: point.latitude,
            longitude: point.longitude,
        };
        let response = self.client.post(&self.url).json(&query).send().await?;
        Ok(response.status().is_success())
    }
}

fn convert_response(
    current: ProxyCurrent,
    daily: Vec<ProxyDay>,
    location: GeoPoint,
    now: DateTime<Utc>,
) -> WeatherSnapshot {
    let last_24h_mm = current.rain.as_ref().map(|r| r.one_hour).unwrap_or(0.0);
    let next_24h_mm = daily.first().map(|d| d.rain).unwrap_or(0.0);

    let sunrise = DateTime::from_timestamp(current.sunrise, 0).unwrap_or(now);
    let sunset = DateTime::from_timestamp(current.sunset, 0).unwrap_or(now);

    let (description, icon_code) = primary_condition(&current.weather);

    let forecast = daily
        .into_iter()
        .take(FORECAST_DAYS)
        .map(|day| convert_day(day, now))
        .collect();

    WeatherSnapshot {
        current: CurrentConditions {
            temperature_c: current.temp.round() as i32,
            humidity_percent: current.humidity,
            description,
            icon_code,
            wind_speed_ms: current.wind_speed,
            uv_index: current.uvi,
            visibility_km: current.visibility / 1000.0,
            feels_like_c: current.feels_like.round() as i32,
        },
        forecast,
        location,
        fetched_at: now,
        sunrise,
        sunset,
        precipitation: PrecipitationSummary {
            last_24h_mm,
            next_24h_mm,
        },
        is_real_data: true,
    }
}

fn convert_day(day: ProxyDay, now: DateTime<Utc>) -> ForecastDay {
    let (description, icon_code) = primary_condition(&day.weather);

    ForecastDay {
        date: DateTime::from_timestamp(day.dt, 0).unwrap_or(now).date_naive(),
        temp_max_c: day.temp.max.round() as i32,
        temp_min_c: day.temp.min.round() as i32,
        humidity_percent: day.humidity,
        description,
        icon_code,
        precipitation_mm: day.rain,
        wind_speed_ms: day.wind_speed,
    }
}

fn primary_condition(weather: &[ProxyWeatherDesc]) -> (String, String) {
    weather
        .first()
        .map(|w| (w.description.clone(), w.icon.clone()))
        .unwrap_or_else(|| ("unknown".to_string(), String::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_response() -> ProxyResponse {
        let raw = r#"{
            "source": "openweathermap",
            "current": {
                "dt": 1750000000,
                "sunrise": 1749960000,
                "sunset": 1750010000,
                "temp": 27.6,
                "feels_like": 29.2,
                "humidity": 58,
                "uvi": 7.4,
                "visibility": 10000,
                "wind_speed": 4.2,
                "weather": [{"description": "scattered clouds", "icon": "03d"}],
                "rain": {"1h": 1.2}
            },
            "daily": [
                {"dt": 1750000000, "temp": {"min": 18.2, "max": 28.4}, "humidity": 60,
                 "weather": [{"description": "light rain", "icon": "10d"}],
                 "rain": 4.5, "wind_speed": 5.0},
                {"dt": 1750086400, "temp": {"min": 17.0, "max": 26.0}, "humidity": 65,
                 "weather": [{"description": "clear sky", "icon": "01d"}],
                 "wind_speed": 3.0},
                {"dt": 1750172800, "temp": {"min": 16.0, "max": 25.0}, "humidity": 55,
                 "weather": [], "rain": 0.0, "wind_speed": 2.0},
                {"dt": 1750259200, "temp": {"min": 16.0, "max": 25.0}, "humidity": 55,
                 "weather": [], "rain": 0.0, "wind_speed": 2.0},
                {"dt": 1750345600, "temp": {"min": 16.0, "max": 25.0}, "humidity": 55,
                 "weather": [], "rain": 0.0, "wind_speed": 2.0},
                {"dt": 1750432000, "temp": {"min": 16.0, "max": 25.0}, "humidity": 55,
                 "weather": [], "rain": 0.0, "wind_speed": 2.0},
                {"dt": 1750518400, "temp": {"min": 16.0, "max": 25.0}, "humidity": 55,
                 "weather": [], "rain": 0.0, "wind_speed": 2.0}
            ]
        }"#;
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn converts_and_normalizes_units() {
        let response = sample_response();
        let point = GeoPoint::new(32.0853, 34.7818, "Tel Aviv", "IL").unwrap();
        let now = Utc::now();

        let snapshot = convert_response(
            response.current.unwrap(),
            response.daily,
            point.clone(),
            now,
        );

        // Temperatures round to integer degrees
        assert_eq!(snapshot.current.temperature_c, 28);
        assert_eq!(snapshot.current.feels_like_c, 29);
        // Visibility meters -> km
        assert!((snapshot.current.visibility_km - 10.0).abs() < f64::EPSILON);
        // Forecast truncated to five days
        assert_eq!(snapshot.forecast.len(), 5);
        assert_eq!(snapshot.forecast[0].temp_max_c, 28);
        // Precipitation summary: current rain + first forecast day
        assert!((snapshot.precipitation.last_24h_mm - 1.2).abs() < f64::EPSILON);
        assert!((snapshot.precipitation.next_24h_mm - 4.5).abs() < f64::EPSILON);
        assert!(snapshot.is_real_data);
        assert_eq!(snapshot.location, point);
        assert_eq!(snapshot.fetched_at, now);
    }

    #[test]
    fn missing_rain_blocks_default_to_zero() {
        let raw = r#"{
            "source": "openweathermap",
            "current": {
                "sunrise": 1, "sunset": 2, "temp": 20.0, "feels_like": 20.0,
                "humidity": 50, "wind_speed": 1.0
            },
            "daily": []
        }"#;
        let response: ProxyResponse = serde_json::from_str(raw).unwrap();
        let point = GeoPoint::new(0.0, 0.0, "x", "y").unwrap();
        let snapshot =
            convert_response(response.current.unwrap(), response.daily, point, Utc::now());

        assert!((snapshot.precipitation.last_24h_mm).abs() < f64::EPSILON);
        assert!((snapshot.precipitation.next_24h_mm).abs() < f64::EPSILON);
        assert_eq!(snapshot.current.description, "unknown");
        assert!(snapshot.forecast.is_empty());
    }
}
