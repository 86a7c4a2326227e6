use crate::datasources::WeatherProxyClient;
use crate::error::Result;
use crate::logic::cache::{SnapshotKey, WeatherCache};
use crate::logic::clock::{Clock, SystemClock};
use crate::models::{GeoPoint, WeatherSnapshot};
use chrono::Duration;
use tracing::debug;

const WEATHER_TTL_MINUTES: i64 = 30;

/// Weather fetcher: rounded-coordinate TTL cache in front of the backend
/// proxy. One attempt per miss; failures propagate to the caller unretried.
pub struct WeatherService {
    proxy: WeatherProxyClient,
    cache: WeatherCache,
    clock: Box<dyn Clock>,
}

impl WeatherService {
    pub fn new(proxy: WeatherProxyClient) -> Self {
        Self::with_clock(proxy, Box::new(SystemClock))
    }

    pub fn with_clock(proxy: WeatherProxyClient, clock: Box<dyn Clock>) -> Self {
        Self {
            proxy,
            cache: WeatherCache::new(Duration::minutes(WEATHER_TTL_MINUTES)),
            clock,
        }
    }

    pub async fn get_weather(&mut self, point: &GeoPoint) -> Result<WeatherSnapshot> {
        let key = SnapshotKey::for_point(point);
        let now = self.clock.now();

        if let Some(snapshot) = self.cache.get(&key, now) {
            debug!(lat = point.latitude, lon = point.longitude, "Weather cache hit");
            return Ok(snapshot.clone());
        }

        let snapshot = self.proxy.fetch(point, now).await?;
        self.cache.insert(key, snapshot.clone(), now);
        Ok(snapshot)
    }
}
