use crate::models::{GeoPoint, WeatherSnapshot};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

/// Cache key: coordinates rounded to 4 decimal places (~11m), stored as
/// scaled integers so the key is `Eq + Hash`. Collapses repeated calls for
/// the same user without conflating nearby-but-distinct points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SnapshotKey {
    lat_e4: i64,
    lon_e4: i64,
}

impl SnapshotKey {
    pub fn for_point(point: &GeoPoint) -> Self {
        Self {
            lat_e4: (point.latitude * 10_000.0).round() as i64,
            lon_e4: (point.longitude * 10_000.0).round() as i64,
        }
    }
}

struct CacheEntry {
    snapshot: WeatherSnapshot,
    stored_at: DateTime<Utc>,
}

/// In-process TTL cache for normalized weather snapshots. Lost on restart
/// by design; only the location cache persists.
pub struct WeatherCache {
    ttl: Duration,
    entries: HashMap<SnapshotKey, CacheEntry>,
}

impl WeatherCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// A stored snapshot for `key`, if it is still within the TTL.
    pub fn get(&self, key: &SnapshotKey, now: DateTime<Utc>) -> Option<&WeatherSnapshot> {
        let entry = self.entries.get(key)?;
        if now - entry.stored_at < self.ttl {
            Some(&entry.snapshot)
        } else {
            None
        }
    }

    pub fn insert(&mut self, key: SnapshotKey, snapshot: WeatherSnapshot, now: DateTime<Utc>) {
        self.entries.insert(
            key,
            CacheEntry {
                snapshot,
                stored_at: now,
            },
        );
    }
}
