use crate::datasources::{DeviceLocationError, DeviceLocator, UserProfileClient};
use crate::db::Database;
use crate::error::{PlantOpsError, Result};
use crate::logic::clock::{Clock, SystemClock};
use crate::models::{CachedLocation, GeoPoint};
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

const LOCATION_TTL_HOURS: i64 = 24;

/// Resolves one authoritative location for the current user.
///
/// Sources are tried in strict priority order - fresh local cache, cached
/// profile, backend profile fetch, device fix - and the first usable result
/// wins. A later source never runs when an earlier one succeeded, and no
/// default location is ever substituted: fabricated coordinates would
/// silently corrupt the downstream advice.
pub struct LocationResolver<D> {
    db: Database,
    profiles: UserProfileClient,
    device: D,
    clock: Box<dyn Clock>,
}

impl<D: DeviceLocator> LocationResolver<D> {
    pub fn new(db: Database, profiles: UserProfileClient, device: D) -> Self {
        Self::with_clock(db, profiles, device, Box::new(SystemClock))
    }

    pub fn with_clock(
        db: Database,
        profiles: UserProfileClient,
        device: D,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            db,
            profiles,
            device,
            clock,
        }
    }

    pub async fn resolve(&self) -> Result<GeoPoint> {
        let now = self.clock.now();

        // 1. Fresh local cache. Hits never rewrite the cache entry.
        if let Some(cached) = self.db.cached_location()? {
            let in_range =
                GeoPoint::coords_in_range(cached.point.latitude, cached.point.longitude);
            if in_range && cached.is_fresh(now, Duration::hours(LOCATION_TTL_HOURS)) {
                debug!(point = %cached.point, "Using cached location");
                return Ok(cached.point);
            }
            debug!("Cached location expired or unusable");
        }

        // 2. Cached user profile with usable coordinates.
        if let Some(profile) = self.db.cached_profile()? {
            if let Some(point) = profile.geo_point() {
                debug!(point = %point, "Resolved location from cached profile");
                self.store_resolved(&point, now)?;
                return Ok(point);
            }
        }

        // 3. Backend profile fetch, written through to the local cache so
        //    other consumers see the refreshed profile.
        match self.db.user_email()? {
            Some(email) => match self.profiles.fetch_profile(&email).await {
                Ok(Some(profile)) => {
                    self.db.set_cached_profile(&profile)?;
                    if let Some(point) = profile.geo_point() {
                        debug!(point = %point, "Resolved location from backend profile");
                        self.store_resolved(&point, now)?;
                        return Ok(point);
                    }
                    debug!("Backend profile has no usable location");
                }
                Ok(None) => debug!("No profile available from backend"),
                Err(e) => warn!(error = %e, "Profile backend fetch failed"),
            },
            None => debug!("No user email stored; skipping backend profile fetch"),
        }

        // 4. Device fix. Failures continue the chain, but the cause is
        //    surfaced so "no permission" and "no fix" stay distinguishable.
        match self.device.locate().await {
            Ok((latitude, longitude)) => {
                match GeoPoint::new(latitude, longitude, "Current Location", "Unknown") {
                    Ok(point) => {
                        debug!(point = %point, "Resolved location from device");
                        self.store_resolved(&point, now)?;
                        return Ok(point);
                    }
                    Err(e) => warn!(error = %e, "Device fix out of range"),
                }
            }
            Err(DeviceLocationError::PermissionDenied) => {
                warn!("Device location permission denied")
            }
            Err(DeviceLocationError::Unavailable) => warn!("Device location unavailable"),
        }

        Err(PlantOpsError::NoLocationAvailable)
    }

    fn store_resolved(&self, point: &GeoPoint, now: DateTime<Utc>) -> Result<()> {
        self.db
            .set_cached_location(&CachedLocation::new(point.clone(), now))
    }
}
