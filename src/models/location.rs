use crate::error::{PlantOpsError, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A single authoritative geographic point for the current user.
///
/// `city` and `country` are display-only and may hold placeholder strings
/// ("Unknown", "Current Location") when the resolving source lacks them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub country: String,
}

impl GeoPoint {
    /// Build a point, rejecting out-of-range coordinates.
    pub fn new(
        latitude: f64,
        longitude: f64,
        city: impl Into<String>,
        country: impl Into<String>,
    ) -> Result<Self> {
        if !Self::coords_in_range(latitude, longitude) {
            return Err(PlantOpsError::InvalidData(format!(
                "Coordinates out of range: lat {}, lon {}",
                latitude, longitude
            )));
        }
        Ok(Self {
            latitude,
            longitude,
            city: city.into(),
            country: country.into(),
        })
    }

    pub fn coords_in_range(latitude: f64, longitude: f64) -> bool {
        (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, {} ({:.4}, {:.4})",
            self.city, self.country, self.latitude, self.longitude
        )
    }
}

/// A resolved location persisted in the local store together with the time
/// it was resolved. Entries older than the resolver TTL are re-resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedLocation {
    pub point: GeoPoint,
    pub cached_at: DateTime<Utc>,
}

impl CachedLocation {
    pub fn new(point: GeoPoint, cached_at: DateTime<Utc>) -> Self {
        Self { point, cached_at }
    }

    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.cached_at < ttl
    }
}

/// Canonical user profile record.
///
/// The profile backend returns this under varying payload shapes; the fetch
/// boundary normalizes all of them into this struct before anything is
/// cached or inspected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<ProfileLocation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileLocation {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl UserProfile {
    /// The profile's location as a usable point, if it carries in-range
    /// numeric coordinates.
    pub fn geo_point(&self) -> Option<GeoPoint> {
        let loc = self.location.as_ref()?;
        if !loc.latitude.is_finite() || !loc.longitude.is_finite() {
            return None;
        }
        GeoPoint::new(
            loc.latitude,
            loc.longitude,
            loc.city.clone().unwrap_or_else(|| "Unknown".to_string()),
            loc.country.clone().unwrap_or_else(|| "Unknown".to_string()),
        )
        .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geo_point_rejects_out_of_range() {
        assert!(GeoPoint::new(91.0, 0.0, "x", "y").is_err());
        assert!(GeoPoint::new(-91.0, 0.0, "x", "y").is_err());
        assert!(GeoPoint::new(0.0, 181.0, "x", "y").is_err());
        assert!(GeoPoint::new(0.0, -181.0, "x", "y").is_err());
        assert!(GeoPoint::new(90.0, -180.0, "x", "y").is_ok());
    }

    #[test]
    fn cached_location_freshness() {
        let point = GeoPoint::new(32.08, 34.78, "Tel Aviv", "IL").unwrap();
        let cached_at = Utc::now();
        let cached = CachedLocation::new(point, cached_at);

        let ttl = Duration::hours(24);
        assert!(cached.is_fresh(cached_at + Duration::hours(23), ttl));
        assert!(!cached.is_fresh(cached_at + Duration::hours(24), ttl));
        assert!(!cached.is_fresh(cached_at + Duration::hours(25), ttl));
    }

    #[test]
    fn profile_geo_point_requires_valid_coords() {
        let mut profile = UserProfile {
            email: "user@example.com".into(),
            name: None,
            location: None,
        };
        assert!(profile.geo_point().is_none());

        profile.location = Some(ProfileLocation {
            latitude: 200.0,
            longitude: 0.0,
            city: None,
            country: None,
        });
        assert!(profile.geo_point().is_none());

        profile.location = Some(ProfileLocation {
            latitude: 51.5,
            longitude: -0.12,
            city: Some("London".into()),
            country: Some("GB".into()),
        });
        let point = profile.geo_point().unwrap();
        assert_eq!(point.city, "London");
    }
}
