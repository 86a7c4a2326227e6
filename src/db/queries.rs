use crate::db::Database;
use crate::error::Result;
use crate::models::{CachedLocation, UserProfile};
use rusqlite::{params, OptionalExtension};
use tracing::warn;

/// Store keys consumed by the location resolver.
pub const KEY_LAST_LOCATION: &str = "location.last_resolved";
pub const KEY_USER_PROFILE: &str = "user.profile";
pub const KEY_USER_EMAIL: &str = "user.email";

// Raw key-value access

impl Database {
    pub fn get_value(&self, key: &str) -> Result<Option<String>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT value FROM store WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
        })
    }

    pub fn set_value(&self, key: &str, value: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO store (key, value, updated_at)
                VALUES (?1, ?2, datetime('now'))
                ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at
                "#,
                params![key, value],
            )?;
            Ok(())
        })
    }

    pub fn delete_value(&self, key: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM store WHERE key = ?1", [key])?;
            Ok(())
        })
    }
}

// Typed wrappers for the resolver's keys. Undecodable stored JSON is
// treated as absent so a stale or corrupt entry cannot block resolution.

impl Database {
    pub fn cached_location(&self) -> Result<Option<CachedLocation>> {
        let Some(raw) = self.get_value(KEY_LAST_LOCATION)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(cached) => Ok(Some(cached)),
            Err(e) => {
                warn!(error = %e, "Discarding undecodable cached location");
                Ok(None)
            }
        }
    }

    pub fn set_cached_location(&self, cached: &CachedLocation) -> Result<()> {
        let raw = serde_json::to_string(cached)?;
        self.set_value(KEY_LAST_LOCATION, &raw)
    }

    pub fn cached_profile(&self) -> Result<Option<UserProfile>> {
        let Some(raw) = self.get_value(KEY_USER_PROFILE)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(profile) => Ok(Some(profile)),
            Err(e) => {
                warn!(error = %e, "Discarding undecodable cached profile");
                Ok(None)
            }
        }
    }

    pub fn set_cached_profile(&self, profile: &UserProfile) -> Result<()> {
        let raw = serde_json::to_string(profile)?;
        self.set_value(KEY_USER_PROFILE, &raw)
    }

    pub fn user_email(&self) -> Result<Option<String>> {
        self.get_value(KEY_USER_EMAIL)
    }

    pub fn set_user_email(&self, email: &str) -> Result<()> {
        self.set_value(KEY_USER_EMAIL, email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeoPoint;
    use chrono::Utc;

    #[test]
    fn set_and_get_value() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get_value("missing").unwrap().is_none());

        db.set_value("k", "v1").unwrap();
        assert_eq!(db.get_value("k").unwrap().as_deref(), Some("v1"));

        // Upsert overwrites
        db.set_value("k", "v2").unwrap();
        assert_eq!(db.get_value("k").unwrap().as_deref(), Some("v2"));

        db.delete_value("k").unwrap();
        assert!(db.get_value("k").unwrap().is_none());
    }

    #[test]
    fn cached_location_round_trip() {
        let db = Database::open_in_memory().unwrap();
        let cached = CachedLocation::new(
            GeoPoint::new(32.0853, 34.7818, "Tel Aviv", "IL").unwrap(),
            Utc::now(),
        );

        db.set_cached_location(&cached).unwrap();
        let read = db.cached_location().unwrap().unwrap();
        assert_eq!(read.point, cached.point);
        assert_eq!(read.cached_at, cached.cached_at);
    }

    #[test]
    fn corrupt_cached_location_reads_as_absent() {
        let db = Database::open_in_memory().unwrap();
        db.set_value(KEY_LAST_LOCATION, "not json").unwrap();
        assert!(db.cached_location().unwrap().is_none());
    }

    #[test]
    fn user_email_round_trip() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.user_email().unwrap().is_none());
        db.set_user_email("user@example.com").unwrap();
        assert_eq!(
            db.user_email().unwrap().as_deref(),
            Some("user@example.com")
        );
    }
}
