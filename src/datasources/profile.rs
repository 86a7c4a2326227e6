use crate::error::Result;
use crate::models::{ProfileLocation, UserProfile};
use serde_json::Value;
use tracing::{debug, warn};

/// Client for the user-profile backend.
///
/// The backend nests the profile object and its location under varying keys
/// depending on endpoint version; everything accepted is normalized into the
/// canonical `UserProfile` here, before it can reach the cache.
pub struct UserProfileClient {
    client: reqwest::Client,
    base_url: String,
}

impl UserProfileClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch the profile for `email`.
    ///
    /// Non-2xx responses and malformed bodies mean "no profile available"
    /// (`Ok(None)`), not a fatal error; only transport failures surface as
    /// errors so the caller can log and continue its fallback chain.
    pub async fn fetch_profile(&self, email: &str) -> Result<Option<UserProfile>> {
        let url = format!("{}/users/{}", self.base_url.trim_end_matches('/'), email);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            debug!(status = %response.status(), "Profile backend returned non-success");
            return Ok(None);
        }

        let body: Value = match response.json().await {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "Profile backend returned malformed body");
                return Ok(None);
            }
        };

        Ok(normalize_profile(&body, email))
    }

    /// Probe backend reachability for `plantops check`.
    pub async fn test_connection(&self, email: &str) -> Result<bool> {
        let url = format!("{}/users/{}", self.base_url.trim_end_matches('/'), email);
        let response = self.client.get(&url).send().await?;
        Ok(response.status().is_success())
    }
}

/// Map any accepted backend payload shape into the canonical profile record.
///
/// Accepted shapes: the profile object at the top level or nested under
/// `user` or `data`; its location nested under `location` or as flat
/// `latitude`/`longitude` fields. Missing or non-numeric coordinates yield a
/// profile without a location.
fn normalize_profile(body: &Value, email: &str) -> Option<UserProfile> {
    let obj = body
        .get("user")
        .or_else(|| body.get("data"))
        .unwrap_or(body);

    if !obj.is_object() {
        return None;
    }

    let email = obj
        .get("email")
        .and_then(Value::as_str)
        .unwrap_or(email)
        .to_string();

    let name = obj
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_string);

    let location = normalize_location(obj);

    Some(UserProfile {
        email,
        name,
        location,
    })
}

fn normalize_location(obj: &Value) -> Option<ProfileLocation> {
    let loc = obj.get("location").unwrap_or(obj);

    let latitude = loc.get("latitude").and_then(Value::as_f64)?;
    let longitude = loc.get("longitude").and_then(Value::as_f64)?;

    Some(ProfileLocation {
        latitude,
        longitude,
        city: loc.get("city").and_then(Value::as_str).map(str::to_string),
        country: loc
            .get("country")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}
