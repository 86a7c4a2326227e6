use super::Rule;
use crate::models::{Urgency, WeatherSnapshot};

/// UV rule - intense sun scorches sensitive foliage.
///
/// Conditions:
/// - UV index above 8
///
/// Informational only: never changes urgency.
pub struct UvRule;

const UV_THRESHOLD: f64 = 8.0;

impl Rule for UvRule {
    fn id(&self) -> &'static str {
        "uv"
    }

    fn name(&self) -> &'static str {
        "High UV"
    }

    fn evaluate(&self, weather: &WeatherSnapshot, _urgency: &mut Urgency) -> Option<String> {
        let uv = weather.current.uv_index;
        if uv <= UV_THRESHOLD {
            return None;
        }

        Some(format!(
            "Very high UV index ({uv:.0}). Move sensitive plants out of \
             direct sun or provide shade."
        ))
    }
}
