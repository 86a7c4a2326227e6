use super::Rule;
use crate::models::{Urgency, WeatherSnapshot};

/// Cold rule - most plants go dormant in the cold and need little water.
///
/// Conditions:
/// - Current temperature below 10°C
///
/// Urgency: forced to Low. Cold overrides the humidity and heat adjustments
/// evaluated before it in the fold; the rain rules run even earlier and end
/// at Low anyway.
pub struct ColdRule;

const COLD_C: i32 = 10;

impl Rule for ColdRule {
    fn id(&self) -> &'static str {
        "cold"
    }

    fn name(&self) -> &'static str {
        "Cold Conditions"
    }

    fn evaluate(&self, weather: &WeatherSnapshot, urgency: &mut Urgency) -> Option<String> {
        let temp = weather.current.temperature_c;
        if temp >= COLD_C {
            return None;
        }

        *urgency = Urgency::Low;
        Some(format!(
            "Cold conditions ({temp}°C). Most plants are dormant - \
             water sparingly."
        ))
    }
}
