use super::Rule;
use crate::models::{Urgency, WeatherSnapshot};

/// High humidity rule - damp air slows soil drying.
///
/// Conditions:
/// - Humidity above 80% with temperature below 25°C
///
/// Urgency: lowered to Low only if still Normal.
pub struct HighHumidityRule;

const HUMID_PERCENT: f64 = 80.0;
const MILD_C: i32 = 25;

impl Rule for HighHumidityRule {
    fn id(&self) -> &'static str {
        "high_humidity"
    }

    fn name(&self) -> &'static str {
        "High Humidity"
    }

    fn evaluate(&self, weather: &WeatherSnapshot, urgency: &mut Urgency) -> Option<String> {
        let humidity = weather.current.humidity_percent;
        if humidity <= HUMID_PERCENT || weather.current.temperature_c >= MILD_C {
            return None;
        }

        if *urgency == Urgency::Normal {
            *urgency = Urgency::Low;
        }
        Some(format!(
            "High humidity ({humidity:.0}%). Soil dries slowly - \
             reduce watering frequency slightly."
        ))
    }
}
