use super::Rule;
use crate::models::{Urgency, WeatherSnapshot};

/// Low humidity rule - dry air stresses humidity-loving plants.
///
/// Conditions:
/// - Humidity below 40%
///
/// Urgency: raised to Medium unless already High.
pub struct LowHumidityRule;

const DRY_PERCENT: f64 = 40.0;

impl Rule for LowHumidityRule {
    fn id(&self) -> &'static str {
        "low_humidity"
    }

    fn name(&self) -> &'static str {
        "Low Humidity"
    }

    fn evaluate(&self, weather: &WeatherSnapshot, urgency: &mut Urgency) -> Option<String> {
        let humidity = weather.current.humidity_percent;
        if humidity >= DRY_PERCENT {
            return None;
        }

        if *urgency != Urgency::High {
            *urgency = Urgency::Medium;
        }
        Some(format!(
            "Low humidity ({humidity:.0}%). Mist humidity-loving plants \
             or use humidity trays."
        ))
    }
}
