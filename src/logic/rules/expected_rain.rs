use super::Rule;
use crate::models::{Urgency, WeatherSnapshot};

/// Expected rain rule - skip watering when rain is coming.
///
/// Conditions:
/// - Less than 2mm of rain in the last 24 hours, AND
/// - Any forecast day within 48 hours shows more than 3mm of precipitation
///
/// Urgency: lowered to Low only if still Normal. The recent-rain rule and
/// this one are mutually exclusive on the same precipitation reading: the
/// recent-rain rule fires above 5mm, this one only below 2mm, and in the
/// 2-5mm band neither fires.
pub struct ExpectedRainRule;

const DRY_LAST_24H_MM: f64 = 2.0;
const FORECAST_RAIN_MM: f64 = 3.0;
const LOOKAHEAD_HOURS: u32 = 48;

impl Rule for ExpectedRainRule {
    fn id(&self) -> &'static str {
        "expected_rain"
    }

    fn name(&self) -> &'static str {
        "Expected Rain"
    }

    fn evaluate(&self, weather: &WeatherSnapshot, urgency: &mut Urgency) -> Option<String> {
        if weather.precipitation.last_24h_mm >= DRY_LAST_24H_MM {
            return None;
        }

        let rain_coming = weather
            .forecast_within_hours(LOOKAHEAD_HOURS)
            .iter()
            .any(|day| day.precipitation_mm > FORECAST_RAIN_MM);
        if !rain_coming {
            return None;
        }

        if *urgency == Urgency::Normal {
            *urgency = Urgency::Low;
        }
        Some(
            "Rain is expected within the next 48 hours. \
             Skip watering outdoor plants and let the rain do the work."
                .to_string(),
        )
    }
}
