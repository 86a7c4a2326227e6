use super::Rule;
use crate::models::{Urgency, WeatherSnapshot};

/// Heat rule - hot weather dries soil fast.
///
/// Conditions:
/// - Current temperature above 30°C
///
/// Urgency: raised to High unless a rain rule already set Low - rain takes
/// precedence over heat.
pub struct HeatRule;

const HOT_C: i32 = 30;

impl Rule for HeatRule {
    fn id(&self) -> &'static str {
        "heat"
    }

    fn name(&self) -> &'static str {
        "High Temperature"
    }

    fn evaluate(&self, weather: &WeatherSnapshot, urgency: &mut Urgency) -> Option<String> {
        let temp = weather.current.temperature_c;
        if temp <= HOT_C {
            return None;
        }

        if *urgency != Urgency::Low {
            *urgency = Urgency::High;
        }
        Some(format!(
            "High temperature ({temp}°C). Plants dry out faster - \
             water more frequently and check soil moisture daily."
        ))
    }
}
