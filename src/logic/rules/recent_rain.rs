use super::Rule;
use crate::models::{Urgency, WeatherSnapshot};

/// Recent rain rule - watering can wait after meaningful rainfall.
///
/// Conditions:
/// - More than 5mm of rain in the last 24 hours
///
/// Urgency: set to Low. This is the first rule in the fold, so heat and
/// humidity rules later in the order can see the rain took precedence.
pub struct RecentRainRule;

const RECENT_RAIN_MM: f64 = 5.0;

impl Rule for RecentRainRule {
    fn id(&self) -> &'static str {
        "recent_rain"
    }

    fn name(&self) -> &'static str {
        "Recent Rain"
    }

    fn evaluate(&self, weather: &WeatherSnapshot, urgency: &mut Urgency) -> Option<String> {
        let last_24h = weather.precipitation.last_24h_mm;
        if last_24h <= RECENT_RAIN_MM {
            return None;
        }

        *urgency = Urgency::Low;
        Some(format!(
            "Recent rainfall ({last_24h:.1}mm in the last 24h). \
             Delay watering outdoor plants for 1-2 days."
        ))
    }
}
