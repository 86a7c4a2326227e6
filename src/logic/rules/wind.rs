use super::Rule;
use crate::models::{Urgency, WeatherSnapshot};

/// Wind rule - strong wind dries outdoor soil and foliage quickly.
///
/// Conditions:
/// - Wind speed above 20 m/s
///
/// Urgency: Normal raised to Medium; any other value left as set by the
/// rules before this one.
pub struct WindRule;

const WINDY_MS: f64 = 20.0;

impl Rule for WindRule {
    fn id(&self) -> &'static str {
        "wind"
    }

    fn name(&self) -> &'static str {
        "Strong Wind"
    }

    fn evaluate(&self, weather: &WeatherSnapshot, urgency: &mut Urgency) -> Option<String> {
        let wind = weather.current.wind_speed_ms;
        if wind <= WINDY_MS {
            return None;
        }

        if *urgency == Urgency::Normal {
            *urgency = Urgency::Medium;
        }
        Some(format!(
            "Strong wind ({wind:.0} m/s). Outdoor plants dry out faster - \
             check soil more often."
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::rules::engine::test_support::neutral_snapshot;

    #[test]
    fn fires_above_threshold_and_raises_normal_to_medium() {
        let mut weather = neutral_snapshot();
        weather.current.wind_speed_ms = 25.0;

        let mut urgency = Urgency::Normal;
        let line = WindRule.evaluate(&weather, &mut urgency);
        assert!(line.unwrap().contains("Strong wind"));
        assert_eq!(urgency, Urgency::Medium);
    }

    #[test]
    fn leaves_low_urgency_untouched() {
        let mut weather = neutral_snapshot();
        weather.current.wind_speed_ms = 25.0;

        let mut urgency = Urgency::Low;
        let line = WindRule.evaluate(&weather, &mut urgency);
        assert!(line.is_some());
        assert_eq!(urgency, Urgency::Low);
    }
}
