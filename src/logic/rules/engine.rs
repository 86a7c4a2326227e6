use super::{
    cold::ColdRule, expected_rain::ExpectedRainRule, heat::HeatRule,
    high_humidity::HighHumidityRule, low_humidity::LowHumidityRule, recent_rain::RecentRainRule,
    uv::UvRule, wind::WindRule, Rule,
};
use crate::error::{PlantOpsError, Result};
use crate::logic::clock::{Clock, SystemClock};
use crate::models::{AdviceDetails, PlantDueEntry, Urgency, WateringAdvice, WeatherSnapshot};

const DEFAULT_LINE: &str =
    "Weather conditions are moderate. Follow your plants' normal watering schedule.";

/// Watering advisory engine.
///
/// A deterministic fold over a fixed rule order: each rule sees the urgency
/// set by the rules before it, so rain precedence and cold overrides come
/// out of the ordering rather than out of cross-rule special cases. Given
/// the same snapshot and plant list the output is identical, line order
/// included.
pub struct AdvisoryEngine {
    rules: Vec<Box<dyn Rule>>,
    clock: Box<dyn Clock>,
}

impl AdvisoryEngine {
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        // Evaluation order is a contract: rain before heat, cold after
        // humidity, UV last.
        let rules: Vec<Box<dyn Rule>> = vec![
            Box::new(RecentRainRule),
            Box::new(ExpectedRainRule),
            Box::new(HeatRule),
            Box::new(HighHumidityRule),
            Box::new(LowHumidityRule),
            Box::new(ColdRule),
            Box::new(WindRule),
            Box::new(UvRule),
        ];

        Self { rules, clock }
    }

    pub fn generate_advice(
        &self,
        weather: &WeatherSnapshot,
        plants: &[PlantDueEntry],
    ) -> Result<WateringAdvice> {
        // Never trust the upstream flag blindly - re-verify before advising.
        if !weather.is_real_data {
            return Err(PlantOpsError::InvalidWeatherInput);
        }

        let mut urgency = Urgency::Normal;
        let mut lines = Vec::new();

        for rule in &self.rules {
            if let Some(line) = rule.evaluate(weather, &mut urgency) {
                tracing::debug!(rule = rule.id(), urgency = %urgency, "Advice rule fired");
                lines.push(line);
            }
        }

        if lines.is_empty() {
            lines.push(DEFAULT_LINE.to_string());
        }

        let today = self.clock.now().date_naive();
        let due = plants.iter().filter(|p| p.is_due(today)).count();
        if due > 0 {
            lines.push(if due == 1 {
                "1 plant needs watering today.".to_string()
            } else {
                format!("{due} plants need watering today.")
            });
        }

        Ok(WateringAdvice {
            general: lines.join("\n\n"),
            urgency,
            icon: urgency.icon(),
            color: urgency.color(),
            details: AdviceDetails {
                temperature_c: weather.current.temperature_c,
                humidity_percent: weather.current.humidity_percent,
                precipitation_mm: weather.precipitation.last_24h_mm,
                wind_speed_ms: weather.current.wind_speed_ms,
                uv_index: weather.current.uv_index,
            },
            plants_needing_water: due,
            is_real_data: weather.is_real_data,
        })
    }

    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id(), r.name())).collect()
    }
}

impl Default for AdvisoryEngine {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::neutral_snapshot;
    use super::*;
    use crate::logic::clock::FixedClock;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn engine_at(date: NaiveDate) -> AdvisoryEngine {
        let now = Utc
            .from_utc_datetime(&date.and_hms_opt(12, 0, 0).unwrap());
        AdvisoryEngine::with_clock(Box::new(FixedClock::new(now)))
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn plant(id: i64, date: NaiveDate) -> PlantDueEntry {
        PlantDueEntry {
            id,
            next_water_date: date,
        }
    }

    #[test]
    fn rejects_snapshot_not_flagged_real() {
        let mut weather = neutral_snapshot();
        weather.is_real_data = false;

        let err = engine_at(today())
            .generate_advice(&weather, &[])
            .unwrap_err();
        assert!(matches!(err, PlantOpsError::InvalidWeatherInput));
    }

    #[test]
    fn neutral_weather_yields_single_default_line() {
        let advice = engine_at(today())
            .generate_advice(&neutral_snapshot(), &[])
            .unwrap();

        assert_eq!(advice.general, DEFAULT_LINE);
        assert_eq!(advice.urgency, Urgency::Normal);
        assert_eq!(advice.plants_needing_water, 0);
        assert!(advice.is_real_data);
    }

    #[test]
    fn recent_rain_alone_is_one_line_low() {
        let mut weather = neutral_snapshot();
        weather.precipitation.last_24h_mm = 6.0;

        let advice = engine_at(today()).generate_advice(&weather, &[]).unwrap();

        assert_eq!(advice.general.split("\n\n").count(), 1);
        assert!(advice.general.contains("Delay watering"));
        assert_eq!(advice.urgency, Urgency::Low);
        assert_eq!(advice.icon, Urgency::Low.icon());
        assert_eq!(advice.color, Urgency::Low.color());
    }

    #[test]
    fn hot_dry_high_uv_with_due_plant() {
        let mut weather = neutral_snapshot();
        weather.current.temperature_c = 32;
        weather.current.humidity_percent = 35.0;
        weather.current.wind_speed_ms = 5.0;
        weather.current.uv_index = 9.0;

        let advice = engine_at(today())
            .generate_advice(&weather, &[plant(1, today())])
            .unwrap();

        let blocks: Vec<&str> = advice.general.split("\n\n").collect();
        assert_eq!(blocks.len(), 4);
        assert!(blocks[0].contains("High temperature"));
        assert!(blocks[1].contains("Low humidity"));
        assert!(blocks[2].contains("UV index"));
        assert_eq!(blocks[3], "1 plant needs watering today.");
        assert_eq!(advice.urgency, Urgency::High);
        assert_eq!(advice.plants_needing_water, 1);
    }

    #[test]
    fn rain_takes_precedence_over_heat() {
        let mut weather = neutral_snapshot();
        weather.current.temperature_c = 35;
        weather.precipitation.last_24h_mm = 8.0;

        let advice = engine_at(today()).generate_advice(&weather, &[]).unwrap();

        // Both lines appear but the rain rule owns the urgency.
        assert!(advice.general.contains("Delay watering"));
        assert!(advice.general.contains("High temperature"));
        assert_eq!(advice.urgency, Urgency::Low);
    }

    #[test]
    fn cold_forces_low_over_dry_air() {
        let mut weather = neutral_snapshot();
        weather.current.temperature_c = 4;
        weather.current.humidity_percent = 30.0;

        let advice = engine_at(today()).generate_advice(&weather, &[]).unwrap();

        assert!(advice.general.contains("Mist humidity-loving plants"));
        assert!(advice.general.contains("dormant"));
        assert_eq!(advice.urgency, Urgency::Low);
    }

    #[test]
    fn wind_raises_normal_to_medium() {
        let mut weather = neutral_snapshot();
        weather.current.wind_speed_ms = 22.0;

        let advice = engine_at(today()).generate_advice(&weather, &[]).unwrap();
        assert_eq!(advice.urgency, Urgency::Medium);
    }

    #[test]
    fn counts_due_and_overdue_plants() {
        let weather = neutral_snapshot();
        let plants = vec![
            plant(1, today()),                                        // due today
            plant(2, today() - chrono::Duration::days(3)),            // overdue
            plant(3, today() + chrono::Duration::days(2)),            // not yet
        ];

        let advice = engine_at(today())
            .generate_advice(&weather, &plants)
            .unwrap();

        assert_eq!(advice.plants_needing_water, 2);
        assert!(advice.general.ends_with("2 plants need watering today."));
    }

    #[test]
    fn identical_inputs_yield_identical_output() {
        let mut weather = neutral_snapshot();
        weather.current.temperature_c = 32;
        weather.current.humidity_percent = 35.0;
        weather.current.uv_index = 9.0;
        let plants = vec![plant(1, today())];

        let engine = engine_at(today());
        let a = engine.generate_advice(&weather, &plants).unwrap();
        let b = engine.generate_advice(&weather, &plants).unwrap();

        assert_eq!(a.general, b.general);
        assert_eq!(a.urgency, b.urgency);
        assert_eq!(a.plants_needing_water, b.plants_needing_water);
    }

    #[test]
    fn details_echo_raw_weather_fields() {
        let mut weather = neutral_snapshot();
        weather.current.temperature_c = 27;
        weather.current.humidity_percent = 61.0;
        weather.current.wind_speed_ms = 4.5;
        weather.current.uv_index = 6.2;
        weather.precipitation.last_24h_mm = 1.1;

        let advice = engine_at(today()).generate_advice(&weather, &[]).unwrap();
        assert_eq!(advice.details.temperature_c, 27);
        assert!((advice.details.humidity_percent - 61.0).abs() < f64::EPSILON);
        assert!((advice.details.wind_speed_ms - 4.5).abs() < f64::EPSILON);
        assert!((advice.details.uv_index - 6.2).abs() < f64::EPSILON);
        assert!((advice.details.precipitation_mm - 1.1).abs() < f64::EPSILON);
    }

    #[test]
    fn lists_rules_in_evaluation_order() {
        let ids: Vec<&str> = engine_at(today())
            .list_rules()
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(
            ids,
            vec![
                "recent_rain",
                "expected_rain",
                "heat",
                "high_humidity",
                "low_humidity",
                "cold",
                "wind",
                "uv"
            ]
        );
    }
}
