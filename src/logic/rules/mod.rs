pub mod cold;
pub mod engine;
pub mod expected_rain;
pub mod heat;
pub mod high_humidity;
pub mod low_humidity;
pub mod recent_rain;
pub mod uv;
pub mod wind;

pub use engine::AdvisoryEngine;

use crate::models::{Urgency, WeatherSnapshot};

/// Trait for watering advisory rules.
///
/// Rules run as a strict left-to-right fold: each sees the urgency set by
/// the rules before it and may only adjust it the way its contract states.
/// Evaluation order is fixed by the engine, not by the rules themselves.
pub trait Rule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Evaluate the rule, returning an advice line if conditions are met.
    /// May adjust the urgency threaded through the fold.
    fn evaluate(&self, weather: &WeatherSnapshot, urgency: &mut Urgency) -> Option<String>;
}
