use serde::{Deserialize, Serialize};

/// How urgently the plant collection needs attention.
///
/// `Low` signals conditions where watering should be reduced or skipped
/// (rain, cold dormancy); `High` signals conditions demanding more frequent
/// watering. The advisory engine threads this value through its rules in
/// evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Normal,
    Medium,
    High,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Normal => "normal",
            Urgency::Medium => "medium",
            Urgency::High => "high",
        }
    }

    /// Display icon token for the host UI.
    pub fn icon(&self) -> &'static str {
        match self {
            Urgency::Low => "water-off",
            Urgency::Normal => "water",
            Urgency::Medium => "water-plus",
            Urgency::High => "water-alert",
        }
    }

    /// Display color token for the host UI.
    pub fn color(&self) -> &'static str {
        match self {
            Urgency::Low => "blue",
            Urgency::Normal => "green",
            Urgency::Medium => "amber",
            Urgency::High => "red",
        }
    }
}

impl Default for Urgency {
    fn default() -> Self {
        Urgency::Normal
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw weather fields echoed verbatim for the host UI's detail block.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AdviceDetails {
    pub temperature_c: i32,
    pub humidity_percent: f64,
    pub precipitation_mm: f64,
    pub wind_speed_ms: f64,
    pub uv_index: f64,
}

/// Watering guidance for the user's plant collection, produced fresh on
/// every engine call.
#[derive(Debug, Clone, Serialize)]
pub struct WateringAdvice {
    /// Advice lines in rule-evaluation order, joined with a blank line.
    pub general: String,
    pub urgency: Urgency,
    pub icon: &'static str,
    pub color: &'static str,
    pub details: AdviceDetails,
    pub plants_needing_water: usize,
    pub is_real_data: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urgency_tokens() {
        assert_eq!(Urgency::Low.as_str(), "low");
        assert_eq!(Urgency::High.icon(), "water-alert");
        assert_eq!(Urgency::Normal.color(), "green");
        assert_eq!(Urgency::Medium.as_str(), "medium");
    }

    #[test]
    fn urgency_default_is_normal() {
        assert_eq!(Urgency::default(), Urgency::Normal);
    }
}
