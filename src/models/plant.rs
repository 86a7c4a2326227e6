use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A plant's watering due date, supplied by the host application.
///
/// The core only derives how many days remain until the date; it never
/// mutates or persists these entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlantDueEntry {
    pub id: i64,
    pub next_water_date: NaiveDate,
}

impl PlantDueEntry {
    /// Days until the plant is due; zero or negative means due now.
    pub fn days_until(&self, today: NaiveDate) -> i64 {
        (self.next_water_date - today).num_days()
    }

    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.days_until(today) <= 0
    }
}
