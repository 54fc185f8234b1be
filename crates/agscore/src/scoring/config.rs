use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Tunables for the scoring pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Softmax temperature shared by the monthly-climate and soil aggregations.
    pub softmax_temperature: f64,
    pub soil_weight_floor: f64,
    pub soil_weight_cap: f64,
    /// Year treated as "now" when ageing benchmark justifications.
    pub reference_year: i32,
}

impl EngineConfig {
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = year;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            softmax_temperature: 150.0,
            soil_weight_floor: 0.10,
            soil_weight_cap: 0.55,
            reference_year: Utc::now().year(),
        }
    }
}
