use serde::Serialize;

use super::subscores::SoilRiskKind;
use crate::scoring::climate::ClimateAverages;

/// Climate-driven multipliers on the raw soil sub-scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityFactors {
    pub compaction: f64,
    pub waterlogging: f64,
    pub drought: f64,
    pub nutrient: f64,
    pub adjustments: Vec<String>,
}

impl Default for ActivityFactors {
    fn default() -> Self {
        Self {
            compaction: 1.0,
            waterlogging: 1.0,
            drought: 1.0,
            nutrient: 1.0,
            adjustments: Vec::new(),
        }
    }
}

impl ActivityFactors {
    /// Neutral factors when no climate context is available.
    pub fn from_climate(averages: Option<&ClimateAverages>) -> Self {
        let mut factors = Self::default();
        let Some(averages) = averages else {
            return factors;
        };

        if averages.rainfall > 150.0 {
            factors.drought *= 0.5;
            factors.nutrient *= 1.2;
            factors.adjustments.push(format!(
                "mean rainfall {:.0} mm > 150 mm: drought risk x0.5, nutrient leaching risk x1.2",
                averages.rainfall
            ));
        }
        if averages.rainfall < 100.0 {
            factors.waterlogging *= 0.6;
            factors.adjustments.push(format!(
                "mean rainfall {:.0} mm < 100 mm: waterlogging risk x0.6",
                averages.rainfall
            ));
        }
        if averages.humidity > 80.0 && averages.rainy_days > 10.0 {
            factors.compaction *= 1.1;
            factors.adjustments.push(format!(
                "humidity {:.0}% with {:.1} rainy days/month: compaction risk x1.1",
                averages.humidity, averages.rainy_days
            ));
        }

        factors
    }

    pub fn factor_for(&self, kind: SoilRiskKind) -> f64 {
        match kind {
            SoilRiskKind::Compaction => self.compaction,
            SoilRiskKind::Waterlogging => self.waterlogging,
            SoilRiskKind::Drought => self.drought,
            SoilRiskKind::Nutrient => self.nutrient,
        }
    }
}
