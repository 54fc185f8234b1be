//! Climate risk from interpolated station normals over a crop's active months.

mod classification;
mod interpolation;
mod monthly;

pub use classification::{classify_climate, ClimateType};
pub use interpolation::{haversine_km, interpolate, InterpolatedSeries, StationWeight};
pub use monthly::{
    score_month, ClimateFactor, MonthlyClimate, TierLadder, HUMIDITY_LADDER, RAINFALL_LADDER,
    RAINY_DAYS_LADDER, SCORE_SCALE,
};

use serde::Serialize;
use tracing::debug;

use super::config::EngineConfig;
use super::weighting::softmax_aggregate;
use super::Month;
use crate::reference::WeatherStation;

/// Mean conditions over the crop-cycle months.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClimateAverages {
    pub rainfall: f64,
    pub rainy_days: f64,
    pub humidity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClimateAnalysis {
    pub score: u16,
    pub climate_type: ClimateType,
    pub climate_type_description: &'static str,
    pub dominant_hazard: String,
    pub months: Vec<MonthlyClimate>,
    pub averages: ClimateAverages,
    pub stations: Vec<StationWeight>,
}

impl ClimateAnalysis {
    /// True when any crop-cycle month falls in March–May.
    pub fn includes_summer(&self) -> bool {
        self.months.iter().any(|month| month.month.is_summer())
    }
}

/// Returns `None` when the coordinate is out of range, no months were
/// given, or the station table is empty.
pub fn analyze_climate(
    stations: &[WeatherStation],
    latitude: f64,
    longitude: f64,
    months: &[Month],
    config: &EngineConfig,
) -> Option<ClimateAnalysis> {
    if months.is_empty()
        || !(-90.0..=90.0).contains(&latitude)
        || !(-180.0..=180.0).contains(&longitude)
    {
        return None;
    }

    let series = interpolate(stations, latitude, longitude)?;
    let climate_type = classify_climate(&series);

    let breakdown: Vec<MonthlyClimate> = months
        .iter()
        .map(|month| {
            let index = month.index();
            score_month(
                *month,
                series.rainfall[index],
                series.rainy_days[index],
                series.humidity[index],
            )
        })
        .collect();

    let scores: Vec<f64> = breakdown.iter().map(|month| month.score as f64).collect();
    let score = softmax_aggregate(&scores, config.softmax_temperature)?
        .round()
        .clamp(10.0, 1000.0) as u16;

    let count = breakdown.len() as f64;
    let averages = ClimateAverages {
        rainfall: breakdown.iter().map(|month| month.rainfall).sum::<f64>() / count,
        rainy_days: breakdown.iter().map(|month| month.rainy_days).sum::<f64>() / count,
        humidity: breakdown.iter().map(|month| month.humidity).sum::<f64>() / count,
    };

    let dominant_hazard = dominant_hazard(&breakdown);
    debug!(
        climate_type = climate_type.label(),
        score,
        months = breakdown.len(),
        "climate analysis complete"
    );

    Some(ClimateAnalysis {
        score,
        climate_type,
        climate_type_description: climate_type.description(),
        dominant_hazard,
        months: breakdown,
        averages,
        stations: series.stations,
    })
}

/// Limiting factor of the highest-scoring month, first such month on ties.
fn dominant_hazard(months: &[MonthlyClimate]) -> String {
    let worst = months.iter().fold(None::<&MonthlyClimate>, |worst, month| match worst {
        Some(current) if current.score >= month.score => Some(current),
        _ => Some(month),
    });

    match worst {
        Some(month) if month.tier > 1 => format!(
            "{} in {} (tier {})",
            month.limiting_factor.hazard(),
            month.month.label(),
            month.tier
        ),
        _ => "No significant climate hazard during the crop cycle".to_string(),
    }
}
