use serde::Serialize;

use super::tier::{risk_label, tier_for_score};

const CLIMATE_CONTEXT_WEIGHT: f64 = 0.60;
const SOIL_CONTEXT_WEIGHT: f64 = 0.40;

/// Harvest performance relative to its climate and soil context.
///
/// Positive alpha means the weighted harvest score sits below the context
/// risk, i.e. the farm is outperforming its conditions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlphaScore {
    pub context: f64,
    pub alpha: i32,
    pub risk: u16,
    pub tier: u8,
    pub tier_label: &'static str,
}

pub fn alpha_score(climate: u16, soil: u16, harvest: u16, confidence_weight: f64) -> AlphaScore {
    let context =
        CLIMATE_CONTEXT_WEIGHT * f64::from(climate) + SOIL_CONTEXT_WEIGHT * f64::from(soil);
    let alpha = (context - confidence_weight * f64::from(harvest)).round() as i32;
    let risk = (500.0 - f64::from(alpha)).round().clamp(0.0, 1000.0) as u16;
    let tier = tier_for_score(f64::from(risk));

    AlphaScore {
        context,
        alpha,
        risk,
        tier,
        tier_label: risk_label(tier),
    }
}
