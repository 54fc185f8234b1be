//! Human-readable explanation, statement and recommendation strings.

use super::climate::ClimateAnalysis;
use super::harvest::HarvestScore;
use super::policy::BaselineScore;
use super::soil::SoilAnalysis;

pub(crate) const INSUFFICIENT_DATA: &str = "Insufficient component data: provide soil composition, a farm location with crop-cycle months, or a projected yield to compute a baseline risk score.";

fn percent(weight: f64) -> String {
    format!("{:.0}%", weight * 100.0)
}

pub(crate) fn explanation(
    baseline: &BaselineScore,
    climate: Option<&ClimateAnalysis>,
    soil: Option<&SoilAnalysis>,
    harvest: Option<&HarvestScore>,
    harvest_error: Option<&str>,
) -> String {
    let mut sentences = Vec::new();

    if let Some(climate) = climate {
        sentences.push(format!(
            "Climate risk {}/1000 (weight {}): {} pattern across {} crop-cycle month(s); {}.",
            climate.score,
            percent(baseline.weights.climate),
            climate.climate_type.label(),
            climate.months.len(),
            climate.dominant_hazard
        ));
    }
    if let Some(soil) = soil {
        sentences.push(format!(
            "Soil risk {}/1000 (weight {}): {} texture, dominant concern {}.",
            soil.score,
            percent(baseline.weights.soil),
            soil.texture.label(),
            soil.dominant_risk_label
        ));
    }
    if let Some(harvest) = harvest {
        sentences.push(format!(
            "Harvest risk {}/1000 (weight {}): projected {:.2} MT/ha against a {:.2} MT/ha benchmark (ratio {:.2}, {}).",
            harvest.score,
            percent(baseline.weights.harvest),
            harvest.projected_yield_per_ha,
            harvest.benchmark_yield,
            harvest.yield_ratio,
            harvest.tier_label
        ));
    }

    if sentences.is_empty() {
        sentences.push(INSUFFICIENT_DATA.to_string());
    }
    if let Some(error) = harvest_error {
        sentences.push(format!("Harvest analysis skipped: {error}."));
    }

    sentences.join(" ")
}

pub(crate) fn final_statement(baseline: &BaselineScore) -> String {
    if baseline.components == 0 {
        return format!(
            "Baseline risk defaults to {}/1000 because no component could be scored.",
            baseline.score
        );
    }

    let outlook = match baseline.tier {
        1 | 2 => "conditions strongly support repayment",
        3 | 4 => "conditions are broadly favourable with manageable exposure",
        5 => "elevated exposure warrants safeguards before lending",
        _ => "exposure is severe relative to expected farm performance",
    };
    format!(
        "Baseline risk is {} ({}/1000, tier {} of 7): {}.",
        baseline.label, baseline.score, baseline.tier, outlook
    )
}

pub(crate) fn final_recommendation(
    baseline: &BaselineScore,
    climate: Option<&ClimateAnalysis>,
    soil: Option<&SoilAnalysis>,
) -> String {
    if baseline.components == 0 {
        return "Collect soil, location and yield data before making a credit decision.".to_string();
    }

    let mut recommendation = match baseline.tier {
        1 | 2 => "Approve under standard loan terms.".to_string(),
        3 | 4 => "Approve with routine monitoring during the crop cycle.".to_string(),
        5 => "Approve conditionally: require crop insurance and a documented mitigation plan."
            .to_string(),
        _ => "Decline or restructure: reduce the loan size, shift the planting window, or require collateral."
            .to_string(),
    };

    if baseline.tier >= 3 {
        let mut watch = Vec::new();
        if let Some(climate) = climate.filter(|climate| climate.score >= 400) {
            watch.push(climate.dominant_hazard.to_lowercase());
        }
        if let Some(soil) = soil.filter(|soil| soil.score >= 400) {
            watch.push(format!("{} risk", soil.dominant_risk_label.to_lowercase()));
        }
        if !watch.is_empty() {
            recommendation.push_str(&format!(" Watch: {}.", watch.join("; ")));
        }
    }

    recommendation
}
