use super::common::*;
use crate::scoring::{aggregate_baseline, component_weights, RiskScoreInput};

#[test]
fn every_weight_row_sums_to_one() {
    for mask in 1u8..8 {
        for summer in [false, true] {
            let weights =
                component_weights(mask & 1 != 0, mask & 2 != 0, mask & 4 != 0, summer);
            assert!((weights.total() - 1.0).abs() < 1e-9, "mask {mask} summer {summer}");
        }
    }
    assert_eq!(component_weights(false, false, false, true).total(), 0.0);
}

#[test]
fn empty_input_falls_back_to_floor() {
    let result = engine().score(&RiskScoreInput::default());

    assert_eq!(result.baseline_score, 10);
    assert_eq!(result.qualitative_tier, 1);
    assert_eq!(result.qualitative_risk, "Very Low");
    assert!(result.explanation.starts_with("Insufficient component data"));
    assert!(result.climate_score.is_none());
    assert!(result.soil_score.is_none());
    assert!(result.alpha.is_none());
}

#[test]
fn full_input_blends_all_components() {
    let result = engine().score(&full_input());

    let climate = result.climate_score.expect("climate");
    let soil = result.soil_score.expect("soil");
    let harvest = result.harvest_score.as_ref().expect("harvest");

    assert_eq!(result.component_weights.climate, 0.50);
    assert_eq!(result.component_weights.soil, 0.30);
    assert_eq!(result.component_weights.harvest, 0.20);

    let expected = aggregate_baseline(Some(climate), Some(soil), Some(harvest.score), false);
    assert_eq!(result.baseline_score, expected.score);
    assert_eq!(result.qualitative_tier, expected.tier);

    let context = 0.6 * f64::from(climate) + 0.4 * f64::from(soil);
    let alpha = (context - harvest.weight * f64::from(harvest.score)).round() as i32;
    assert_eq!(result.alpha, Some(alpha));
    assert!(result.alpha_risk.is_some());
    assert!(result.alpha_tier_label.is_some());
}

#[test]
fn narrative_mentions_each_component() {
    let result = engine().score(&full_input());
    assert!(result.explanation.contains("Climate risk"));
    assert!(result.explanation.contains("Soil risk"));
    assert!(result.explanation.contains("Harvest risk"));
    assert!(result.final_statement.contains(&result.qualitative_risk));
    assert!(!result.final_recommendation.is_empty());
}

#[test]
fn baseline_stays_within_bounds() {
    let engine = engine();
    for (sand, silt, clay) in [(90.0, 5.0, 5.0), (10.0, 30.0, 60.0), (20.0, 70.0, 10.0)] {
        let mut input = full_input();
        input.sand = Some(sand);
        input.silt = Some(silt);
        input.clay = Some(clay);
        let result = engine.score(&input);
        assert!((10..=1000).contains(&result.baseline_score));
        assert!((1..=7).contains(&result.qualitative_tier));
    }
}

#[test]
fn result_serializes_with_camel_case_keys() {
    let json = serde_json::to_value(engine().score(&full_input())).expect("serialize");
    assert!(json.get("baselineScore").is_some());
    assert!(json.get("componentWeights").is_some());
    assert!(json.get("monthlyClimateBreakdown").is_some());
    assert!(json.get("alphaTierLabel").is_some());

    let sparse = serde_json::to_value(engine().score(&RiskScoreInput::default())).expect("serialize");
    assert!(sparse["climateScore"].is_null());
    assert!(sparse.get("harvestScore").is_none());
    assert!(sparse.get("alpha").is_none());
}
