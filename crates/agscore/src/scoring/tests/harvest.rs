use super::common::*;
use crate::reference::{ConfidenceLevel, ReferenceData};
use crate::scoring::harvest::{SpatialMatch, SystemMatch};
use crate::scoring::RiskScoreInput;

#[test]
fn parity_with_exact_benchmark_scores_500() {
    let result = engine().score(&laguna_palay_input(3.99));
    let harvest = result.harvest_score.expect("harvest scored");

    assert_eq!(harvest.score, 500);
    assert_eq!(harvest.tier, 4);
    assert_eq!(harvest.tier_label, "Moderate Performance");
    assert_eq!(harvest.benchmark_yield, 3.99);
    assert_eq!(harvest.spatial_match, SpatialMatch::Exact);
    assert_eq!(harvest.system_match, SystemMatch::Exact);
    assert_eq!(harvest.confidence.benchmark_year, Some(2023));
    assert_eq!(harvest.weight, 1.0);
    assert_eq!(harvest.province, "Laguna, laguna");
    assert_eq!(result.baseline_score, 500);
}

#[test]
fn zero_benchmark_reports_non_viable_crop() {
    let input = RiskScoreInput {
        crop_type: Some("Potato".to_string()),
        province: Some("Any".to_string()),
        projected_yield_per_ha: Some(10.0),
        ..RiskScoreInput::default()
    };
    let result = engine().score(&input);

    assert!(result.harvest_score.is_none());
    let error = result.harvest_error.expect("harvest error recorded");
    assert!(error.contains("benchmark yield is 0"), "{error}");
    assert!(error.contains("Potato"), "{error}");
    assert!(result.explanation.contains("Harvest analysis skipped"));
    assert_eq!(result.baseline_score, 10);
}

#[test]
fn grouped_provinces_rank_between_exact_and_national() {
    let engine = engine();
    let mut input = laguna_palay_input(3.70);

    input.province = Some("Albay".to_string());
    let grouped = engine.score(&input).harvest_score.expect("grouped match");
    assert_eq!(grouped.spatial_match, SpatialMatch::Grouped);
    assert_eq!(grouped.benchmark_yield, 3.70);

    input.province = Some("Pampanga".to_string());
    let national = engine.score(&input).harvest_score.expect("national match");
    assert_eq!(national.spatial_match, SpatialMatch::AllProvinces);
    assert_eq!(national.benchmark_yield, 4.00);
    assert!(national.weight < 1.0);
}

#[test]
fn unknown_system_keeps_the_province_level() {
    let mut input = laguna_palay_input(3.99);
    input.system_or_variety = Some("Upland".to_string());

    let harvest = engine().score(&input).harvest_score.expect("harvest scored");
    assert_eq!(harvest.spatial_match, SpatialMatch::Exact);
    assert_eq!(harvest.system_match, SystemMatch::None);
    assert_eq!(harvest.benchmark_yield, 3.99);
    assert!((harvest.weight - 0.88).abs() < 1e-9);
}

#[test]
fn higher_yield_never_raises_risk() {
    let engine = engine();
    let scores: Vec<u16> = (10..=60)
        .map(|tenths| {
            let result = engine.score(&laguna_palay_input(f64::from(tenths) / 10.0));
            result.harvest_score.expect("harvest scored").score
        })
        .collect();

    assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));
    assert!(scores[0] > scores[scores.len() - 1]);
}

#[test]
fn missing_benchmark_is_reported() {
    let input = RiskScoreInput {
        crop_type: Some("Cassava".to_string()),
        province: Some("Laguna".to_string()),
        projected_yield_per_ha: Some(10.0),
        ..RiskScoreInput::default()
    };
    let error = engine().score(&input).harvest_error.expect("error recorded");
    assert_eq!(error, "no yield benchmark found for Cassava in Laguna");
}

#[test]
fn partial_fields_report_what_is_missing() {
    let input = RiskScoreInput {
        crop_type: Some("Corn".to_string()),
        ..RiskScoreInput::default()
    };
    let error = engine().score(&input).harvest_error.expect("error recorded");
    assert_eq!(error, "harvest analysis requires a province");
}

#[test]
fn trigger_text_supplies_missing_fields() {
    let input = RiskScoreInput {
        trigger_text: Some("harvest score palay irrigated 4.6 mt/ha nueva ecija area 2".to_string()),
        ..RiskScoreInput::default()
    };
    let harvest = engine().score(&input).harvest_score.expect("harvest scored");

    assert_eq!(harvest.crop_type, "Palay (Rice)");
    assert_eq!(harvest.benchmark_yield, 4.60);
    assert_eq!(harvest.score, 500);
    assert_eq!(harvest.area_size_ha, 2.0);
    assert!((harvest.projected_total_harvest - 9.2).abs() < 1e-9);
}

#[test]
fn structured_fields_override_the_trigger() {
    let input = RiskScoreInput {
        trigger_text: Some("harvest score palay irrigated 4.6 mt/ha nueva ecija".to_string()),
        province: Some("Laguna".to_string()),
        ..RiskScoreInput::default()
    };
    let harvest = engine().score(&input).harvest_score.expect("harvest scored");
    assert_eq!(harvest.benchmark_yield, 3.99);
    assert_eq!(harvest.province, "Laguna");
}

#[test]
fn non_trigger_text_alone_skips_harvest() {
    let input = RiskScoreInput {
        trigger_text: Some("what is the weather".to_string()),
        ..RiskScoreInput::default()
    };
    let result = engine().score(&input);
    assert!(result.harvest_score.is_none());
    assert!(result.harvest_error.is_none());
}

#[test]
fn stale_low_confidence_benchmarks_are_discounted() {
    let reference = ReferenceData::new(
        Vec::new(),
        vec![benchmark(
            "Mango",
            "Guimaras",
            "Carabao",
            8.0,
            ConfidenceLevel::Low,
            Some("BPI survey 2001"),
        )],
    );
    let input = RiskScoreInput {
        crop_type: Some("mango".to_string()),
        province: Some("Guimaras".to_string()),
        projected_yield_per_ha: Some(8.0),
        ..RiskScoreInput::default()
    };
    let harvest = engine_with(reference)
        .score(&input)
        .harvest_score
        .expect("harvest scored");

    assert_eq!(harvest.confidence.years_since, Some(24));
    assert_eq!(harvest.confidence.recency, 0.80);
    // 0.70 * 1.00 * 0.88 * 0.80 falls below the floor.
    assert_eq!(harvest.weight, 0.50);
}
