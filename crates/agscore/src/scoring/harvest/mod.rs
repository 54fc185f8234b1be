//! Harvest performance: projected yield against the matched benchmark.

mod benchmark;
mod confidence;

pub use benchmark::{find_benchmark, BenchmarkMatch, SpatialMatch, SystemMatch};
pub use confidence::{
    base_factor, confidence_weight, latest_year, recency_factor, ConfidenceBreakdown,
};

use serde::Serialize;
use tracing::debug;

use super::crops::canonical_crop_name;
use super::tier::{performance_label, tier_for_score};
use crate::reference::ConfidenceLevel;
use crate::reference::CropBenchmark;

/// Ratio shortfall at which the below-benchmark curve reaches 1000.
const SHORTFALL_SPAN: f64 = 0.3;
const SHORTFALL_EXPONENT: f64 = 0.7;
const SURPLUS_EXPONENT: f64 = 0.8;

/// Fully-resolved harvest inputs after merging structured and trigger fields.
#[derive(Debug, Clone, PartialEq)]
pub struct HarvestRequest {
    pub crop_type: String,
    pub province: String,
    pub projected_yield_per_ha: f64,
    pub area_size_ha: f64,
    pub system_or_variety: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HarvestScore {
    pub score: u16,
    pub tier: u8,
    pub tier_label: &'static str,
    pub yield_ratio: f64,
    pub crop_type: String,
    pub province: String,
    pub projected_yield_per_ha: f64,
    pub area_size_ha: f64,
    pub projected_total_harvest: f64,
    pub benchmark_yield: f64,
    pub benchmark_source: String,
    pub benchmark_confidence: ConfidenceLevel,
    pub spatial_match: SpatialMatch,
    pub system_match: SystemMatch,
    pub weight: f64,
    pub confidence: ConfidenceBreakdown,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HarvestError {
    #[error("no yield benchmark found for {crop} in {province}")]
    BenchmarkNotFound { crop: String, province: String },
    #[error(
        "benchmark yield is 0 for {crop} ({system}) in {province}: crop is not viable there"
    )]
    NonViableCrop {
        crop: String,
        system: String,
        province: String,
    },
    #[error("projected yield must be a positive number, got {0}")]
    InvalidYield(f64),
    #[error("harvest analysis requires {0}")]
    MissingField(&'static str),
}

/// Raw asymmetric curve over `R = projected / benchmark`; 500 at parity,
/// rising steeply below it and falling more gently above. Unclamped.
pub fn yield_ratio_score(ratio: f64) -> f64 {
    if ratio < 1.0 {
        500.0 + 500.0 * ((1.0 - ratio) / SHORTFALL_SPAN).powf(SHORTFALL_EXPONENT)
    } else {
        500.0 - 500.0 * (ratio - 1.0).powf(SURPLUS_EXPONENT)
    }
}

pub fn calculate_harvest_score(
    benchmarks: &[CropBenchmark],
    request: &HarvestRequest,
    reference_year: i32,
) -> Result<HarvestScore, HarvestError> {
    let projected = request.projected_yield_per_ha;
    if !projected.is_finite() || projected <= 0.0 {
        return Err(HarvestError::InvalidYield(projected));
    }

    let crop = canonical_crop_name(&request.crop_type);
    let province = request.province.trim().to_string();
    if crop.is_empty() {
        return Err(HarvestError::MissingField("a crop type"));
    }
    if province.is_empty() {
        return Err(HarvestError::MissingField("a province"));
    }

    let matched = find_benchmark(
        benchmarks,
        &crop,
        &province,
        request.system_or_variety.as_deref(),
    )
    .ok_or_else(|| HarvestError::BenchmarkNotFound {
        crop: crop.clone(),
        province: province.clone(),
    })?;

    let benchmark = matched.benchmark;
    let benchmark_yield = benchmark.recommended_minimum_yield;
    if !benchmark_yield.is_finite() || benchmark_yield <= 0.0 {
        return Err(HarvestError::NonViableCrop {
            crop,
            system: request
                .system_or_variety
                .clone()
                .unwrap_or_else(|| benchmark.farming_system.clone()),
            province,
        });
    }

    let ratio = projected / benchmark_yield;
    let score = yield_ratio_score(ratio).clamp(0.0, 1000.0).round();
    let tier = tier_for_score(score);
    let area = if request.area_size_ha.is_finite() && request.area_size_ha > 0.0 {
        request.area_size_ha
    } else {
        1.0
    };
    let confidence = confidence_weight(&matched, reference_year);

    debug!(
        crop = %crop,
        province = %province,
        ratio,
        score,
        weight = confidence.weight,
        "harvest score computed"
    );

    Ok(HarvestScore {
        score: score as u16,
        tier,
        tier_label: performance_label(tier),
        yield_ratio: ratio,
        crop_type: crop,
        province,
        projected_yield_per_ha: projected,
        area_size_ha: area,
        projected_total_harvest: projected * area,
        benchmark_yield: benchmark.recommended_minimum_yield,
        benchmark_source: benchmark.source_label(),
        benchmark_confidence: benchmark.confidence_level,
        spatial_match: matched.spatial,
        system_match: matched.system,
        weight: confidence.weight,
        confidence,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ReferenceData;

    fn request(crop: &str, province: &str, projected: f64, system: Option<&str>) -> HarvestRequest {
        HarvestRequest {
            crop_type: crop.to_string(),
            province: province.to_string(),
            projected_yield_per_ha: projected,
            area_size_ha: 1.0,
            system_or_variety: system.map(str::to_string),
        }
    }

    #[test]
    fn parity_scores_500() {
        assert_eq!(yield_ratio_score(1.0), 500.0);
    }

    #[test]
    fn curve_is_strictly_decreasing() {
        let mut ratios: Vec<f64> = (1..=3000).map(|step| f64::from(step) / 1000.0).collect();
        ratios.extend([0.999_999, 1.000_001, 0.999_999_9, 1.000_000_1]);
        ratios.sort_by(|a, b| a.total_cmp(b));

        for pair in ratios.windows(2) {
            let (lower, higher) = (pair[0], pair[1]);
            assert!(
                yield_ratio_score(lower) > yield_ratio_score(higher),
                "score({lower}) should exceed score({higher})"
            );
        }
    }

    #[test]
    fn corrupt_benchmark_yield_is_not_viable() {
        let benchmarks = vec![CropBenchmark {
            crop: "Palay (Rice)".to_string(),
            province: "Laguna".to_string(),
            farming_system: "Irrigated".to_string(),
            recommended_minimum_yield: f64::NAN,
            confidence_level: ConfidenceLevel::High,
            justification: Some("PSA 2023".to_string()),
        }];
        let result = calculate_harvest_score(
            &benchmarks,
            &request("palay", "Laguna", 4.0, Some("Irrigated")),
            2025,
        );
        assert!(matches!(result, Err(HarvestError::NonViableCrop { .. })));
    }

    #[test]
    fn curve_is_steeper_below_parity() {
        let shortfall = yield_ratio_score(0.9) - 500.0;
        let surplus = 500.0 - yield_ratio_score(1.1);
        assert!(shortfall > surplus);
    }

    #[test]
    fn rejects_non_positive_yield() {
        let data = ReferenceData::builtin();
        let result = calculate_harvest_score(
            &data.benchmarks,
            &request("palay", "Laguna", 0.0, None),
            2025,
        );
        assert_eq!(result, Err(HarvestError::InvalidYield(0.0)));
    }

    #[test]
    fn missing_benchmark_names_crop_and_province() {
        let data = ReferenceData::builtin();
        let err = calculate_harvest_score(
            &data.benchmarks,
            &request("cassava", "Laguna", 10.0, None),
            2025,
        )
        .expect_err("no cassava rows");
        assert_eq!(
            err,
            HarvestError::BenchmarkNotFound {
                crop: "Cassava".to_string(),
                province: "Laguna".to_string()
            }
        );
        assert!(err.to_string().contains("Cassava"));
    }

    #[test]
    fn doubled_yield_bottoms_out() {
        let data = ReferenceData::builtin();
        let harvest = calculate_harvest_score(
            &data.benchmarks,
            &request("palay", "Laguna", 7.98, Some("Irrigated")),
            2025,
        )
        .expect("benchmark matched");
        assert_eq!(harvest.score, 0);
        assert_eq!(harvest.tier, 1);
        assert_eq!(harvest.tier_label, "Exceptional Performance");
    }

    #[test]
    fn projected_total_scales_with_area() {
        let data = ReferenceData::builtin();
        let mut req = request("corn", "Isabela", 5.5, Some("Yellow Corn"));
        req.area_size_ha = 2.5;
        let harvest =
            calculate_harvest_score(&data.benchmarks, &req, 2025).expect("benchmark matched");
        assert!((harvest.projected_total_harvest - 13.75).abs() < 1e-9);
        assert_eq!(harvest.score, 500);
    }
}
