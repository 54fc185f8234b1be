//! Closed-form soil risk formulas over normalized sand/silt/clay percentages.
//!
//! Each sub-score is a weighted sum of risk drivers minus mitigators,
//! clamped to [0, 1000].

use serde::Serialize;

use super::SoilComposition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SoilRiskKind {
    Compaction,
    Waterlogging,
    Drought,
    Nutrient,
}

impl SoilRiskKind {
    pub const ALL: [SoilRiskKind; 4] = [
        SoilRiskKind::Compaction,
        SoilRiskKind::Waterlogging,
        SoilRiskKind::Drought,
        SoilRiskKind::Nutrient,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            SoilRiskKind::Compaction => "Compaction",
            SoilRiskKind::Waterlogging => "Waterlogging",
            SoilRiskKind::Drought => "Drought Stress",
            SoilRiskKind::Nutrient => "Nutrient Management",
        }
    }

    pub fn raw_score(self, composition: &SoilComposition) -> f64 {
        let SoilComposition { sand, silt, clay } = *composition;
        match self {
            SoilRiskKind::Compaction => compaction_risk(sand, silt, clay),
            SoilRiskKind::Waterlogging => waterlogging_risk(sand, silt, clay),
            SoilRiskKind::Drought => drought_risk(sand, silt, clay),
            SoilRiskKind::Nutrient => nutrient_risk(sand, silt, clay),
        }
    }
}

pub(crate) fn gaussian(x: f64, mean: f64, sigma: f64) -> f64 {
    (-((x - mean).powi(2)) / (2.0 * sigma * sigma)).exp()
}

/// 1.0 at the 40/40/20 reference loam, decaying with distance from it.
pub(crate) fn loam_proximity(sand: f64, silt: f64, clay: f64) -> f64 {
    gaussian(sand, 40.0, 15.0) * gaussian(silt, 40.0, 15.0) * gaussian(clay, 20.0, 10.0)
}

fn excess(value: f64, threshold: f64) -> f64 {
    (value - threshold).max(0.0)
}

fn shortfall_ratio(value: f64, threshold: f64) -> f64 {
    ((threshold - value) / threshold).max(0.0)
}

fn bounded(score: f64) -> f64 {
    score.clamp(0.0, 1000.0)
}

pub(crate) fn compaction_risk(sand: f64, silt: f64, clay: f64) -> f64 {
    let drivers =
        4.0 * silt + 300.0 * gaussian(clay, 25.0, 8.0) + 100.0 * loam_proximity(sand, silt, clay);
    let mitigators = 5.0 * excess(sand, 50.0) + 6.0 * excess(clay, 45.0);
    bounded(drivers - mitigators)
}

pub(crate) fn waterlogging_risk(sand: f64, silt: f64, clay: f64) -> f64 {
    let drivers =
        10.0 * clay + 250.0 * gaussian(silt, 45.0, 12.0) + 200.0 * shortfall_ratio(sand, 30.0);
    let mitigators = 5.0 * excess(sand, 50.0) + 50.0 * shortfall_ratio(silt, 10.0);
    bounded(drivers - mitigators)
}

pub(crate) fn drought_risk(sand: f64, silt: f64, clay: f64) -> f64 {
    let fines = silt + clay;
    let drivers = 250.0
        + 7.0 * sand
        + 8.0 * excess(sand, 60.0)
        + 200.0 * (1.0 - gaussian(clay, 25.0, 10.0))
        + 250.0 * shortfall_ratio(fines, 30.0);
    let mitigators =
        150.0 * gaussian(silt, 45.0, 10.0) + 80.0 * loam_proximity(sand, silt, clay);
    bounded(drivers - mitigators)
}

pub(crate) fn nutrient_risk(sand: f64, silt: f64, clay: f64) -> f64 {
    let fines = silt + clay;
    let drivers = 250.0
        + 5.0 * sand
        + 200.0 * shortfall_ratio(fines, 30.0)
        + 200.0 * shortfall_ratio(clay, 15.0)
        + 6.0 * excess(clay, 50.0);
    let mitigators = 200.0 * gaussian(clay, 35.0, 10.0) + 150.0 * gaussian(silt, 45.0, 12.0);
    bounded(drivers - mitigators)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(sand: f64, silt: f64, clay: f64) -> [f64; 4] {
        let composition = SoilComposition { sand, silt, clay };
        SoilRiskKind::ALL.map(|kind| kind.raw_score(&composition))
    }

    #[test]
    fn gaussian_peaks_at_mean() {
        assert!((gaussian(25.0, 25.0, 8.0) - 1.0).abs() < 1e-12);
        assert!(gaussian(33.0, 25.0, 8.0) < 1.0);
        assert!((gaussian(17.0, 25.0, 8.0) - gaussian(33.0, 25.0, 8.0)).abs() < 1e-12);
    }

    #[test]
    fn balanced_loam_sits_mid_range() {
        let [compaction, waterlogging, drought, nutrient] = scores(40.0, 40.0, 20.0);
        assert!((300.0..=700.0).contains(&compaction), "compaction {compaction}");
        assert!((200.0..=700.0).contains(&drought), "drought {drought}");
        assert!(waterlogging > 0.0 && waterlogging < 1000.0);
        assert!(nutrient > 0.0 && nutrient < 1000.0);
    }

    #[test]
    fn sandy_soil_is_drought_and_nutrient_prone() {
        let [compaction, waterlogging, drought, nutrient] = scores(90.0, 5.0, 5.0);
        assert_eq!(drought, 1000.0);
        assert!(nutrient > 900.0);
        assert_eq!(compaction, 0.0);
        assert_eq!(waterlogging, 0.0);
    }

    #[test]
    fn heavy_clay_waterlogs_more_than_loam() {
        let clay = scores(20.0, 20.0, 60.0);
        let loam = scores(40.0, 40.0, 20.0);
        assert!(clay[1] > loam[1]);
        assert!(clay[0] < loam[0], "very high clay mitigates compaction");
    }

    #[test]
    fn every_formula_stays_bounded() {
        for sand in (0..=100).step_by(10) {
            for silt in (0..=(100 - sand)).step_by(10) {
                let clay = 100 - sand - silt;
                for score in scores(sand as f64, silt as f64, clay as f64) {
                    assert!((0.0..=1000.0).contains(&score));
                }
            }
        }
    }
}
