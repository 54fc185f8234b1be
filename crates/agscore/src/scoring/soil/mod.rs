mod activity;
mod subscores;
mod texture;

pub use activity::ActivityFactors;
pub use subscores::SoilRiskKind;
pub use texture::{classify_texture, TextureClass};

use serde::Serialize;
use tracing::debug;

use super::config::EngineConfig;
use super::weighting::{clamp_and_renormalize, softmax_weights};

/// Raw sums inside this band are accepted as-is to tolerate lab rounding.
const ACCEPTED_SUM: std::ops::RangeInclusive<f64> = 85.0..=115.0;

/// Sand / silt / clay percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SoilComposition {
    pub sand: f64,
    pub silt: f64,
    pub clay: f64,
}

impl SoilComposition {
    /// Validates a raw lab reading and rescales it to sum to 100 when the raw
    /// total falls outside 85–115. Returns the composition and whether it
    /// was rescaled; `None` for negative, non-finite, overflowing or all-zero
    /// readings.
    pub fn normalize(sand: f64, silt: f64, clay: f64) -> Option<(Self, bool)> {
        let parts = [sand, silt, clay];
        if parts.iter().any(|part| !part.is_finite() || *part < 0.0) {
            return None;
        }

        let total: f64 = parts.iter().sum();
        if !total.is_finite() || total <= 0.0 {
            return None;
        }
        if ACCEPTED_SUM.contains(&total) {
            return Some((Self { sand, silt, clay }, false));
        }

        let scale = 100.0 / total;
        Some((
            Self {
                sand: sand * scale,
                silt: silt * scale,
                clay: clay * scale,
            },
            true,
        ))
    }

    pub fn total(&self) -> f64 {
        self.sand + self.silt + self.clay
    }
}

/// Audit line for one soil risk dimension.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubScoreDetail {
    pub kind: SoilRiskKind,
    pub label: &'static str,
    pub raw: f64,
    pub factor: f64,
    pub effective: f64,
    pub weight: f64,
    pub contribution: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilAnalysis {
    pub score: u16,
    pub texture: TextureClass,
    pub composition: SoilComposition,
    pub renormalized: bool,
    pub sub_scores: Vec<SubScoreDetail>,
    pub dominant_risk: SoilRiskKind,
    pub dominant_risk_label: &'static str,
    pub adjustments: Vec<String>,
}

impl SoilAnalysis {
    pub fn sub_score(&self, kind: SoilRiskKind) -> Option<&SubScoreDetail> {
        self.sub_scores.iter().find(|detail| detail.kind == kind)
    }
}

/// Scores a normalized composition under the given activity factors.
pub fn analyze_soil(
    composition: SoilComposition,
    renormalized: bool,
    activity: &ActivityFactors,
    config: &EngineConfig,
) -> SoilAnalysis {
    let texture = classify_texture(&composition);

    let raws = SoilRiskKind::ALL.map(|kind| kind.raw_score(&composition));
    let effective: Vec<f64> = SoilRiskKind::ALL
        .iter()
        .zip(raws)
        .map(|(kind, raw)| (raw * activity.factor_for(*kind)).clamp(0.0, 1000.0))
        .collect();

    let provisional = softmax_weights(&effective, config.softmax_temperature);
    let weights = clamp_and_renormalize(
        &provisional,
        config.soil_weight_floor,
        config.soil_weight_cap,
    );

    let sub_scores: Vec<SubScoreDetail> = SoilRiskKind::ALL
        .iter()
        .enumerate()
        .map(|(index, kind)| SubScoreDetail {
            kind: *kind,
            label: kind.label(),
            raw: raws[index],
            factor: activity.factor_for(*kind),
            effective: effective[index],
            weight: weights[index],
            contribution: effective[index] * weights[index],
        })
        .collect();

    let total: f64 = sub_scores.iter().map(|detail| detail.contribution).sum();
    let score = total.round().clamp(0.0, 1000.0) as u16;

    let dominant_risk = sub_scores
        .iter()
        .fold(None::<&SubScoreDetail>, |best, detail| match best {
            Some(current) if current.contribution >= detail.contribution => Some(current),
            _ => Some(detail),
        })
        .map(|detail| detail.kind)
        .unwrap_or(SoilRiskKind::Compaction);

    debug!(
        texture = texture.label(),
        score,
        dominant = dominant_risk.label(),
        "soil analysis complete"
    );

    SoilAnalysis {
        score,
        texture,
        composition,
        renormalized,
        sub_scores,
        dominant_risk,
        dominant_risk_label: dominant_risk.label(),
        adjustments: activity.adjustments.clone(),
    }
}
