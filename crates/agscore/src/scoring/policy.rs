//! Season-aware blending of the climate, soil and harvest components.

use serde::Serialize;

use super::tier::{risk_label, tier_for_score};

/// Score reported when no component could be computed.
pub const BASELINE_FLOOR: u16 = 10;

/// Weight given to each component in the baseline; absent components are 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ComponentWeights {
    pub climate: f64,
    pub soil: f64,
    pub harvest: f64,
}

impl ComponentWeights {
    const fn new(climate: f64, soil: f64, harvest: f64) -> Self {
        Self {
            climate,
            soil,
            harvest,
        }
    }

    pub fn total(&self) -> f64 {
        self.climate + self.soil + self.harvest
    }
}

/// Fixed weight table keyed by which components are present and whether the
/// crop cycle touches March–May.
pub fn component_weights(climate: bool, soil: bool, harvest: bool, summer: bool) -> ComponentWeights {
    match (climate, soil, harvest) {
        (true, true, true) if summer => ComponentWeights::new(0.40, 0.40, 0.20),
        (true, true, true) => ComponentWeights::new(0.50, 0.30, 0.20),
        (true, true, false) if summer => ComponentWeights::new(0.50, 0.50, 0.0),
        (true, true, false) => ComponentWeights::new(0.60, 0.40, 0.0),
        (true, false, true) => ComponentWeights::new(0.60, 0.0, 0.40),
        (false, true, true) => ComponentWeights::new(0.0, 0.60, 0.40),
        (true, false, false) => ComponentWeights::new(1.0, 0.0, 0.0),
        (false, true, false) => ComponentWeights::new(0.0, 1.0, 0.0),
        (false, false, true) => ComponentWeights::new(0.0, 0.0, 1.0),
        (false, false, false) => ComponentWeights::default(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaselineScore {
    pub score: u16,
    pub tier: u8,
    pub label: &'static str,
    pub weights: ComponentWeights,
    pub components: usize,
}

pub fn aggregate_baseline(
    climate: Option<u16>,
    soil: Option<u16>,
    harvest: Option<u16>,
    summer: bool,
) -> BaselineScore {
    let weights = component_weights(climate.is_some(), soil.is_some(), harvest.is_some(), summer);
    let components = [climate, soil, harvest].iter().flatten().count();

    let score = if components == 0 {
        BASELINE_FLOOR
    } else {
        let weighted = f64::from(climate.unwrap_or(0)) * weights.climate
            + f64::from(soil.unwrap_or(0)) * weights.soil
            + f64::from(harvest.unwrap_or(0)) * weights.harvest;
        weighted.clamp(f64::from(BASELINE_FLOOR), 1000.0).round() as u16
    };
    let tier = tier_for_score(f64::from(score));

    BaselineScore {
        score,
        tier,
        label: risk_label(tier),
        weights,
        components,
    }
}
