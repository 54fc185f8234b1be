use serde::{Deserialize, Serialize};

use super::climate::{ClimateAnalysis, ClimateType, MonthlyClimate};
use super::harvest::HarvestScore;
use super::policy::ComponentWeights;
use super::soil::SoilAnalysis;

/// Calendar month used by crop cycles and station normals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Zero-based position, January = 0.
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub const fn label(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }

    /// Accepts full names and three-letter abbreviations in any case.
    pub fn parse(value: &str) -> Option<Self> {
        let key = value.trim().trim_end_matches('.').to_ascii_lowercase();
        if key == "sept" {
            return Some(Month::September);
        }
        Self::ALL.into_iter().find(|month| {
            let label = month.label().to_ascii_lowercase();
            key == label || key == label[..3]
        })
    }

    /// March through May, the hot dry-season planting window.
    pub const fn is_summer(self) -> bool {
        matches!(self, Month::March | Month::April | Month::May)
    }
}

/// Request object handed to the engine by surrounding services.
///
/// Every field is optional; which sub-scores run depends on which fields
/// are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskScoreInput {
    pub sand: Option<f64>,
    pub silt: Option<f64>,
    pub clay: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default)]
    pub crop_cycle_months: Vec<String>,
    pub trigger_text: Option<String>,
    pub crop_type: Option<String>,
    pub province: Option<String>,
    pub projected_yield_per_ha: Option<f64>,
    pub area_size_ha: Option<f64>,
    pub system_or_variety: Option<String>,
}

/// Full engine output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskScoreResult {
    pub baseline_score: u16,
    pub qualitative_risk: String,
    pub qualitative_tier: u8,
    pub climate_score: Option<u16>,
    pub soil_score: Option<u16>,
    pub soil_analysis: Option<SoilAnalysis>,
    pub monthly_climate_breakdown: Option<Vec<MonthlyClimate>>,
    pub climate_type: Option<ClimateType>,
    pub climate_type_description: Option<String>,
    pub dominant_climate_hazard: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub climate_analysis: Option<ClimateAnalysis>,
    pub component_weights: ComponentWeights,
    pub explanation: String,
    pub final_statement: String,
    pub final_recommendation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub harvest_score: Option<HarvestScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub harvest_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha_risk: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha_tier_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha_tier: Option<u8>,
}
