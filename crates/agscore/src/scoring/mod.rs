//! Baseline agricultural risk scoring.
//!
//! Climate, soil and harvest components are computed independently from a
//! [`RiskScoreInput`], then blended by a season-aware weight policy. Any
//! component whose inputs are missing is skipped rather than failing the
//! whole request.

pub mod alpha;
pub mod climate;
pub mod config;
pub(crate) mod crops;
pub mod domain;
pub mod engine;
pub mod harvest;
pub(crate) mod narrative;
pub mod policy;
pub mod router;
pub mod soil;
pub mod tier;
pub mod trigger;
pub mod weighting;

#[cfg(test)]
mod tests;

pub use alpha::{alpha_score, AlphaScore};
pub use climate::{ClimateAnalysis, ClimateType, MonthlyClimate};
pub use config::EngineConfig;
pub use crops::canonical_crop_name;
pub use domain::{Month, RiskScoreInput, RiskScoreResult};
pub use engine::RiskScoringEngine;
pub use harvest::{calculate_harvest_score, yield_ratio_score, HarvestError, HarvestScore};
pub use policy::{aggregate_baseline, component_weights, BaselineScore, ComponentWeights};
pub use router::risk_router;
pub use soil::{SoilAnalysis, SoilComposition, TextureClass};
pub use trigger::{HarvestTrigger, TriggerParseError, TriggerParser};
pub use weighting::{clamp_and_renormalize, softmax_weights};
