use std::sync::Arc;

use tracing::{debug, warn};

use super::alpha::alpha_score;
use super::climate::{analyze_climate, ClimateAnalysis};
use super::config::EngineConfig;
use super::domain::{Month, RiskScoreInput, RiskScoreResult};
use super::harvest::{calculate_harvest_score, HarvestError, HarvestRequest, HarvestScore};
use super::narrative::{explanation, final_recommendation, final_statement};
use super::policy::aggregate_baseline;
use super::soil::{analyze_soil, ActivityFactors, SoilAnalysis, SoilComposition};
use super::trigger::{HarvestTrigger, TriggerParseError, TriggerParser};
use crate::reference::ReferenceData;

/// Stateless scorer over injected, read-only reference tables.
pub struct RiskScoringEngine {
    reference: Arc<ReferenceData>,
    config: EngineConfig,
    parser: TriggerParser,
}

impl RiskScoringEngine {
    pub fn new(reference: Arc<ReferenceData>, config: EngineConfig) -> Self {
        let parser = TriggerParser::new(reference.farming_systems());
        Self {
            reference,
            config,
            parser,
        }
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Parses a `harvest score ...` command against this engine's benchmark systems.
    pub fn parse_trigger(&self, text: &str) -> Result<HarvestTrigger, TriggerParseError> {
        self.parser.parse(text)
    }

    pub fn score(&self, input: &RiskScoreInput) -> RiskScoreResult {
        let climate = self.climate(input);
        let activity = ActivityFactors::from_climate(climate.as_ref().map(|c| &c.averages));
        let soil = self.soil(input, &activity);

        let (harvest, harvest_error) = match self.harvest(input) {
            Some(Ok(harvest)) => (Some(harvest), None),
            Some(Err(error)) => {
                warn!(error = %error, "harvest analysis skipped");
                (None, Some(error.to_string()))
            }
            None => (None, None),
        };

        let summer = climate
            .as_ref()
            .map(ClimateAnalysis::includes_summer)
            .unwrap_or(false);
        let climate_score = climate.as_ref().map(|analysis| analysis.score);
        let soil_score = soil.as_ref().map(|analysis| analysis.score);
        let baseline = aggregate_baseline(
            climate_score,
            soil_score,
            harvest.as_ref().map(|score| score.score),
            summer,
        );

        let alpha = match (climate_score, soil_score, harvest.as_ref()) {
            (Some(climate), Some(soil), Some(harvest)) => {
                Some(alpha_score(climate, soil, harvest.score, harvest.weight))
            }
            _ => None,
        };

        debug!(
            baseline = baseline.score,
            tier = baseline.tier,
            components = baseline.components,
            "baseline risk computed"
        );

        RiskScoreResult {
            baseline_score: baseline.score,
            qualitative_risk: baseline.label.to_string(),
            qualitative_tier: baseline.tier,
            climate_score,
            soil_score,
            explanation: explanation(
                &baseline,
                climate.as_ref(),
                soil.as_ref(),
                harvest.as_ref(),
                harvest_error.as_deref(),
            ),
            final_statement: final_statement(&baseline),
            final_recommendation: final_recommendation(&baseline, climate.as_ref(), soil.as_ref()),
            component_weights: baseline.weights,
            monthly_climate_breakdown: climate.as_ref().map(|analysis| analysis.months.clone()),
            climate_type: climate.as_ref().map(|analysis| analysis.climate_type),
            climate_type_description: climate
                .as_ref()
                .map(|analysis| analysis.climate_type_description.to_string()),
            dominant_climate_hazard: climate
                .as_ref()
                .map(|analysis| analysis.dominant_hazard.clone()),
            climate_analysis: climate,
            soil_analysis: soil,
            harvest_score: harvest,
            harvest_error,
            alpha: alpha.as_ref().map(|alpha| alpha.alpha),
            alpha_risk: alpha.as_ref().map(|alpha| alpha.risk),
            alpha_tier_label: alpha.as_ref().map(|alpha| alpha.tier_label.to_string()),
            alpha_tier: alpha.as_ref().map(|alpha| alpha.tier),
        }
    }

    fn climate(&self, input: &RiskScoreInput) -> Option<ClimateAnalysis> {
        let (latitude, longitude) = (input.latitude?, input.longitude?);
        let months = crop_cycle(&input.crop_cycle_months);
        let analysis = analyze_climate(
            &self.reference.stations,
            latitude,
            longitude,
            &months,
            &self.config,
        );
        if analysis.is_none() {
            debug!(latitude, longitude, months = months.len(), "climate analysis skipped");
        }
        analysis
    }

    fn soil(&self, input: &RiskScoreInput, activity: &ActivityFactors) -> Option<SoilAnalysis> {
        let (sand, silt, clay) = (input.sand?, input.silt?, input.clay?);
        let Some((composition, renormalized)) = SoilComposition::normalize(sand, silt, clay) else {
            debug!(sand, silt, clay, "soil composition rejected");
            return None;
        };
        Some(analyze_soil(composition, renormalized, activity, &self.config))
    }

    /// `None` when the input carries no harvest fields at all.
    fn harvest(&self, input: &RiskScoreInput) -> Option<Result<HarvestScore, HarvestError>> {
        let trigger = match input.trigger_text.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => match self.parse_trigger(text) {
                Ok(trigger) => Some(trigger),
                Err(error) => {
                    warn!(error = %error, "harvest trigger ignored");
                    None
                }
            },
            _ => None,
        };

        let structured = [
            input.crop_type.is_some(),
            input.province.is_some(),
            input.projected_yield_per_ha.is_some(),
            input.system_or_variety.is_some(),
        ];
        if trigger.is_none() && !structured.contains(&true) {
            return None;
        }

        Some(
            resolve_request(input, trigger.unwrap_or_default()).and_then(|request| {
                calculate_harvest_score(
                    &self.reference.benchmarks,
                    &request,
                    self.config.reference_year,
                )
            }),
        )
    }
}

/// Structured fields win; the trigger fills the gaps; area defaults to 1 ha.
pub(crate) fn resolve_request(
    input: &RiskScoreInput,
    trigger: HarvestTrigger,
) -> Result<HarvestRequest, HarvestError> {
    let non_blank = |value: &Option<String>| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    let crop_type = non_blank(&input.crop_type)
        .or(trigger.crop_type)
        .ok_or(HarvestError::MissingField("a crop type"))?;
    let province = non_blank(&input.province)
        .or(trigger.province)
        .ok_or(HarvestError::MissingField("a province"))?;
    let projected_yield_per_ha = input
        .projected_yield_per_ha
        .or(trigger.projected_yield_per_ha)
        .ok_or(HarvestError::MissingField("a projected yield per hectare"))?;

    Ok(HarvestRequest {
        crop_type,
        province,
        projected_yield_per_ha,
        area_size_ha: input.area_size_ha.or(trigger.area_size_ha).unwrap_or(1.0),
        system_or_variety: non_blank(&input.system_or_variety).or(trigger.system_or_variety),
    })
}

/// Recognised months in order of first appearance, without repeats.
pub(crate) fn crop_cycle(names: &[String]) -> Vec<Month> {
    let mut months = Vec::with_capacity(names.len());
    for name in names {
        match Month::parse(name) {
            Some(month) if !months.contains(&month) => months.push(month),
            Some(_) => {}
            None => debug!(month = %name, "unrecognised crop-cycle month skipped"),
        }
    }
    months
}
