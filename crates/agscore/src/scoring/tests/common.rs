use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::reference::{ConfidenceLevel, CropBenchmark, ReferenceData, WeatherStation};
use crate::scoring::{risk_router, EngineConfig, RiskScoreInput, RiskScoringEngine};

pub(super) const REFERENCE_YEAR: i32 = 2025;

/// Los Banos, Laguna.
pub(super) const LAGUNA: (f64, f64) = (14.167, 121.250);

pub(super) fn engine_config() -> EngineConfig {
    EngineConfig::default().with_reference_year(REFERENCE_YEAR)
}

pub(super) fn engine() -> RiskScoringEngine {
    RiskScoringEngine::new(Arc::new(ReferenceData::builtin()), engine_config())
}

pub(super) fn engine_with(reference: ReferenceData) -> RiskScoringEngine {
    RiskScoringEngine::new(Arc::new(reference), engine_config())
}

pub(super) fn risk_router_for_tests() -> axum::Router {
    risk_router(Arc::new(engine()))
}

pub(super) fn months(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

pub(super) fn soil_input(sand: f64, silt: f64, clay: f64) -> RiskScoreInput {
    RiskScoreInput {
        sand: Some(sand),
        silt: Some(silt),
        clay: Some(clay),
        ..RiskScoreInput::default()
    }
}

pub(super) fn climate_input(latitude: f64, longitude: f64, cycle: &[&str]) -> RiskScoreInput {
    RiskScoreInput {
        latitude: Some(latitude),
        longitude: Some(longitude),
        crop_cycle_months: months(cycle),
        ..RiskScoreInput::default()
    }
}

pub(super) fn laguna_palay_input(projected: f64) -> RiskScoreInput {
    RiskScoreInput {
        crop_type: Some("Palay (Rice)".to_string()),
        province: Some("Laguna, laguna".to_string()),
        system_or_variety: Some("Irrigated".to_string()),
        projected_yield_per_ha: Some(projected),
        area_size_ha: Some(1.0),
        ..RiskScoreInput::default()
    }
}

/// Climate, soil and harvest all present for a wet-season Laguna palay crop.
pub(super) fn full_input() -> RiskScoreInput {
    RiskScoreInput {
        sand: Some(40.0),
        silt: Some(40.0),
        clay: Some(20.0),
        latitude: Some(LAGUNA.0),
        longitude: Some(LAGUNA.1),
        crop_cycle_months: months(&["Jun", "Jul", "Aug", "Sep"]),
        ..laguna_palay_input(4.2)
    }
}

pub(super) fn benchmark(
    crop: &str,
    province: &str,
    system: &str,
    yield_mt: f64,
    confidence: ConfidenceLevel,
    justification: Option<&str>,
) -> CropBenchmark {
    CropBenchmark {
        crop: crop.to_string(),
        province: province.to_string(),
        farming_system: system.to_string(),
        recommended_minimum_yield: yield_mt,
        confidence_level: confidence,
        justification: justification.map(str::to_string),
    }
}

pub(super) fn uniform_station(id: &str, latitude: f64, longitude: f64) -> WeatherStation {
    WeatherStation {
        id: id.to_string(),
        name: format!("Station {id}"),
        latitude,
        longitude,
        rainfall: [200.0; 12],
        rainy_days: [14.0; 12],
        humidity: [82.0; 12],
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
