use agscore::config::ReferenceConfig;
use agscore::error::AppError;
use agscore::scoring::EngineConfig;
use agscore::{ReferenceData, RiskScoringEngine};
use metrics_exporter_prometheus::PrometheusHandle;
use std::io::Read;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Loads the reference tables and wraps them in a shareable engine.
pub(crate) fn build_engine(config: &ReferenceConfig) -> Result<Arc<RiskScoringEngine>, AppError> {
    let reference = ReferenceData::load(config)?;
    info!(reference_year = config.reference_year, "scoring engine ready");

    let engine_config = EngineConfig::default().with_reference_year(config.reference_year);
    Ok(Arc::new(RiskScoringEngine::new(
        Arc::new(reference),
        engine_config,
    )))
}

/// Reads a file, or stdin when the path is `-`.
pub(crate) fn read_source(path: &Path) -> Result<String, AppError> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        return Ok(buffer);
    }
    Ok(std::fs::read_to_string(path)?)
}
