//! Read-only reference tables consumed by the scoring engine.
//!
//! Both tables are loaded once at process start and shared behind an `Arc`;
//! nothing in the engine mutates them.

mod benchmarks;
mod stations;

pub use benchmarks::{ConfidenceLevel, CropBenchmark, ALL_PROVINCES};
pub use stations::WeatherStation;

use crate::config::ReferenceConfig;
use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Weather stations and crop benchmarks injected into the engine.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub stations: Vec<WeatherStation>,
    pub benchmarks: Vec<CropBenchmark>,
}

impl ReferenceData {
    pub fn new(stations: Vec<WeatherStation>, benchmarks: Vec<CropBenchmark>) -> Self {
        Self {
            stations,
            benchmarks,
        }
    }

    /// Tables compiled into the crate.
    pub fn builtin() -> Self {
        Self::new(stations::builtin(), benchmarks::builtin())
    }

    /// Builtin tables, each replaced by its CSV file when one is configured.
    pub fn load(config: &ReferenceConfig) -> Result<Self, ReferenceDataError> {
        let stations = match &config.stations_csv {
            Some(path) => Self::stations_from_path(path)?,
            None => stations::builtin(),
        };
        let benchmarks = match &config.benchmarks_csv {
            Some(path) => Self::benchmarks_from_path(path)?,
            None => benchmarks::builtin(),
        };

        info!(
            stations = stations.len(),
            benchmarks = benchmarks.len(),
            "reference data loaded"
        );

        Ok(Self::new(stations, benchmarks))
    }

    pub fn stations_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<WeatherStation>, ReferenceDataError> {
        let file = std::fs::File::open(path)?;
        Self::stations_from_reader(file)
    }

    pub fn stations_from_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<WeatherStation>, ReferenceDataError> {
        let stations = stations::parse_csv(reader)?;
        if stations.is_empty() {
            return Err(ReferenceDataError::EmptyTable("weather stations"));
        }
        Ok(stations)
    }

    pub fn benchmarks_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<CropBenchmark>, ReferenceDataError> {
        let file = std::fs::File::open(path)?;
        Self::benchmarks_from_reader(file)
    }

    pub fn benchmarks_from_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<CropBenchmark>, ReferenceDataError> {
        let benchmarks = benchmarks::parse_csv(reader)?;
        if benchmarks.is_empty() {
            return Err(ReferenceDataError::EmptyTable("crop benchmarks"));
        }
        Ok(benchmarks)
    }

    /// Distinct farming systems/varieties, excluding the "All ..." catch-alls.
    pub fn farming_systems(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        self.benchmarks
            .iter()
            .filter(|benchmark| !benchmark.is_system_catch_all())
            .filter(|benchmark| seen.insert(benchmark.farming_system.to_ascii_lowercase()))
            .map(|benchmark| benchmark.farming_system.clone())
            .collect()
    }
}

/// Failure to load or validate a reference table.
#[derive(Debug, thiserror::Error)]
pub enum ReferenceDataError {
    #[error("failed to read reference table: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid reference CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid weather station '{station}': {reason}")]
    InvalidStation { station: String, reason: String },
    #[error("invalid benchmark for {crop} in {province}: {reason}")]
    InvalidBenchmark {
        crop: String,
        province: String,
        reason: String,
    },
    #[error("reference table '{0}' is empty")]
    EmptyTable(&'static str),
}
