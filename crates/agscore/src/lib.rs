//! Agricultural baseline risk scoring.
//!
//! Turns soil composition, a farm coordinate with its crop calendar, and a
//! projected yield into one weighted 10–1000 risk score with auditable
//! sub-scores. The engine is a pure function of its input plus the
//! read-only [`reference::ReferenceData`] tables it is constructed with.

pub mod config;
pub mod error;
pub mod reference;
pub mod scoring;
pub mod telemetry;

pub use reference::ReferenceData;
pub use scoring::{RiskScoreInput, RiskScoreResult, RiskScoringEngine};
