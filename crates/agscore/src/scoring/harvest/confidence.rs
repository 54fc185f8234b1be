use serde::Serialize;

use super::benchmark::BenchmarkMatch;
use crate::reference::ConfidenceLevel;

const MIN_WEIGHT: f64 = 0.50;
const MAX_WEIGHT: f64 = 1.00;
/// Recency factor when the justification carries no year.
const UNDATED_RECENCY: f64 = 0.95;
/// Reserved for sample-size weighting; every benchmark counts fully today.
const SAMPLE_FACTOR: f64 = 1.0;

/// Every multiplier behind a harvest confidence weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceBreakdown {
    pub base: f64,
    pub spatial: f64,
    pub system: f64,
    pub recency: f64,
    pub sample: f64,
    pub benchmark_year: Option<i32>,
    pub years_since: Option<i32>,
    pub weight: f64,
}

pub fn base_factor(level: ConfidenceLevel) -> f64 {
    match level {
        ConfidenceLevel::High => 1.00,
        ConfidenceLevel::Medium => 0.85,
        ConfidenceLevel::Low => 0.70,
    }
}

pub fn recency_factor(years_since: i32) -> f64 {
    match years_since {
        y if y <= 2 => 1.00,
        y if y <= 4 => 0.95,
        y if y <= 6 => 0.90,
        y if y <= 9 => 0.85,
        _ => 0.80,
    }
}

/// Latest standalone four-digit year in 1950–2099.
pub fn latest_year(text: &str) -> Option<i32> {
    let bytes = text.as_bytes();
    let mut latest = None;
    let mut start = 0;

    while start < bytes.len() {
        if !bytes[start].is_ascii_digit() {
            start += 1;
            continue;
        }
        let mut end = start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end - start == 4 {
            if let Ok(year) = text[start..end].parse::<i32>() {
                if (1950..=2099).contains(&year) {
                    latest = latest.max(Some(year));
                }
            }
        }
        start = end;
    }

    latest
}

pub fn confidence_weight(matched: &BenchmarkMatch<'_>, reference_year: i32) -> ConfidenceBreakdown {
    let base = base_factor(matched.benchmark.confidence_level);
    let spatial = matched.spatial.factor();
    let system = matched.system.factor();

    let benchmark_year = matched
        .benchmark
        .justification
        .as_deref()
        .and_then(latest_year);
    let years_since = benchmark_year.map(|year| (reference_year - year).max(0));
    let recency = years_since.map(recency_factor).unwrap_or(UNDATED_RECENCY);

    let weight = (base * spatial * system * recency * SAMPLE_FACTOR).clamp(MIN_WEIGHT, MAX_WEIGHT);

    ConfidenceBreakdown {
        base,
        spatial,
        system,
        recency,
        sample: SAMPLE_FACTOR,
        benchmark_year,
        years_since,
        weight,
    }
}
