use crate::infra::{build_engine, read_source};
use agscore::config::AppConfig;
use agscore::error::AppError;
use agscore::{RiskScoreInput, RiskScoreResult, RiskScoringEngine};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON request body; `-` reads from stdin
    #[arg(long, default_value = "-")]
    pub(crate) input: PathBuf,
    /// Print compact JSON instead of the pretty form
    #[arg(long)]
    pub(crate) compact: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ParseArgs {
    /// The command text, e.g. `harvest score palay irrigated 5.2 mt/ha nueva ecija`
    #[arg(required = true, num_args = 1..)]
    pub(crate) text: Vec<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the benchmark reference year
    #[arg(long)]
    pub(crate) reference_year: Option<i32>,
    /// Print each full result as JSON after its summary
    #[arg(long)]
    pub(crate) json: bool,
}

fn load_engine(reference_year: Option<i32>) -> Result<std::sync::Arc<RiskScoringEngine>, AppError> {
    let mut config = AppConfig::load()?;
    if let Some(year) = reference_year {
        config.reference.reference_year = year;
    }
    build_engine(&config.reference)
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> Result<(), AppError> {
    let rendered = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{rendered}");
    Ok(())
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let engine = load_engine(None)?;
    let raw = read_source(&args.input)?;
    let input: RiskScoreInput = serde_json::from_str(&raw)?;
    print_json(&engine.score(&input), args.compact)
}

pub(crate) fn run_parse(args: ParseArgs) -> Result<(), AppError> {
    let engine = load_engine(None)?;
    let trigger = engine.parse_trigger(&args.text.join(" "))?;
    print_json(&trigger, false)
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let engine = load_engine(args.reference_year)?;

    println!("AgScore baseline risk demo");
    println!(
        "Reference data: {} weather stations, {} crop benchmarks (reference year {})",
        engine.reference().stations.len(),
        engine.reference().benchmarks.len(),
        engine.config().reference_year
    );

    for (title, input) in demo_requests() {
        let result = engine.score(&input);
        println!("\n{title}");
        render_result(&result);
        if args.json {
            print_json(&result, false)?;
        }
    }

    Ok(())
}

fn render_result(result: &RiskScoreResult) {
    println!(
        "- Baseline {}/1000 | {} (tier {})",
        result.baseline_score, result.qualitative_risk, result.qualitative_tier
    );

    let weights = &result.component_weights;
    println!(
        "- Weights: climate {:.0}% | soil {:.0}% | harvest {:.0}%",
        weights.climate * 100.0,
        weights.soil * 100.0,
        weights.harvest * 100.0
    );

    if let (Some(score), Some(climate_type)) = (result.climate_score, result.climate_type) {
        println!("- Climate {score}/1000 ({})", climate_type.label());
        if let Some(hazard) = &result.dominant_climate_hazard {
            println!("  {hazard}");
        }
    }
    if let Some(soil) = &result.soil_analysis {
        println!(
            "- Soil {}/1000 ({}, dominant {})",
            soil.score,
            soil.texture.label(),
            soil.dominant_risk_label
        );
    }
    if let Some(harvest) = &result.harvest_score {
        println!(
            "- Harvest {}/1000 ({}) vs {:.2} MT/ha benchmark, confidence weight {:.2}",
            harvest.score, harvest.tier_label, harvest.benchmark_yield, harvest.weight
        );
    }
    if let Some(error) = &result.harvest_error {
        println!("- Harvest skipped: {error}");
    }
    if let (Some(alpha), Some(label)) = (result.alpha, &result.alpha_tier_label) {
        println!("- Alpha {alpha:+} ({label})");
    }
    println!("  {}", result.final_recommendation);
}

fn cycle(months: &[&str]) -> Vec<String> {
    months.iter().map(|month| month.to_string()).collect()
}

pub(crate) fn demo_requests() -> Vec<(&'static str, RiskScoreInput)> {
    vec![
        (
            "Wet-season palay in Laguna",
            RiskScoreInput {
                sand: Some(40.0),
                silt: Some(40.0),
                clay: Some(20.0),
                latitude: Some(14.167),
                longitude: Some(121.250),
                crop_cycle_months: cycle(&["Jun", "Jul", "Aug", "Sep"]),
                crop_type: Some("Palay (Rice)".to_string()),
                province: Some("Laguna".to_string()),
                system_or_variety: Some("Irrigated".to_string()),
                projected_yield_per_ha: Some(4.2),
                area_size_ha: Some(2.0),
                ..RiskScoreInput::default()
            },
        ),
        (
            "Dry-season corn in Isabela from a chat trigger",
            RiskScoreInput {
                sand: Some(55.0),
                silt: Some(25.0),
                clay: Some(20.0),
                latitude: Some(17.0),
                longitude: Some(121.8),
                crop_cycle_months: cycle(&["Feb", "Mar", "Apr", "May"]),
                trigger_text: Some(
                    "harvest score corn yellow corn 5.1 t/ha isabela area 3".to_string(),
                ),
                ..RiskScoreInput::default()
            },
        ),
        (
            "Lowland potato",
            RiskScoreInput {
                crop_type: Some("Potato".to_string()),
                province: Some("Iloilo".to_string()),
                projected_yield_per_ha: Some(12.0),
                ..RiskScoreInput::default()
            },
        ),
        (
            "Climate only, Eastern Visayas typhoon belt",
            RiskScoreInput {
                latitude: Some(13.4),
                longitude: Some(124.1),
                crop_cycle_months: cycle(&["Oct", "Nov", "Dec"]),
                ..RiskScoreInput::default()
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use agscore::scoring::EngineConfig;
    use agscore::ReferenceData;
    use std::sync::Arc;

    #[test]
    fn demo_requests_exercise_every_path() {
        let engine = RiskScoringEngine::new(
            Arc::new(ReferenceData::builtin()),
            EngineConfig::default().with_reference_year(2025),
        );
        let results: Vec<RiskScoreResult> = demo_requests()
            .iter()
            .map(|(_, input)| engine.score(input))
            .collect();

        assert!(results[0].alpha.is_some());
        assert!(results[1].harvest_score.is_some());
        assert!(results[2].harvest_error.is_some());
        assert!(results[3].soil_score.is_none());
        assert_eq!(Some(results[3].baseline_score), results[3].climate_score);
    }
}
