use super::ReferenceDataError;
use serde::{Deserialize, Deserializer, Serialize};
use std::io::Read;

/// Province value that makes a benchmark row apply everywhere.
pub const ALL_PROVINCES: &str = "All Provinces";

/// How much the curators trust a benchmark row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    pub const fn label(self) -> &'static str {
        match self {
            ConfidenceLevel::High => "High",
            ConfidenceLevel::Medium => "Medium",
            ConfidenceLevel::Low => "Low",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" | "med" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

/// Reference minimum yield for a crop / province / farming-system combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropBenchmark {
    pub crop: String,
    /// A single province, a comma-separated group, or [`ALL_PROVINCES`].
    pub province: String,
    pub farming_system: String,
    /// MT/ha. Zero marks the crop as non-viable for the region.
    pub recommended_minimum_yield: f64,
    pub confidence_level: ConfidenceLevel,
    pub justification: Option<String>,
}

impl CropBenchmark {
    pub fn is_all_provinces(&self) -> bool {
        self.province.trim().eq_ignore_ascii_case(ALL_PROVINCES)
    }

    pub fn is_system_catch_all(&self) -> bool {
        let system = self.farming_system.trim().to_ascii_lowercase();
        system.is_empty() || system == "all" || system.starts_with("all ")
    }

    /// Human-readable provenance shown alongside a harvest score.
    pub fn source_label(&self) -> String {
        let base = format!("{} / {} / {}", self.crop, self.province, self.farming_system);
        match &self.justification {
            Some(justification) => format!("{base} ({justification})"),
            None => base,
        }
    }
}

pub(super) fn parse_csv<R: Read>(reader: R) -> Result<Vec<CropBenchmark>, ReferenceDataError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut benchmarks = Vec::new();

    for record in csv_reader.deserialize::<BenchmarkRow>() {
        let row = record?;
        let yield_mt = row.recommended_minimum_yield;
        if !yield_mt.is_finite() || yield_mt < 0.0 {
            return Err(ReferenceDataError::InvalidBenchmark {
                crop: row.crop,
                province: row.province,
                reason: format!(
                    "recommended minimum yield must be a non-negative number, got {yield_mt}"
                ),
            });
        }
        benchmarks.push(CropBenchmark {
            crop: row.crop,
            province: row.province,
            farming_system: row.farming_system,
            recommended_minimum_yield: row.recommended_minimum_yield,
            confidence_level: row.confidence_level,
            justification: row.justification,
        });
    }

    Ok(benchmarks)
}

#[derive(Debug, Deserialize)]
struct BenchmarkRow {
    crop: String,
    province: String,
    farming_system: String,
    recommended_minimum_yield: f64,
    #[serde(deserialize_with = "confidence_from_str")]
    confidence_level: ConfidenceLevel,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    justification: Option<String>,
}

fn confidence_from_str<'de, D>(deserializer: D) -> Result<ConfidenceLevel, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    ConfidenceLevel::parse(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!(
            "unknown confidence level '{raw}', expected High, Medium or Low"
        ))
    })
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn row(
    crop: &str,
    province: &str,
    farming_system: &str,
    recommended_minimum_yield: f64,
    confidence_level: ConfidenceLevel,
    justification: Option<&str>,
) -> CropBenchmark {
    CropBenchmark {
        crop: crop.to_string(),
        province: province.to_string(),
        farming_system: farming_system.to_string(),
        recommended_minimum_yield,
        confidence_level,
        justification: justification.map(str::to_string),
    }
}

pub(super) fn builtin() -> Vec<CropBenchmark> {
    use ConfidenceLevel::{High, Low, Medium};

    const PALAY: &str = "Palay (Rice)";

    vec![
        row(PALAY, "Laguna", "Irrigated", 3.99, High, Some("PSA 2023 palay production survey, Laguna irrigated average")),
        row(PALAY, "Laguna", "Rainfed", 3.10, Medium, Some("PSA 2022 palay production survey, Laguna rainfed average")),
        row(PALAY, "Nueva Ecija", "Irrigated", 4.60, High, Some("PSA 2023 palay production survey, Nueva Ecija irrigated average")),
        row(PALAY, "Nueva Ecija", "Rainfed", 3.40, Medium, Some("PSA 2021 palay production survey, Nueva Ecija rainfed average")),
        row(PALAY, "Nueva Ecija", "Hybrid", 6.00, Medium, Some("PhilRice 2020 hybrid rice techno-demo results")),
        row(PALAY, "Isabela", "Irrigated", 4.50, High, Some("PSA 2023 palay production survey, Isabela irrigated average")),
        row(PALAY, "Iloilo", "Irrigated", 4.10, Medium, Some("DA Region VI 2019 yield monitoring")),
        row(PALAY, "Camarines Sur, Albay, Sorsogon, Catanduanes", "Irrigated", 3.70, Medium, Some("Bicol regional irrigated average, PSA 2018")),
        row(PALAY, "Bukidnon, Davao del Sur, Davao del Norte", "Irrigated", 4.20, Medium, Some("Mindanao irrigated average, PSA 2020")),
        row(PALAY, ALL_PROVINCES, "Irrigated", 4.00, Medium, Some("National irrigated average, PSA 2022")),
        row(PALAY, ALL_PROVINCES, "Rainfed", 3.00, Low, Some("National rainfed average, PSA 2016")),
        row(PALAY, ALL_PROVINCES, "Inbred", 3.80, Low, Some("PhilRice inbred variety performance guide")),
        row("Corn", "Isabela", "Yellow Corn", 5.50, High, Some("PSA 2023 corn production survey, Isabela yellow corn")),
        row("Corn", "Bukidnon", "Yellow Corn", 5.20, Medium, Some("PSA 2021 corn production survey, Bukidnon yellow corn")),
        row("Corn", "Pangasinan", "White Corn", 2.80, Medium, Some("PSA 2019 corn production survey, Pangasinan white corn")),
        row("Corn", ALL_PROVINCES, "Yellow Corn", 4.20, Medium, Some("National yellow corn average, PSA 2022")),
        row("Corn", ALL_PROVINCES, "White Corn", 1.90, Low, Some("National white corn average, PSA 2014")),
        row("Potato", "Benguet", "Highland", 17.00, Medium, Some("BPI Benguet highland potato trials 2020")),
        row("Potato", ALL_PROVINCES, "All Systems", 0.00, Low, Some("Lowland potato is not viable: tuber set fails under sustained lowland heat")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_rows_with_optional_justification() {
        let csv = "crop,province,farming_system,recommended_minimum_yield,confidence_level,justification\n\
Palay (Rice),Laguna,Irrigated,3.99,high,PSA 2023\n\
Corn,\"Isabela, Cagayan\",Yellow Corn,5.5,Medium,\n";
        let rows = parse_csv(Cursor::new(csv)).expect("parse benchmarks");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].confidence_level, ConfidenceLevel::High);
        assert_eq!(rows[0].justification.as_deref(), Some("PSA 2023"));
        assert_eq!(rows[1].province, "Isabela, Cagayan");
        assert!(rows[1].justification.is_none());
    }

    #[test]
    fn rejects_unknown_confidence_level() {
        let csv = "crop,province,farming_system,recommended_minimum_yield,confidence_level,justification\n\
Corn,Isabela,Yellow Corn,5.5,Certain,\n";
        assert!(parse_csv(Cursor::new(csv)).is_err());
    }

    #[test]
    fn rejects_non_finite_or_negative_yield() {
        for value in ["NaN", "inf", "-1.5"] {
            let csv = format!(
                "crop,province,farming_system,recommended_minimum_yield,confidence_level,justification\n\
Palay (Rice),Laguna,Irrigated,{value},High,PSA 2023\n"
            );
            match parse_csv(Cursor::new(csv)) {
                Err(ReferenceDataError::InvalidBenchmark { crop, province, .. }) => {
                    assert_eq!(crop, "Palay (Rice)");
                    assert_eq!(province, "Laguna");
                }
                other => panic!("expected invalid benchmark for {value}, got {other:?}"),
            }
        }
    }

    #[test]
    fn catch_all_detection_is_case_insensitive() {
        let benchmark = row("Potato", "all provinces", "ALL SYSTEMS", 0.0, ConfidenceLevel::Low, None);
        assert!(benchmark.is_all_provinces());
        assert!(benchmark.is_system_catch_all());
    }
}
