//! Modified Coronas climate types, decided by ordered heuristics over a
//! twelve-month rainfall series.

use serde::Serialize;
use tracing::debug;

use super::interpolation::InterpolatedSeries;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ClimateType {
    #[serde(rename = "Type I")]
    TypeI,
    #[serde(rename = "Type II")]
    TypeII,
    #[serde(rename = "Type III")]
    TypeIII,
    #[serde(rename = "Type IV")]
    TypeIV,
    Unknown,
}

impl ClimateType {
    pub const fn label(self) -> &'static str {
        match self {
            ClimateType::TypeI => "Type I",
            ClimateType::TypeII => "Type II",
            ClimateType::TypeIII => "Type III",
            ClimateType::TypeIV => "Type IV",
            ClimateType::Unknown => "Unknown",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            ClimateType::TypeI => {
                "Two pronounced seasons: dry from November to April, wet during the rest of the year."
            }
            ClimateType::TypeII => {
                "No dry season, with a very pronounced maximum rain period from November to January."
            }
            ClimateType::TypeIII => {
                "Seasons not very pronounced: relatively dry from November to April, wet during the rest of the year."
            }
            ClimateType::TypeIV => "Rainfall more or less evenly distributed throughout the year.",
            ClimateType::Unknown => {
                "Seasonal pattern could not be classified from the nearby station records."
            }
        }
    }
}

/// November through April, zero-based.
const DRY_SEASON: [usize; 6] = [10, 11, 0, 1, 2, 3];
/// November, December, January.
const WET_PEAK: [usize; 3] = [10, 11, 0];

pub(crate) struct ClimateRule {
    pub(crate) name: &'static str,
    pub(crate) climate_type: ClimateType,
    pub(crate) matches: fn(&InterpolatedSeries) -> bool,
}

fn count_months(months: &[usize], predicate: impl Fn(usize) -> bool) -> usize {
    months.iter().filter(|month| predicate(**month)).count()
}

fn all_months() -> [usize; 12] {
    std::array::from_fn(|month| month)
}

pub(crate) const PRIMARY_RULES: &[ClimateRule] = &[
    ClimateRule {
        name: "pronounced dry season",
        climate_type: ClimateType::TypeI,
        matches: |series| count_months(&DRY_SEASON, |m| series.rainfall[m] <= 150.0) >= 5,
    },
    ClimateRule {
        name: "november-january rain peak",
        climate_type: ClimateType::TypeII,
        matches: |series| count_months(&WET_PEAK, |m| series.rainfall[m] > 450.0) >= 2,
    },
    ClimateRule {
        name: "short dry spell",
        climate_type: ClimateType::TypeIII,
        matches: |series| {
            let dry = count_months(&all_months(), |m| {
                series.rainfall[m] <= 175.0 && series.rainy_days[m] <= 12.0
            });
            (1..=3).contains(&dry)
        },
    },
    ClimateRule {
        name: "even distribution",
        climate_type: ClimateType::TypeIV,
        matches: |series| {
            count_months(&all_months(), |m| (100.0..=700.0).contains(&series.rainfall[m])) >= 10
        },
    },
];

pub(crate) const FALLBACK_RULES: &[ClimateRule] = &[
    ClimateRule {
        name: "wettest month in november-january",
        climate_type: ClimateType::TypeII,
        matches: |series| {
            let wettest = all_months()
                .into_iter()
                .fold(0, |best, m| if series.rainfall[m] > series.rainfall[best] { m } else { best });
            WET_PEAK.contains(&wettest)
        },
    },
    ClimateRule {
        name: "partial dry season",
        climate_type: ClimateType::TypeIII,
        matches: |series| count_months(&DRY_SEASON, |m| series.rainfall[m] <= 150.0) >= 3,
    },
    ClimateRule {
        name: "mostly even distribution",
        climate_type: ClimateType::TypeIV,
        matches: |series| {
            count_months(&all_months(), |m| (100.0..=700.0).contains(&series.rainfall[m])) >= 8
        },
    },
];

/// First matching primary rule, then first matching fallback, else Unknown.
pub fn classify_climate(series: &InterpolatedSeries) -> ClimateType {
    match PRIMARY_RULES
        .iter()
        .chain(FALLBACK_RULES)
        .find(|rule| (rule.matches)(series))
    {
        Some(rule) => {
            debug!(
                rule = rule.name,
                climate_type = rule.climate_type.label(),
                "climate rule matched"
            );
            rule.climate_type
        }
        None => ClimateType::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(rainfall: [f64; 12], rainy_days: [f64; 12]) -> InterpolatedSeries {
        InterpolatedSeries {
            rainfall,
            rainy_days,
            humidity: [80.0; 12],
            stations: Vec::new(),
        }
    }

    #[test]
    fn primary_rules_cover_each_type() {
        let type_i = series(
            [20.0, 10.0, 20.0, 30.0, 160.0, 270.0, 430.0, 490.0, 420.0, 240.0, 120.0, 70.0],
            [4.0, 3.0, 3.0, 4.0, 12.0, 17.0, 22.0, 23.0, 21.0, 15.0, 12.0, 7.0],
        );
        let type_ii = series(
            [520.0, 230.0, 190.0, 160.0, 180.0, 200.0, 270.0, 240.0, 270.0, 360.0, 590.0, 610.0],
            [21.0; 12],
        );
        let type_iii = series(
            [190.0, 80.0, 60.0, 55.0, 140.0, 160.0, 200.0, 240.0, 220.0, 260.0, 230.0, 180.0],
            [13.0, 8.0, 6.0, 5.0, 13.0, 13.0, 14.0, 16.0, 15.0, 15.0, 14.0, 13.0],
        );
        let type_iv = series([200.0; 12], [16.0; 12]);

        assert_eq!(classify_climate(&type_i), ClimateType::TypeI);
        assert_eq!(classify_climate(&type_ii), ClimateType::TypeII);
        assert_eq!(classify_climate(&type_iii), ClimateType::TypeIII);
        assert_eq!(classify_climate(&type_iv), ClimateType::TypeIV);
    }

    #[test]
    fn dry_season_rule_outranks_even_distribution() {
        // Satisfies both the Type I and Type IV predicates.
        let rainfall = [100.0, 100.0, 100.0, 100.0, 200.0, 200.0, 200.0, 200.0, 200.0, 200.0, 100.0, 100.0];
        let overlap = series(rainfall, [16.0; 12]);
        assert!((PRIMARY_RULES[3].matches)(&overlap));
        assert_eq!(classify_climate(&overlap), ClimateType::TypeI);
    }

    #[test]
    fn fallback_uses_wettest_month() {
        // Too many dry months for Type III, too few wet-peak months for Type II.
        let rainfall = [900.0, 50.0, 50.0, 50.0, 50.0, 300.0, 300.0, 300.0, 300.0, 300.0, 200.0, 200.0];
        let rainy_days = [20.0, 5.0, 5.0, 5.0, 5.0, 15.0, 15.0, 15.0, 15.0, 15.0, 15.0, 15.0];
        assert_eq!(classify_climate(&series(rainfall, rainy_days)), ClimateType::TypeII);
    }

    #[test]
    fn unclassifiable_series_is_unknown() {
        // Saturated February to October with a moderate, non-peaking November to January.
        let mut rainfall = [800.0; 12];
        for month in WET_PEAK {
            rainfall[month] = 300.0;
        }
        assert_eq!(classify_climate(&series(rainfall, [25.0; 12])), ClimateType::Unknown);
    }

    #[test]
    fn rule_names_are_unique() {
        let mut names: Vec<_> = PRIMARY_RULES
            .iter()
            .chain(FALLBACK_RULES)
            .map(|rule| rule.name)
            .collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), PRIMARY_RULES.len() + FALLBACK_RULES.len());
    }
}
