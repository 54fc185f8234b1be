//! Cascading benchmark lookup: exact province, then province groups, then
//! the "All Provinces" catch-all.

use serde::Serialize;
use std::cmp::Ordering;

use crate::reference::CropBenchmark;
use crate::scoring::crops::normalize_key;

/// How specifically the matched row's province fits the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SpatialMatch {
    Exact,
    Grouped,
    AllProvinces,
}

impl SpatialMatch {
    pub const fn factor(self) -> f64 {
        match self {
            SpatialMatch::Exact => 1.00,
            SpatialMatch::Grouped => 0.98,
            SpatialMatch::AllProvinces => 0.95,
        }
    }
}

/// How closely the matched row's farming system fits the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SystemMatch {
    Exact,
    Close,
    None,
}

impl SystemMatch {
    pub const fn factor(self) -> f64 {
        match self {
            SystemMatch::Exact => 1.00,
            SystemMatch::Close => 0.95,
            SystemMatch::None => 0.88,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchmarkMatch<'a> {
    pub benchmark: &'a CropBenchmark,
    pub spatial: SpatialMatch,
    pub system: SystemMatch,
}

struct ProvinceQuery {
    whole: String,
    candidates: Vec<String>,
}

impl ProvinceQuery {
    fn new(province: &str) -> Self {
        let mut candidates: Vec<String> = Vec::new();
        for part in province.split(',').map(normalize_key) {
            if !part.is_empty() && !candidates.contains(&part) {
                candidates.push(part);
            }
        }
        Self {
            whole: normalize_key(province),
            candidates,
        }
    }

    fn is_exact(&self, row: &CropBenchmark) -> bool {
        let key = normalize_key(&row.province);
        key == self.whole || self.candidates.contains(&key)
    }

    fn is_grouped(&self, row: &CropBenchmark) -> bool {
        row.province.contains(',')
            && row
                .province
                .split(',')
                .map(normalize_key)
                .any(|member| self.candidates.contains(&member))
    }
}

type LevelPredicate = fn(&ProvinceQuery, &CropBenchmark) -> bool;

const CASCADE: [(SpatialMatch, LevelPredicate); 3] = [
    (SpatialMatch::Exact, |query, row| {
        !row.is_all_provinces() && query.is_exact(row)
    }),
    (SpatialMatch::Grouped, |query, row| {
        !row.is_all_provinces() && query.is_grouped(row)
    }),
    (SpatialMatch::AllProvinces, |_, row| row.is_all_provinces()),
];

/// Finds the benchmark for `crop` (already canonical) in `province`.
///
/// Within a level, higher confidence wins and then the larger (stricter)
/// yield.
pub fn find_benchmark<'a>(
    benchmarks: &'a [CropBenchmark],
    crop: &str,
    province: &str,
    system: Option<&str>,
) -> Option<BenchmarkMatch<'a>> {
    let crop_key = normalize_key(crop);
    if crop_key.is_empty() {
        return None;
    }
    let query = ProvinceQuery::new(province);
    let system_key = system.map(normalize_key).filter(|key| !key.is_empty());

    let crop_rows: Vec<&CropBenchmark> = benchmarks
        .iter()
        .filter(|row| normalize_key(&row.crop).contains(&crop_key))
        .collect();

    CASCADE.iter().find_map(|(spatial, predicate)| {
        let level: Vec<&CropBenchmark> = crop_rows
            .iter()
            .copied()
            .filter(|row| predicate(&query, row))
            .collect();
        if level.is_empty() {
            return None;
        }

        let (candidates, system_match) = narrow_by_system(&level, system_key.as_deref());
        strongest(&candidates).map(|benchmark| BenchmarkMatch {
            benchmark,
            spatial: *spatial,
            system: system_match,
        })
    })
}

fn narrow_by_system<'a>(
    level: &[&'a CropBenchmark],
    system: Option<&str>,
) -> (Vec<&'a CropBenchmark>, SystemMatch) {
    let Some(system) = system else {
        return (level.to_vec(), SystemMatch::None);
    };

    let specific = || level.iter().copied().filter(|row| !row.is_system_catch_all());

    let exact: Vec<_> = specific()
        .filter(|row| normalize_key(&row.farming_system) == system)
        .collect();
    if !exact.is_empty() {
        return (exact, SystemMatch::Exact);
    }

    let close: Vec<_> = specific()
        .filter(|row| {
            let key = normalize_key(&row.farming_system);
            key.contains(system) || system.contains(key.as_str())
        })
        .collect();
    if !close.is_empty() {
        return (close, SystemMatch::Close);
    }

    (level.to_vec(), SystemMatch::None)
}

fn strongest<'a>(rows: &[&'a CropBenchmark]) -> Option<&'a CropBenchmark> {
    rows.iter().copied().max_by(|a, b| {
        a.confidence_level
            .cmp(&b.confidence_level)
            .then_with(|| {
                a.recommended_minimum_yield
                    .partial_cmp(&b.recommended_minimum_yield)
                    .unwrap_or(Ordering::Equal)
            })
    })
}
