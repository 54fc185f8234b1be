use crate::scoring::Month;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;

use super::ReferenceDataError;

/// Climatological normals for one weather station, indexed January..December.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherStation {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Mean monthly rainfall, mm.
    pub rainfall: [f64; 12],
    /// Mean count of rainy days per month.
    pub rainy_days: [f64; 12],
    /// Mean relative humidity, %.
    pub humidity: [f64; 12],
}

#[derive(Debug, Deserialize)]
struct StationMonthRow {
    station_id: String,
    station_name: String,
    latitude: f64,
    longitude: f64,
    month: String,
    rainfall_mm: f64,
    rainy_days: f64,
    humidity_pct: f64,
}

#[derive(Default)]
struct PartialStation {
    name: String,
    latitude: f64,
    longitude: f64,
    rainfall: [Option<f64>; 12],
    rainy_days: [Option<f64>; 12],
    humidity: [Option<f64>; 12],
}

pub(super) fn parse_csv<R: Read>(reader: R) -> Result<Vec<WeatherStation>, ReferenceDataError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut partials: BTreeMap<String, PartialStation> = BTreeMap::new();

    for record in csv_reader.deserialize::<StationMonthRow>() {
        let row = record?;
        let invalid = |reason: String| ReferenceDataError::InvalidStation {
            station: row.station_id.clone(),
            reason,
        };

        let month = Month::parse(&row.month)
            .ok_or_else(|| invalid(format!("unknown month '{}'", row.month)))?;
        if !(-90.0..=90.0).contains(&row.latitude) || !(-180.0..=180.0).contains(&row.longitude) {
            return Err(invalid(format!(
                "coordinates ({}, {}) out of range",
                row.latitude, row.longitude
            )));
        }
        if [row.rainfall_mm, row.rainy_days, row.humidity_pct]
            .iter()
            .any(|value| !value.is_finite() || *value < 0.0)
        {
            return Err(invalid(format!(
                "negative or non-finite normals for {}",
                month.label()
            )));
        }

        let entry = partials.entry(row.station_id.clone()).or_default();
        let index = month.index();
        if entry.rainfall[index].is_some() {
            return Err(invalid(format!("{} listed more than once", month.label())));
        }
        entry.name = row.station_name.clone();
        entry.latitude = row.latitude;
        entry.longitude = row.longitude;
        entry.rainfall[index] = Some(row.rainfall_mm);
        entry.rainy_days[index] = Some(row.rainy_days);
        entry.humidity[index] = Some(row.humidity_pct);
    }

    partials
        .into_iter()
        .map(|(id, partial)| {
            let complete = |series: [Option<f64>; 12]| -> Option<[f64; 12]> {
                let mut values = [0.0; 12];
                for (slot, value) in values.iter_mut().zip(series) {
                    *slot = value?;
                }
                Some(values)
            };

            match (
                complete(partial.rainfall),
                complete(partial.rainy_days),
                complete(partial.humidity),
            ) {
                (Some(rainfall), Some(rainy_days), Some(humidity)) => Ok(WeatherStation {
                    id,
                    name: partial.name,
                    latitude: partial.latitude,
                    longitude: partial.longitude,
                    rainfall,
                    rainy_days,
                    humidity,
                }),
                _ => Err(ReferenceDataError::InvalidStation {
                    station: id,
                    reason: "all twelve months are required".to_string(),
                }),
            }
        })
        .collect()
}

fn station(
    id: &str,
    name: &str,
    latitude: f64,
    longitude: f64,
    rainfall: [f64; 12],
    rainy_days: [f64; 12],
    humidity: [f64; 12],
) -> WeatherStation {
    WeatherStation {
        id: id.to_string(),
        name: name.to_string(),
        latitude,
        longitude,
        rainfall,
        rainy_days,
        humidity,
    }
}

#[rustfmt::skip]
pub(super) fn builtin() -> Vec<WeatherStation> {
    vec![
        station("PAGASA-SG", "Science Garden, Quezon City", 14.645, 121.044,
            [19.0, 12.0, 24.0, 31.0, 165.0, 268.0, 435.0, 495.0, 420.0, 236.0, 125.0, 68.0],
            [4.0, 3.0, 3.0, 4.0, 12.0, 17.0, 22.0, 23.0, 21.0, 15.0, 12.0, 7.0],
            [75.0, 71.0, 68.0, 66.0, 72.0, 79.0, 84.0, 86.0, 85.0, 82.0, 80.0, 79.0]),
        station("PAGASA-BAG", "Baguio City", 16.411, 120.598,
            [14.0, 23.0, 58.0, 124.0, 397.0, 437.0, 1004.0, 1155.0, 744.0, 426.0, 112.0, 34.0],
            [3.0, 3.0, 5.0, 10.0, 20.0, 22.0, 26.0, 26.0, 23.0, 16.0, 9.0, 4.0],
            [83.0, 83.0, 83.0, 86.0, 89.0, 91.0, 93.0, 94.0, 92.0, 89.0, 86.0, 84.0]),
        station("PAGASA-CLSU", "CLSU Munoz, Nueva Ecija", 15.738, 120.935,
            [8.0, 10.0, 17.0, 35.0, 170.0, 260.0, 340.0, 390.0, 300.0, 190.0, 110.0, 40.0],
            [2.0, 2.0, 2.0, 4.0, 11.0, 16.0, 20.0, 22.0, 19.0, 13.0, 8.0, 4.0],
            [74.0, 72.0, 69.0, 68.0, 73.0, 80.0, 84.0, 86.0, 85.0, 82.0, 79.0, 77.0]),
        station("PAGASA-LB", "Los Banos, Laguna", 14.167, 121.250,
            [60.0, 35.0, 35.0, 50.0, 150.0, 210.0, 280.0, 270.0, 260.0, 280.0, 230.0, 140.0],
            [9.0, 6.0, 6.0, 6.0, 12.0, 17.0, 20.0, 19.0, 19.0, 18.0, 15.0, 13.0],
            [82.0, 80.0, 77.0, 76.0, 79.0, 83.0, 86.0, 86.0, 86.0, 85.0, 84.0, 83.0]),
        station("PAGASA-AMB", "Ambulong, Batangas", 14.083, 121.050,
            [20.0, 15.0, 20.0, 35.0, 130.0, 230.0, 290.0, 310.0, 260.0, 200.0, 140.0, 70.0],
            [4.0, 3.0, 3.0, 4.0, 10.0, 16.0, 19.0, 20.0, 18.0, 14.0, 11.0, 8.0],
            [78.0, 76.0, 73.0, 72.0, 76.0, 82.0, 85.0, 86.0, 85.0, 83.0, 81.0, 80.0]),
        station("PAGASA-VIR", "Virac, Catanduanes", 13.583, 124.233,
            [324.0, 226.0, 187.0, 151.0, 178.0, 205.0, 270.0, 237.0, 272.0, 363.0, 589.0, 614.0],
            [21.0, 17.0, 17.0, 14.0, 14.0, 16.0, 19.0, 17.0, 18.0, 21.0, 23.0, 24.0],
            [86.0, 85.0, 84.0, 83.0, 83.0, 83.0, 84.0, 84.0, 85.0, 86.0, 87.0, 87.0]),
        station("PAGASA-LEG", "Legazpi City, Albay", 13.133, 123.733,
            [358.0, 240.0, 201.0, 153.0, 182.0, 247.0, 269.0, 250.0, 280.0, 355.0, 462.0, 508.0],
            [20.0, 16.0, 16.0, 13.0, 13.0, 16.0, 18.0, 17.0, 18.0, 20.0, 22.0, 23.0],
            [85.0, 84.0, 83.0, 82.0, 82.0, 83.0, 84.0, 84.0, 85.0, 86.0, 86.0, 86.0]),
        station("PAGASA-TUG", "Tuguegarao, Cagayan", 17.617, 121.733,
            [190.0, 80.0, 60.0, 55.0, 140.0, 160.0, 200.0, 240.0, 220.0, 260.0, 230.0, 180.0],
            [13.0, 8.0, 6.0, 5.0, 13.0, 13.0, 14.0, 16.0, 15.0, 15.0, 14.0, 13.0],
            [84.0, 80.0, 76.0, 73.0, 75.0, 78.0, 81.0, 83.0, 83.0, 83.0, 84.0, 85.0]),
        station("PAGASA-ILO", "Iloilo City", 10.700, 122.567,
            [60.0, 40.0, 45.0, 50.0, 140.0, 260.0, 340.0, 380.0, 300.0, 260.0, 220.0, 160.0],
            [13.0, 6.0, 6.0, 5.0, 13.0, 17.0, 21.0, 21.0, 19.0, 17.0, 15.0, 13.0],
            [83.0, 81.0, 78.0, 77.0, 79.0, 83.0, 85.0, 86.0, 86.0, 85.0, 85.0, 84.0]),
        station("PAGASA-DAV", "Davao City", 7.117, 125.650,
            [160.0, 140.0, 160.0, 170.0, 220.0, 250.0, 200.0, 190.0, 200.0, 190.0, 170.0, 160.0],
            [15.0, 13.0, 14.0, 13.0, 16.0, 18.0, 17.0, 16.0, 16.0, 17.0, 16.0, 15.0],
            [83.0, 82.0, 81.0, 81.0, 82.0, 84.0, 84.0, 84.0, 84.0, 84.0, 84.0, 83.0]),
        station("PAGASA-MAL", "Malaybalay, Bukidnon", 8.150, 125.083,
            [180.0, 160.0, 150.0, 170.0, 300.0, 340.0, 330.0, 300.0, 310.0, 290.0, 240.0, 190.0],
            [16.0, 14.0, 14.0, 14.0, 20.0, 23.0, 23.0, 22.0, 22.0, 22.0, 19.0, 17.0],
            [86.0, 85.0, 84.0, 84.0, 86.0, 88.0, 88.0, 88.0, 88.0, 88.0, 88.0, 87.0]),
        station("PAGASA-DUM", "Dumaguete City", 9.300, 123.300,
            [110.0, 80.0, 70.0, 55.0, 90.0, 140.0, 150.0, 130.0, 160.0, 180.0, 190.0, 150.0],
            [12.0, 9.0, 8.0, 6.0, 8.0, 12.0, 13.0, 11.0, 13.0, 15.0, 15.0, 14.0],
            [81.0, 80.0, 78.0, 77.0, 78.0, 80.0, 81.0, 80.0, 81.0, 82.0, 83.0, 82.0]),
    ]
}
