use serde::Serialize;

use crate::reference::WeatherStation;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates, km.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (phi1, phi2) = (lat1.to_radians(), lat2.to_radians());
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().min(1.0).asin()
}

/// A station that contributed to an interpolated series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationWeight {
    pub station_id: String,
    pub station_name: String,
    pub distance_km: f64,
    pub weight: f64,
}

/// Twelve-month normals estimated at a query point.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolatedSeries {
    pub rainfall: [f64; 12],
    pub rainy_days: [f64; 12],
    pub humidity: [f64; 12],
    pub stations: Vec<StationWeight>,
}

/// Blends the two nearest stations with weight `1 − dᵢ/(d₁+d₂)`.
///
/// Returns `None` only when the station table is empty.
pub fn interpolate(
    stations: &[WeatherStation],
    latitude: f64,
    longitude: f64,
) -> Option<InterpolatedSeries> {
    let mut ranked: Vec<(f64, &WeatherStation)> = stations
        .iter()
        .map(|station| {
            (
                haversine_km(latitude, longitude, station.latitude, station.longitude),
                station,
            )
        })
        .collect();
    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
    ranked.truncate(2);

    let weights: Vec<f64> = match ranked.as_slice() {
        [] => return None,
        [_] => vec![1.0],
        [(d1, _), (d2, _), ..] => {
            let total = d1 + d2;
            if total > 0.0 {
                vec![1.0 - d1 / total, 1.0 - d2 / total]
            } else {
                vec![1.0, 0.0]
            }
        }
    };

    let mut series = InterpolatedSeries {
        rainfall: [0.0; 12],
        rainy_days: [0.0; 12],
        humidity: [0.0; 12],
        stations: Vec::with_capacity(ranked.len()),
    };
    for ((distance, station), weight) in ranked.iter().zip(&weights) {
        for month in 0..12 {
            series.rainfall[month] += weight * station.rainfall[month];
            series.rainy_days[month] += weight * station.rainy_days[month];
            series.humidity[month] += weight * station.humidity[month];
        }
        series.stations.push(StationWeight {
            station_id: station.id.clone(),
            station_name: station.name.clone(),
            distance_km: *distance,
            weight: *weight,
        });
    }

    Some(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_station(id: &str, latitude: f64, longitude: f64, rainfall: f64) -> WeatherStation {
        WeatherStation {
            id: id.to_string(),
            name: id.to_string(),
            latitude,
            longitude,
            rainfall: [rainfall; 12],
            rainy_days: [10.0; 12],
            humidity: [80.0; 12],
        }
    }

    #[test]
    fn haversine_matches_known_distance() {
        // Manila to Cebu is roughly 570 km.
        let distance = haversine_km(14.5995, 120.9842, 10.3157, 123.8854);
        assert!((distance - 570.0).abs() < 15.0, "distance {distance}");
        assert_eq!(haversine_km(14.0, 121.0, 14.0, 121.0), 0.0);
    }

    #[test]
    fn nearer_station_gets_more_weight() {
        let stations = [
            flat_station("near", 14.0, 121.0, 100.0),
            flat_station("far", 14.0, 122.0, 400.0),
            flat_station("farthest", 20.0, 125.0, 900.0),
        ];
        let series = interpolate(&stations, 14.0, 121.25).expect("stations available");

        assert_eq!(series.stations.len(), 2);
        assert_eq!(series.stations[0].station_id, "near");
        assert!((series.stations[0].weight - 0.75).abs() < 1e-3);
        assert!((series.stations[1].weight - 0.25).abs() < 1e-3);
        assert!((series.rainfall[0] - 175.0).abs() < 0.5);
    }

    #[test]
    fn coincident_stations_give_full_weight_to_first() {
        let stations = [
            flat_station("a", 14.0, 121.0, 100.0),
            flat_station("b", 14.0, 121.0, 300.0),
        ];
        let series = interpolate(&stations, 14.0, 121.0).expect("stations available");
        assert_eq!(series.stations[0].weight, 1.0);
        assert_eq!(series.stations[1].weight, 0.0);
        assert_eq!(series.rainfall[5], 100.0);
    }

    #[test]
    fn single_station_is_used_directly() {
        let stations = [flat_station("only", 10.0, 122.0, 250.0)];
        let series = interpolate(&stations, 14.0, 121.0).expect("stations available");
        assert_eq!(series.rainfall, [250.0; 12]);
        assert_eq!(series.stations[0].weight, 1.0);
    }

    #[test]
    fn empty_table_yields_nothing() {
        assert!(interpolate(&[], 14.0, 121.0).is_none());
    }
}
