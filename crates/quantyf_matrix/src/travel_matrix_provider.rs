use geo::{Distance, Haversine};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::MatrixError,
    travel_matrices::{LegMetrics, TravelMatrices},
};

const METERS_PER_KM: f64 = 1000.0;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, JsonSchema)]
pub enum TravelMatrixProvider {
    /// Only the legs listed explicitly in the input exist.
    Explicit,

    /// Great-circle distance between every pair of located points, scaled by a circuity
    /// factor to approximate road distance.
    AsTheCrowFlies {
        speed_kmh: f64,
        circuity_factor: Option<f64>,
    },
}

impl TravelMatrixProvider {
    /// Computes a matrix for `points`. Points without a location get no legs.
    pub fn compute_matrices(
        &self,
        points: &[Option<geo_types::Point>],
    ) -> Result<TravelMatrices, MatrixError> {
        let mut matrices = TravelMatrices::new(points.len());

        match self {
            TravelMatrixProvider::Explicit => {}
            TravelMatrixProvider::AsTheCrowFlies {
                speed_kmh,
                circuity_factor,
            } => {
                if !speed_kmh.is_finite() || *speed_kmh <= 0.0 {
                    return Err(MatrixError::InvalidSpeed(*speed_kmh));
                }

                let circuity_factor = circuity_factor.unwrap_or(1.0);
                if !circuity_factor.is_finite() || circuity_factor < 1.0 {
                    return Err(MatrixError::InvalidCircuityFactor(circuity_factor));
                }

                let located: Vec<(usize, geo_types::Point)> = points
                    .iter()
                    .enumerate()
                    .filter_map(|(index, point)| point.map(|p| (index, p)))
                    .collect();

                for &(i, from) in located.iter() {
                    for &(j, to) in located.iter() {
                        if i == j {
                            continue;
                        }

                        let distance_km =
                            Haversine.distance(from, to) / METERS_PER_KM * circuity_factor;
                        matrices.set_leg(
                            i,
                            j,
                            LegMetrics::new(distance_km, distance_km / speed_kmh),
                        )?;
                    }
                }

                debug!(
                    "Computed as-the-crow-flies matrix for {} located points",
                    located.len()
                );
            }
        }

        Ok(matrices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lon: f64, lat: f64) -> Option<geo_types::Point> {
        Some(geo_types::Point::new(lon, lat))
    }

    #[test]
    fn test_explicit_provider_is_empty() {
        let points = vec![point(0.0, 0.0), point(1.0, 1.0)];
        let matrices = TravelMatrixProvider::Explicit
            .compute_matrices(&points)
            .unwrap();

        assert_eq!(matrices.num_locations(), 2);
        assert_eq!(matrices.num_legs(), 0);
    }

    #[test]
    fn test_as_the_crow_flies() {
        // Mumbai and Delhi, lon/lat
        let points = vec![
            point(72.8777, 19.0760),
            point(77.1025, 28.7041),
            None,
        ];
        let provider = TravelMatrixProvider::AsTheCrowFlies {
            speed_kmh: 50.0,
            circuity_factor: Some(1.2),
        };
        let matrices = provider.compute_matrices(&points).unwrap();

        let leg = matrices.leg(0, 1).unwrap();
        // ~1150 km great-circle, scaled by 1.2
        assert!(leg.distance_km > 1300.0 && leg.distance_km < 1450.0);
        assert!((leg.time_hours - leg.distance_km / 50.0).abs() < 1e-9);
        let back = matrices.leg(1, 0).unwrap();
        assert!((back.distance_km - leg.distance_km).abs() < 1e-6);
        assert!(!matrices.has_leg(0, 2));
        assert!(!matrices.has_leg(0, 0));
    }

    #[test]
    fn test_invalid_speed() {
        let points = vec![point(0.0, 0.0)];
        let provider = TravelMatrixProvider::AsTheCrowFlies {
            speed_kmh: 0.0,
            circuity_factor: None,
        };

        assert_eq!(
            provider.compute_matrices(&points),
            Err(MatrixError::InvalidSpeed(0.0))
        );
    }

    #[test]
    fn test_deserialize_provider() {
        let provider: TravelMatrixProvider =
            serde_json::from_str(r#"{"AsTheCrowFlies":{"speed_kmh":60.0,"circuity_factor":null}}"#)
                .unwrap();

        assert_eq!(
            provider,
            TravelMatrixProvider::AsTheCrowFlies {
                speed_kmh: 60.0,
                circuity_factor: None
            }
        );
    }
}
