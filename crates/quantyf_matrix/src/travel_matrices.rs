use serde::{Deserialize, Serialize};

use crate::error::MatrixError;

/// Distance and travel time of one directed leg.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct LegMetrics {
    pub distance_km: f64,
    pub time_hours: f64,
}

impl LegMetrics {
    pub fn new(distance_km: f64, time_hours: f64) -> Self {
        LegMetrics {
            distance_km,
            time_hours,
        }
    }
}

/// Sparse directed lookup `(from, to) -> LegMetrics`, stored as a flat vector.
/// To find the index for a pair of locations, use the formula:
/// `index = from * num_locations + to`. A missing entry means there is no direct leg.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TravelMatrices {
    legs: Vec<Option<LegMetrics>>,
    num_locations: usize,
}

impl TravelMatrices {
    pub fn new(num_locations: usize) -> Self {
        TravelMatrices {
            legs: vec![None; num_locations * num_locations],
            num_locations,
        }
    }

    #[inline(always)]
    fn index(&self, from: usize, to: usize) -> usize {
        from * self.num_locations + to
    }

    fn check(&self, from: usize, to: usize, metrics: &LegMetrics) -> Result<(), MatrixError> {
        if from >= self.num_locations || to >= self.num_locations {
            return Err(MatrixError::OutOfBounds {
                from,
                to,
                num_locations: self.num_locations,
            });
        }

        if !metrics.distance_km.is_finite() || metrics.distance_km < 0.0 {
            return Err(MatrixError::InvalidValue {
                from,
                to,
                field: "distance",
                value: metrics.distance_km,
            });
        }

        if !metrics.time_hours.is_finite() || metrics.time_hours < 0.0 {
            return Err(MatrixError::InvalidValue {
                from,
                to,
                field: "time",
                value: metrics.time_hours,
            });
        }

        Ok(())
    }

    pub fn set_leg(
        &mut self,
        from: usize,
        to: usize,
        metrics: LegMetrics,
    ) -> Result<(), MatrixError> {
        self.check(from, to, &metrics)?;
        let index = self.index(from, to);
        self.legs[index] = Some(metrics);
        Ok(())
    }

    /// Sets the leg in both directions.
    pub fn set_symmetric_leg(
        &mut self,
        from: usize,
        to: usize,
        metrics: LegMetrics,
    ) -> Result<(), MatrixError> {
        self.set_leg(from, to, metrics)?;
        self.set_leg(to, from, metrics)
    }

    /// Copies every leg of `other` over this matrix. Both matrices must have the same size.
    pub fn overlay(&mut self, other: &TravelMatrices) -> Result<(), MatrixError> {
        if other.num_locations != self.num_locations {
            return Err(MatrixError::OutOfBounds {
                from: other.num_locations,
                to: other.num_locations,
                num_locations: self.num_locations,
            });
        }

        for (slot, leg) in self.legs.iter_mut().zip(other.legs.iter()) {
            if leg.is_some() {
                *slot = *leg;
            }
        }

        Ok(())
    }

    #[inline(always)]
    pub fn leg(&self, from: usize, to: usize) -> Option<LegMetrics> {
        if from >= self.num_locations || to >= self.num_locations {
            return None;
        }

        self.legs[self.index(from, to)]
    }

    #[inline(always)]
    pub fn has_leg(&self, from: usize, to: usize) -> bool {
        self.leg(from, to).is_some()
    }

    pub fn num_locations(&self) -> usize {
        self.num_locations
    }

    pub fn num_legs(&self) -> usize {
        self.legs.iter().filter(|leg| leg.is_some()).count()
    }

    pub fn is_symmetric(&self) -> bool {
        for i in 0..self.num_locations {
            for j in (i + 1)..self.num_locations {
                if self.legs[self.index(i, j)] != self.legs[self.index(j, i)] {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_leg_is_none() {
        let mut matrices = TravelMatrices::new(3);
        matrices
            .set_leg(0, 1, LegMetrics::new(100.0, 2.0))
            .unwrap();

        assert_eq!(matrices.leg(0, 1), Some(LegMetrics::new(100.0, 2.0)));
        assert_eq!(matrices.leg(1, 0), None);
        assert_eq!(matrices.leg(0, 7), None);
        assert!(!matrices.is_symmetric());
    }

    #[test]
    fn test_symmetric_leg() {
        let mut matrices = TravelMatrices::new(2);
        matrices
            .set_symmetric_leg(0, 1, LegMetrics::new(42.0, 1.0))
            .unwrap();

        assert_eq!(matrices.leg(1, 0), Some(LegMetrics::new(42.0, 1.0)));
        assert_eq!(matrices.num_legs(), 2);
        assert!(matrices.is_symmetric());
    }

    #[test]
    fn test_rejects_negative_distance() {
        let mut matrices = TravelMatrices::new(2);
        let result = matrices.set_leg(0, 1, LegMetrics::new(-1.0, 1.0));

        assert!(matches!(
            result,
            Err(MatrixError::InvalidValue {
                field: "distance",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_out_of_bounds() {
        let mut matrices = TravelMatrices::new(2);
        let result = matrices.set_leg(0, 2, LegMetrics::new(1.0, 1.0));

        assert_eq!(
            result,
            Err(MatrixError::OutOfBounds {
                from: 0,
                to: 2,
                num_locations: 2
            })
        );
    }

    #[test]
    fn test_overlay_overrides_existing_legs() {
        let mut base = TravelMatrices::new(2);
        base.set_symmetric_leg(0, 1, LegMetrics::new(10.0, 1.0))
            .unwrap();

        let mut explicit = TravelMatrices::new(2);
        explicit
            .set_leg(0, 1, LegMetrics::new(12.0, 1.5))
            .unwrap();

        base.overlay(&explicit).unwrap();

        assert_eq!(base.leg(0, 1), Some(LegMetrics::new(12.0, 1.5)));
        assert_eq!(base.leg(1, 0), Some(LegMetrics::new(10.0, 1.0)));
    }
}
