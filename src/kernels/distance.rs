//! Distance kernels.

use crate::error::SomError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A distance function between two vectors.
///
/// Both kernels operate over the shorter of two unequal-length inputs, which
/// makes queries with truncated vectors (held-out trailing columns) well
/// defined. Dimensions where either side is a missing-value marker (NaN) are
/// skipped, so rows with missing values can still be matched against the
/// lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Distance {
    /// Square root of the sum of squared differences.
    Euclidean,
    /// Sum of absolute differences.
    Manhattan,
}

impl Distance {
    /// Computes the distance between `from` and `to`.
    pub fn measure(&self, from: &[f64], to: &[f64]) -> f64 {
        match self {
            Distance::Euclidean => euclidean(from, to),
            Distance::Manhattan => manhattan(from, to),
        }
    }
}

impl Default for Distance {
    fn default() -> Self {
        Distance::Euclidean
    }
}

impl FromStr for Distance {
    type Err = SomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "euclidean" => Ok(Distance::Euclidean),
            "manhattan" => Ok(Distance::Manhattan),
            other => Err(SomError::UnknownKernel {
                family: "distance",
                name: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Euclidean => write!(f, "euclidean"),
            Distance::Manhattan => write!(f, "manhattan"),
        }
    }
}

fn euclidean(from: &[f64], to: &[f64]) -> f64 {
    from.iter()
        .zip(to.iter())
        .filter(|(a, b)| !a.is_nan() && !b.is_nan())
        .map(|(a, b)| (a - b) * (a - b))
        .sum::<f64>()
        .sqrt()
}

fn manhattan(from: &[f64], to: &[f64]) -> f64 {
    from.iter()
        .zip(to.iter())
        .filter(|(a, b)| !a.is_nan() && !b.is_nan())
        .map(|(a, b)| (b - a).abs())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euclidean() {
        let d = Distance::Euclidean;
        assert!((d.measure(&[1.0, 1.0], &[0.0, 0.0]) - std::f64::consts::SQRT_2).abs() < 1e-10);
    }

    #[test]
    fn test_manhattan() {
        let d = Distance::Manhattan;
        assert!((d.measure(&[1.0, 1.0], &[0.0, 0.0]) - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_symmetry_and_identity() {
        let a = [0.3, -1.2, 4.5];
        let b = [1.0, 0.0, -2.0];

        for d in [Distance::Euclidean, Distance::Manhattan] {
            assert_eq!(d.measure(&a, &b), d.measure(&b, &a));
            assert_eq!(d.measure(&a, &a), 0.0);
        }
    }

    #[test]
    fn test_unequal_lengths_use_shorter() {
        let d = Distance::Euclidean;
        assert_eq!(d.measure(&[1.0], &[1.0, 100.0]), 0.0);
        assert_eq!(d.measure(&[1.0, 100.0], &[1.0]), 0.0);
    }

    #[test]
    fn test_missing_dimensions_skipped() {
        let d = Distance::Euclidean;
        assert_eq!(d.measure(&[f64::NAN, 1.0], &[5.0, 1.0]), 0.0);
        assert_eq!(d.measure(&[0.0, 1.0], &[0.0, f64::NAN]), 0.0);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("euclidean".parse::<Distance>().unwrap(), Distance::Euclidean);
        assert_eq!("manhattan".parse::<Distance>().unwrap(), Distance::Manhattan);
        assert!("cosine".parse::<Distance>().is_err());
    }
}
