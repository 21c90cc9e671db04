//! Cooling (annealing) kernels.

use crate::error::SomError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A cooling function mapping training progress in `[0, 1]` to a decay
/// factor in `[1, 0]`.
///
/// The factor scales both the learning rate and the neighborhood radius, so
/// the shape of the curve controls how quickly the map freezes. All four
/// kernels are monotonically non-increasing with `factor(0) ≈ 1` and
/// `factor(1) ≈ 0`; the exponential shapes decay increasingly aggressively
/// early on (`hard` fastest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cooling {
    /// Straight line: `1 - p`.
    Linear,
    /// Gentle exponential decay.
    Soft,
    /// Intermediate exponential decay.
    Medium,
    /// Aggressive hyperbolic decay.
    Hard,
}

impl Cooling {
    /// Computes the decay factor for the given progress.
    pub fn factor(&self, progress: f64) -> f64 {
        match self {
            Cooling::Linear => 1.0 - progress,
            Cooling::Soft => {
                let d = -(0.2f64 / 1.2).ln();
                1.2 * (-progress * d).exp() - 0.2
            }
            Cooling::Medium => 1.005 * 0.005f64.powf(progress) - 0.005,
            Cooling::Hard => {
                let d = 1.0 / 101.0;
                (1.0 + d) / (1.0 + 100.0 * progress) - d
            }
        }
    }

    /// All cooling kernels, in selector order.
    pub const ALL: [Cooling; 4] = [Cooling::Linear, Cooling::Soft, Cooling::Medium, Cooling::Hard];
}

impl Default for Cooling {
    fn default() -> Self {
        Cooling::Linear
    }
}

impl FromStr for Cooling {
    type Err = SomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(Cooling::Linear),
            "soft" => Ok(Cooling::Soft),
            "medium" => Ok(Cooling::Medium),
            "hard" => Ok(Cooling::Hard),
            other => Err(SomError::UnknownKernel {
                family: "cooling",
                name: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Cooling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cooling::Linear => write!(f, "linear"),
            Cooling::Soft => write!(f, "soft"),
            Cooling::Medium => write!(f, "medium"),
            Cooling::Hard => write!(f, "hard"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_endpoints() {
        assert_eq!(Cooling::Linear.factor(0.0), 1.0);
        assert_eq!(Cooling::Linear.factor(1.0), 0.0);
    }

    #[test]
    fn test_endpoints() {
        for cooling in Cooling::ALL {
            assert!((cooling.factor(0.0) - 1.0).abs() < 1e-3, "{cooling} at 0");
            assert!(cooling.factor(1.0).abs() < 1e-3, "{cooling} at 1");
        }
    }

    #[test]
    fn test_non_increasing() {
        for cooling in Cooling::ALL {
            let mut previous = cooling.factor(0.0);
            for i in 1..=100 {
                let current = cooling.factor(i as f64 / 100.0);
                assert!(current <= previous + 1e-12, "{cooling} increased at {i}");
                previous = current;
            }
        }
    }

    #[test]
    fn test_hard_decays_fastest() {
        let p = 0.1;
        assert!(Cooling::Hard.factor(p) < Cooling::Medium.factor(p));
        assert!(Cooling::Medium.factor(p) < Cooling::Soft.factor(p));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("soft".parse::<Cooling>().unwrap(), Cooling::Soft);
        assert!("glacial".parse::<Cooling>().is_err());
    }
}
