//! Neighborhood (influence) kernels.

use crate::error::SomError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A neighborhood function mapping a normalized topological distance (grid
/// distance to the winner divided by the current radius) to an update
/// influence in `[0, 1]`.
///
/// `bubble` and `cone` saturate to zero at normalized distance 1; `gaussian`
/// and `mexican-hat` have tails that stay non-zero beyond it, which is why
/// the training step widens its inclusion cutoff to twice the radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Neighborhood {
    /// Step kernel: full influence inside the radius, none outside.
    Bubble,
    /// Linear falloff to zero at the radius.
    Cone,
    /// Smooth exponential falloff, non-zero beyond the radius.
    Gaussian,
    /// Ricker wavelet, clipped to its positive lobe.
    #[serde(rename = "mexican-hat")]
    MexicanHat,
}

impl Neighborhood {
    /// Computes the influence for the given normalized distance.
    pub fn influence(&self, distance: f64) -> f64 {
        match self {
            Neighborhood::Bubble => {
                if distance.abs() < 1.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Neighborhood::Cone => {
                let d = distance.abs();
                if d < 1.0 {
                    1.0 - d
                } else {
                    0.0
                }
            }
            Neighborhood::Gaussian => {
                let std_dev = 5.5f64;
                let norm = (2.0 * 2.0f64.powi(2)) / std_dev.powi(2);
                (-distance * distance / norm).exp()
            }
            Neighborhood::MexicanHat => {
                let square = (distance * 1.5).powi(2);
                ((1.0 - square) * (-square).exp()).max(0.0)
            }
        }
    }
}

impl Default for Neighborhood {
    fn default() -> Self {
        Neighborhood::Cone
    }
}

impl FromStr for Neighborhood {
    type Err = SomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bubble" => Ok(Neighborhood::Bubble),
            "cone" => Ok(Neighborhood::Cone),
            "gaussian" => Ok(Neighborhood::Gaussian),
            "mexican-hat" | "mexicanhat" => Ok(Neighborhood::MexicanHat),
            other => Err(SomError::UnknownKernel {
                family: "neighborhood",
                name: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Neighborhood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Neighborhood::Bubble => write!(f, "bubble"),
            Neighborhood::Cone => write!(f, "cone"),
            Neighborhood::Gaussian => write!(f, "gaussian"),
            Neighborhood::MexicanHat => write!(f, "mexican-hat"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bubble() {
        assert_eq!(Neighborhood::Bubble.influence(0.5), 1.0);
        assert_eq!(Neighborhood::Bubble.influence(1.5), 0.0);
        assert_eq!(Neighborhood::Bubble.influence(-0.5), 1.0);
    }

    #[test]
    fn test_cone() {
        assert_eq!(Neighborhood::Cone.influence(0.0), 1.0);
        assert!((Neighborhood::Cone.influence(0.5) - 0.5).abs() < 1e-10);
        assert_eq!(Neighborhood::Cone.influence(1.0), 0.0);
    }

    #[test]
    fn test_gaussian_has_tail() {
        let g = Neighborhood::Gaussian;
        assert!((g.influence(0.0) - 1.0).abs() < 1e-10);
        assert!(g.influence(1.0) > 0.0);
        assert!(g.influence(1.0) < g.influence(0.5));
    }

    #[test]
    fn test_mexican_hat_positive_lobe() {
        let m = Neighborhood::MexicanHat;
        assert!((m.influence(0.0) - 1.0).abs() < 1e-10);
        // past the zero crossing at d = 2/3 the curve is clipped
        assert_eq!(m.influence(1.0), 0.0);
        assert!(m.influence(0.5) > 0.0);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("mexican-hat".parse::<Neighborhood>().unwrap(), Neighborhood::MexicanHat);
        assert_eq!("mexicanhat".parse::<Neighborhood>().unwrap(), Neighborhood::MexicanHat);
        assert!("sombrero".parse::<Neighborhood>().is_err());
    }
}
