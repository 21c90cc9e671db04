//! Configuration for maps and training runs.

use crate::kernels::{Cooling, Distance, Neighborhood};
use serde::{Deserialize, Serialize};

/// Self-organizing map configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SomConfig {
    /// Grid width in nodes.
    /// Default: 10.
    pub width: usize,

    /// Grid height in nodes.
    /// Default: 10.
    pub height: usize,

    /// Distance kernel for weight-space and topological distances.
    /// Default: euclidean.
    pub distance: Distance,

    /// Cooling kernel annealing learning rate and radius.
    /// Default: linear.
    pub cooling: Cooling,

    /// Neighborhood kernel weighting updates around the winner.
    /// Default: cone.
    pub neighborhood: Neighborhood,

    /// Random seed for reproducibility.
    /// Default: None (entropy-seeded).
    pub seed: Option<u64>,
}

impl Default for SomConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            distance: Distance::default(),
            cooling: Cooling::default(),
            neighborhood: Neighborhood::default(),
            seed: None,
        }
    }
}

impl SomConfig {
    /// Returns the total number of nodes in the lattice.
    #[inline]
    pub fn size(&self) -> usize {
        self.width * self.height
    }
}

/// Settings for a bounded-annealing training run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of training steps.
    /// Default: 10,000.
    pub steps: usize,

    /// Initial learning rate.
    /// Default: 0.5.
    pub initial_learning_rate: f64,

    /// Final learning rate.
    /// Default: 0.05.
    pub final_learning_rate: f64,

    /// Initial neighborhood radius. Negative means "use the map default",
    /// `max(width, height) / 2`.
    /// Default: -1.0.
    pub initial_radius: f64,

    /// Final neighborhood radius.
    /// Default: 1.0.
    pub final_radius: f64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            steps: 10_000,
            initial_learning_rate: 0.5,
            final_learning_rate: 0.05,
            initial_radius: -1.0,
            final_radius: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SomConfig::default();
        assert_eq!(config.width, 10);
        assert_eq!(config.size(), 100);
        assert_eq!(config.distance, Distance::Euclidean);
        assert_eq!(config.cooling, Cooling::Linear);
        assert_eq!(config.neighborhood, Neighborhood::Cone);

        let training = TrainingConfig::default();
        assert_eq!(training.steps, 10_000);
        assert!(training.initial_radius < 0.0);
    }
}
