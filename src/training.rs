//! Bounded-annealing training schedule.

use crate::config::TrainingConfig;
use crate::dataset::DataTable;
use crate::error::Result;
use crate::kernels::Cooling;
use crate::map::Som;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// An immutable training schedule blending initial and final bounds through
/// a cooling kernel.
///
/// Unlike the map's default "decay toward zero" schedule, the learning rate
/// and radius interpolate between explicit initial and final values:
/// `value(step) = (initial - final) * cooling(progress) + final`. The
/// schedule does not own or mutate the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Training {
    /// Total number of steps in the run.
    pub steps: usize,
    /// Learning rate at step 0.
    pub initial_learning_rate: f64,
    /// Learning rate the schedule decays toward.
    pub final_learning_rate: f64,
    /// Radius at step 0.
    pub initial_radius: f64,
    /// Radius the schedule decays toward.
    pub final_radius: f64,
    /// Cooling kernel the bounds are blended through.
    pub cooling: Cooling,
}

impl Training {
    /// Creates a schedule for the given map.
    ///
    /// A negative configured initial radius selects the map default,
    /// `max(width, height) / 2`.
    pub fn new(som: &Som, config: &TrainingConfig) -> Self {
        let initial_radius = if config.initial_radius < 0.0 {
            som.width.max(som.height) as f64 / 2.0
        } else {
            config.initial_radius
        };

        Self {
            steps: config.steps,
            initial_learning_rate: config.initial_learning_rate,
            final_learning_rate: config.final_learning_rate,
            initial_radius,
            final_radius: config.final_radius,
            cooling: som.cooling,
        }
    }

    /// Returns the training progress at `step`, in `[0, 1]`.
    #[inline]
    pub fn progress(&self, step: usize) -> f64 {
        step as f64 / self.steps as f64
    }

    /// Returns the learning rate at `step`.
    pub fn learning_rate(&self, step: usize) -> f64 {
        let range = self.initial_learning_rate - self.final_learning_rate;
        range * self.cooling.factor(self.progress(step)) + self.final_learning_rate
    }

    /// Returns the neighborhood radius at `step`.
    pub fn radius(&self, step: usize) -> f64 {
        let range = self.initial_radius - self.final_radius;
        range * self.cooling.factor(self.progress(step)) + self.final_radius
    }

    /// Drives one training step on the map with this schedule's scalars.
    pub fn step<R: Rng>(
        &self,
        som: &mut Som,
        data: &DataTable,
        step: usize,
        rng: &mut R,
    ) -> Result<()> {
        let learning_rate = self.learning_rate(step);
        let radius = self.radius(step);

        let input = data.random_row(rng);
        som.update(input, learning_rate, radius, rng)
    }

    /// Runs the full schedule against the map.
    pub fn run<R: Rng>(&self, som: &mut Som, data: &DataTable, rng: &mut R) -> Result<()> {
        for step in 0..self.steps {
            self.step(som, data, step, rng)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn schedule() -> Training {
        let som = Som::new(8, 4);
        let config = TrainingConfig {
            steps: 100,
            initial_learning_rate: 0.5,
            final_learning_rate: 0.05,
            initial_radius: -1.0,
            final_radius: 1.0,
        };
        Training::new(&som, &config)
    }

    #[test]
    fn test_default_radius_from_map() {
        let training = schedule();
        assert_eq!(training.initial_radius, 4.0);
    }

    #[test]
    fn test_learning_rate_bounds() {
        let training = schedule();
        assert!((training.learning_rate(0) - 0.5).abs() < 1e-10);
        assert!((training.learning_rate(100) - 0.05).abs() < 1e-10);
    }

    #[test]
    fn test_radius_bounds() {
        let training = schedule();
        assert!((training.radius(0) - 4.0).abs() < 1e-10);
        assert!((training.radius(100) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_run() {
        let data = DataTable::from_rows(vec![vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
        let mut som = Som::new(4, 4);
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        som.init_data_points(&data, &mut rng);

        let training = Training::new(&som, &TrainingConfig { steps: 50, ..Default::default() });
        training.run(&mut som, &data, &mut rng).unwrap();
    }
}
