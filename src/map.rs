//! The self-organizing map: initialization, queries and the training step.

use crate::config::SomConfig;
use crate::dataset::DataTable;
use crate::error::{Result, SomError};
use crate::kernels::{Cooling, Distance, Neighborhood};
use crate::lattice::{Lattice, Node};
use log::{debug, info};
use rand::Rng;

/// A self-organizing map.
///
/// The map owns a rectangular [`Lattice`] of prototype nodes together with
/// the three kernel selectors that drive training and queries. It is created
/// with an empty lattice; every operation other than initialization returns
/// [`SomError::NotInitialized`] until one of the initializers has populated
/// the lattice from a data table.
///
/// All randomness (row sampling, tie breaking) is drawn from a generator
/// supplied by the caller, so a fixed seed makes training fully
/// reproducible.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Som {
    /// Grid width in nodes.
    pub width: usize,
    /// Grid height in nodes.
    pub height: usize,
    /// The lattice of prototype nodes (empty until initialized).
    #[serde(default)]
    pub nodes: Lattice,
    /// Distance kernel.
    pub distance: Distance,
    /// Cooling kernel.
    pub cooling: Cooling,
    /// Neighborhood kernel.
    pub neighborhood: Neighborhood,
}

impl Som {
    /// Creates a new, uninitialized map with default kernels
    /// (euclidean / linear / cone).
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            nodes: Lattice::default(),
            distance: Distance::default(),
            cooling: Cooling::default(),
            neighborhood: Neighborhood::default(),
        }
    }

    /// Creates a new, uninitialized map from a configuration.
    pub fn from_config(config: &SomConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            nodes: Lattice::default(),
            distance: config.distance,
            cooling: config.cooling,
            neighborhood: config.neighborhood,
        }
    }

    /// Returns the total number of nodes the lattice will hold.
    #[inline]
    pub fn size(&self) -> usize {
        self.width * self.height
    }

    /// Returns the weight vector dimensionality.
    pub fn dimensions(&self) -> Result<usize> {
        self.ensure_initialized()?;
        Ok(self.nodes[0].weights.len())
    }

    /// Returns the node at grid coordinate `(x, y)`, if in bounds.
    pub fn node(&self, x: usize, y: usize) -> Option<&Node> {
        if x < self.width && y < self.height {
            self.nodes.get(y * self.width + x)
        } else {
            None
        }
    }

    fn ensure_initialized(&self) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(SomError::NotInitialized);
        }
        Ok(())
    }

    /// Initializes the lattice with each weight drawn uniformly from its
    /// column's `[minimum, maximum]` range.
    pub fn init_random<R: Rng>(&mut self, data: &DataTable, rng: &mut R) {
        self.nodes = Lattice::new(self.width, self.height, data.columns());

        for node in self.nodes.iter_mut() {
            for (i, weight) in node.weights.iter_mut().enumerate() {
                let min = data.minimums()[i];
                let max = data.maximums()[i];

                *weight = if !min.is_finite() || !max.is_finite() {
                    0.0
                } else if max > min {
                    rng.gen_range(min..=max)
                } else {
                    min
                };
            }
        }
    }

    /// Initializes the lattice by copying each node's weights from an
    /// independently, uniformly sampled row (with replacement).
    pub fn init_data_points<R: Rng>(&mut self, data: &DataTable, rng: &mut R) {
        self.nodes = Lattice::new(self.width, self.height, data.columns());

        for node in self.nodes.iter_mut() {
            node.weights.copy_from_slice(data.random_row(rng));
        }
    }

    /// Finds the node whose weights are closest to `input`.
    ///
    /// The scan tracks every node exactly tied at the running minimum (exact
    /// float equality) and picks one of them uniformly at random, so only
    /// the distance of the result is deterministic, not the node identity.
    pub fn closest<R: Rng>(&self, input: &[f64], rng: &mut R) -> Result<&Node> {
        self.ensure_initialized()?;

        let mut best = self.distance.measure(input, &self.nodes[0].weights);
        let mut ties = vec![&self.nodes[0]];

        for node in self.nodes.iter().skip(1) {
            let d = self.distance.measure(input, &node.weights);

            if d < best {
                best = d;
                ties.clear();
                ties.push(node);
            } else if d == best {
                ties.push(node);
            }
        }

        if ties.len() > 1 {
            Ok(ties[rng.gen_range(0..ties.len())])
        } else {
            Ok(ties[0])
        }
    }

    /// Returns the `k` nodes nearest to `input`, ordered by ascending
    /// distance.
    ///
    /// `k` must satisfy `0 < k <= lattice size`.
    pub fn neighbors(&self, input: &[f64], k: usize) -> Result<Vec<&Node>> {
        self.ensure_initialized()?;

        if k == 0 || k > self.nodes.len() {
            return Err(SomError::InvalidNeighborCount {
                k,
                size: self.nodes.len(),
            });
        }

        let ordered = self.nodes.ranked_by(|a, b| {
            let da = self.distance.measure(input, &a.weights);
            let db = self.distance.measure(input, &b.weights);
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(ordered.into_iter().take(k).collect())
    }

    /// Applies one competitive-learning update with externally supplied
    /// scalars: finds the winner for `input` and pulls every node within
    /// twice the radius toward the input, weighted by the neighborhood
    /// kernel.
    ///
    /// The inclusion cutoff is `2 * radius` rather than `radius` so that
    /// long-tailed kernels (gaussian, mexican-hat) are not truncated where
    /// their influence is still non-negligible.
    pub fn update<R: Rng>(
        &mut self,
        input: &[f64],
        learning_rate: f64,
        radius: f64,
        rng: &mut R,
    ) -> Result<()> {
        let winner = self.closest(input, rng)?.position();

        let distance = self.distance;
        let neighborhood = self.neighborhood;

        for node in self.nodes.iter_mut() {
            let topological = distance.measure(&winner, &node.position());

            if topological < radius * 2.0 {
                let influence = neighborhood.influence(topological / radius);
                node.adjust(input, influence * learning_rate);
            }
        }

        Ok(())
    }

    /// Performs exactly one stochastic training step under the map's default
    /// "decay toward zero" schedule.
    ///
    /// Learning rate and radius are the initial values scaled by the cooling
    /// factor at `step / steps`; the initial radius is `max(width, height) / 2`.
    pub fn step<R: Rng>(
        &mut self,
        data: &DataTable,
        step: usize,
        steps: usize,
        initial_learning_rate: f64,
        rng: &mut R,
    ) -> Result<()> {
        self.ensure_initialized()?;

        let progress = step as f64 / steps as f64;
        let factor = self.cooling.factor(progress);

        let learning_rate = initial_learning_rate * factor;
        let initial_radius = self.width.max(self.height) as f64 / 2.0;
        let radius = initial_radius * factor;

        debug!("step {step}/{steps}: lr={learning_rate:.4}, radius={radius:.2}");

        let input = data.random_row(rng);
        self.update(input, learning_rate, radius, rng)
    }

    /// Trains the map for the given number of steps.
    pub fn train<R: Rng>(
        &mut self,
        data: &DataTable,
        steps: usize,
        initial_learning_rate: f64,
        rng: &mut R,
    ) -> Result<()> {
        info!(
            "training {}x{} map for {} steps on {} rows",
            self.width,
            self.height,
            steps,
            data.rows()
        );

        for step in 0..steps {
            self.step(data, step, steps, initial_learning_rate, rng)?;
        }

        Ok(())
    }

    /// Returns an owned copy of the winner's weights, never an alias into
    /// lattice state.
    pub fn classify<R: Rng>(&self, input: &[f64], rng: &mut R) -> Result<Vec<f64>> {
        Ok(self.closest(input, rng)?.weights.clone())
    }

    /// Returns the unweighted per-dimension mean of the `k` nearest nodes'
    /// weight vectors.
    pub fn interpolate(&self, input: &[f64], k: usize) -> Result<Vec<f64>> {
        let neighbors = self.neighbors(input, k)?;
        let dimensions = self.nodes[0].weights.len();

        let mut total = vec![0.0; dimensions];
        for neighbor in &neighbors {
            for (t, w) in total.iter_mut().zip(neighbor.weights.iter()) {
                *t += w;
            }
        }

        for t in &mut total {
            *t /= k as f64;
        }

        Ok(total)
    }

    /// Returns a neighborhood-kernel-weighted mean of the `k` nearest nodes'
    /// weight vectors.
    ///
    /// The local radius is the distance to the farthest of the `k`
    /// neighbors; each neighbor's weight is the neighborhood influence of
    /// its distance normalized by that radius. A zero local radius (all
    /// neighbors equidistant from the input) or a degenerate influence sum
    /// falls back to the unweighted mean.
    pub fn weighted_interpolate(&self, input: &[f64], k: usize) -> Result<Vec<f64>> {
        let neighbors = self.neighbors(input, k)?;
        let dimensions = self.nodes[0].weights.len();

        let local_radius = self.distance.measure(input, &neighbors[k - 1].weights);
        if local_radius == 0.0 {
            return self.interpolate(input, k);
        }

        let mut total = vec![0.0; dimensions];
        let mut influence_sum = 0.0;

        for neighbor in &neighbors {
            let d = self.distance.measure(input, &neighbor.weights);
            let influence = self.neighborhood.influence(d / local_radius);

            influence_sum += influence;
            for (t, w) in total.iter_mut().zip(neighbor.weights.iter()) {
                *t += w * influence;
            }
        }

        if influence_sum <= 0.0 || !influence_sum.is_finite() {
            return self.interpolate(input, k);
        }

        for t in &mut total {
            *t /= influence_sum;
        }

        Ok(total)
    }

    /// Returns a data-table-shaped copy of all node weights, in canonical
    /// lattice order (used to render per-dimension heatmaps).
    pub fn weights_table(&self) -> Result<DataTable> {
        self.ensure_initialized()?;

        let rows = self.nodes.iter().map(|node| node.weights.clone()).collect();
        DataTable::from_rows(rows)
    }
}
