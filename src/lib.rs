//! # somap - Self-Organizing Maps
//!
//! A self-organizing map (SOM) trains a fixed 2D grid of prototype vectors
//! to approximate the distribution of a set of input vectors through
//! competitive learning. The trained lattice supports classification
//! (mapping an input to its nearest prototype) and interpolation (blending
//! several nearby prototypes), useful for dimensionality reduction and
//! missing-value estimation.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use somap::{DataTable, Som};
//!
//! let data = DataTable::from_rows(vec![
//!     vec![0.0, 4.0],
//!     vec![1.0, 3.0],
//!     vec![2.0, 2.0],
//!     vec![3.0, 1.0],
//!     vec![4.0, 0.0],
//! ])?;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let mut som = Som::new(8, 8);
//!
//! som.init_data_points(&data, &mut rng);
//! som.train(&data, 10_000, 0.5, &mut rng)?;
//!
//! // second coordinate should come out close to 3.5
//! let output = som.classify(&[0.5], &mut rng)?;
//! ```
//!
//! ## Architecture
//!
//! - [`dataset`] - numeric tables with per-column statistics and
//!   missing-value tolerance
//! - [`kernels`] - pluggable distance, cooling and neighborhood functions
//! - [`lattice`] - the grid of prototype nodes
//! - [`map`] - initialization, the training step, queries
//! - [`training`] - bounded-annealing schedules
//! - [`storage`] - JSON persistence of trained maps
//! - [`render`] - per-dimension heatmaps and U-matrix images

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod dataset;
pub mod error;
pub mod kernels;
pub mod lattice;
pub mod map;
pub mod render;
pub mod storage;
pub mod training;

// Re-export commonly used types
pub use config::{SomConfig, TrainingConfig};
pub use dataset::DataTable;
pub use error::{Result, SomError};
pub use kernels::{Cooling, Distance, Neighborhood};
pub use lattice::{Lattice, Node};
pub use map::Som;
pub use training::Training;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
