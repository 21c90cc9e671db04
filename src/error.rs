//! Error types for SOM construction, training and persistence.

use thiserror::Error;

/// The main error type for SOM operations.
#[derive(Error, Debug)]
pub enum SomError {
    /// A data table was constructed from rows of inconsistent width.
    #[error("malformed input: row {row} has {actual} columns, expected {expected}")]
    MalformedInput {
        /// Index of the offending row.
        row: usize,
        /// Column count established by the first row.
        expected: usize,
        /// Column count actually found.
        actual: usize,
    },

    /// A data table was constructed without any rows or columns.
    #[error("empty data table")]
    EmptyTable,

    /// A kernel selector did not name a known function.
    #[error("unknown {family} function: '{name}'")]
    UnknownKernel {
        /// Kernel family ("distance", "cooling" or "neighborhood").
        family: &'static str,
        /// The unrecognized selector.
        name: String,
    },

    /// A map operation was invoked before the lattice was initialized.
    #[error("map is not initialized")]
    NotInitialized,

    /// A neighbor query asked for zero nodes or more nodes than exist.
    #[error("invalid neighbor count: {k} (lattice has {size} nodes)")]
    InvalidNeighborCount {
        /// The requested number of neighbors.
        k: usize,
        /// The lattice size.
        size: usize,
    },

    /// A column sub-range did not fit inside the table.
    #[error("column range [{start}, {start}+{length}) is out of bounds for {columns} columns")]
    InvalidColumnRange {
        /// First column of the requested range.
        start: usize,
        /// Length of the requested range.
        length: usize,
        /// Number of columns in the table.
        columns: usize,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Image encoding error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type alias for SOM operations.
pub type Result<T> = std::result::Result<T, SomError>;
