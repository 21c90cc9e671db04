//! JSON persistence for trained maps.
//!
//! The serialized document carries exactly the map's `width`, `height`,
//! kernel selectors and per-node `{x, y, weights}` state, so a loaded map
//! can resume training where it left off.

use crate::error::Result;
use crate::map::Som;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Saves a map to a JSON file.
pub fn save<P: AsRef<Path>>(som: &Som, path: P) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), som)?;
    Ok(())
}

/// Loads a map from a JSON file.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Som> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Serializes a map to a JSON string.
pub fn to_json(som: &Som) -> Result<String> {
    Ok(serde_json::to_string_pretty(som)?)
}

/// Deserializes a map from a JSON string.
pub fn from_json(json: &str) -> Result<Som> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DataTable;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn trained_map() -> Som {
        let data = DataTable::from_rows(vec![vec![0.0, 4.0], vec![4.0, 0.0]]).unwrap();
        let mut som = Som::new(3, 2);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        som.init_random(&data, &mut rng);
        som.train(&data, 50, 0.5, &mut rng).unwrap();
        som
    }

    #[test]
    fn test_json_round_trip() {
        let som = trained_map();

        let json = to_json(&som).unwrap();
        let loaded = from_json(&json).unwrap();

        assert_eq!(loaded, som);
    }

    #[test]
    fn test_load_uninitialized_lattice() {
        let json = r#"{
            "width": 2,
            "height": 2,
            "nodes": [{"x": 0, "y": 0, "weights": [0.1, 0.2]}],
            "distance": "euclidean",
            "cooling": "linear",
            "neighborhood": "cone"
        }"#;

        let som = from_json(json).unwrap();
        assert_eq!(som.width, 2);
        assert_eq!(som.nodes.len(), 1);
        assert_eq!(som.nodes[0].weights, vec![0.1, 0.2]);
    }

    #[test]
    fn test_rejects_unknown_kernel_name() {
        let json = r#"{
            "width": 1,
            "height": 1,
            "nodes": [],
            "distance": "cosine",
            "cooling": "linear",
            "neighborhood": "cone"
        }"#;

        assert!(from_json(json).is_err());
    }
}
