//! Integration tests: end-to-end training, querying and persistence.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use somap::{storage, DataTable, Som, SomError, Training, TrainingConfig};
use tempfile::tempdir;

/// Five points on the line y = 4 - x.
fn line_data() -> DataTable {
    DataTable::from_rows(vec![
        vec![0.0, 4.0],
        vec![1.0, 3.0],
        vec![2.0, 2.0],
        vec![3.0, 1.0],
        vec![4.0, 0.0],
    ])
    .unwrap()
}

fn trained_line_map(seed: u64) -> (Som, ChaCha8Rng) {
    let data = line_data();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut som = Som::new(8, 8);

    som.init_data_points(&data, &mut rng);
    som.train(&data, 10_000, 0.5, &mut rng).unwrap();

    (som, rng)
}

#[test]
fn test_initialization_weight_lengths() {
    let data = line_data();
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    let mut som = Som::new(6, 4);
    som.init_random(&data, &mut rng);
    assert!(som.nodes.iter().all(|n| n.weights.len() == data.columns()));

    let mut som = Som::new(6, 4);
    som.init_data_points(&data, &mut rng);
    assert!(som.nodes.iter().all(|n| n.weights.len() == data.columns()));
}

#[test]
fn test_convergence_on_line() {
    let (som, mut rng) = trained_line_map(42);

    // classifying a held-out first coordinate estimates the second
    let output = som.classify(&[0.5], &mut rng).unwrap();
    assert!(
        (output[1] - 3.5).abs() < 0.75,
        "expected ~3.5, got {}",
        output[1]
    );

    let output = som.classify(&[3.5], &mut rng).unwrap();
    assert!(
        (output[1] - 0.5).abs() < 0.75,
        "expected ~0.5, got {}",
        output[1]
    );
}

#[test]
fn test_interpolation_on_line() {
    let (som, _) = trained_line_map(7);

    let output = som.interpolate(&[2.0], 8).unwrap();
    assert!(
        (output[1] - 2.0).abs() < 1.0,
        "expected ~2.0, got {}",
        output[1]
    );

    let weighted = som.weighted_interpolate(&[2.0], 8).unwrap();
    assert!(
        (weighted[1] - 2.0).abs() < 1.0,
        "expected ~2.0, got {}",
        weighted[1]
    );
}

#[test]
fn test_schedule_training_converges() {
    let data = line_data();
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let mut som = Som::new(8, 8);

    som.init_data_points(&data, &mut rng);

    let training = Training::new(
        &som,
        &TrainingConfig {
            steps: 10_000,
            initial_learning_rate: 0.5,
            final_learning_rate: 0.02,
            initial_radius: -1.0,
            final_radius: 0.5,
        },
    );
    training.run(&mut som, &data, &mut rng).unwrap();

    let output = som.classify(&[1.5], &mut rng).unwrap();
    assert!(
        (output[1] - 2.5).abs() < 0.75,
        "expected ~2.5, got {}",
        output[1]
    );
}

#[test]
fn test_held_out_accuracy_pipeline() {
    let (som, mut rng) = trained_line_map(3);
    let data = line_data();

    // hold out the trailing column, query on the rest
    let inputs = data.sub_range(0, data.columns() - 1).unwrap();

    let mut total_error = 0.0;
    for i in 0..data.rows() {
        let output = som.classify(inputs.row(i).unwrap(), &mut rng).unwrap();
        total_error += (output[1] - data.row(i).unwrap()[1]).abs();
    }

    assert!(total_error / (data.rows() as f64) < 1.0);
}

#[test]
fn test_storage_round_trip() {
    let (som, _) = trained_line_map(5);

    let dir = tempdir().unwrap();
    let path = dir.path().join("line.som.json");

    storage::save(&som, &path).unwrap();
    let loaded = storage::load(&path).unwrap();

    assert_eq!(loaded.width, som.width);
    assert_eq!(loaded.height, som.height);
    assert_eq!(loaded.distance, som.distance);
    assert_eq!(loaded.cooling, som.cooling);
    assert_eq!(loaded.neighborhood, som.neighborhood);
    assert_eq!(loaded.nodes, som.nodes);
}

#[test]
fn test_resumed_training_after_load() {
    let (som, mut rng) = trained_line_map(9);

    let dir = tempdir().unwrap();
    let path = dir.path().join("resume.som.json");
    storage::save(&som, &path).unwrap();

    let mut resumed = storage::load(&path).unwrap();
    resumed.train(&line_data(), 100, 0.05, &mut rng).unwrap();

    assert_eq!(resumed.dimensions().unwrap(), 2);
}

#[test]
fn test_uninitialized_map_is_rejected() {
    let som = Som::new(4, 4);
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    assert!(matches!(
        som.classify(&[0.0], &mut rng),
        Err(SomError::NotInitialized)
    ));
    assert!(matches!(som.interpolate(&[0.0], 1), Err(SomError::NotInitialized)));
}

#[test]
fn test_unknown_kernel_selectors() {
    assert!(matches!(
        "chebyshev".parse::<somap::Distance>(),
        Err(SomError::UnknownKernel { family: "distance", .. })
    ));
    assert!(matches!(
        "exponential".parse::<somap::Cooling>(),
        Err(SomError::UnknownKernel { family: "cooling", .. })
    ));
    assert!(matches!(
        "triangle".parse::<somap::Neighborhood>(),
        Err(SomError::UnknownKernel { family: "neighborhood", .. })
    ));
}

#[test]
fn test_missing_values_tolerated_in_training() {
    let data = DataTable::from_rows(vec![
        vec![0.0, 4.0],
        vec![1.0, f64::NAN],
        vec![2.0, 2.0],
        vec![f64::NAN, 1.0],
        vec![4.0, 0.0],
    ])
    .unwrap();
    assert!(data.has_missing());

    let mut rng = ChaCha8Rng::seed_from_u64(13);
    let mut som = Som::new(6, 6);

    som.init_random(&data, &mut rng);
    som.train(&data, 2_000, 0.5, &mut rng).unwrap();

    // all weights stay numeric despite missing training dimensions
    for node in &som.nodes {
        assert!(node.weights.iter().all(|w| w.is_finite()));
    }
}
