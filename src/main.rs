//! somap CLI - train, query and plot self-organizing maps.

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::error;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use somap::{render, storage, DataTable, Result, Som, SomConfig, Training, TrainingConfig};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "somap")]
#[command(version)]
#[command(about = "Self-organizing maps for the command line", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create and initialize a new map from a data table
    Prepare {
        /// Map file to create
        file: PathBuf,

        /// Data table (CSV, or JSON with a .json extension)
        data: PathBuf,

        /// Grid width in nodes
        width: usize,

        /// Grid height in nodes
        height: usize,

        /// Initialization method (random, data-points)
        #[arg(short, long, default_value = "data-points")]
        initialization: String,

        /// Distance function (euclidean, manhattan)
        #[arg(short, long, default_value = "euclidean")]
        distance: String,

        /// Cooling function (linear, soft, medium, hard)
        #[arg(short, long, default_value = "linear")]
        cooling: String,

        /// Neighborhood function (bubble, cone, gaussian, mexican-hat)
        #[arg(short, long, default_value = "cone")]
        neighborhood: String,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Train an existing map on a data table
    Train {
        /// Map file to train
        file: PathBuf,

        /// Data table (CSV, or JSON with a .json extension)
        data: PathBuf,

        /// Number of training steps
        #[arg(short, long, default_value_t = 10_000)]
        steps: usize,

        /// Initial learning rate
        #[arg(short, long, default_value_t = 0.5)]
        learning_rate: f64,

        /// Final learning rate
        #[arg(long, default_value_t = 0.05)]
        final_learning_rate: f64,

        /// Initial neighborhood radius (negative: max(width, height) / 2)
        #[arg(short, long, default_value_t = -1.0, allow_hyphen_values = true)]
        radius: f64,

        /// Final neighborhood radius
        #[arg(long, default_value_t = 1.0)]
        final_radius: f64,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Classify an input vector against a trained map
    Classify {
        /// Map file to use
        file: PathBuf,

        /// Comma-separated input vector (non-numeric entries are missing)
        input: String,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Interpolate an input vector from the nearest nodes
    Interpolate {
        /// Map file to use
        file: PathBuf,

        /// Comma-separated input vector (non-numeric entries are missing)
        input: String,

        /// Number of nearest neighbors to blend
        #[arg(short = 'k', long, default_value_t = 3)]
        neighbors: usize,

        /// Weight neighbors by the neighborhood function
        #[arg(short, long)]
        weighted: bool,
    },

    /// Measure estimation accuracy against held-out trailing columns
    Test {
        /// Map file to use
        file: PathBuf,

        /// Data table the map was trained on
        data: PathBuf,

        /// Number of trailing columns to hold out
        #[arg(long, default_value_t = 1)]
        holdout: usize,

        /// Number of nearest neighbors for interpolation
        #[arg(short = 'k', long, default_value_t = 3)]
        neighbors: usize,

        /// Only print aggregate errors
        #[arg(short, long)]
        quiet: bool,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Plot per-dimension heatmaps and the U-matrix as PNG files
    Plot {
        /// Map file to use
        file: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Output file prefix
        #[arg(short, long, default_value = "som")]
        prefix: String,

        /// Pixel size of one node cell
        #[arg(long, default_value_t = 10)]
        cell: u32,
    },
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let result = match cli.command {
        Commands::Prepare {
            file,
            data,
            width,
            height,
            initialization,
            distance,
            cooling,
            neighborhood,
            seed,
        } => run_prepare(
            &file, &data, width, height, &initialization, &distance, &cooling, &neighborhood, seed,
        ),
        Commands::Train {
            file,
            data,
            steps,
            learning_rate,
            final_learning_rate,
            radius,
            final_radius,
            seed,
        } => run_train(
            &file,
            &data,
            TrainingConfig {
                steps,
                initial_learning_rate: learning_rate,
                final_learning_rate,
                initial_radius: radius,
                final_radius,
            },
            seed,
        ),
        Commands::Classify { file, input, seed } => run_classify(&file, &input, seed),
        Commands::Interpolate {
            file,
            input,
            neighbors,
            weighted,
        } => run_interpolate(&file, &input, neighbors, weighted),
        Commands::Test {
            file,
            data,
            holdout,
            neighbors,
            quiet,
            seed,
        } => run_test(&file, &data, holdout, neighbors, quiet, seed),
        Commands::Plot {
            file,
            output,
            prefix,
            cell,
        } => run_plot(&file, &output, &prefix, cell),
    };

    if let Err(e) = result {
        error!("{e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn load_data(path: &Path) -> Result<DataTable> {
    let reader = BufReader::new(File::open(path)?);

    if path.extension().is_some_and(|ext| ext == "json") {
        DataTable::from_json(reader)
    } else {
        DataTable::from_csv(reader)
    }
}

fn parse_input(input: &str) -> Vec<f64> {
    input
        .split(',')
        .map(|token| token.trim().parse::<f64>().unwrap_or(f64::NAN))
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn run_prepare(
    file: &Path,
    data: &Path,
    width: usize,
    height: usize,
    initialization: &str,
    distance: &str,
    cooling: &str,
    neighborhood: &str,
    seed: Option<u64>,
) -> Result<()> {
    let table = load_data(data)?;

    let config = SomConfig {
        width,
        height,
        distance: distance.parse()?,
        cooling: cooling.parse()?,
        neighborhood: neighborhood.parse()?,
        seed,
    };

    let mut rng = seeded_rng(config.seed);
    let mut som = Som::from_config(&config);

    match initialization {
        "random" => som.init_random(&table, &mut rng),
        "data-points" => {
            if table.has_missing() {
                eprintln!("Cannot initialize with data points: the table has missing values.");
                std::process::exit(1);
            }
            som.init_data_points(&table, &mut rng);
        }
        other => {
            eprintln!("Unknown initialization method: '{other}'.");
            std::process::exit(1);
        }
    }

    storage::save(&som, file)?;
    println!("Prepared a new {width}x{height} map and saved it to '{}'.", file.display());
    Ok(())
}

fn run_train(file: &Path, data: &Path, config: TrainingConfig, seed: Option<u64>) -> Result<()> {
    let mut som = storage::load(file)?;
    let table = load_data(data)?;
    let mut rng = seeded_rng(seed);

    let training = Training::new(&som, &config);

    let pb = ProgressBar::new(config.steps as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap()
            .progress_chars("#>-"),
    );

    for step in 0..config.steps {
        training.step(&mut som, &table, step, &mut rng)?;
        pb.inc(1);
    }
    pb.finish_and_clear();

    storage::save(&som, file)?;
    println!("Trained the map for {} steps and saved it to '{}'.", config.steps, file.display());
    Ok(())
}

fn run_classify(file: &Path, input: &str, seed: Option<u64>) -> Result<()> {
    let som = storage::load(file)?;
    let mut rng = seeded_rng(seed);

    let input = parse_input(input);
    let output = som.classify(&input, &mut rng)?;

    println!("{input:?} -> {output:?}");
    Ok(())
}

fn run_interpolate(file: &Path, input: &str, neighbors: usize, weighted: bool) -> Result<()> {
    let som = storage::load(file)?;

    let input = parse_input(input);
    let output = if weighted {
        som.weighted_interpolate(&input, neighbors)?
    } else {
        som.interpolate(&input, neighbors)?
    };

    println!("{input:?} -> {output:?}");
    Ok(())
}

fn run_test(
    file: &Path,
    data: &Path,
    holdout: usize,
    neighbors: usize,
    quiet: bool,
    seed: Option<u64>,
) -> Result<()> {
    let som = storage::load(file)?;
    let table = load_data(data)?;
    let mut rng = seeded_rng(seed);

    if holdout == 0 || holdout >= table.columns() {
        eprintln!("Holdout must leave at least one input column.");
        std::process::exit(1);
    }

    let inputs = table.sub_range(0, table.columns() - holdout)?;

    println!("Classification:");
    report_errors(&table, &inputs, quiet, |input| som.classify(input, &mut rng))?;

    println!("\nInterpolation (k={neighbors}):");
    report_errors(&table, &inputs, quiet, |input| som.interpolate(input, neighbors))?;

    println!("\nWeighted interpolation (k={neighbors}):");
    report_errors(&table, &inputs, quiet, |input| {
        som.weighted_interpolate(input, neighbors)
    })?;

    Ok(())
}

/// Runs the estimator on every held-out row and reports the per-column error
/// as a percentage of the column's value range.
fn report_errors<F>(table: &DataTable, inputs: &DataTable, quiet: bool, mut estimate: F) -> Result<()>
where
    F: FnMut(&[f64]) -> Result<Vec<f64>>,
{
    let mut errors = Vec::with_capacity(table.rows());

    for i in 0..table.rows() {
        let input = inputs.row(i).expect("input rows match table rows");
        let full = table.row(i).expect("row index in bounds");
        let output = estimate(input)?;

        let mut row_errors = Vec::new();
        for j in inputs.columns()..table.columns() {
            let mut divider = table.maximums()[j] - table.minimums()[j];
            if divider == 0.0 {
                divider = 1.0;
            }
            row_errors.push(100.0 / divider * (output[j] - full[j]).abs());
        }

        let row_error = row_errors.iter().sum::<f64>() / row_errors.len() as f64;
        errors.push(row_error);

        if !quiet {
            println!("  {full:?}: {output:?} (error: {row_error:.2}%)");
        }
    }

    let min = errors.iter().copied().fold(f64::INFINITY, f64::min);
    let max = errors.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let avg = errors.iter().sum::<f64>() / errors.len() as f64;

    println!("  min: {min:.2}%, max: {max:.2}%, avg: {avg:.2}%");
    Ok(())
}

fn run_plot(file: &Path, output: &Path, prefix: &str, cell: u32) -> Result<()> {
    let som = storage::load(file)?;

    std::fs::create_dir_all(output)?;

    for (i, image) in render::dimension_maps(&som, cell)?.iter().enumerate() {
        let path = output.join(format!("{prefix}-dimension-{i}.png"));
        image.save(&path)?;
        println!("Plotted dimension {i} to '{}'.", path.display());
    }

    let path = output.join(format!("{prefix}-umatrix.png"));
    render::u_matrix(&som, cell)?.save(&path)?;
    println!("Plotted U-matrix to '{}'.", path.display());

    Ok(())
}
