//! Trajectory dataset files.
//!
//! A dataset is a CSV export with one measured flight per row. Headers are
//! trimmed, columns beyond the ones [`TrajectorySample`] knows about (for
//! example pre-computed per-material carries) are ignored.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{CalcError, Result};
use crate::trajectory::{TrajectorySample, TrajectoryTable};

/// Environment variable naming the dataset when `--data` is not given.
pub const DATA_PATH_ENV: &str = "GSP_TRAJECTORY_DATA";

/// Locations tried, in order, when nothing names the dataset explicitly.
pub const DEFAULT_DATA_PATHS: [&str; 2] = ["data/trajectories.csv", "trajectory_data/trajectories.csv"];

/// Resolve which dataset to load: explicit path, then the environment, then
/// the first default location that exists.
pub fn find_dataset(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Some(path) = std::env::var_os(DATA_PATH_ENV) {
        log::debug!("[DATASET] Using {} from {}", Path::new(&path).display(), DATA_PATH_ENV);
        return Some(PathBuf::from(path));
    }

    DEFAULT_DATA_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file())
}

/// Parse samples from any CSV source.
pub fn read_samples<R: Read>(reader: R) -> Result<Vec<TrajectorySample>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut samples = Vec::new();
    for record in reader.deserialize() {
        let sample: TrajectorySample = record?;
        samples.push(sample);
    }
    Ok(samples)
}

/// Load a dataset file into a lookup table.
pub fn load_csv(path: &Path) -> Result<TrajectoryTable> {
    let file = File::open(path).map_err(|source| CalcError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let samples = read_samples(file)?;
    if samples.is_empty() {
        return Err(CalcError::EmptyDataset {
            path: path.to_path_buf(),
        });
    }

    let table = TrajectoryTable::from_samples(samples);
    if let Some(coverage) = table.coverage() {
        log::info!(
            "[DATASET] Loaded {} samples ({} spin/VLA pairs) from {}: {:.0}-{:.0} mph, {:.0}-{:.0} rpm, {:.1}-{:.1} deg",
            table.len(),
            table.pair_count(),
            path.display(),
            coverage.ball_speed.0,
            coverage.ball_speed.1,
            coverage.back_spin.0,
            coverage.back_spin.1,
            coverage.vla.0,
            coverage.vla.1
        );
    }
    Ok(table)
}

/// Write samples with the same headers [`read_samples`] expects.
pub fn write_csv(path: &Path, samples: &[TrajectorySample]) -> Result<()> {
    let io_err = |source| CalcError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_err)?;
    let mut writer = csv::Writer::from_writer(file);
    for sample in samples {
        writer.serialize(sample)?;
    }
    writer.flush().map_err(io_err)?;
    log::info!("[DATASET] Wrote {} samples to {}", samples.len(), path.display());
    Ok(())
}
