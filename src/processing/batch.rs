//! File discovery and shared batch plumbing

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use log::{error, info};
use crate::error::{WavShrinkError, Result};
use super::{CompressionJob, CompressionOutcome};

/// Drives a `FileCompressor` over a set of jobs.
pub trait BatchRunner {
    fn run(&self, jobs: &[CompressionJob]) -> BatchReport;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub total: usize,
    pub compressed: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchReport {
    pub fn record(&mut self, outcome: &CompressionOutcome) {
        self.total += 1;
        match outcome {
            CompressionOutcome::Skipped { .. } => self.skipped += 1,
            CompressionOutcome::Compressed { .. } => self.compressed += 1,
            CompressionOutcome::Failed { .. } => self.failed += 1,
        }
    }

    pub fn from_outcomes<'a, I: IntoIterator<Item = &'a CompressionOutcome>>(outcomes: I) -> Self {
        let mut report = Self::default();
        for outcome in outcomes {
            report.record(outcome);
        }
        report
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} files: {} compressed, {} skipped, {} failed",
            self.total, self.compressed, self.skipped, self.failed
        )
    }
}

/// List `*.wav` files (any case) directly inside `directory`, sorted by path.
pub fn discover_wav_files(directory: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(directory).map_err(|e| {
        WavShrinkError::io(format!("Cannot list directory {}: {}", directory.display(), e))
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && is_wav(&path) {
            files.push(path);
        }
    }
    files.sort();

    Ok(files)
}

fn is_wav(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"))
}

/// Create `<directory>/<name>` if needed and return it.
pub fn prepare_output_directory(directory: &Path, name: &str) -> Result<PathBuf> {
    let output = directory.join(name);
    std::fs::create_dir_all(&output).map_err(|e| {
        WavShrinkError::io(format!("Cannot create output directory {}: {}", output.display(), e))
    })?;
    info!("Output directory created at {}", output.display());
    Ok(output)
}

pub fn build_jobs(files: &[PathBuf], output_directory: &Path, target_size_mb: f64) -> Vec<CompressionJob> {
    files
        .iter()
        .map(|path| CompressionJob::new(path, output_directory, target_size_mb))
        .collect()
}

/// Split off jobs whose output path is already claimed by an earlier job.
/// `a.wav` and `a.WAV` both map to `a<suffix>.wav`; the first one wins and
/// every later one becomes a logged failure instead of overwriting it.
pub fn split_duplicate_outputs<'a>(
    jobs: &'a [CompressionJob],
    suffix: &str,
) -> (Vec<&'a CompressionJob>, Vec<CompressionOutcome>) {
    let mut claimed = HashSet::new();
    let mut unique = Vec::with_capacity(jobs.len());
    let mut rejected = Vec::new();

    for job in jobs {
        // a job without an output path fails later in the compressor
        let Ok(output) = job.output_path(suffix) else {
            unique.push(job);
            continue;
        };
        if claimed.insert(output.clone()) {
            unique.push(job);
        } else {
            let message = format!("Output {} already claimed by another input", output.display());
            error!("Error processing {}: {}", job.input_path.display(), message);
            rejected.push(CompressionOutcome::Failed { message });
        }
    }

    (unique, rejected)
}
