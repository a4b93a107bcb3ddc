//! Single-file compression: decode, measure, skip or resample, encode.

use std::path::{Path, PathBuf};
use log::{debug, error, info};
use crate::audio::{AudioConverter, WavAudio};
use crate::config::CompressionConfig;
use crate::error::{WavShrinkError, Result};
use super::estimator;

/// One input file to bring under the target size.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionJob {
    pub input_path: PathBuf,
    pub output_directory: PathBuf,
    pub target_size_mb: f64,
}

impl CompressionJob {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(input_path: P, output_directory: Q, target_size_mb: f64) -> Self {
        Self {
            input_path: input_path.into(),
            output_directory: output_directory.into(),
            target_size_mb,
        }
    }

    /// `<output_directory>/<stem><suffix>.wav`
    pub fn output_path(&self, suffix: &str) -> Result<PathBuf> {
        let stem = self.input_path.file_stem().ok_or_else(|| {
            WavShrinkError::processing(format!("No file name in {}", self.input_path.display()))
        })?;

        let mut name = stem.to_os_string();
        name.push(suffix);
        name.push(".wav");
        Ok(self.output_directory.join(name))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CompressionOutcome {
    Skipped { current_size_kb: f64 },
    Compressed { output_path: PathBuf, new_frame_rate: u32 },
    Failed { message: String },
}

impl CompressionOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, CompressionOutcome::Failed { .. })
    }
}

#[derive(Debug, Clone, Default)]
pub struct FileCompressor {
    settings: CompressionConfig,
}

impl FileCompressor {
    pub fn new(settings: CompressionConfig) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &CompressionConfig {
        &self.settings
    }

    /// Process one file. Errors stay inside the returned outcome and are
    /// logged here, so a bad file never aborts the batch.
    pub fn compress(&self, job: &CompressionJob) -> CompressionOutcome {
        match self.try_compress(job) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Error processing {}: {}", job.input_path.display(), e);
                CompressionOutcome::Failed { message: e.to_string() }
            }
        }
    }

    fn try_compress(&self, job: &CompressionJob) -> Result<CompressionOutcome> {
        let audio = WavAudio::from_file(&job.input_path)?;
        let props = audio.properties();
        debug!(
            "{}: {} Hz, {} bit, {} ch, {:.2}s",
            job.input_path.display(),
            props.frame_rate,
            props.bit_depth,
            props.channel_count,
            props.duration_seconds
        );

        let current_size_kb = props.estimated_size_kb();
        if current_size_kb <= estimator::megabytes_to_kilobytes(job.target_size_mb) {
            info!("Skipping {}: File size already under target.", job.input_path.display());
            return Ok(CompressionOutcome::Skipped { current_size_kb });
        }

        let new_frame_rate = estimator::reduced_frame_rate_with(
            props.frame_rate,
            job.target_size_mb,
            current_size_kb,
            self.settings.safety_factor,
            self.settings.min_frame_rate,
        );
        let compressed = AudioConverter::convert_frame_rate(&audio, new_frame_rate)?;

        let output_path = job.output_path(&self.settings.output_suffix)?;
        compressed.save_to_file(&output_path)?;

        info!(
            "Compressed {} to {} ({} Hz -> {} Hz)",
            job.input_path.display(),
            output_path.display(),
            props.frame_rate,
            new_frame_rate
        );
        Ok(CompressionOutcome::Compressed { output_path, new_frame_rate })
    }
}

/// Convenience wrapper used by tests and one-off callers.
pub fn compress_file(input_path: &Path, output_directory: &Path, target_size_mb: f64) -> CompressionOutcome {
    FileCompressor::default().compress(&CompressionJob::new(input_path, output_directory, target_size_mb))
}
