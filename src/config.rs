//! Configuration management for batch compression

use crate::error::{WavShrinkError, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_SAFETY_FACTOR: f64 = 0.95;
pub const DEFAULT_MIN_FRAME_RATE: u32 = 1;
pub const DEFAULT_OUTPUT_DIR_NAME: &str = "Compressed_WAVs";
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_compressed";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub compression: CompressionConfig,
    pub processing: ProcessingConfig,
    pub directory: PathBuf,
    pub target_size_mb: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionConfig {
    pub safety_factor: f64,
    pub min_frame_rate: u32,
    pub output_dir_name: String,
    pub output_suffix: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    pub serial: bool,
    pub workers: usize,
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            compression: CompressionConfig::default(),
            processing: ProcessingConfig::default(),
            directory: PathBuf::from("."),
            target_size_mb: 1.0,
        }
    }
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            safety_factor: DEFAULT_SAFETY_FACTOR,
            min_frame_rate: DEFAULT_MIN_FRAME_RATE,
            output_dir_name: DEFAULT_OUTPUT_DIR_NAME.to_string(),
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
        }
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            serial: false,
            workers: utils::cpu_count(),
            verbose: false,
        }
    }
}

impl Config {
    pub fn workers(&self) -> usize {
        self.processing.workers
    }

    pub fn verbose(&self) -> bool {
        self.processing.verbose
    }

    pub fn serial(&self) -> bool {
        self.processing.serial
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "wav-shrink", about = "Compress WAV files by adjusting sample rate", version)]
pub struct Args {
    #[arg(help = "Directory containing WAV files")]
    pub directory_path: PathBuf,

    #[arg(help = "Target size for each file in megabytes")]
    pub target_size_mb: f64,

    #[arg(short = 's', long = "serial", help = "Process files one at a time with a progress bar")]
    pub serial: bool,

    #[arg(short = 'w', long = "workers", help = "Worker pool size (defaults to logical CPU count)")]
    pub workers: Option<usize>,

    #[arg(short = 'v', long = "verbose", help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(short = 'c', long = "config", help = "Config file path (TOML format)")]
    pub config_file: Option<PathBuf>,
}

impl Config {
    /// Create config from command line arguments and optional config file
    pub fn from_args(args: Args) -> Result<Self> {
        let mut config = if let Some(config_path) = &args.config_file {
            Self::from_file(config_path)?
        } else {
            Self::default()
        };

        // Command line arguments override config file settings
        config.directory = args.directory_path;
        config.target_size_mb = args.target_size_mb;
        if args.serial {
            config.processing.serial = true;
        }
        if let Some(workers) = args.workers {
            config.processing.workers = workers;
        }
        if args.verbose {
            config.processing.verbose = true;
        }

        config.validate()?;

        Ok(config)
    }

    /// Load config from TOML config file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| WavShrinkError::config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| WavShrinkError::config(format!("Failed to parse config file: {}", e)))
    }

    /// Validate configuration parameters. The target size is left to the caller.
    pub fn validate(&self) -> Result<()> {
        let c = &self.compression;
        if !(c.safety_factor > 0.0 && c.safety_factor <= 1.0) {
            return Err(WavShrinkError::config("Safety factor must be in range (0.0, 1.0]"));
        }
        if c.min_frame_rate == 0 {
            return Err(WavShrinkError::config("Minimum frame rate must be at least 1 Hz"));
        }
        if c.output_dir_name.is_empty() {
            return Err(WavShrinkError::config("Output directory name cannot be empty"));
        }
        if has_separator(&c.output_dir_name) || has_separator(&c.output_suffix) {
            return Err(WavShrinkError::config(
                "Output directory name and suffix cannot contain path separators",
            ));
        }
        if self.processing.workers == 0 {
            return Err(WavShrinkError::config("Worker count must be greater than 0"));
        }

        Ok(())
    }

    /// Save config to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| WavShrinkError::config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| WavShrinkError::config(format!("Failed to write config file: {}", e)))
    }
}

fn has_separator(s: &str) -> bool {
    s.contains('/') || s.contains(std::path::MAIN_SEPARATOR)
}

pub mod utils {
    pub fn cpu_count() -> usize {
        num_cpus::get()
    }
}
