//! wav-shrink command line entry point

use anyhow::Context;
use clap::Parser;
use log::{debug, info};
use std::process;
use wavshrink::processing::{
    build_jobs, discover_wav_files, prepare_output_directory, BatchRunner, ParallelBatchProcessor,
    SequentialBatchProcessor,
};
use wavshrink::{Args, Config};

fn main() {
    let args = Args::parse();

    let config = match Config::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(config) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(config: Config) -> anyhow::Result<()> {
    if config.serial() {
        wavshrink::init_logging(config.verbose());
        info!("Starting the audio compression application...");

        let runner = SequentialBatchProcessor::new(config.compression.clone());
        run_batch(&config, &runner)
    } else {
        let aggregator = wavshrink::init_queue_logging(config.verbose())
            .context("failed to start log aggregator")?;
        info!("Starting the audio compression application...");

        let result = ParallelBatchProcessor::new(config.compression.clone(), config.workers())
            .context("failed to build worker pool")
            .and_then(|runner| run_batch(&config, &runner));

        // the pool has drained by now, so the sentinel follows every record
        aggregator.shutdown().context("failed to stop log aggregator")?;
        result
    }
}

fn run_batch(config: &Config, runner: &dyn BatchRunner) -> anyhow::Result<()> {
    debug!("{}", wavshrink::get_library_info());

    if !config.directory.is_dir() {
        anyhow::bail!("input directory does not exist: {}", config.directory.display());
    }

    let output_directory = prepare_output_directory(&config.directory, &config.compression.output_dir_name)
        .context("cannot prepare output directory")?;

    let files = discover_wav_files(&config.directory)
        .with_context(|| format!("cannot scan {}", config.directory.display()))?;
    info!("Found {} WAV files for processing.", files.len());

    let jobs = build_jobs(&files, &output_directory, config.target_size_mb);
    let report = runner.run(&jobs);

    info!("Audio compression completed: {}", report);
    Ok(())
}
