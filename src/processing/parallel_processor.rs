//! Parallel batch processing on a fixed-size worker pool
//!
//! Jobs are independent and side-effect only, so each one runs to completion
//! on whichever worker picks it up. Completion order is unspecified. Logging
//! from workers goes through the process-wide logger; in parallel mode that is
//! a `QueueLogger` feeding a single `LogAggregator`.

use log::{info, warn};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use crate::config::CompressionConfig;
use crate::error::{WavShrinkError, Result};
use super::{
    split_duplicate_outputs, BatchReport, BatchRunner, CompressionJob, CompressionOutcome, FileCompressor,
};

pub struct ParallelBatchProcessor {
    compressor: FileCompressor,
    pool: ThreadPool,
}

impl ParallelBatchProcessor {
    pub fn new(settings: CompressionConfig, num_workers: usize) -> Result<Self> {
        let num_workers = num_workers.max(1);
        let pool = ThreadPoolBuilder::new()
            .num_threads(num_workers)
            .thread_name(|i| format!("wav-shrink-worker-{}", i))
            .build()
            .map_err(|e| WavShrinkError::processing(format!("Cannot start worker pool: {}", e)))?;

        Ok(Self {
            compressor: FileCompressor::new(settings),
            pool,
        })
    }

    pub fn worker_count(&self) -> usize {
        self.pool.current_num_threads()
    }
}

impl BatchRunner for ParallelBatchProcessor {
    fn run(&self, jobs: &[CompressionJob]) -> BatchReport {
        info!("Starting worker pool with {} workers for {} files", self.worker_count(), jobs.len());

        // two inputs writing one output would race, so collisions never reach the pool
        let (unique, rejected) = split_duplicate_outputs(jobs, &self.compressor.settings().output_suffix);

        // install() returns only after every job has finished
        let outcomes: Vec<CompressionOutcome> = self.pool.install(|| {
            unique.par_iter().map(|job| self.compressor.compress(job)).collect()
        });

        let report = BatchReport::from_outcomes(rejected.iter().chain(&outcomes));
        if report.failed > 0 {
            warn!("{} of {} files failed", report.failed, report.total);
        }
        info!("Parallel run finished: {}", report);
        report
    }
}
