//! Sequential batch processing with a progress bar

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::info;
use crate::config::CompressionConfig;
use super::{split_duplicate_outputs, BatchReport, BatchRunner, CompressionJob, FileCompressor};

const PROGRESS_TEMPLATE: &str = "{msg} {bar:40.cyan/blue} {pos}/{len} [{elapsed_precise}<{eta_precise}]";

pub struct SequentialBatchProcessor {
    compressor: FileCompressor,
    show_progress: bool,
}

impl SequentialBatchProcessor {
    pub fn new(settings: CompressionConfig) -> Self {
        Self {
            compressor: FileCompressor::new(settings),
            show_progress: true,
        }
    }

    /// Hide the progress bar; used when output is not a terminal or in tests.
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        let bar = ProgressBar::new(len as u64);
        if !self.show_progress {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        if let Ok(style) = ProgressStyle::default_bar().template(PROGRESS_TEMPLATE) {
            bar.set_style(style.progress_chars("#>-"));
        }
        bar.set_message("Processing WAV files");
        bar
    }

    /// Run the batch against a caller-owned bar. The bar advances once per
    /// job whether it was compressed, skipped or failed.
    pub fn run_with_progress(&self, jobs: &[CompressionJob], bar: &ProgressBar) -> BatchReport {
        let suffix = &self.compressor.settings().output_suffix;
        let (unique, rejected) = bar.suspend(|| split_duplicate_outputs(jobs, suffix));
        let mut report = BatchReport::default();

        for outcome in &rejected {
            report.record(outcome);
            bar.inc(1);
        }
        for job in unique {
            // log lines are written while the bar is cleared from the terminal
            let outcome = bar.suspend(|| self.compressor.compress(job));
            report.record(&outcome);
            bar.inc(1);
        }
        bar.finish();

        report
    }
}

impl BatchRunner for SequentialBatchProcessor {
    fn run(&self, jobs: &[CompressionJob]) -> BatchReport {
        let bar = self.progress_bar(jobs.len());
        let report = self.run_with_progress(jobs, &bar);

        info!("Sequential run finished: {}", report);
        report
    }
}
