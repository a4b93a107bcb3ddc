//! Compression Pipeline

pub mod estimator;
pub mod compressor;
pub mod batch;
pub mod processor;
pub mod parallel_processor;

pub use estimator::{estimate_size_kb, reduced_frame_rate, reduced_frame_rate_with};
pub use compressor::{compress_file, CompressionJob, CompressionOutcome, FileCompressor};
pub use batch::{
    build_jobs, discover_wav_files, prepare_output_directory, split_duplicate_outputs, BatchReport,
    BatchRunner,
};
pub use processor::SequentialBatchProcessor;
pub use parallel_processor::ParallelBatchProcessor;
